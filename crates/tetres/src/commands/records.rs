//! Handlers shared by every record kind: years, get, insert, insert-all,
//! update and delete.

use tabled::Tabled;
use tetres_core::{DataClient, DataEvent, Entity, EntityId, GetKey, Snapshot};
use tracing::{debug, info};

use crate::cli::{GlobalOpts, RecordCommand};
use crate::error::CliError;
use crate::output;

use super::Session;
use super::util;

/// A record kind the CLI can print.
pub trait Resource: Entity {
    type Row: Tabled;

    fn row(&self) -> Self::Row;

    /// `(label, value)` pairs for the single-record view.
    fn detail(&self) -> Vec<(&'static str, String)>;
}

#[derive(Tabled)]
struct YearRow {
    #[tabled(rename = "Year")]
    year: i32,
}

fn id_of<T: Entity>(entity: &T) -> String {
    output::opt_cell(entity.id())
}

/// Log every event of `client` at info (success) or debug (failure) level.
///
/// Failures are reported to the user through the returned error already.
pub fn trace_events<T: Entity>(client: &DataClient<T>) {
    client.on_event(|event: &DataEvent<T>| match event.failure() {
        Some(res) => debug!(kind = T::KIND, event = event.name(), %res, "data event"),
        None => info!(kind = T::KIND, event = event.name(), "data event"),
    });
}

pub fn print_list<T: Resource>(global: &GlobalOpts, snap: &Snapshot<T>) {
    let out = output::render_list(&global.output, &snap[..], |e| e.row(), |e| id_of::<T>(e));
    output::print_output(&out, global.quiet);
}

pub fn print_one<T: Resource>(global: &GlobalOpts, entity: &T) {
    let out = output::render_single(&global.output, entity, T::detail, id_of::<T>);
    output::print_output(&out, global.quiet);
}

pub fn handle<T: Resource>(
    session: &Session<'_>,
    client: &DataClient<T>,
    cmd: RecordCommand,
) -> Result<(), CliError> {
    let global = session.global;
    match cmd {
        RecordCommand::Years => {
            let c = client.clone();
            let outcome = session.run("Loading years", async move { c.years().await })?;
            let years = util::settle(T::KIND, outcome)?;
            let out = output::render_list(
                &global.output,
                &years,
                |y| YearRow { year: *y },
                ToString::to_string,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RecordCommand::Get { id, name } => {
            let key = match (id, name) {
                (_, Some(name)) => GetKey::Name(name),
                (Some(id), None) => GetKey::Id(EntityId::new(id)),
                (None, None) => {
                    return Err(CliError::Validation {
                        field: "id".into(),
                        reason: "an id or --name is required".into(),
                    });
                }
            };
            let entity = fetch(session, client, key)?;
            print_one(global, &entity);
            Ok(())
        }

        RecordCommand::Insert { file, route } => {
            if route.is_some() {
                return Err(CliError::Validation {
                    field: "route".into(),
                    reason: format!("--route does not apply to {} records", T::KIND),
                });
            }
            let entity: T = util::read_json_file(&file)?;
            let c = client.clone();
            let outcome = session.run("Saving", async move { c.insert(&entity).await })?;
            let id = util::settle(T::KIND, outcome)?;
            output::print_status(&format!("Created {} {id}", T::KIND), global.quiet);
            Ok(())
        }

        RecordCommand::InsertAll { file } => {
            let entities: Vec<T> = util::read_json_file(&file)?;
            let count = entities.len();
            let c = client.clone();
            let outcome =
                session.run("Saving", async move { c.insert_all(&entities).await })?;
            util::settle(T::KIND, outcome)?;
            output::print_status(&format!("Created {count} {} records", T::KIND), global.quiet);
            Ok(())
        }

        RecordCommand::Update { id, file } => {
            let new: T = util::read_json_file(&file)?;
            let old = fetch(session, client, GetKey::Id(EntityId::new(id)))?;
            let c = client.clone();
            let outcome = session.run("Saving", async move { c.update(&old, &new).await })?;
            let id = util::settle(T::KIND, outcome)?;
            output::print_status(&format!("Updated {} {id}", T::KIND), global.quiet);
            Ok(())
        }

        RecordCommand::Delete { ids } => {
            let ids: Vec<EntityId> = ids.into_iter().map(EntityId::new).collect();
            let listed = ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
            if !util::confirm(&format!("Delete {} {listed}?", T::KIND), global.yes)? {
                return Ok(());
            }
            let c = client.clone();
            let outcome = session.run("Deleting", async move { c.delete(&ids).await })?;
            let confirmed = util::settle(T::KIND, outcome)?;
            output::print_status(
                &format!("Deleted {} {} records", confirmed.len(), T::KIND),
                global.quiet,
            );
            Ok(())
        }
    }
}

fn fetch<T: Resource>(
    session: &Session<'_>,
    client: &DataClient<T>,
    key: GetKey,
) -> Result<T, CliError> {
    let c = client.clone();
    let outcome = session.run("Loading", async move { c.get(key).await })?;
    util::settle(T::KIND, outcome)
}
