//! Reliability route command handlers.

use serde_json::Value;
use tabled::Tabled;
use tetres_core::{Entity, EntityId, ReliabilityRoute, ReliabilityRouteClient};

use crate::cli::{ReliabilityRoutesArgs, ReliabilityRoutesCommand};
use crate::error::CliError;
use crate::output;

use super::records::{self, Resource};
use super::{Session, util};

#[derive(Tabled)]
pub struct ReliabilityRouteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Corridor")]
    corridor: String,
    #[tabled(rename = "Stations")]
    stations: String,
}

impl Resource for ReliabilityRoute {
    type Row = ReliabilityRouteRow;

    fn row(&self) -> ReliabilityRouteRow {
        ReliabilityRouteRow {
            id: output::opt_cell(self.id),
            name: self.name.clone(),
            corridor: self.corridor.clone().unwrap_or_default(),
            stations: output::opt_cell(self.rnode_count()),
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", output::opt_cell(self.id)),
            ("Name", self.name.clone()),
            ("Corridor", self.corridor.clone().unwrap_or_default()),
            ("Description", self.description.clone().unwrap_or_default()),
            ("Stations", output::opt_cell(self.rnode_count())),
        ]
    }
}

fn route_detail(route: &Value) -> Vec<(&'static str, String)> {
    let text = |key: &str| route.get(key).and_then(Value::as_str).unwrap_or_default().to_owned();
    vec![
        ("Name", text("name")),
        ("Description", text("desc")),
        (
            "Stations",
            output::opt_cell(route.get("rnodes").and_then(Value::as_array).map(Vec::len)),
        ),
    ]
}

pub fn handle(session: &Session<'_>, args: ReliabilityRoutesArgs) -> Result<(), CliError> {
    let client = ReliabilityRouteClient::new(&session.config, session.transport())?;
    records::trace_events(client.data());
    let global = session.global;

    match args.command {
        ReliabilityRoutesCommand::List => {
            let c = client.clone();
            let outcome =
                session.run("Loading reliability routes", async move { c.data().list().await })?;
            records::print_list(global, &util::settle_list(outcome)?);
            Ok(())
        }
        ReliabilityRoutesCommand::Opposite { id } => {
            let c = client.clone();
            let outcome = session.run("Looking up opposite route", async move {
                c.opposing_route(EntityId::new(id)).await
            })?;
            let route = util::settle(ReliabilityRoute::KIND, outcome)?;
            let out = output::render_single(&global.output, &route, route_detail, |r| {
                r.get("name").and_then(Value::as_str).unwrap_or_default().to_owned()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
        ReliabilityRoutesCommand::Record(cmd) => records::handle(session, client.data(), cmd),
    }
}
