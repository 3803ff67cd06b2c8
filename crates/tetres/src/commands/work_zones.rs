//! Work zone command handlers.

use tabled::Tabled;
use tetres_core::{WorkZone, WorkZoneClient};

use crate::cli::{RecordCommand, WorkZonesArgs, WorkZonesCommand};
use crate::error::CliError;
use crate::output;

use super::records::{self, Resource};
use super::{Session, util};

#[derive(Tabled)]
pub struct WorkZoneRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Memo")]
    memo: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Length (mi)")]
    length: String,
}

fn group(wz: &WorkZone) -> String {
    wz.group_name()
        .map(str::to_owned)
        .or_else(|| wz.wz_group_id.map(|id| id.to_string()))
        .unwrap_or_default()
}

fn length(wz: &WorkZone) -> String {
    wz.workzone_length
        .map(|l| format!("{l:.2}"))
        .unwrap_or_default()
}

impl Resource for WorkZone {
    type Row = WorkZoneRow;

    fn row(&self) -> WorkZoneRow {
        WorkZoneRow {
            id: output::opt_cell(self.id),
            group: group(self),
            memo: self.name().to_owned(),
            start: output::time_cell(self.start_time.as_ref()),
            end: output::time_cell(self.end_time.as_ref()),
            length: length(self),
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", output::opt_cell(self.id)),
            ("Group", group(self)),
            ("Memo", self.name().to_owned()),
            ("Start", output::time_cell(self.start_time.as_ref())),
            ("End", output::time_cell(self.end_time.as_ref())),
            ("Length (mi)", length(self)),
        ]
    }
}

pub fn handle(session: &Session<'_>, args: WorkZonesArgs) -> Result<(), CliError> {
    let client = WorkZoneClient::work_zones(&session.config, session.transport())?;
    records::trace_events(&client);

    match args.command {
        WorkZonesCommand::List { group } => {
            let c = client.clone();
            let outcome =
                session.run("Loading work zones", async move { c.list_by_group(group).await })?;
            records::print_list(session.global, &util::settle_list(outcome)?);
            Ok(())
        }

        WorkZonesCommand::Record(RecordCommand::Insert {
            file,
            route: Some(route),
        }) => {
            let wz: WorkZone = util::read_json_file(&file)?;
            let route: serde_json::Value = util::read_json_file(&route)?;
            let c = client.clone();
            let outcome = session.run("Saving", async move {
                c.insert_with_route(&wz, &route).await
            })?;
            let id = util::settle("work zone", outcome)?;
            output::print_status(&format!("Created work zone {id}"), session.global.quiet);
            Ok(())
        }

        WorkZonesCommand::Record(cmd) => records::handle(session, &client, cmd),
    }
}
