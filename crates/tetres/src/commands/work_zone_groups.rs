//! Work-zone group command handlers.

use tabled::Tabled;
use tetres_core::{WorkZoneGroup, WorkZoneGroupClient};

use crate::cli::{WorkZoneGroupsArgs, WorkZoneGroupsCommand};
use crate::error::CliError;
use crate::output;

use super::records::{self, Resource};
use super::{Session, util};

#[derive(Tabled)]
pub struct WorkZoneGroupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Years")]
    years: String,
    #[tabled(rename = "Corridors")]
    corridors: String,
}

impl Resource for WorkZoneGroup {
    type Row = WorkZoneGroupRow;

    fn row(&self) -> WorkZoneGroupRow {
        WorkZoneGroupRow {
            id: output::opt_cell(self.id),
            name: self.name.clone(),
            years: self.years.clone().unwrap_or_default(),
            corridors: self.corridors.clone().unwrap_or_default(),
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", output::opt_cell(self.id)),
            ("Name", self.name.clone()),
            ("Description", self.description.clone().unwrap_or_default()),
            ("Years", self.years.clone().unwrap_or_default()),
            ("Corridors", self.corridors.clone().unwrap_or_default()),
            ("Impact", self.impact.clone().unwrap_or_default()),
        ]
    }
}

pub fn handle(session: &Session<'_>, args: WorkZoneGroupsArgs) -> Result<(), CliError> {
    let client = WorkZoneGroupClient::work_zone_groups(&session.config, session.transport())?;
    records::trace_events(&client);

    match args.command {
        WorkZoneGroupsCommand::List { year } => {
            let c = client.clone();
            let outcome = session.run("Loading work-zone groups", async move {
                match year {
                    Some(year) => c.list_by_year(Some(year)).await,
                    None => c.list().await,
                }
            })?;
            records::print_list(session.global, &util::settle_list(outcome)?);
            Ok(())
        }
        WorkZoneGroupsCommand::Record(cmd) => records::handle(session, &client, cmd),
    }
}
