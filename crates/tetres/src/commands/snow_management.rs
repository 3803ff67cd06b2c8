//! Snow management command handlers.

use tabled::Tabled;
use tetres_core::{SnowManagement, SnowManagementClient};

use crate::cli::{SnowManagementArgs, SnowManagementCommand};
use crate::error::CliError;
use crate::output;

use super::records::{self, Resource};
use super::{Session, util};

#[derive(Tabled)]
pub struct SnowManagementRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Route")]
    route: String,
    #[tabled(rename = "Lane lost ~ regain")]
    period: String,
    #[tabled(rename = "Hours")]
    hours: String,
}

fn route(m: &SnowManagement) -> String {
    m.route_name()
        .map(str::to_owned)
        .or_else(|| m.sroute_id.map(|id| id.to_string()))
        .unwrap_or_default()
}

impl Resource for SnowManagement {
    type Row = SnowManagementRow;

    fn row(&self) -> SnowManagementRow {
        SnowManagementRow {
            id: output::opt_cell(self.id),
            route: route(self),
            period: self.duration_label().unwrap_or_default(),
            hours: output::opt_cell(self.duration),
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", output::opt_cell(self.id)),
            ("Snow event", output::opt_cell(self.sevent_id)),
            ("Route", route(self)),
            ("Lane lost", output::time_cell(self.lane_lost_time.as_ref())),
            ("Lane regain", output::time_cell(self.lane_regain_time.as_ref())),
            ("Hours", output::opt_cell(self.duration)),
        ]
    }
}

pub fn handle(session: &Session<'_>, args: SnowManagementArgs) -> Result<(), CliError> {
    let client = SnowManagementClient::snow_management(&session.config, session.transport())?;
    records::trace_events(&client);

    match args.command {
        SnowManagementCommand::List { snow_event } => {
            let c = client.clone();
            let outcome = session.run("Loading snow management", async move {
                match snow_event {
                    Some(id) => c.list_by_snow_event(id).await,
                    None => c.list().await,
                }
            })?;
            records::print_list(session.global, &util::settle_list(outcome)?);
            Ok(())
        }
        SnowManagementCommand::Record(cmd) => records::handle(session, &client, cmd),
    }
}
