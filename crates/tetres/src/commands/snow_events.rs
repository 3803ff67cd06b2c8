//! Snow event command handlers.

use tabled::Tabled;
use tetres_core::{SnowEvent, SnowEventClient};

use crate::cli::{SnowEventsArgs, SnowEventsCommand};
use crate::error::CliError;
use crate::output;

use super::records::{self, Resource};
use super::{Session, util};

#[derive(Tabled)]
pub struct SnowEventRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
}

impl Resource for SnowEvent {
    type Row = SnowEventRow;

    fn row(&self) -> SnowEventRow {
        SnowEventRow {
            id: output::opt_cell(self.id),
            period: self.duration_label().unwrap_or_default(),
            start: output::time_cell(self.start_time.as_ref()),
            end: output::time_cell(self.end_time.as_ref()),
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", output::opt_cell(self.id)),
            ("Start", output::time_cell(self.start_time.as_ref())),
            ("End", output::time_cell(self.end_time.as_ref())),
        ]
    }
}

pub fn handle(session: &Session<'_>, args: SnowEventsArgs) -> Result<(), CliError> {
    let client = SnowEventClient::snow_events(&session.config, session.transport())?;
    records::trace_events(&client);

    match args.command {
        SnowEventsCommand::List { year } => {
            let c = client.clone();
            let outcome = session.run("Loading snow events", async move {
                match year {
                    Some(year) => c.list_by_year(Some(year)).await,
                    None => c.list().await,
                }
            })?;
            records::print_list(session.global, &util::settle_list(outcome)?);
            Ok(())
        }
        SnowEventsCommand::Record(cmd) => records::handle(session, &client, cmd),
    }
}
