//! Special event command handlers.

use tabled::Tabled;
use tetres_core::{SpecialEvent, SpecialEventClient};

use crate::cli::{SpecialEventsArgs, SpecialEventsCommand};
use crate::error::CliError;
use crate::output;

use super::records::{self, Resource};
use super::{Session, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct SpecialEventRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Attendance")]
    attendance: String,
    #[tabled(rename = "Location")]
    location: String,
}

fn location(e: &SpecialEvent) -> String {
    match (e.lat, e.lon) {
        (Some(lat), Some(lon)) => format!("{lat:.5}, {lon:.5}"),
        _ => String::new(),
    }
}

impl Resource for SpecialEvent {
    type Row = SpecialEventRow;

    fn row(&self) -> SpecialEventRow {
        SpecialEventRow {
            id: output::opt_cell(self.id),
            name: self.name.clone(),
            period: self.duration_label().unwrap_or_default(),
            attendance: output::opt_cell(self.attendance),
            location: location(self),
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", output::opt_cell(self.id)),
            ("Name", self.name.clone()),
            ("Description", self.description.clone().unwrap_or_default()),
            ("Start", output::time_cell(self.start_time.as_ref())),
            ("End", output::time_cell(self.end_time.as_ref())),
            ("Years", self.years.clone().unwrap_or_default()),
            ("Attendance", output::opt_cell(self.attendance)),
            ("Location", location(self)),
        ]
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(session: &Session<'_>, args: SpecialEventsArgs) -> Result<(), CliError> {
    let client = SpecialEventClient::special_events(&session.config, session.transport())?;
    records::trace_events(&client);

    match args.command {
        SpecialEventsCommand::List { year } => {
            let c = client.clone();
            let outcome = session.run("Loading special events", async move {
                match year {
                    Some(year) => c.list_by_year(Some(year)).await,
                    None => c.list().await,
                }
            })?;
            records::print_list(session.global, &util::settle_list(outcome)?);
            Ok(())
        }
        SpecialEventsCommand::Record(cmd) => records::handle(session, &client, cmd),
    }
}
