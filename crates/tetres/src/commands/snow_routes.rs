//! Snow route command handlers.

use tabled::Tabled;
use tetres_core::{SnowRoute, SnowRouteClient};

use crate::cli::{SnowRoutesArgs, SnowRoutesCommand};
use crate::error::CliError;
use crate::output;

use super::records::{self, Resource};
use super::{Session, util};

#[derive(Tabled)]
pub struct SnowRouteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl Resource for SnowRoute {
    type Row = SnowRouteRow;

    fn row(&self) -> SnowRouteRow {
        SnowRouteRow {
            id: output::opt_cell(self.id),
            name: self.name.clone(),
            project: self.prj_id.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", output::opt_cell(self.id)),
            ("Name", self.name.clone()),
            ("Project", self.prj_id.clone().unwrap_or_default()),
            ("Description", self.description.clone().unwrap_or_default()),
            ("Route 1", route_summary(self.route1.as_ref())),
            ("Route 2", route_summary(self.route2.as_ref())),
        ]
    }
}

/// `N rnodes` for a route document, or empty.
fn route_summary(route: Option<&serde_json::Value>) -> String {
    route
        .and_then(|r| r.get("rnodes")?.as_array().map(Vec::len))
        .map(|n| format!("{n} rnodes"))
        .unwrap_or_default()
}

pub fn handle(session: &Session<'_>, args: SnowRoutesArgs) -> Result<(), CliError> {
    let client = SnowRouteClient::snow_routes(&session.config, session.transport())?;
    records::trace_events(&client);

    match args.command {
        SnowRoutesCommand::List => {
            let c = client.clone();
            let outcome = session.run("Loading snow routes", async move { c.list().await })?;
            records::print_list(session.global, &util::settle_list(outcome)?);
            Ok(())
        }
        SnowRoutesCommand::Record(cmd) => records::handle(session, &client, cmd),
    }
}
