//! Action log command handlers.

use std::sync::Arc;

use tabled::Tabled;
use tetres_core::{ActionLog, ActionLogClient};

use crate::cli::{ActionLogsArgs, ActionLogsCommand};
use crate::error::CliError;
use crate::output;

use super::{Session, records, util};

#[derive(Tabled)]
struct ActionLogRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Registered")]
    registered: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Handled")]
    handled: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Arc<ActionLog>> for ActionLogRow {
    fn from(a: &Arc<ActionLog>) -> Self {
        Self {
            id: output::opt_cell(a.id),
            registered: output::time_cell(a.reg_date.as_ref()),
            action: a.action_type.clone().unwrap_or_default(),
            target: match (&a.target_datatype, a.target_id) {
                (Some(kind), Some(id)) => format!("{kind} {id}"),
                (Some(kind), None) => kind.clone(),
                _ => a.data_desc.clone().unwrap_or_default(),
            },
            handled: if a.is_handled() { "yes" } else { "no" }.into(),
            status: a.status.clone().unwrap_or_default(),
        }
    }
}

pub fn handle(session: &Session<'_>, args: ActionLogsArgs) -> Result<(), CliError> {
    let client = ActionLogClient::new(&session.config, session.transport())?;
    records::trace_events(client.data());
    let global = session.global;

    match args.command {
        ActionLogsCommand::List { limit, pending } => {
            let c = client.clone();
            let outcome =
                session.run("Loading action logs", async move { c.list_recent(limit).await })?;
            let snap = util::settle_list(outcome)?;
            let shown: Vec<Arc<ActionLog>> = snap
                .iter()
                .filter(|a| !pending || !a.is_handled())
                .cloned()
                .collect();
            let out = output::render_list(
                &global.output,
                &shown,
                |a| ActionLogRow::from(a),
                |a| output::opt_cell(a.id),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ActionLogsCommand::Proceed => {
            if !util::confirm("Process all pending actions now?", global.yes)? {
                return Ok(());
            }
            let c = client.clone();
            let outcome = session.run("Starting", async move { c.proceed().await })?;
            util::settle("action log", outcome)?;
            output::print_status("Pending actions are being processed", global.quiet);
            Ok(())
        }
    }
}
