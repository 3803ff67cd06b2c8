//! System configuration command handlers.

use tetres_core::{SystemConfig, SystemConfigClient};

use crate::cli::{SystemConfigArgs, SystemConfigCommand};
use crate::error::CliError;
use crate::output::{self, opt_cell};

use super::{Session, util};

const KIND: &str = "system config";

fn detail(c: &SystemConfig) -> Vec<(&'static str, String)> {
    vec![
        ("Archive start year", opt_cell(c.data_archive_start_year)),
        ("Daily job time", opt_cell(c.daily_job_start_time.as_ref())),
        ("Daily job offset (days)", opt_cell(c.daily_job_offset_days)),
        ("Weekly job day", opt_cell(c.weekly_job_start_day.as_ref())),
        ("Weekly job time", opt_cell(c.weekly_job_start_time.as_ref())),
        ("Monthly job date", opt_cell(c.monthly_job_start_date)),
        ("Monthly job time", opt_cell(c.monthly_job_start_time.as_ref())),
        ("Incident downstream (mi)", opt_cell(c.incident_downstream_distance_limit)),
        ("Incident upstream (mi)", opt_cell(c.incident_upstream_distance_limit)),
        ("Work zone downstream (mi)", opt_cell(c.workzone_downstream_distance_limit)),
        ("Work zone upstream (mi)", opt_cell(c.workzone_upstream_distance_limit)),
        ("Event arrival window (min)", opt_cell(c.specialevent_arrival_window)),
        ("Event departure window 1", opt_cell(c.specialevent_departure_window1)),
        ("Event departure window 2", opt_cell(c.specialevent_departure_window2)),
        ("MOE critical density", opt_cell(c.moe_critical_density)),
        ("MOE lane capacity", opt_cell(c.moe_lane_capacity)),
        ("MOE congestion speed", opt_cell(c.moe_congestion_threshold_speed)),
    ]
}

pub fn handle(session: &Session<'_>, args: SystemConfigArgs) -> Result<(), CliError> {
    let client = SystemConfigClient::new(&session.config, session.transport())?;
    let global = session.global;

    match args.command {
        SystemConfigCommand::Show => {
            let c = client.clone();
            let outcome = session.run("Loading system config", async move { c.get().await })?;
            let cfg = util::settle(KIND, outcome)?;
            let out = output::render_single(&global.output, &cfg, detail, |c| {
                opt_cell(c.data_archive_start_year)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SystemConfigCommand::Set { file } => {
            let cfg: SystemConfig = util::read_json_file(&file)?;
            if !util::confirm(
                "Replace the server configuration? Changed archive or window settings re-run server jobs.",
                global.yes,
            )? {
                return Ok(());
            }
            let c = client.clone();
            let outcome = session.run("Saving system config", async move { c.update(&cfg).await })?;
            util::settle(KIND, outcome)?;
            output::print_status("System config updated", global.quiet);
            Ok(())
        }
    }
}
