//! Command dispatch: bridges CLI args -> data clients -> output formatting.

pub mod action_logs;
pub mod config_cmd;
pub mod records;
pub mod reliability_routes;
pub mod snow_events;
pub mod snow_management;
pub mod snow_routes;
pub mod special_events;
pub mod system_config;
pub mod util;
pub mod work_zone_groups;
pub mod work_zones;

use std::future::Future;
use std::sync::Arc;

use tetres_core::{ClientConfig, CoreError, Executor, Transport};
use tokio::runtime::Handle;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::progress::Spinner;

/// Everything a command handler needs to talk to one server.
pub struct Session<'a> {
    pub global: &'a GlobalOpts,
    pub config: ClientConfig,
    transport: Arc<dyn Transport>,
    exec: Executor,
}

impl<'a> Session<'a> {
    pub fn new(global: &'a GlobalOpts, config: ClientConfig, runtime: Handle) -> Result<Self, CliError> {
        let transport = config.http_transport()?;
        let exec = Executor::new(runtime).with_indicator(Arc::new(Spinner::new(global.quiet)));
        Ok(Self {
            global,
            config,
            transport,
            exec,
        })
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// Run one request to completion behind the spinner.
    pub fn run<F, R>(&self, label: &str, fut: F) -> Result<R, CliError>
    where
        F: Future<Output = Result<R, CoreError>> + Send + 'static,
        R: Send + 'static,
    {
        Ok(self.exec.run_blocking(label, fut)?)
    }
}

/// Dispatch a server-bound command to the appropriate handler.
pub fn dispatch(cmd: Command, session: &Session<'_>) -> Result<(), CliError> {
    match cmd {
        Command::SpecialEvents(args) => special_events::handle(session, args),
        Command::WorkZones(args) => work_zones::handle(session, args),
        Command::WorkZoneGroups(args) => work_zone_groups::handle(session, args),
        Command::ReliabilityRoutes(args) => reliability_routes::handle(session, args),
        Command::SnowEvents(args) => snow_events::handle(session, args),
        Command::SnowRoutes(args) => snow_routes::handle(session, args),
        Command::SnowManagement(args) => snow_management::handle(session, args),
        Command::ActionLogs(args) => action_logs::handle(session, args),
        Command::SystemConfig(args) => system_config::handle(session, args),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
