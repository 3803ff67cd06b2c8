//! Terminal spinner shown while a blocking request is outstanding.

use std::io::{self, IsTerminal};
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tetres_core::BusyIndicator;

/// `BusyIndicator` backed by an indicatif spinner on stderr.
///
/// Disabled when stderr is not a terminal or `--quiet` is set, so piped
/// output stays clean.
pub struct Spinner {
    enabled: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl Spinner {
    pub fn new(quiet: bool) -> Self {
        Self {
            enabled: !quiet && io::stderr().is_terminal(),
            bar: Mutex::new(None),
        }
    }
}

impl BusyIndicator for Spinner {
    fn begin(&self, label: &str) {
        if !self.enabled {
            return;
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(format!("{label}..."));
        bar.enable_steady_tick(Duration::from_millis(100));
        *self.bar.lock().expect("spinner lock poisoned") = Some(bar);
    }

    fn end(&self) {
        if let Some(bar) = self.bar.lock().expect("spinner lock poisoned").take() {
            bar.finish_and_clear();
        }
    }
}
