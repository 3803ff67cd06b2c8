//! Shared helpers for command handlers.

use std::path::Path;

use serde::de::DeserializeOwned;
use tetres_core::{Entity, Outcome, Snapshot};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--file` flags.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "file".into(),
        reason: format!("{}: {e}", path.display()),
    })
}

/// Unwrap a request outcome or turn its failure into a `CliError`.
pub fn settle<V>(kind: &str, outcome: Outcome<V>) -> Result<V, CliError> {
    outcome
        .into_result()
        .map_err(|res| CliError::from_failure(kind, &res))
}

/// Like [`settle`] for list-class calls, which may be skipped.
pub fn settle_list<T: Entity>(
    outcome: Option<Outcome<Snapshot<T>>>,
) -> Result<Snapshot<T>, CliError> {
    let outcome = outcome.ok_or_else(|| CliError::Busy {
        kind: T::KIND.into(),
    })?;
    settle(T::KIND, outcome)
}
