// ── Endpoint descriptors ──
//
// Which URL each CRUD operation of one client talks to. Operations
// without a URL are unsupported for that entity kind.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use url::Url;

use crate::error::CoreError;

/// One data-client operation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    List,
    ListByYear,
    Get,
    Insert,
    InsertAll,
    Update,
    Delete,
    Years,
}

/// Operation → URL table for one client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    urls: BTreeMap<Operation, Url>,
}

impl Endpoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative `paths` against `base`.
    ///
    /// An empty path leaves the operation unsupported.
    pub fn from_paths<'a, I>(base: &Url, paths: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (Operation, &'a str)>,
    {
        let mut endpoints = Self::new();
        for (op, path) in paths {
            endpoints.set_path(base, op, path)?;
        }
        Ok(endpoints)
    }

    pub fn with(mut self, op: Operation, url: Url) -> Self {
        self.urls.insert(op, url);
        self
    }

    /// Point `op` at `base` + `path`, or unset it when `path` is empty.
    pub fn set_path(&mut self, base: &Url, op: Operation, path: &str) -> Result<(), CoreError> {
        match resolve(base, <&str>::from(op), path)? {
            Some(url) => self.urls.insert(op, url),
            None => self.urls.remove(&op),
        };
        Ok(())
    }

    pub fn get(&self, op: Operation) -> Option<&Url> {
        self.urls.get(&op)
    }

    pub fn supports(&self, op: Operation) -> bool {
        self.urls.contains_key(&op)
    }

    /// Configured operations, in declaration order.
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.urls.keys().copied()
    }
}

/// Resolve one endpoint path against `base`. An empty path means "not
/// configured".
pub(crate) fn resolve(base: &Url, name: &str, path: &str) -> Result<Option<Url>, CoreError> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }
    join(base, path).map(Some).map_err(|e| CoreError::Config {
        message: format!("invalid {name} endpoint `{path}`: {e}"),
    })
}

/// Join an absolute server path onto a base URL that may carry a prefix
/// (`https://host/ticas` + `/tetres/adm/...`).
fn join(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    if path.contains("://") {
        return Url::parse(path);
    }
    let mut prefix = base.as_str().trim_end_matches('/').to_owned();
    prefix.push('/');
    Url::parse(&prefix)?.join(path.trim_start_matches('/'))
}
