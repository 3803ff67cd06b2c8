// Flat form payload for POST requests
//
// The server reads `request.form[...]` and JSON-decodes the values it
// expects to be structured, so structured values are stored as JSON text
// and plain strings are stored verbatim.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Error;

/// Flat key → value map sent as `application/x-www-form-urlencoded`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormData {
    fields: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw string value.
    pub fn text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Store the JSON encoding of `value`.
    pub fn json(mut self, key: impl Into<String>, value: &impl Serialize) -> Result<Self, Error> {
        let encoded = serde_json::to_string(value)?;
        self.fields.insert(key.into(), encoded);
        Ok(self)
    }

    /// Merge another form into this one; keys in `other` win.
    pub fn merge(mut self, other: FormData) -> Self {
        self.fields.extend(other.fields);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
