// ── Runtime client configuration ──
//
// Describes *where* the admin API lives and how to reach it. Never
// touches disk: the CLI builds a `ClientConfig` from its profile and
// hands it in.

use std::collections::BTreeMap;
use std::sync::Arc;

use tetres_api::{HttpClient, Transport, TransportConfig};
use url::Url;

use crate::endpoint::{Endpoints, Operation, resolve};
use crate::error::CoreError;

/// Configuration shared by every data client of one server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server root the endpoint paths are resolved against.
    pub base_url: Url,
    /// TLS, timeout and credentials for the HTTP transport.
    pub transport: TransportConfig,
    /// Per-client path overrides: client key → operation name → path.
    /// An empty path disables the operation.
    pub endpoint_overrides: BTreeMap<String, BTreeMap<String, String>>,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            transport: TransportConfig::default(),
            endpoint_overrides: BTreeMap::new(),
        }
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Override (or, with an empty path, disable) one endpoint.
    pub fn with_override(
        mut self,
        client: impl Into<String>,
        operation: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        self.endpoint_overrides
            .entry(client.into())
            .or_default()
            .insert(operation.into(), path.into());
        self
    }

    /// Build the reqwest-backed transport described by this config.
    pub fn http_transport(&self) -> Result<Arc<dyn Transport>, CoreError> {
        Ok(Arc::new(HttpClient::new(&self.transport)?))
    }

    /// Endpoint table for `client`: `defaults` with overrides applied.
    ///
    /// Override names that are not CRUD operations are ignored here; clients
    /// with extra endpoints read them through [`ClientConfig::extra_url`].
    pub fn endpoints(
        &self,
        client: &str,
        defaults: &[(Operation, &str)],
    ) -> Result<Endpoints, CoreError> {
        let mut endpoints = Endpoints::from_paths(&self.base_url, defaults.iter().copied())?;
        if let Some(overrides) = self.endpoint_overrides.get(client) {
            for (name, path) in overrides {
                if let Ok(op) = name.parse::<Operation>() {
                    endpoints.set_path(&self.base_url, op, path)?;
                }
            }
        }
        Ok(endpoints)
    }

    /// URL of a non-CRUD endpoint (`proceed`), honouring overrides.
    pub fn extra_url(&self, client: &str, name: &str, default: &str) -> Result<Option<Url>, CoreError> {
        let path = self
            .endpoint_overrides
            .get(client)
            .and_then(|o| o.get(name))
            .map_or(default, String::as_str);
        resolve(&self.base_url, name, path)
    }
}
