use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tetres_api::{FormData, HttpResult, Transport, decode_ack, decode_object};
use tracing::{info, warn};
use url::Url;

use crate::client::Outcome;
use crate::config::ClientConfig;
use crate::endpoint::{Endpoints, Operation};
use crate::error::CoreError;
use crate::model::SystemConfig;

const KIND: &str = "system config";
const KEY: &str = "system_config";
const PATHS: &[(Operation, &str)] = &[
    (Operation::Get, "/tetres/adm/syscfg/get"),
    (Operation::Update, "/tetres/adm/syscfg/update"),
];

/// Reads and writes the server's singleton configuration record.
///
/// The last configuration fetched or confirmed by the server is kept in
/// [`SystemConfigClient::current`].
#[derive(Clone)]
pub struct SystemConfigClient {
    inner: Arc<Inner>,
}

struct Inner {
    endpoints: Endpoints,
    transport: Arc<dyn Transport>,
    current: ArcSwapOption<SystemConfig>,
}

impl SystemConfigClient {
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Result<Self, CoreError> {
        Ok(Self {
            inner: Arc::new(Inner {
                endpoints: config.endpoints(KEY, PATHS)?,
                transport,
                current: ArcSwapOption::empty(),
            }),
        })
    }

    /// Last configuration known to match the server, if any.
    pub fn current(&self) -> Option<Arc<SystemConfig>> {
        self.inner.current.load_full()
    }

    pub async fn get(&self) -> Result<Outcome<SystemConfig>, CoreError> {
        let url = self.endpoint(Operation::Get)?;
        let res = match self.inner.transport.get(&url).await {
            Ok(res) => res,
            Err(e) => HttpResult::transport_failure(url, e.to_string()),
        };

        match decode_object::<SystemConfig>(&res) {
            Ok(cfg) => {
                self.inner.current.store(Some(Arc::new(cfg.clone())));
                Ok(Outcome::Success(cfg))
            }
            Err(rejection) => {
                warn!(%rejection, "failed to load system config");
                Ok(Outcome::Failed(res))
            }
        }
    }

    /// Send `cfg` to the server. The server may start background jobs
    /// when archive or window settings change.
    pub async fn update(&self, cfg: &SystemConfig) -> Result<Outcome<()>, CoreError> {
        let url = self.endpoint(Operation::Update)?;
        let form = FormData::new().json("cfg", &cfg.to_wire()?)?;
        let res = match self.inner.transport.post_form(&url, &form).await {
            Ok(res) => res,
            Err(e) => HttpResult::transport_failure(url, e.to_string()),
        };

        match decode_ack(&res) {
            Ok(()) => {
                info!("system config updated");
                self.inner.current.store(Some(Arc::new(cfg.clone())));
                Ok(Outcome::Success(()))
            }
            Err(rejection) => {
                warn!(%rejection, "failed to update system config");
                Ok(Outcome::Failed(res))
            }
        }
    }

    fn endpoint(&self, op: Operation) -> Result<Url, CoreError> {
        self.inner
            .endpoints
            .get(op)
            .cloned()
            .ok_or(CoreError::Unsupported {
                kind: KIND,
                operation: op,
            })
    }
}

impl std::fmt::Debug for SystemConfigClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemConfigClient")
            .field("endpoints", &self.inner.endpoints)
            .field("loaded", &self.inner.current.load().is_some())
            .finish_non_exhaustive()
    }
}
