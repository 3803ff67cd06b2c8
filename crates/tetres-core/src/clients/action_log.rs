use std::cmp::Ordering;
use std::sync::Arc;

use tetres_api::Transport;
use tracing::{info, warn};
use url::Url;

use crate::client::{ClientSpec, DataClient, Outcome};
use crate::config::ClientConfig;
use crate::endpoint::Operation;
use crate::error::CoreError;
use crate::model::{ActionLog, Entity};
use crate::store::Snapshot;

const PROCEED_PATH: &str = "/tetres/adm/actionlog/proceed";

pub const ACTION_LOG: ClientSpec<ActionLog> = ClientSpec {
    key: "action_log",
    paths: &[(Operation::List, "/tetres/adm/actionlog/list")],
    order: newest_first,
};

fn newest_first(a: &ActionLog, b: &ActionLog) -> Ordering {
    b.reg_date.cmp(&a.reg_date)
}

/// Read-only view of the server's pending data changes, plus the trigger
/// that makes the server apply them.
#[derive(Clone)]
pub struct ActionLogClient {
    data: DataClient<ActionLog>,
    transport: Arc<dyn Transport>,
    proceed_url: Option<Url>,
}

impl ActionLogClient {
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Result<Self, CoreError> {
        let data = DataClient::from_spec(&ACTION_LOG, config, Arc::clone(&transport))?;
        let proceed_url = config.extra_url(ACTION_LOG.key, "proceed", PROCEED_PATH)?;
        Ok(Self {
            data,
            transport,
            proceed_url,
        })
    }

    /// The underlying list client (cache, listeners, subscriptions).
    pub fn data(&self) -> &DataClient<ActionLog> {
        &self.data
    }

    /// Replace the cache with the `limit` most recent entries.
    pub async fn list_recent(
        &self,
        limit: u32,
    ) -> Result<Option<Outcome<Snapshot<ActionLog>>>, CoreError> {
        self.data.list_filtered("limit", &limit).await
    }

    /// Ask the server to start applying pending actions in the background.
    ///
    /// Only the HTTP status is checked; the server answers before the work
    /// is done.
    pub async fn proceed(&self) -> Result<Outcome<()>, CoreError> {
        let url = self.proceed_url.clone().ok_or(CoreError::Unsupported {
            kind: ActionLog::KIND,
            operation: Operation::Update,
        })?;

        let res = match self.transport.get(&url).await {
            Ok(res) => res,
            Err(e) => tetres_api::HttpResult::transport_failure(url, e.to_string()),
        };
        if res.is_success() {
            info!("pending actions are being processed");
            Ok(Outcome::Success(()))
        } else {
            warn!(status = res.status, "proceed request failed");
            Ok(Outcome::Failed(res))
        }
    }
}

impl std::fmt::Debug for ActionLogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionLogClient")
            .field("data", &self.data)
            .field("proceed_url", &self.proceed_url)
            .finish_non_exhaustive()
    }
}
