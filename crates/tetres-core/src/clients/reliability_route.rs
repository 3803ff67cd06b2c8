use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::Value;
use tetres_api::{FormData, HttpResult, Transport, decode_object};
use tracing::warn;
use url::Url;

use crate::client::{ClientSpec, DataClient, Outcome};
use crate::config::ClientConfig;
use crate::endpoint::Operation;
use crate::error::CoreError;
use crate::model::{Entity, EntityId, ReliabilityRoute};

const OPPOSITE_PATH: &str = "/tetres/adm/route/opposite_route";

/// The server keeps no per-year index of routes, so `years` and
/// `list_by_year` are unsupported.
pub const RELIABILITY_ROUTE: ClientSpec<ReliabilityRoute> = ClientSpec {
    key: "reliability_route",
    paths: &[
        (Operation::List, "/tetres/adm/route/list"),
        (Operation::Get, "/tetres/adm/route/get"),
        (Operation::Insert, "/tetres/adm/route/add"),
        (Operation::Update, "/tetres/adm/route/update"),
        (Operation::Delete, "/tetres/adm/route/delete"),
    ],
    order: by_name,
};

fn by_name(a: &ReliabilityRoute, b: &ReliabilityRoute) -> Ordering {
    a.name.cmp(&b.name)
}

/// Travel-time reliability routes, plus the lookup of a route's
/// opposite-direction counterpart.
#[derive(Clone)]
pub struct ReliabilityRouteClient {
    data: DataClient<ReliabilityRoute>,
    transport: Arc<dyn Transport>,
    opposite_url: Option<Url>,
}

impl ReliabilityRouteClient {
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Result<Self, CoreError> {
        let data = DataClient::from_spec(&RELIABILITY_ROUTE, config, Arc::clone(&transport))?;
        let opposite_url = config.extra_url(RELIABILITY_ROUTE.key, "opposite_route", OPPOSITE_PATH)?;
        Ok(Self {
            data,
            transport,
            opposite_url,
        })
    }

    /// The underlying CRUD client (cache, listeners, subscriptions).
    pub fn data(&self) -> &DataClient<ReliabilityRoute> {
        &self.data
    }

    /// Route geometry running the other way along the same corridor.
    ///
    /// The cache is not touched and no event is fired.
    pub async fn opposing_route(&self, id: EntityId) -> Result<Outcome<Value>, CoreError> {
        let url = self.opposite_url.clone().ok_or(CoreError::Unsupported {
            kind: ReliabilityRoute::KIND,
            operation: Operation::Get,
        })?;
        let form = FormData::new().json("id", &id)?;

        let res = match self.transport.post_form(&url, &form).await {
            Ok(res) => res,
            Err(e) => HttpResult::transport_failure(url, e.to_string()),
        };
        match decode_object::<Value>(&res) {
            Ok(route) => Ok(Outcome::Success(route)),
            Err(rejection) => {
                warn!(%id, %rejection, "opposite route lookup failed");
                Ok(Outcome::Failed(res))
            }
        }
    }
}

impl std::fmt::Debug for ReliabilityRouteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReliabilityRouteClient")
            .field("data", &self.data)
            .field("opposite_url", &self.opposite_url)
            .finish_non_exhaustive()
    }
}
