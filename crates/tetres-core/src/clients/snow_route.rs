use std::cmp::Ordering;
use std::sync::Arc;

use tetres_api::Transport;

use crate::client::{ClientSpec, DataClient};
use crate::config::ClientConfig;
use crate::endpoint::Operation;
use crate::error::CoreError;
use crate::model::SnowRoute;

pub type SnowRouteClient = DataClient<SnowRoute>;

pub const SNOW_ROUTE: ClientSpec<SnowRoute> = ClientSpec {
    key: "snow_route",
    paths: &[
        (Operation::List, "/tetres/adm/snowroute/list"),
        (Operation::Get, "/tetres/adm/snowroute/get"),
        (Operation::Insert, "/tetres/adm/snowroute/add"),
        (Operation::Update, "/tetres/adm/snowroute/update"),
        (Operation::Delete, "/tetres/adm/snowroute/delete"),
    ],
    order: by_name,
};

fn by_name(a: &SnowRoute, b: &SnowRoute) -> Ordering {
    a.name.cmp(&b.name)
}

impl DataClient<SnowRoute> {
    pub fn snow_routes(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, CoreError> {
        Self::from_spec(&SNOW_ROUTE, config, transport)
    }
}
