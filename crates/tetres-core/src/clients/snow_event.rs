use std::cmp::Ordering;
use std::sync::Arc;

use tetres_api::Transport;

use crate::client::{ClientSpec, DataClient};
use crate::config::ClientConfig;
use crate::endpoint::Operation;
use crate::error::CoreError;
use crate::model::SnowEvent;

pub type SnowEventClient = DataClient<SnowEvent>;

pub const SNOW_EVENT: ClientSpec<SnowEvent> = ClientSpec {
    key: "snow_event",
    paths: &[
        (Operation::List, "/tetres/adm/snowevent/list"),
        (Operation::ListByYear, "/tetres/adm/snowevent/list/year"),
        (Operation::Get, "/tetres/adm/snowevent/get"),
        (Operation::Insert, "/tetres/adm/snowevent/add"),
        (Operation::Update, "/tetres/adm/snowevent/update"),
        (Operation::Delete, "/tetres/adm/snowevent/delete"),
        (Operation::Years, "/tetres/adm/snowevent/years"),
    ],
    order: by_start_time,
};

fn by_start_time(a: &SnowEvent, b: &SnowEvent) -> Ordering {
    a.start_time.cmp(&b.start_time)
}

impl DataClient<SnowEvent> {
    pub fn snow_events(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, CoreError> {
        Self::from_spec(&SNOW_EVENT, config, transport)
    }
}
