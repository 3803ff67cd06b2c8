use std::cmp::Ordering;
use std::sync::Arc;

use tetres_api::Transport;

use crate::client::{ClientSpec, DataClient};
use crate::config::ClientConfig;
use crate::endpoint::Operation;
use crate::error::CoreError;
use crate::model::SpecialEvent;

pub type SpecialEventClient = DataClient<SpecialEvent>;

pub const SPECIAL_EVENT: ClientSpec<SpecialEvent> = ClientSpec {
    key: "special_event",
    paths: &[
        (Operation::List, "/tetres/adm/sevent/list"),
        (Operation::ListByYear, "/tetres/adm/sevent/list/year"),
        (Operation::Get, "/tetres/adm/sevent/get"),
        (Operation::Insert, "/tetres/adm/sevent/add"),
        (Operation::InsertAll, "/tetres/adm/sevent/add_all"),
        (Operation::Update, "/tetres/adm/sevent/update"),
        (Operation::Delete, "/tetres/adm/sevent/delete"),
        (Operation::Years, "/tetres/adm/sevent/years"),
    ],
    order: by_name,
};

fn by_name(a: &SpecialEvent, b: &SpecialEvent) -> Ordering {
    a.name.cmp(&b.name)
}

impl DataClient<SpecialEvent> {
    pub fn special_events(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, CoreError> {
        Self::from_spec(&SPECIAL_EVENT, config, transport)
    }
}
