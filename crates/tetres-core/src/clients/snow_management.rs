use std::cmp::Ordering;
use std::sync::Arc;

use tetres_api::Transport;

use crate::client::{ClientSpec, DataClient, Outcome};
use crate::config::ClientConfig;
use crate::endpoint::Operation;
use crate::error::CoreError;
use crate::model::SnowManagement;
use crate::store::Snapshot;

pub type SnowManagementClient = DataClient<SnowManagement>;

pub const SNOW_MANAGEMENT: ClientSpec<SnowManagement> = ClientSpec {
    key: "snow_management",
    paths: &[
        (Operation::List, "/tetres/adm/snowmgmt/list"),
        (Operation::Get, "/tetres/adm/snowmgmt/get"),
        (Operation::Insert, "/tetres/adm/snowmgmt/add"),
        (Operation::InsertAll, "/tetres/adm/snowmgmt/add_all"),
        (Operation::Update, "/tetres/adm/snowmgmt/update"),
        (Operation::Delete, "/tetres/adm/snowmgmt/delete"),
    ],
    order: by_duration,
};

fn by_duration(a: &SnowManagement, b: &SnowManagement) -> Ordering {
    a.duration_label().cmp(&b.duration_label())
}

impl DataClient<SnowManagement> {
    pub fn snow_management(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, CoreError> {
        Self::from_spec(&SNOW_MANAGEMENT, config, transport)
    }

    /// Replace the cache with the records of one snow event.
    pub async fn list_by_snow_event(
        &self,
        snow_event_id: i64,
    ) -> Result<Option<Outcome<Snapshot<SnowManagement>>>, CoreError> {
        self.list_filtered("snowevent_id", &snow_event_id).await
    }
}
