use std::cmp::Ordering;
use std::sync::Arc;

use tetres_api::Transport;

use crate::client::{ClientSpec, DataClient};
use crate::config::ClientConfig;
use crate::endpoint::Operation;
use crate::error::CoreError;
use crate::model::WorkZoneGroup;

pub type WorkZoneGroupClient = DataClient<WorkZoneGroup>;

pub const WORK_ZONE_GROUP: ClientSpec<WorkZoneGroup> = ClientSpec {
    key: "work_zone_group",
    paths: &[
        (Operation::List, "/tetres/adm/wz_group/list"),
        (Operation::ListByYear, "/tetres/adm/wz_group/list/year"),
        (Operation::Get, "/tetres/adm/wz_group/get"),
        (Operation::Insert, "/tetres/adm/wz_group/add"),
        (Operation::Update, "/tetres/adm/wz_group/update"),
        (Operation::Delete, "/tetres/adm/wz_group/delete"),
        (Operation::Years, "/tetres/adm/wz_group/years"),
    ],
    order: by_name,
};

fn by_name(a: &WorkZoneGroup, b: &WorkZoneGroup) -> Ordering {
    a.name.cmp(&b.name)
}

impl DataClient<WorkZoneGroup> {
    pub fn work_zone_groups(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, CoreError> {
        Self::from_spec(&WORK_ZONE_GROUP, config, transport)
    }
}
