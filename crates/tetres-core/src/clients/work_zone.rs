use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::Value;
use tetres_api::{FormData, Transport};

use crate::client::{ClientSpec, DataClient, Outcome};
use crate::config::ClientConfig;
use crate::endpoint::Operation;
use crate::error::CoreError;
use crate::model::{EntityId, WorkZone};
use crate::store::Snapshot;

pub type WorkZoneClient = DataClient<WorkZone>;

/// Work zones are always listed per group; the list endpoint only accepts
/// POST with `wzgroup_id`.
pub const WORK_ZONE: ClientSpec<WorkZone> = ClientSpec {
    key: "work_zone",
    paths: &[
        (Operation::List, "/tetres/adm/wz/list"),
        (Operation::Get, "/tetres/adm/wz/get"),
        (Operation::Insert, "/tetres/adm/wz/add"),
        (Operation::Update, "/tetres/adm/wz/update"),
        (Operation::Delete, "/tetres/adm/wz/delete"),
    ],
    order: by_name,
};

fn by_name(a: &WorkZone, b: &WorkZone) -> Ordering {
    a.name().cmp(b.name())
}

impl DataClient<WorkZone> {
    pub fn work_zones(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, CoreError> {
        Self::from_spec(&WORK_ZONE, config, transport)
    }

    /// Replace the cache with the work zones of one group.
    pub async fn list_by_group(
        &self,
        group_id: i64,
    ) -> Result<Option<Outcome<Snapshot<WorkZone>>>, CoreError> {
        self.list_filtered("wzgroup_id", &group_id).await
    }

    /// Insert a work zone together with the route it was drawn on.
    pub async fn insert_with_route(
        &self,
        work_zone: &WorkZone,
        route: &Value,
    ) -> Result<Outcome<EntityId>, CoreError> {
        self.insert_with(work_zone, FormData::new().json("route", route)?)
            .await
    }
}
