// ── Concrete entity clients ──
//
// Each client is a `DataClient<T>` configured with the server's default
// paths for that kind and the order its admin list is shown in. Kinds
// with extra calls add them as inherent methods.

mod action_log;
mod reliability_route;
mod snow_event;
mod snow_management;
mod snow_route;
mod special_event;
mod system_config;
mod work_zone;
mod work_zone_group;

pub use action_log::{ACTION_LOG, ActionLogClient};
pub use reliability_route::{RELIABILITY_ROUTE, ReliabilityRouteClient};
pub use snow_event::{SNOW_EVENT, SnowEventClient};
pub use snow_management::{SNOW_MANAGEMENT, SnowManagementClient};
pub use snow_route::{SNOW_ROUTE, SnowRouteClient};
pub use special_event::{SPECIAL_EVENT, SpecialEventClient};
pub use system_config::SystemConfigClient;
pub use work_zone::{WORK_ZONE, WorkZoneClient};
pub use work_zone_group::{WORK_ZONE_GROUP, WorkZoneGroupClient};
