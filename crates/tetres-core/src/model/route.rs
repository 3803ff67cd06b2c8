// ── Reliability route ──

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{Extra, null_as_default};
use super::{Entity, EntityId};

/// A corridor section whose travel-time reliability the server tracks.
///
/// The route geometry is opaque to this client and is carried as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corridor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ReliabilityRoute {
    /// Number of detector stations on the route, when it has any.
    pub fn rnode_count(&self) -> Option<usize> {
        Some(self.route.as_ref()?.get("rnodes")?.as_array()?.len())
    }
}

impl Entity for ReliabilityRoute {
    const KIND: &'static str = "reliability route";
    const CLASS: &'static str = "TTRouteInfo";

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}
