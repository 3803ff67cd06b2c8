// ── Action log ──

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::common::{Extra, server_time};
use super::{Entity, EntityId};

/// One queued data change the server applies to its travel-time tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_datatype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handled: Option<bool>,
    #[serde(default, with = "server_time", skip_serializing_if = "Option::is_none")]
    pub handled_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, with = "server_time", skip_serializing_if = "Option::is_none")]
    pub status_updated_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_desc: Option<String>,
    #[serde(default, with = "server_time", skip_serializing_if = "Option::is_none")]
    pub reg_date: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ActionLog {
    pub fn is_handled(&self) -> bool {
        self.handled.unwrap_or(false)
    }
}

impl Entity for ActionLog {
    const KIND: &'static str = "action log";
    const CLASS: &'static str = "ActionLogInfo";

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}
