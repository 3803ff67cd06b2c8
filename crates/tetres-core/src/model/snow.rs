// ── Snow events, snow routes and snow management records ──

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{Extra, null_as_default, period_label, server_time};
use super::{Entity, EntityId};

// ── SnowEvent ───────────────────────────────────────────────────────

/// A snowfall period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnowEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, with = "server_time", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default, with = "server_time", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl SnowEvent {
    pub fn duration_label(&self) -> Option<String> {
        Some(period_label(self.start_time.as_ref()?, self.end_time.as_ref()?))
    }
}

impl Entity for SnowEvent {
    const KIND: &'static str = "snow event";
    const CLASS: &'static str = "SnowEventInfo";

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

// ── SnowRoute ───────────────────────────────────────────────────────

/// A plow route (pair of directions) tracked for lane regain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnowRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Truck-station project identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prj_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route1: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route2: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Entity for SnowRoute {
    const KIND: &'static str = "snow route";
    const CLASS: &'static str = "SnowRouteInfo";

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

// ── SnowManagement ──────────────────────────────────────────────────

/// Lane lost/regain times of one snow route during one snow event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnowManagement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sroute_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sevent_id: Option<i64>,
    #[serde(default, with = "server_time", skip_serializing_if = "Option::is_none")]
    pub lane_lost_time: Option<NaiveDateTime>,
    #[serde(default, with = "server_time", skip_serializing_if = "Option::is_none")]
    pub lane_regain_time: Option<NaiveDateTime>,
    /// Hours between lane lost and lane regain, to one decimal place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl SnowManagement {
    /// Set both times and recompute `duration`.
    pub fn set_period(&mut self, lost: NaiveDateTime, regain: NaiveDateTime) {
        let seconds = (regain - lost).num_seconds();
        #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
        let hours = (seconds as f64 / 360.0).round() / 10.0;
        self.lane_lost_time = Some(lost);
        self.lane_regain_time = Some(regain);
        self.duration = Some(hours);
    }

    /// Lane lost/regain label, e.g. `2024-01-05 ~ 07`.
    pub fn duration_label(&self) -> Option<String> {
        Some(period_label(
            self.lane_lost_time.as_ref()?,
            self.lane_regain_time.as_ref()?,
        ))
    }

    /// Name of the snow route when the server embedded it (`_snowroute`).
    pub fn route_name(&self) -> Option<&str> {
        self.extra.get("_snowroute")?.get("name")?.as_str()
    }
}

impl Entity for SnowManagement {
    const KIND: &'static str = "snow management";
    const CLASS: &'static str = "SnowManagementInfo";

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}
