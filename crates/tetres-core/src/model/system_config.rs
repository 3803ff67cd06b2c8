// ── System configuration ──
//
// Singleton record, not an `Entity`: there is no id and no list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::Extra;
use super::tagged;

/// Server-wide scheduling and analysis parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_archive_start_year: Option<i32>,
    /// `HH:MM` local time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_job_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_job_offset_days: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_job_start_day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_job_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_job_start_date: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_job_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_downstream_distance_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_upstream_distance_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workzone_downstream_distance_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workzone_upstream_distance_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialevent_arrival_window: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialevent_departure_window1: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialevent_departure_window2: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moe_critical_density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moe_lane_capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moe_congestion_threshold_speed: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl SystemConfig {
    pub const CLASS: &'static str = "SystemConfigInfo";

    /// Encode with the server's type tags.
    pub fn to_wire(&self) -> Result<Value, serde_json::Error> {
        tagged(self, Self::CLASS)
    }
}
