// ── Special event ──

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::common::{Extra, null_as_default, period_label, server_time, years_string};
use super::{Entity, EntityId};

/// A scheduled event (game, concert, fair) that affects nearby traffic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Comma-separated years the event spans; see [`SpecialEvent::fill_years`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<String>,
    #[serde(default, with = "server_time", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default, with = "server_time", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance: Option<i64>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl SpecialEvent {
    /// `2024-01-05 ~ 07` style label, when both ends are known.
    pub fn duration_label(&self) -> Option<String> {
        Some(period_label(self.start_time.as_ref()?, self.end_time.as_ref()?))
    }

    /// Derive `years` from the start and end times.
    pub fn fill_years(&mut self) {
        if let (Some(start), Some(end)) = (&self.start_time, &self.end_time) {
            self.years = Some(years_string(start, end));
        }
    }
}

impl Entity for SpecialEvent {
    const KIND: &'static str = "special event";
    const CLASS: &'static str = "SpecialEventInfo";

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}
