// ── Work zone ──

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{Extra, null_as_default, server_time};
use super::{Entity, EntityId};

/// One construction period of a work-zone group on a pair of routes.
///
/// The routes are opaque to this client and are carried as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkZone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wz_group_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, with = "server_time", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default, with = "server_time", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route1: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route2: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workzone_length: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl WorkZone {
    /// Display name: the memo, or an empty string.
    pub fn name(&self) -> &str {
        self.memo.as_deref().unwrap_or_default()
    }

    /// Name of the owning group when the server embedded it (`_wz_group`).
    pub fn group_name(&self) -> Option<&str> {
        self.extra.get("_wz_group")?.get("name")?.as_str()
    }
}

impl Entity for WorkZone {
    const KIND: &'static str = "work zone";
    const CLASS: &'static str = "WorkZoneInfo";

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

// ── Work zone group ──

/// A construction project; its periods are the [`WorkZone`] records that
/// point at it through `wz_group_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkZoneGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Comma-separated years covered by the group's work zones. Maintained
    /// by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<String>,
    /// Comma-separated corridor names, maintained by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corridors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl WorkZoneGroup {
    /// Parsed `years`, skipping anything that is not a number.
    pub fn year_list(&self) -> Vec<i32> {
        self.years
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter_map(|y| y.trim().parse().ok())
            .collect()
    }
}

impl Entity for WorkZoneGroup {
    const KIND: &'static str = "work zone group";
    const CLASS: &'static str = "WorkZoneGroupInfo";

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn related_group_is_kept_in_extra() {
        let wz: WorkZone = serde_json::from_value(json!({
            "id": 5,
            "wz_group_id": 2,
            "memo": "I-35W lane closure",
            "start_time": "2022-04-01 00:00:00",
            "end_time": "2022-10-31 00:00:00",
            "route1": { "name": "I-35W NB", "rnodes": ["rnd_1", "rnd_2"] },
            "_wz_group": { "id": 2, "name": "Unweave the Weave" }
        }))
        .unwrap();

        assert_eq!(wz.name(), "I-35W lane closure");
        assert_eq!(wz.group_name(), Some("Unweave the Weave"));
        assert!(wz.route2.is_none());

        let wire = serde_json::to_value(&wz).unwrap();
        assert_eq!(wire["route1"]["rnodes"], json!(["rnd_1", "rnd_2"]));
        assert_eq!(wire["_wz_group"]["id"], json!(2));
    }

    #[test]
    fn group_years_parse_loosely() {
        let group: WorkZoneGroup = serde_json::from_value(json!({
            "id": 2,
            "name": "Unweave the Weave",
            "years": "2021, 2022,,x",
            "corridors": "I-35W,I-94",
            "impact": null
        }))
        .unwrap();

        assert_eq!(group.year_list(), vec![2021, 2022]);
        assert_eq!(group.corridors.as_deref(), Some("I-35W,I-94"));
        assert!(group.impact.is_none());
    }
}
