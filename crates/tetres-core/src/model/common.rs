// ── Common building blocks shared across the domain model ──

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Timestamp format used by the server for every datetime field.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fields the client does not model, kept so updates send them back unchanged.
pub type Extra = Map<String, Value>;

/// Format a start/end pair the way the admin lists show it.
///
/// - same month: `2024-01-05 ~ 07`
/// - same year: `2024-01-30 ~ 02-01`
/// - otherwise: `2023-12-30 ~ 2024-01-02`
pub fn period_label(start: &NaiveDateTime, end: &NaiveDateTime) -> String {
    let head = start.format("%Y-%m-%d");
    let tail = if start.year() == end.year() && start.month() == end.month() {
        end.format("%d")
    } else if start.year() == end.year() {
        end.format("%m-%d")
    } else {
        end.format("%Y-%m-%d")
    };
    format!("{head} ~ {tail}")
}

/// Comma-separated list of the calendar years a period touches (`2019,2020`).
pub fn years_string(start: &NaiveDateTime, end: &NaiveDateTime) -> String {
    (start.year()..=end.year())
        .map(|y| y.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Deserialize `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// serde adapter for optional server timestamps.
///
/// `null`, a missing field and an empty string all decode to `None`.
pub mod server_time {
    use chrono::NaiveDateTime;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATETIME_FORMAT;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.collect_str(&dt.format(DATETIME_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.trim().is_empty() => NaiveDateTime::parse_from_str(s.trim(), DATETIME_FORMAT)
                .map(Some)
                .map_err(D::Error::custom),
            _ => Ok(None),
        }
    }
}
