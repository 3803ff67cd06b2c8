// ── Domain model ──
//
// Records managed through the TeTRES admin API. Each type mirrors the
// server's info class; fields the client does not care about are kept
// in a flattened `extra` map so an edit round-trips them unchanged.

pub mod common;
pub mod entity_id;

pub mod action_log;
pub mod route;
pub mod snow;
pub mod special_event;
pub mod system_config;
pub mod work_zone;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

// ── Re-exports ──────────────────────────────────────────────────────

pub use common::{DATETIME_FORMAT, Extra, period_label, years_string};
pub use entity_id::EntityId;

pub use action_log::ActionLog;
pub use route::ReliabilityRoute;
pub use snow::{SnowEvent, SnowManagement, SnowRoute};
pub use special_event::SpecialEvent;
pub use system_config::SystemConfig;
pub use work_zone::{WorkZone, WorkZoneGroup};

/// Python module the server resolves `__class__` tags against.
pub const WIRE_MODULE: &str = "pyticas_tetres.ttypes";

/// A record type served by one CRUD endpoint family.
pub trait Entity:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Short name used in logs and error messages (`"special event"`).
    const KIND: &'static str;

    /// Server-side class name, sent as the `__class__` tag.
    const CLASS: &'static str;

    /// Server-assigned identity; `None` until the record is inserted.
    fn id(&self) -> Option<EntityId>;
}

/// Encode an entity the way the server's JSON decoder expects it.
pub fn to_wire<T: Entity>(entity: &T) -> Result<Value, serde_json::Error> {
    tagged(entity, T::CLASS)
}

/// Serialize `value` and add `__class__` / `__module__` when missing.
pub(crate) fn tagged<S: Serialize>(value: &S, class: &str) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(value)?;
    if let Value::Object(map) = &mut value {
        map.entry("__class__").or_insert_with(|| Value::from(class));
        map.entry("__module__").or_insert_with(|| Value::from(WIRE_MODULE));
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_encoding_adds_type_tags() {
        let event = SpecialEvent {
            name: "Twins".into(),
            ..SpecialEvent::default()
        };
        let wire = to_wire(&event).unwrap();
        assert_eq!(wire["__class__"], json!("SpecialEventInfo"));
        assert_eq!(wire["__module__"], json!(WIRE_MODULE));
        assert_eq!(wire["name"], json!("Twins"));
        assert!(wire.get("id").is_none());
    }

    #[test]
    fn wire_encoding_keeps_server_tags() {
        let event: SpecialEvent = serde_json::from_value(json!({
            "id": 4,
            "name": "Vikings",
            "__class__": "SpecialEventInfo",
            "__module__": "custom.module"
        }))
        .unwrap();
        let wire = to_wire(&event).unwrap();
        assert_eq!(wire["__module__"], json!("custom.module"));
        assert_eq!(wire["id"], json!(4));
    }
}
