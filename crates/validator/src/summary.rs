use std::collections::BTreeMap;

use czml_model::EntityType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::{display_value, is_truthy};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CzmlSummary {
    pub name: String,
    pub version: String,
    /// Every packet after element 0.
    pub entity_count: usize,
    pub has_clock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_interval: Option<String>,
    pub entity_types: BTreeMap<EntityType, usize>,
}

/// Cheap pre-filter: a non-empty array whose first element is an object with an `id`.
///
/// Not a substitute for [`crate::validate`].
#[must_use]
pub fn is_likely_czml(data: &Value) -> bool {
    data.as_array()
        .and_then(|packets| packets.first())
        .and_then(Value::as_object)
        .is_some_and(|first| first.contains_key("id"))
}

/// Describe a document array for display.
///
/// Element 0 is read as the document packet whether or not it is one; callers that
/// care should check `has_document` from a validation run first.
#[must_use]
pub fn summarize(packets: &[Value]) -> CzmlSummary {
    let doc = packets.first().and_then(Value::as_object);
    let field = |key: &str| doc.and_then(|d| d.get(key)).filter(|v| is_truthy(v));

    let clock = field("clock");
    let time_interval = clock
        .and_then(|c| c.get("interval"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut entity_types: BTreeMap<EntityType, usize> = BTreeMap::new();
    for packet in packets.iter().skip(1).filter_map(Value::as_object) {
        for kind in EntityType::present_in(packet) {
            *entity_types.entry(kind).or_default() += 1;
        }
    }

    CzmlSummary {
        name: field("name").map_or_else(|| "Untitled".to_string(), display_value),
        version: field("version").map_or_else(|| "unknown".to_string(), display_value),
        entity_count: packets.len().saturating_sub(1),
        has_clock: clock.is_some(),
        time_interval,
        entity_types,
    }
}
