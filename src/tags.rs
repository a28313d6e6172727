use geojson::{JsonObject, JsonValue};
use std::collections::HashMap;

/// Property key carrying the source element's OSM id on every emitted feature.
pub const OSM_ID_KEY: &str = "osm_id";

pub type TagTable = HashMap<String, String>;

/// Build feature properties: every source tag verbatim, plus the numeric
/// `osm_id`. No other synthetic keys are injected here.
pub fn to_properties(tags: &TagTable, osm_id: i64) -> JsonObject {
    let mut properties = JsonObject::new();
    for (key, value) in tags {
        properties.insert(key.clone(), JsonValue::from(value.as_str()));
    }
    properties.insert(OSM_ID_KEY.to_string(), JsonValue::from(osm_id));
    properties
}
