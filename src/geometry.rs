use crate::osm::OsmNode;
use geojson::{PointType, Value};

/// GeoJSON position for a node: longitude first.
pub fn node_position(node: &OsmNode) -> PointType {
    vec![node.lon, node.lat]
}

/// Classify an ordered node chain as Polygon or LineString.
///
/// A chain whose first and last node are the same node (by id) with at
/// least 4 entries is a closed ring: 3 distinct vertices plus the closing
/// repeat. A 3-entry chain that starts and ends on the same node has only
/// 2 distinct points and stays a LineString. Chains of 0 or 1 nodes carry
/// no geometry at all.
pub fn chain_to_geometry(nodes: &[OsmNode]) -> Option<Value> {
    if nodes.len() <= 1 {
        return None;
    }

    let coordinates: Vec<PointType> = nodes.iter().map(node_position).collect();
    let closed = match (nodes.first(), nodes.last()) {
        (Some(first), Some(last)) => first.id == last.id,
        _ => false,
    };

    if closed && nodes.len() >= 4 {
        Some(Value::Polygon(vec![coordinates]))
    } else {
        Some(Value::LineString(coordinates))
    }
}
