//! Turns a complete OSM element into a GeoJSON feature, or drops it.
//!
//! Conversion is pure: no I/O, no logging. Malformed-but-plausible topology
//! never errors; every anomaly maps to a defined drop outcome (`None`) or a
//! defined degraded geometry.

use crate::assembler::assemble_chains;
use crate::geometry::{chain_to_geometry, node_position};
use crate::osm::{OsmElement, OsmRelation, OsmWay};
use crate::tags::{TagTable, to_properties};
use geojson::feature::Id;
use geojson::{Feature, Geometry, LineStringType, PolygonType, Value};

/// Convert one element. Untagged elements of any kind produce nothing:
/// they exist only as geometric support for other elements.
pub fn convert(element: &OsmElement) -> Option<Feature> {
    if element.tags().is_empty() {
        return None;
    }

    match element {
        OsmElement::Node(node) => Some(feature(
            Value::Point(node_position(node)),
            &node.tags,
            node.id,
        )),
        OsmElement::Way(way) => convert_way(way),
        OsmElement::Relation(relation) => convert_relation(relation),
    }
}

/// A standalone way's node order is already its own chain; no assembly
/// needed. Ways of 0 or 1 nodes are degenerate and dropped.
fn convert_way(way: &OsmWay) -> Option<Feature> {
    let value = chain_to_geometry(&way.nodes)?;
    Some(feature(value, &way.tags, way.id))
}

fn convert_relation(relation: &OsmRelation) -> Option<Feature> {
    if relation.tags.get("type").is_some_and(|t| t == "multipolygon") {
        // Role "outer" is matched exactly; every other role (not just
        // "inner") is treated as a potential inner ring. Open chains on
        // either side are silently discarded, and a relation whose member
        // set yields no polygon at all still emits an empty MultiPolygon.
        let mut polygons = closed_polygons(member_ways(relation, |role| role == "outer"));
        polygons.extend(closed_polygons(member_ways(relation, |role| role != "outer")));
        return Some(feature(
            Value::MultiPolygon(polygons),
            &relation.tags,
            relation.id,
        ));
    }

    // Generic relation: all member ways regardless of role, keeping only
    // open chains. A chain that happens to close is discarded rather than
    // demoted to a line.
    let lines: Vec<LineStringType> = assemble_chains(member_ways(relation, |_| true))
        .iter()
        .filter_map(|chain| match chain_to_geometry(chain) {
            Some(Value::LineString(coordinates)) => Some(coordinates),
            _ => None,
        })
        .collect();
    if lines.is_empty() {
        return None;
    }
    Some(feature(
        Value::MultiLineString(lines),
        &relation.tags,
        relation.id,
    ))
}

/// Member ways with a role accepted by `keep`, in member order. Node and
/// nested-relation members never contribute geometry here.
fn member_ways<'a>(
    relation: &'a OsmRelation,
    keep: impl Fn(&str) -> bool + 'a,
) -> impl Iterator<Item = &'a OsmWay> {
    relation
        .members
        .iter()
        .filter(move |member| keep(&member.role))
        .filter_map(|member| match &member.element {
            OsmElement::Way(way) => Some(way),
            _ => None,
        })
}

fn closed_polygons<'a>(ways: impl Iterator<Item = &'a OsmWay>) -> Vec<PolygonType> {
    assemble_chains(ways)
        .iter()
        .filter_map(|chain| match chain_to_geometry(chain) {
            Some(Value::Polygon(rings)) => Some(rings),
            _ => None,
        })
        .collect()
}

fn feature(value: Value, tags: &TagTable, osm_id: i64) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: Some(Id::Number(osm_id.into())),
        properties: Some(to_properties(tags, osm_id)),
        foreign_members: None,
    }
}
