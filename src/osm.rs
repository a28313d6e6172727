use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsmNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// A complete way: node geometry already resolved, in way order.
/// Invariant: at least one node. A single-node way cannot form any geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsmWay {
    pub id: i64,
    pub nodes: Vec<OsmNode>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsmMember {
    #[serde(default)]
    pub role: String,
    pub element: OsmElement,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsmRelation {
    pub id: i64,
    pub members: Vec<OsmMember>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OsmElement {
    Node(OsmNode),
    Way(OsmWay),
    Relation(OsmRelation),
}

impl OsmElement {
    #[allow(dead_code)]
    pub fn id(&self) -> i64 {
        match self {
            OsmElement::Node(node) => node.id,
            OsmElement::Way(way) => way.id,
            OsmElement::Relation(relation) => relation.id,
        }
    }

    pub fn tags(&self) -> &HashMap<String, String> {
        match self {
            OsmElement::Node(node) => &node.tags,
            OsmElement::Way(way) => &way.tags,
            OsmElement::Relation(relation) => &relation.tags,
        }
    }

    pub fn has_tag(&self, key: &str) -> bool {
        self.tags().contains_key(key)
    }

    #[allow(dead_code)]
    pub fn get_tag(&self, key: &str) -> Option<&String> {
        self.tags().get(key)
    }

    pub fn matches_filter(&self, filter_tags: &[Vec<String>]) -> bool {
        if filter_tags.is_empty() {
            return true;
        }

        // OR logic between groups: any group that matches makes the element match
        filter_tags.iter().any(|and_group| {
            // AND logic within group: all tags in the group must match
            and_group
                .iter()
                .all(|tag_pattern| self.matches_tag_pattern(tag_pattern))
        })
    }

    /// Check if element matches a tag key pattern (supports wildcards with *)
    pub fn matches_tag_pattern(&self, pattern: &str) -> bool {
        if pattern == "*" {
            // Special case: '*' matches any element that has at least one tag
            return !self.tags().is_empty();
        }

        if let Some(prefix) = pattern.strip_suffix('*') {
            // Prefix wildcard: "addr*" matches "addr:street", "addr:housenumber", etc.
            return self.tags().keys().any(|key| key.starts_with(prefix));
        }

        if let Some(suffix) = pattern.strip_prefix('*') {
            // Suffix wildcard: "*:en" matches "name:en", "addr:street:en", etc.
            return self.tags().keys().any(|key| key.ends_with(suffix));
        }

        // Exact match: no wildcards
        self.has_tag(pattern)
    }
}

/// Closedness is by node identity, not coordinates: two distinct nodes at
/// the same position do not close a way.
#[allow(dead_code)]
pub fn is_closed_way(way: &OsmWay) -> bool {
    match (way.nodes.first(), way.nodes.last()) {
        (Some(first), Some(last)) => first.id == last.id,
        _ => false,
    }
}
