//! Stitches way fragments into maximal chains by endpoint matching.
//!
//! Matching is greedy and first-fit: each fragment is consumed in input
//! order and attached to the earliest-created group whose open endpoint it
//! meets. No search for a globally best pairing is attempted, so inputs
//! with several valid topologies can yield different chains under different
//! input orderings. The set of endpoint-connectivity components is still
//! deterministic for a given input multiset.

use crate::osm::{OsmNode, OsmWay};
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Open-endpoint lookup: node id -> group indices (creation order), kept
/// separately for group heads and group tails so a fragment match is O(1)
/// instead of a scan over all groups.
#[derive(Default)]
struct EndpointIndex {
    heads: HashMap<i64, BTreeSet<usize>>,
    tails: HashMap<i64, BTreeSet<usize>>,
}

impl EndpointIndex {
    fn insert(&mut self, group: &VecDeque<OsmNode>, idx: usize) {
        if let (Some(head), Some(tail)) = (group.front(), group.back()) {
            self.heads.entry(head.id).or_default().insert(idx);
            self.tails.entry(tail.id).or_default().insert(idx);
        }
    }

    fn remove(&mut self, group: &VecDeque<OsmNode>, idx: usize) {
        if let (Some(head), Some(tail)) = (group.front(), group.back()) {
            if let Some(set) = self.heads.get_mut(&head.id) {
                set.remove(&idx);
            }
            if let Some(set) = self.tails.get_mut(&tail.id) {
                set.remove(&idx);
            }
        }
    }

    /// Earliest-created group the fragment can attach to: either its last
    /// node meets a group head, or its first node meets a group tail.
    fn first_match(&self, first: &OsmNode, last: &OsmNode) -> Option<usize> {
        let head_hit = self.heads.get(&last.id).and_then(|set| set.first());
        let tail_hit = self.tails.get(&first.id).and_then(|set| set.first());
        match (head_hit, tail_hit) {
            (Some(a), Some(b)) => Some(*a.min(b)),
            (Some(a), None) => Some(*a),
            (None, Some(b)) => Some(*b),
            (None, None) => None,
        }
    }
}

/// Merge fragments into the fewest chains reachable by first-fit endpoint
/// matching. Each returned chain preserves node order; a chain that closed
/// ends with a repeat of its first node. Node equality is by id throughout.
pub fn assemble_chains<'a, I>(fragments: I) -> Vec<Vec<OsmNode>>
where
    I: IntoIterator<Item = &'a OsmWay>,
{
    let mut groups: Vec<VecDeque<OsmNode>> = Vec::new();
    let mut index = EndpointIndex::default();

    for fragment in fragments {
        let (Some(first), Some(last)) = (fragment.nodes.first(), fragment.nodes.last()) else {
            continue;
        };

        let Some(idx) = index.first_match(first, last) else {
            let group: VecDeque<OsmNode> = fragment.nodes.iter().cloned().collect();
            index.insert(&group, groups.len());
            groups.push(group);
            continue;
        };

        let group = &mut groups[idx];
        index.remove(group, idx);

        let meets_tail = group.back().is_some_and(|tail| tail.id == first.id);
        if meets_tail {
            // Extend forward, skipping the shared endpoint. When the
            // fragment's last node also meets the group head this closes
            // the group into a ring ending on a repeat of its first node.
            for node in fragment.nodes.iter().skip(1) {
                group.push_back(node.clone());
            }
        } else {
            // Fragment's last node meets the group head: extend backward.
            for node in fragment.nodes.iter().rev().skip(1) {
                group.push_front(node.clone());
            }
        }

        index.insert(group, idx);
    }

    groups.into_iter().map(Vec::from).collect()
}
