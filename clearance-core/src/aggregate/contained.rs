use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::store::{AttributionCollection, IdSet};
use crate::tree::{ResourceTree, Walk};
use clearance_types::AttributionId;

fn collect(
    tree: &ResourceTree,
    resource: &str,
    collection: &AttributionCollection,
    breakpoints: &BTreeSet<String>,
    resolved: Option<&IdSet>,
    include_start: bool,
) -> Vec<(AttributionId, u32)> {
    let mut order: Vec<(AttributionId, u32)> = Vec::new();
    let mut index: HashMap<AttributionId, usize> = HashMap::new();
    tree.walk(resource, |visit| {
        if !visit.is_start && breakpoints.contains(visit.path) {
            return Walk::Skip;
        }
        if visit.is_start && !include_start {
            return Walk::Descend;
        }
        for id in collection.attribution_ids_for_resource(visit.path) {
            if resolved.is_some_and(|r| r.contains(id)) {
                continue;
            }
            match index.get(id) {
                Some(&at) => order[at].1 += 1,
                None => {
                    index.insert(id.clone(), order.len());
                    order.push((id.clone(), 1));
                }
            }
        }
        Walk::Descend
    });
    order
}

/// Count the links of every attribution in the subtree rooted at `resource`.
///
/// The root's own links are included. Descendants that are breakpoints are
/// skipped along with everything beneath them; resolved ids are excluded when
/// a set is given. Each link counts once. Unknown resources yield an empty map.
#[must_use]
pub fn aggregate(
    tree: &ResourceTree,
    resource: &str,
    collection: &AttributionCollection,
    breakpoints: &BTreeSet<String>,
    resolved: Option<&IdSet>,
) -> BTreeMap<AttributionId, u32> {
    collect(tree, resource, collection, breakpoints, resolved, true)
        .into_iter()
        .collect()
}

/// Attributions linked strictly below `resource`, in first-seen order, with counts.
#[must_use]
pub fn contained_attribution_ids(
    tree: &ResourceTree,
    resource: &str,
    collection: &AttributionCollection,
    breakpoints: &BTreeSet<String>,
    resolved: Option<&IdSet>,
) -> Vec<(AttributionId, u32)> {
    collect(tree, resource, collection, breakpoints, resolved, false)
}
