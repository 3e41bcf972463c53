use std::collections::BTreeSet;

use crate::store::{AttributionCollection, IdSet};
use crate::tree::{ResourceTree, Walk};
use clearance_types::{AttributionStatusCount, BreakpointPolicy, ProgressBreakdown};

/// Tree facts shared by every progress computation.
#[derive(Debug, Clone, Copy)]
pub struct ProgressScope<'a> {
    /// Resource tree.
    pub tree: &'a ResourceTree,
    /// Canonical breakpoint paths.
    pub breakpoints: &'a BTreeSet<String>,
    /// Folders counted as files.
    pub files_with_children: &'a BTreeSet<String>,
    /// Breakpoint contribution.
    pub policy: BreakpointPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    Node,
    Subtree,
}

impl ProgressScope<'_> {
    fn for_each_unit<F>(&self, resource: &str, mut f: F)
    where
        F: FnMut(&str, Span),
    {
        self.tree.walk(resource, |visit| {
            if !visit.is_start && self.breakpoints.contains(visit.path) {
                let span = match self.policy {
                    BreakpointPolicy::NodeOnly => Span::Node,
                    _ => Span::Subtree,
                };
                f(visit.path, span);
                return Walk::Skip;
            }
            if visit.is_file {
                f(visit.path, Span::Node);
                return Walk::Skip;
            }
            if self.files_with_children.contains(visit.path) {
                f(visit.path, Span::Subtree);
                return Walk::Skip;
            }
            Walk::Descend
        });
    }

    fn has_live_link(
        &self,
        collection: &AttributionCollection,
        resolved: Option<&IdSet>,
        path: &str,
        span: Span,
    ) -> bool {
        let live = |p: &str| {
            collection
                .attribution_ids_for_resource(p)
                .iter()
                .any(|id| !resolved.is_some_and(|r| r.contains(id)))
        };
        if span == Span::Node {
            return live(path);
        }
        let mut found = false;
        self.tree.walk(path, |visit| {
            if found {
                return Walk::Skip;
            }
            found = live(visit.path);
            Walk::Descend
        });
        found
    }
}

/// Count attributed and total files beneath `resource`.
///
/// Files and files-with-children are units. A breakpoint below `resource`
/// is not entered and counts as one unit, attributed per the scope's policy.
/// A unit is attributed when it carries a link to a non-resolved id.
#[must_use]
pub fn count_attribution_status(
    scope: &ProgressScope<'_>,
    resource: &str,
    collection: &AttributionCollection,
    resolved: Option<&IdSet>,
) -> AttributionStatusCount {
    let mut out = AttributionStatusCount::default();
    scope.for_each_unit(resource, |path, span| {
        out.total += 1;
        if scope.has_live_link(collection, resolved, path, span) {
            out.attributed += 1;
        }
    });
    out
}

/// Split the units beneath `resource` by manual, signal-only and none.
///
/// Manual attributions take precedence; resolved signals do not count.
#[must_use]
pub fn progress_breakdown(
    scope: &ProgressScope<'_>,
    resource: &str,
    manual: &AttributionCollection,
    external: &AttributionCollection,
    resolved: Option<&IdSet>,
) -> ProgressBreakdown {
    let mut out = ProgressBreakdown::default();
    scope.for_each_unit(resource, |path, span| {
        out.total += 1;
        if scope.has_live_link(manual, None, path, span) {
            out.manual += 1;
        } else if scope.has_live_link(external, resolved, path, span) {
            out.only_signals += 1;
        } else {
            out.none += 1;
        }
    });
    out
}
