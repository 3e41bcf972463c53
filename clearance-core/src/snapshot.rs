//! Message contract between the interactive side and the aggregation worker.
//!
//! A request carries an immutable snapshot; the response carries a full
//! result. Nothing is shared mutably between the two sides.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::aggregate::panel::{contained_external_panel, contained_manual_panel};
use crate::aggregate::progress::{ProgressScope, progress_breakdown};
use crate::store::{AttributionCollection, IdSet};
use crate::tree::ResourceTree;
use clearance_types::{
    BreakpointPolicy, ExternalAttributionSources, PanelData, ProgressBreakdown, Sorting,
};

/// Frozen view of a project. Cloning the collections is O(1).
#[derive(Debug, Clone, Default)]
pub struct AggregationSnapshot {
    /// Resource tree.
    pub tree: Arc<ResourceTree>,
    /// Manual attributions.
    pub manual: AttributionCollection,
    /// Signals.
    pub external: AttributionCollection,
    /// Resolved signal ids.
    pub resolved: IdSet,
    /// Canonical breakpoint paths.
    pub breakpoints: Arc<BTreeSet<String>>,
    /// Folders counted as files.
    pub files_with_children: Arc<BTreeSet<String>>,
    /// Scanner display metadata.
    pub sources: Arc<ExternalAttributionSources>,
    /// Breakpoint contribution to progress.
    pub breakpoint_policy: BreakpointPolicy,
}

impl AggregationSnapshot {
    /// Tree nodes covered by the snapshot.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.tree.len()
    }

    /// Progress scope over this snapshot.
    #[must_use]
    pub fn progress_scope(&self) -> ProgressScope<'_> {
        ProgressScope {
            tree: &self.tree,
            breakpoints: &self.breakpoints,
            files_with_children: &self.files_with_children,
            policy: self.breakpoint_policy,
        }
    }
}

/// What the worker should compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AggregationKind {
    /// Signals contained below the resource.
    ContainedExternal,
    /// Manual attributions contained below the resource.
    ContainedManual,
    /// Folder progress breakdown.
    Progress,
}

impl AggregationKind {
    /// Stable identifier for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContainedExternal => "contained-external",
            Self::ContainedManual => "contained-manual",
            Self::Progress => "progress",
        }
    }
}

/// Computed result.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregationPayload {
    /// Package cards.
    Panel(PanelData),
    /// Folder progress.
    Progress(ProgressBreakdown),
}

impl AggregationPayload {
    /// The empty result for `kind`, used when dispatch fails.
    #[must_use]
    pub fn empty(kind: AggregationKind) -> Self {
        match kind {
            AggregationKind::Progress => Self::Progress(ProgressBreakdown::default()),
            AggregationKind::ContainedExternal | AggregationKind::ContainedManual => {
                Self::Panel(PanelData::default())
            }
        }
    }

    /// Panel contents, if this is a panel.
    #[must_use]
    pub const fn as_panel(&self) -> Option<&PanelData> {
        match self {
            Self::Panel(p) => Some(p),
            Self::Progress(_) => None,
        }
    }

    /// Progress counts, if this is a progress result.
    #[must_use]
    pub const fn as_progress(&self) -> Option<&ProgressBreakdown> {
        match self {
            Self::Progress(p) => Some(p),
            Self::Panel(_) => None,
        }
    }
}

/// One unit of work for the worker.
#[derive(Debug, Clone)]
pub struct AggregationRequest {
    /// Monotonic sequence number; higher supersedes lower.
    pub seq: u64,
    /// Resource the panel is computed for.
    pub resource_id: String,
    /// What to compute.
    pub kind: AggregationKind,
    /// Card order.
    pub sorting: Sorting,
    /// Frozen project.
    pub snapshot: Arc<AggregationSnapshot>,
}

/// Answer to an [`AggregationRequest`].
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResponse {
    /// Sequence number of the request.
    pub seq: u64,
    /// Resource the result belongs to.
    pub resource_id: String,
    /// Computed result.
    pub payload: AggregationPayload,
}

impl AggregationRequest {
    /// Compute the response. Pure; never touches shared state.
    #[must_use]
    pub fn execute(&self) -> AggregationResponse {
        let snap = &*self.snapshot;
        let payload = match self.kind {
            AggregationKind::ContainedExternal => AggregationPayload::Panel(
                contained_external_panel(snap, &self.resource_id, self.sorting),
            ),
            AggregationKind::ContainedManual => AggregationPayload::Panel(
                contained_manual_panel(snap, &self.resource_id, self.sorting),
            ),
            AggregationKind::Progress => AggregationPayload::Progress(progress_breakdown(
                &snap.progress_scope(),
                &self.resource_id,
                &snap.manual,
                &snap.external,
                Some(&snap.resolved),
            )),
        };
        self.respond(payload)
    }

    /// Response carrying the empty result for this request's kind.
    #[must_use]
    pub fn empty_response(&self) -> AggregationResponse {
        self.respond(AggregationPayload::empty(self.kind))
    }

    fn respond(&self, payload: AggregationPayload) -> AggregationResponse {
        AggregationResponse {
            seq: self.seq,
            resource_id: self.resource_id.clone(),
            payload,
        }
    }
}
