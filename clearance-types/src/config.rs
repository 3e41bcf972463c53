//! Configuration types shared by the engine and the facade.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Display metadata for one scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalAttributionSource {
    /// Human-readable name used as the suggestion group label.
    pub name: String,
    /// Higher priorities sort first. Unknown sources and manual attributions rank 0.
    #[serde(default)]
    pub priority: i32,
}

impl ExternalAttributionSource {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, priority: i32) -> Self {
        Self {
            name: name.into(),
            priority,
        }
    }
}

/// Scanner key to display metadata.
pub type ExternalAttributionSources = BTreeMap<String, ExternalAttributionSource>;

/// Ordering of package cards in aggregated panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Sorting {
    /// Most frequent first, then by name.
    #[default]
    Occurrence,
    /// By name, case-insensitive; unnamed cards last.
    Alphabetical,
}

/// How a breakpoint below the counted folder contributes to progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum BreakpointPolicy {
    /// The breakpoint is attributed when anything beneath it is.
    #[default]
    AnyDescendant,
    /// The breakpoint is attributed only through its own links, so never.
    NodeOnly,
}

/// Limits for the aggregation worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Bounded request queue length.
    pub queue_capacity: usize,
    /// Snapshots with more tree nodes than this are refused at dispatch.
    pub max_snapshot_resources: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 16,
            max_snapshot_resources: 5_000_000,
        }
    }
}

/// Global settings for a `Clearance` project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearanceConfig {
    /// Scanner display metadata; merged over the project's own source table.
    pub sources: ExternalAttributionSources,
    /// Breakpoint contribution to folder progress.
    pub breakpoint_policy: BreakpointPolicy,
    /// Default ordering of aggregated panels.
    pub sorting: Sorting,
    /// Aggregation worker limits.
    pub worker: WorkerConfig,
}
