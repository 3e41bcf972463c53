//! clearance-core
//!
//! Core algorithms of the Clearance attribution engine.
//!
//! - `purl`: the package URL codec.
//! - `tree`: the indexed resource tree and its traversal.
//! - `store`: `AttributionCollection`, the id map and link map kept consistent.
//! - `aggregate`: subtree aggregation, suggestion dedup, panels and progress.
//! - `snapshot`: the request/response contract of the aggregation worker.
//!
//! Async runtime (Tokio)
//! ---------------------
//! Only the worker plumbing touches Tokio: `task::TaskGuard` stops and cancels
//! `tokio::task::JoinHandle<()>` tasks, and `writer::ProjectWriter` is an
//! async trait. Everything else is synchronous and runtime-agnostic.
//!
#![warn(missing_docs)]

/// Subtree aggregation, dedup, panels and progress.
pub mod aggregate;
/// Missing-information highlighting.
pub mod highlight;
/// Package URL codec.
pub mod purl;
/// Worker request/response contract.
pub mod snapshot;
/// Attribution collections.
pub mod store;
/// Task handle utilities shared by worker handles and tests.
pub mod task;
/// Resource tree.
pub mod tree;
pub mod types;
/// Save sink trait.
pub mod writer;

pub use aggregate::contained::{aggregate, contained_attribution_ids};
pub use aggregate::dedup::{group_suggestions, suggestions, suggestions_for_resource};
pub use aggregate::panel::{contained_external_panel, contained_manual_panel};
pub use aggregate::progress::{ProgressScope, count_attribution_status, progress_breakdown};
pub use highlight::is_important_information_missing;
pub use purl::PurlParts;
pub use snapshot::{
    AggregationKind, AggregationPayload, AggregationRequest, AggregationResponse,
    AggregationSnapshot,
};
pub use store::{AttributionCollection, IdSet};
pub use tree::ResourceTree;
pub use types::*;
pub use writer::ProjectWriter;
