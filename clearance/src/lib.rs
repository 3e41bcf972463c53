//! Clearance reconciles scanner signals with reviewer attributions.
//!
//! Overview
//! - Loads a project (resource tree, manual attributions, signals, resolved
//!   set, breakpoints) into a [`Clearance`] value that owns all state.
//! - Mutations (`create`, `update`, `delete`, `link`, `unlink`, `replace`,
//!   `resolve`, `promote_signal`, ...) run synchronously through `&mut self`
//!   and either commit fully or leave the project untouched.
//! - Read models (contained package panels, suggestions, folder progress,
//!   filtered lists, export selections) are computed from persistent-map
//!   snapshots, either inline or on the [`AggregationWorker`].
//! - [`EditSession`] tracks the attribution form: keyed field edits, purl
//!   typing with validation, a single-level undo and the save rules.
//!
//! Key behaviors and trade-offs
//! - Referential integrity: every manual attribution is linked somewhere
//!   unless it was just created. Unlinking the last link deletes it and its
//!   id is never issued again.
//! - Breakpoints: folders at which aggregation stops. They never carry links;
//!   folder progress counts a breakpoint below the selected folder as a
//!   single unit (see [`BreakpointPolicy`]).
//! - Worker supersession: each submitted request gets a higher sequence
//!   number; responses for older requests are dropped. Dispatch failures are
//!   logged and degrade to an empty panel instead of surfacing an error.
//!
//! Examples
//! Loading a project and attributing a file:
//! ```rust,ignore
//! use clearance::{Clearance, PackageInfo};
//!
//! let input: clearance::ProjectInput = serde_json::from_str(&json)?;
//! let mut project = Clearance::builder().project(input).build()?;
//!
//! let id = project.create(PackageInfo {
//!     package_type: Some("npm".into()),
//!     package_name: Some("react".into()),
//!     ..PackageInfo::default()
//! })?;
//! project.link("/root/src/index.js", &id)?;
//! let payload = project.save_file_args();
//! ```
//!
//! Editing through the attribution form:
//! ```rust,ignore
//! use clearance::EditSession;
//!
//! let mut form = EditSession::begin(&project, &id)?;
//! form.set_purl("pkg:npm/react@18.2.0");
//! if form.can_save() {
//!     form.save(&mut project, "/root/src/index.js")?;
//! }
//! ```
//!
//! Offloading panels to the worker:
//! ```rust,ignore
//! use clearance::{AggregationKind, AggregationWorker, WorkerConfig};
//!
//! let worker = AggregationWorker::spawn(WorkerConfig::default());
//! worker.submit(&project.snapshot(), "/root/", AggregationKind::ContainedExternal, project.config().sorting);
//! let response = worker.latest().await;
//! worker.stop().await;
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod edit;
mod ops;
mod worker;

pub use core::{Clearance, ClearanceBuilder};
pub use edit::{EditSession, SaveOutcome};
pub use ops::save::SaveFailure;
pub use worker::{AggregationHandle, AggregationWorker};

// Re-export core types for convenience
pub use clearance_core::{
    AggregationKind,
    AggregationPayload,
    AggregationRequest,
    AggregationResponse,
    AggregationSnapshot,
    AttributionCollection,
    // Data model
    AttributionData,
    AttributionFilters,
    AttributionId,
    AttributionState,
    AttributionStatistics,
    AttributionStatusCount,
    BreakpointPolicy,
    ClearanceConfig,
    ClearanceError,
    Confidence,
    DisplayPackageInfo,
    ExportEntry,
    ExportKind,
    ExternalAttributionSource,
    ExternalAttributionSources,
    IdSet,
    Operation,
    PackageField,
    PackageInfo,
    PanelData,
    ProgressBreakdown,
    ProjectInput,
    ProjectMetadata,
    ProjectWriter,
    PurlParts,
    ResourceNode,
    ResourceTree,
    Resources,
    SaveFileArgs,
    Sorting,
    Source,
    Suggestion,
    SuggestionGroup,
    WorkerConfig,
    is_important_information_missing,
};
pub use clearance_core::purl;
