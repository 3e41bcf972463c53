//! Re-export of the data transfer objects from `clearance-types`.
// Consolidated re-exports so downstream crates can depend on `clearance-core` only

pub use clearance_types::{ClearanceError, Operation};

pub use clearance_types::{
    AttributionData, AttributionId, AttributionState, Confidence, PackageField, PackageInfo,
    ProjectInput, ProjectMetadata, ResourceNode, Resources, SaveFileArgs, Source,
};

pub use clearance_types::{
    BreakpointPolicy, ClearanceConfig, ExternalAttributionSource, ExternalAttributionSources,
    Sorting, WorkerConfig,
};

pub use clearance_types::{
    AttributionFilters, AttributionStatistics, AttributionStatusCount, DisplayPackageInfo,
    ExportEntry, ExportKind, PanelData, ProgressBreakdown, Suggestion, SuggestionGroup,
};
