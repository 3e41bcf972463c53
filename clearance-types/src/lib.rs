//! Clearance data transfer objects: attributions, project load/save shapes,
//! reports and configuration.
#![warn(missing_docs)]

mod config;
mod error;
mod filter;
mod operation;
mod package;
mod project;
mod reports;

pub use config::{
    BreakpointPolicy, ClearanceConfig, ExternalAttributionSource, ExternalAttributionSources,
    Sorting, WorkerConfig,
};
pub use error::ClearanceError;
pub use filter::AttributionFilters;
pub use operation::Operation;
pub use package::{AttributionId, AttributionState, Confidence, PackageField, PackageInfo, Source};
pub use project::{
    AttributionData, ProjectInput, ProjectMetadata, ResourceNode, Resources, SaveFileArgs,
};
pub use reports::{
    AttributionStatistics, AttributionStatusCount, DisplayPackageInfo, ExportEntry, ExportKind,
    PanelData, ProgressBreakdown, Suggestion, SuggestionGroup,
};
