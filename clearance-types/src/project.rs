//! Load and save shapes exchanged with the file layer.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::config::ExternalAttributionSources;
use crate::package::{AttributionId, PackageInfo};

/// Node of the scanned resource tree as stored in project files.
///
/// Files are numbers (a size or a plain `1` marker); folders map child
/// names to nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceNode {
    /// Leaf.
    File(u64),
    /// Named children.
    Folder(BTreeMap<String, ResourceNode>),
}

impl ResourceNode {
    /// A file marker.
    #[must_use]
    pub const fn file() -> Self {
        Self::File(1)
    }

    /// A folder built from `(name, node)` pairs.
    pub fn folder<I, K>(children: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        Self::Folder(children.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Children of the root folder.
pub type Resources = BTreeMap<String, ResourceNode>;

/// One attribution collection: payloads plus the resource links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributionData {
    /// Id to payload.
    #[serde(default)]
    pub attributions: BTreeMap<AttributionId, PackageInfo>,
    /// Resource path to linked ids, in link order.
    #[serde(default)]
    pub resources_to_attributions: BTreeMap<String, Vec<AttributionId>>,
}

/// Descriptive project header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    /// Stable project id.
    #[serde(default)]
    pub project_id: String,
    /// Creation timestamp as written by the scanner.
    #[serde(default)]
    pub file_creation_date: String,
    /// Optional title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_title: Option<String>,
}

/// Everything needed to open a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    /// Project header.
    #[serde(default)]
    pub metadata: ProjectMetadata,
    /// Resource tree below the root.
    pub resources: Resources,
    /// Reviewer attributions.
    #[serde(default)]
    pub manual_attributions: AttributionData,
    /// Scanner signals.
    #[serde(default)]
    pub external_attributions: AttributionData,
    /// Signals hidden by the reviewer.
    #[serde(default)]
    pub resolved_external_attributions: BTreeSet<AttributionId>,
    /// Folders at which aggregation stops.
    #[serde(default)]
    pub attribution_breakpoints: BTreeSet<String>,
    /// Folders counted as files by folder progress.
    #[serde(default)]
    pub files_with_children: BTreeSet<String>,
    /// Scanner display metadata shipped with the project.
    #[serde(default)]
    pub external_attribution_sources: ExternalAttributionSources,
}

/// Payload handed to the file layer on save.
///
/// External attributions are never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFileArgs {
    /// Committed manual attributions.
    pub manual_attributions: BTreeMap<AttributionId, PackageInfo>,
    /// Resource path to linked manual ids.
    pub resources_to_attributions: BTreeMap<String, Vec<AttributionId>>,
    /// Resolved signal ids.
    pub resolved_external_attributions: BTreeSet<AttributionId>,
}
