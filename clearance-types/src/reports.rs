//! Result shapes produced by the aggregation and view layers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::package::{AttributionId, PackageInfo};

/// One merged card of an aggregated panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPackageInfo {
    /// Representative payload (first contributing attribution).
    #[serde(flatten)]
    pub package: PackageInfo,
    /// Every attribution merged into this card, first-seen order.
    pub attribution_ids: Vec<AttributionId>,
    /// Summed occurrence count.
    pub count: u32,
}

/// Aggregated panel contents answered by the worker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelData {
    /// Card ids in display order.
    pub sorted_package_card_ids: Vec<String>,
    /// Card id to merged card.
    pub display_package_infos: BTreeMap<String, DisplayPackageInfo>,
}

impl PanelData {
    /// True when the panel has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted_package_card_ids.is_empty()
    }

    /// Cards in display order.
    pub fn cards(&self) -> impl Iterator<Item = &DisplayPackageInfo> {
        self.sorted_package_card_ids
            .iter()
            .filter_map(|id| self.display_package_infos.get(id))
    }
}

/// A deduplicated autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Representative payload.
    pub package: PackageInfo,
    /// Summed occurrences of every merged item.
    pub count: u32,
    /// Group label.
    pub group: String,
    /// Source priority used for ordering.
    pub priority: i32,
}

/// Suggestions sharing a group label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionGroup {
    /// Group label.
    pub label: String,
    /// Suggestions in ranked order.
    pub suggestions: Vec<Suggestion>,
}

/// Attributed and total file counts beneath a folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionStatusCount {
    /// Counted units with at least one live link.
    pub attributed: u32,
    /// Counted units.
    pub total: u32,
}

/// Folder progress split by the kind of attribution present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressBreakdown {
    /// Counted units.
    pub total: u32,
    /// Units with a manual attribution.
    pub manual: u32,
    /// Units with signals but no manual attribution.
    pub only_signals: u32,
    /// Units with neither.
    pub none: u32,
}

/// Counts shown above the attribution list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributionStatistics {
    /// Committed manual attributions.
    pub total: u32,
    /// Marked for follow-up.
    pub follow_up: u32,
    /// First party.
    pub first_party: u32,
    /// Waiting for review.
    pub needs_review: u32,
    /// Pre-selected.
    pub pre_selected: u32,
    /// Excluded from notices.
    pub excluded_from_notice: u32,
}

/// Export document selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ExportKind {
    /// Attributions needing follow-up.
    FollowUp,
    /// Short notice list.
    CompactList,
    /// Notice list with license texts.
    DetailedList,
    /// SPDX document.
    Spdx,
}

/// One attribution selected for an export writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEntry {
    /// Attribution id.
    pub id: AttributionId,
    /// Payload.
    pub package: PackageInfo,
    /// Linked resources, sorted.
    pub resources: Vec<String>,
}
