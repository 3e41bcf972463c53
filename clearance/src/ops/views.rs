use std::cmp::Ordering;

use clearance_core::aggregate::dedup;
use clearance_core::aggregate::panel::{contained_external_panel, contained_manual_panel};
use clearance_core::aggregate::progress::{count_attribution_status, progress_breakdown};
use clearance_core::{
    AttributionFilters, AttributionId, AttributionStatistics, AttributionStatusCount,
    ClearanceError, ExportEntry, ExportKind, PackageField, PackageInfo, PanelData,
    ProgressBreakdown, Sorting, SuggestionGroup,
};

use crate::Clearance;

fn list_order(a: (&AttributionId, &PackageInfo), b: (&AttributionId, &PackageInfo)) -> Ordering {
    let key = |p: &PackageInfo| (!p.is_named(), p.display_label().to_lowercase());
    key(a.1).cmp(&key(b.1)).then_with(|| a.0.cmp(b.0))
}

impl Clearance {
    /// Committed manual attributions matching every flag in `filters`.
    ///
    /// Named attributions come first, ordered case-insensitively by
    /// `name, version`; unnamed ones follow, ordered by their copyright.
    #[must_use]
    pub fn sorted_attribution_ids(&self, filters: AttributionFilters) -> Vec<AttributionId> {
        let mut rows: Vec<_> = self
            .manual
            .committed()
            .filter(|(_, p)| filters.matches(p))
            .collect();
        rows.sort_by(|a, b| list_order(*a, *b));
        rows.into_iter().map(|(id, _)| id.clone()).collect()
    }

    /// Flag counts over the committed manual attributions.
    #[must_use]
    pub fn attribution_statistics(&self) -> AttributionStatistics {
        let mut stats = AttributionStatistics::default();
        for (_, p) in self.manual.committed() {
            stats.total += 1;
            stats.follow_up += u32::from(p.follow_up);
            stats.first_party += u32::from(p.first_party);
            stats.needs_review += u32::from(p.needs_review);
            stats.pre_selected += u32::from(p.pre_selected);
            stats.excluded_from_notice += u32::from(p.exclude_from_notice);
        }
        stats
    }

    /// Attributions selected for an export writer, in list order.
    ///
    /// `FollowUp` keeps follow-up attributions only; every other kind keeps
    /// all attributions not excluded from notices. Signals are never exported.
    #[must_use]
    pub fn export_view(&self, kind: ExportKind) -> Vec<ExportEntry> {
        let keep = |p: &PackageInfo| match kind {
            ExportKind::FollowUp => p.follow_up,
            _ => !p.exclude_from_notice,
        };
        self.sorted_attribution_ids(AttributionFilters::empty())
            .into_iter()
            .filter_map(|id| {
                let package = self.manual.get(&id)?;
                keep(package).then(|| ExportEntry {
                    resources: self.manual.resources_for_attribution(&id),
                    package: package.clone(),
                    id,
                })
            })
            .collect()
    }

    /// Cards for the unresolved signals below `resource`, computed inline.
    ///
    /// # Errors
    /// Returns `NotFound` for unknown resources.
    pub fn contained_signals(
        &self,
        resource: &str,
        sorting: Option<Sorting>,
    ) -> Result<PanelData, ClearanceError> {
        let path = self.resource_path(resource)?;
        let sorting = sorting.unwrap_or(self.cfg.sorting);
        Ok(contained_external_panel(&self.snapshot(), &path, sorting))
    }

    /// Cards for the manual attributions below `resource`, computed inline.
    ///
    /// # Errors
    /// Returns `NotFound` for unknown resources.
    pub fn contained_attributions(
        &self,
        resource: &str,
        sorting: Option<Sorting>,
    ) -> Result<PanelData, ClearanceError> {
        let path = self.resource_path(resource)?;
        let sorting = sorting.unwrap_or(self.cfg.sorting);
        Ok(contained_manual_panel(&self.snapshot(), &path, sorting))
    }

    /// Grouped autocomplete suggestions for `field` while editing on `resource`.
    ///
    /// # Errors
    /// Returns `NotFound` for unknown resources.
    pub fn suggestions(
        &self,
        resource: &str,
        field: PackageField,
    ) -> Result<Vec<SuggestionGroup>, ClearanceError> {
        let path = self.resource_path(resource)?;
        let flat = dedup::suggestions_for_resource(&self.snapshot(), &path, field);
        Ok(dedup::group_suggestions(flat))
    }

    /// Attributed and total files below `resource`, manual attributions only.
    ///
    /// # Errors
    /// Returns `NotFound` for unknown resources.
    pub fn attribution_status(&self, resource: &str) -> Result<AttributionStatusCount, ClearanceError> {
        let path = self.resource_path(resource)?;
        let snapshot = self.snapshot();
        Ok(count_attribution_status(
            &snapshot.progress_scope(),
            &path,
            &self.manual,
            None,
        ))
    }

    /// Folder progress split by manual, signal-only and unattributed files.
    ///
    /// # Errors
    /// Returns `NotFound` for unknown resources.
    pub fn progress(&self, resource: &str) -> Result<ProgressBreakdown, ClearanceError> {
        let path = self.resource_path(resource)?;
        let snapshot = self.snapshot();
        Ok(progress_breakdown(
            &snapshot.progress_scope(),
            &path,
            &self.manual,
            &self.external,
            Some(&self.resolved),
        ))
    }
}
