use clearance_core::{AttributionId, AttributionState, ClearanceError, PackageInfo};

use super::with_default_confidence;
use crate::Clearance;

impl Clearance {
    /// Lifecycle state of `id` in either collection.
    ///
    /// Manual ids report `Uncommitted`, `Active` or `Deleted`; signals report
    /// `Unresolved` or `Resolved`. Ids never seen return `None`. The
    /// preferred marker of a signal is reported by
    /// [`preference_state`](Self::preference_state).
    #[must_use]
    pub fn attribution_state(&self, id: &AttributionId) -> Option<AttributionState> {
        if self.manual.contains(id) {
            return Some(if self.manual.is_uncommitted(id) {
                AttributionState::Uncommitted
            } else {
                AttributionState::Active
            });
        }
        if self.manual.is_retired(id) {
            return Some(AttributionState::Deleted);
        }
        if self.external.contains(id) {
            return Some(if self.resolved.contains(id) {
                AttributionState::Resolved
            } else {
                AttributionState::Unresolved
            });
        }
        None
    }

    /// Create a manual attribution that is not linked anywhere yet.
    ///
    /// Behavior and trade-offs:
    /// - The id is exempt from the orphan rule until it is first linked or
    ///   discarded; it is not part of the save payload meanwhile.
    /// - A missing confidence defaults to `High`.
    ///
    /// # Errors
    /// Returns `ConsistencyViolation` if the store rejects the insert.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "clearance::ops::create", skip(self, defaults))
    )]
    pub fn create(&mut self, defaults: PackageInfo) -> Result<AttributionId, ClearanceError> {
        let preferred = defaults.preferred;
        let id = self.manual.insert_uncommitted(with_default_confidence(defaults))?;
        if preferred {
            self.preferred.insert(id.clone());
        }
        Ok(id)
    }

    /// Create a manual attribution linked at `path` in one step.
    ///
    /// # Errors
    /// Returns `NotFound` for unknown resources and `Breakpoint` when `path`
    /// is a breakpoint.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "clearance::ops::create_linked", skip(self, package))
    )]
    pub fn create_linked(
        &mut self,
        path: &str,
        package: PackageInfo,
    ) -> Result<AttributionId, ClearanceError> {
        let path = self.linkable_path(path)?;
        let package = with_default_confidence(package);
        let preferred = package.preferred;
        let id = self.manual.insert_linked(&path, package)?;
        if preferred {
            self.preferred.insert(id.clone());
        }
        Ok(id)
    }

    /// Drop a created attribution that was never linked.
    ///
    /// # Errors
    /// Returns `NotFound` for unknown ids and `InvalidArg` for linked ones.
    pub fn discard(&mut self, id: &AttributionId) -> Result<(), ClearanceError> {
        self.manual.discard_uncommitted(id)?;
        self.forget(id);
        Ok(())
    }

    /// Replace every field of a manual attribution.
    ///
    /// # Errors
    /// Returns `NotFound` when `id` is not a live manual attribution.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "clearance::ops::update", skip(self, package), fields(id = %id))
    )]
    pub fn update(&mut self, id: &AttributionId, package: PackageInfo) -> Result<(), ClearanceError> {
        let preferred = package.preferred;
        self.manual.update(id, package)?;
        if preferred {
            self.preferred.insert(id.clone());
        } else {
            self.preferred.remove(id);
        }
        Ok(())
    }

    /// Delete a manual attribution together with all of its links.
    ///
    /// # Errors
    /// Returns `NotFound` when `id` is not a live manual attribution.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "clearance::ops::delete", skip(self), fields(id = %id))
    )]
    pub fn delete(&mut self, id: &AttributionId) -> Result<PackageInfo, ClearanceError> {
        let removed = self.manual.remove(id)?;
        self.forget(id);
        Ok(removed)
    }

    /// Link a manual attribution at `path`. Returns whether a link was added.
    ///
    /// Behavior and trade-offs:
    /// - Idempotent: linking twice leaves a single link.
    /// - Linking an uncommitted id commits it.
    /// - Deleted ids stay deleted; linking one fails with `NotFound`.
    ///
    /// # Errors
    /// Returns `NotFound` for unknown resources or ids and `Breakpoint` when
    /// `path` is a breakpoint.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "clearance::ops::link", skip(self), fields(id = %id))
    )]
    pub fn link(&mut self, path: &str, id: &AttributionId) -> Result<bool, ClearanceError> {
        let path = self.linkable_path(path)?;
        self.manual.link(&path, id)
    }

    /// Remove the link of `id` at `path`.
    ///
    /// Returns `true` when that was the last link and the attribution was
    /// deleted with it.
    ///
    /// # Errors
    /// Returns `NotFound` when the resource or the link does not exist.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "clearance::ops::unlink", skip(self), fields(id = %id))
    )]
    pub fn unlink(&mut self, path: &str, id: &AttributionId) -> Result<bool, ClearanceError> {
        let path = self.resource_path(path)?;
        let collected = self.manual.unlink(&path, id)?;
        if collected {
            self.forget(id);
        }
        Ok(collected)
    }
}
