use clearance_core::{AttributionId, AttributionState, ClearanceError, PackageInfo};

use super::with_default_confidence;
use crate::Clearance;

impl Clearance {
    fn require_signals(&self, ids: &[AttributionId]) -> Result<(), ClearanceError> {
        match ids.iter().find(|id| !self.external.contains(id)) {
            Some(id) => Err(ClearanceError::not_found(format!("signal {id}"))),
            None => Ok(()),
        }
    }

    /// Hide signals from aggregation and progress.
    ///
    /// The signals themselves are left untouched; only the resolved set
    /// changes. All ids are checked before any is marked.
    ///
    /// # Errors
    /// Returns `NotFound` when any id is not a signal.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "clearance::ops::resolve", skip(self, ids), fields(count = ids.len()))
    )]
    pub fn resolve(&mut self, ids: &[AttributionId]) -> Result<(), ClearanceError> {
        self.require_signals(ids)?;
        for id in ids {
            self.resolved.insert(id.clone());
        }
        Ok(())
    }

    /// Show previously resolved signals again.
    ///
    /// # Errors
    /// Returns `NotFound` when any id is not a signal.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "clearance::ops::unresolve", skip(self, ids), fields(count = ids.len()))
    )]
    pub fn unresolve(&mut self, ids: &[AttributionId]) -> Result<(), ClearanceError> {
        self.require_signals(ids)?;
        for id in ids {
            self.resolved.remove(id);
        }
        Ok(())
    }

    /// `Preferred` or `NotPreferred` for signals; `None` for any other id.
    #[must_use]
    pub fn preference_state(&self, id: &AttributionId) -> Option<AttributionState> {
        if !self.external.contains(id) {
            return None;
        }
        Some(if self.preferred.contains(id) {
            AttributionState::Preferred
        } else {
            AttributionState::NotPreferred
        })
    }

    /// True when `id` is a resolved signal.
    #[must_use]
    pub fn is_resolved(&self, id: &AttributionId) -> bool {
        self.resolved.contains(id)
    }

    /// Set or clear the preferred marker of a signal or manual attribution.
    ///
    /// Behavior and trade-offs:
    /// - For a signal only the preferred set changes; the signal itself is
    ///   left untouched, like resolution.
    /// - For a manual attribution the `preferred` field is updated, and
    ///   clearing it on a preferred attribution records `wasPreferred`.
    ///
    /// # Errors
    /// Returns `NotFound` when `id` is neither a signal nor a live manual
    /// attribution.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "clearance::ops::set_preferred", skip(self), fields(id = %id))
    )]
    pub fn set_preferred(&mut self, id: &AttributionId, preferred: bool) -> Result<(), ClearanceError> {
        if self.external.contains(id) {
            if preferred {
                self.preferred.insert(id.clone());
            } else {
                self.preferred.remove(id);
            }
            return Ok(());
        }
        let mut package = self
            .manual
            .get(id)
            .cloned()
            .ok_or_else(|| ClearanceError::not_found(format!("attribution {id}")))?;
        if package.preferred && !preferred {
            package.was_preferred = true;
        }
        package.preferred = preferred;
        self.update(id, package)
    }

    /// Copy a signal into a new manual attribution linked at `path`.
    ///
    /// Scanner provenance (`source`, `originIds`) and the `preSelected`,
    /// `preferred` and `wasPreferred` markers are not carried over.
    ///
    /// # Errors
    /// Returns `NotFound` for unknown signals or resources and `Breakpoint`
    /// when `path` is a breakpoint.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "clearance::ops::promote_signal", skip(self), fields(signal = %signal))
    )]
    pub fn promote_signal(
        &mut self,
        signal: &AttributionId,
        path: &str,
    ) -> Result<AttributionId, ClearanceError> {
        let package = self
            .external
            .get(signal)
            .map(PackageInfo::to_manual)
            .ok_or_else(|| ClearanceError::not_found(format!("signal {signal}")))?;
        self.create_linked(path, package)
    }

    /// Attribute `path` with `package`, reusing an equal manual attribution.
    ///
    /// Behavior and trade-offs:
    /// - Equality ignores scanner provenance and markers, and a missing
    ///   confidence reads as `High`; a suggestion taken from a signal matches
    ///   the attribution it was promoted to.
    /// - When no equal attribution exists a new one is created.
    ///
    /// # Errors
    /// Returns `NotFound` for unknown resources and `Breakpoint` when `path`
    /// is a breakpoint.
    pub fn add_to_resource(
        &mut self,
        path: &str,
        package: &PackageInfo,
    ) -> Result<AttributionId, ClearanceError> {
        let path = self.linkable_path(path)?;
        let wanted = with_default_confidence(package.to_manual());
        let existing = self
            .manual
            .committed()
            .find(|(_, p)| with_default_confidence(p.to_manual()) == wanted)
            .map(|(id, _)| id.clone());
        match existing {
            Some(id) => {
                self.manual.link(&path, &id)?;
                Ok(id)
            }
            None => self.create_linked(&path, wanted),
        }
    }
}
