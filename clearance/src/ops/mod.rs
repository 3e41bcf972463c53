pub mod lifecycle;
pub mod replace;
pub mod save;
pub mod signals;
pub mod views;

use clearance_core::{AttributionId, Confidence, PackageInfo};

use crate::Clearance;

/// Confidence a fresh manual attribution carries when none was given.
pub(crate) fn with_default_confidence(mut package: PackageInfo) -> PackageInfo {
    if package.attribution_confidence.is_none() {
        package.attribution_confidence = Some(Confidence::High);
    }
    package
}

impl Clearance {
    /// Drop markers that point at an id that is no longer live.
    pub(crate) fn forget(&mut self, id: &AttributionId) {
        self.preferred.remove(id);
        if self.marked_for_replacement.as_ref() == Some(id) {
            self.marked_for_replacement = None;
        }
    }
}
