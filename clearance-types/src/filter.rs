use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::package::PackageInfo;

bitflags! {
    /// Attribution list filters. Selected flags combine conjunctively.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct AttributionFilters: u8 {
        /// Marked for legal follow-up.
        const FOLLOW_UP = 1 << 0;
        /// First party code.
        const FIRST_PARTY = 1 << 1;
        /// Third party code.
        const NOT_FIRST_PARTY = 1 << 2;
        /// Omitted from notices.
        const EXCLUDED_FROM_NOTICE = 1 << 3;
        /// Waiting for a second review.
        const NEEDS_REVIEW = 1 << 4;
        /// Taken over from a scanner without review.
        const PRE_SELECTED = 1 << 5;
    }
}

impl AttributionFilters {
    /// True when `package` satisfies every selected flag.
    #[must_use]
    pub fn matches(self, package: &PackageInfo) -> bool {
        let requires = |flag: Self, holds: bool| !self.contains(flag) || holds;
        requires(Self::FOLLOW_UP, package.follow_up)
            && requires(Self::FIRST_PARTY, package.first_party)
            && requires(Self::NOT_FIRST_PARTY, !package.first_party)
            && requires(Self::EXCLUDED_FROM_NOTICE, package.exclude_from_notice)
            && requires(Self::NEEDS_REVIEW, package.needs_review)
            && requires(Self::PRE_SELECTED, package.pre_selected)
    }
}
