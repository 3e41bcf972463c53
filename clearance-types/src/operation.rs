use core::fmt;
use serde::{Deserialize, Serialize};

/// Labels for the mutation operations, used in errors and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Operation {
    /// Project load and validation.
    Load,
    /// New uncommitted attribution.
    Create,
    /// Discard of an uncommitted attribution.
    Discard,
    /// Field replacement of an attribution.
    Update,
    /// Removal of an attribution and all of its links.
    Delete,
    /// Attach an attribution to a resource.
    Link,
    /// Detach an attribution from a resource.
    Unlink,
    /// Move every link of one attribution onto another.
    Replace,
    /// Toggle the resolved marker of signals.
    Resolve,
    /// Toggle the preferred marker of a manual attribution.
    Prefer,
    /// Copy a signal into a new manual attribution.
    Promote,
}

impl Operation {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Create => "create",
            Self::Discard => "discard",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Link => "link",
            Self::Unlink => "unlink",
            Self::Replace => "replace",
            Self::Resolve => "resolve",
            Self::Prefer => "prefer",
            Self::Promote => "promote",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
