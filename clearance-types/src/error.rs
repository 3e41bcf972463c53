//! Error type shared by every Clearance crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::operation::Operation;

/// Unified error type for the Clearance workspace.
///
/// Mutations either commit fully or return one of these variants and leave
/// the project untouched.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClearanceError {
    /// A package URL could not be parsed.
    #[error("invalid purl {input:?}: {reason}")]
    InvalidPurl {
        /// Raw text that failed to parse.
        input: String,
        /// Human-readable description of the failure.
        reason: String,
    },

    /// The id map and the link map disagree.
    #[error("consistency violation: {0}")]
    ConsistencyViolation(String),

    /// An attribution was asked to replace itself.
    #[error("attribution {id} cannot replace itself")]
    SelfReplacement {
        /// Id passed as both source and target.
        id: String,
    },

    /// The aggregation worker could not accept a request.
    ///
    /// Callers log this and fall back to an empty panel.
    #[error("aggregation worker dispatch failed: {0}")]
    WorkerDispatch(String),

    /// Attribution id or resource path does not exist.
    #[error("not found: {what}")]
    NotFound {
        /// Description of what was not found.
        what: String,
    },

    /// Invalid argument provided by caller.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The resource is an attribution breakpoint and cannot carry links.
    #[error("resource {path} is an attribution breakpoint")]
    Breakpoint {
        /// Canonical path of the breakpoint.
        path: String,
    },
}

impl ClearanceError {
    /// Helper: build an `InvalidPurl` error.
    pub fn invalid_purl(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPurl {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build a `ConsistencyViolation` tagged with the failing operation.
    pub fn consistency(op: Operation, detail: impl AsRef<str>) -> Self {
        Self::ConsistencyViolation(format!("{op}: {}", detail.as_ref()))
    }

    /// Helper: build a `NotFound` error for a description of the missing item.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `SelfReplacement` error.
    pub fn self_replacement(id: impl Into<String>) -> Self {
        Self::SelfReplacement { id: id.into() }
    }

    /// Helper: build a `Breakpoint` error.
    pub fn breakpoint(path: impl Into<String>) -> Self {
        Self::Breakpoint { path: path.into() }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// Worker dispatch failures only degrade a panel and are never shown.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(self, Self::WorkerDispatch(_))
    }
}
