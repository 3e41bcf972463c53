//! Deterministic fixture projects and in-memory project writers.
//!
//! Fixtures mirror small, hand-checkable review situations: a two-file
//! Angular/Vue project, a replace pair, and a scanned project with
//! breakpoints, several scanners and a resolved signal.

mod fixtures;
mod writer;

pub use fixtures::{
    angular_vue, attribution_data, pkg, replace_pair, scanned_project, signal,
};
pub use writer::{FailingWriter, RecordingWriter};
