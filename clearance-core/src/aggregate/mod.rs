//! Read-side aggregation over the resource tree.
//!
//! Modules include:
//! - `contained`: attributions linked in a subtree, with occurrence counts
//! - `dedup`: autocomplete suggestions merged by identity key
//! - `panel`: merged package cards for the "contained" panels
//! - `progress`: attributed/total file counts per folder
/// Subtree aggregation that stops at breakpoints.
pub mod contained;
/// Suggestion dedup, ranking and grouping.
pub mod dedup;
/// Package card panels answered by the aggregation worker.
pub mod panel;
/// Folder progress counting.
pub mod progress;
