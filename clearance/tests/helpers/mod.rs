// Re-export fixtures so tests can `use crate::helpers::*;`
#![allow(dead_code)]

pub use clearance_mock::{
    FailingWriter, RecordingWriter, angular_vue, attribution_data, pkg, replace_pair,
    scanned_project, signal,
};

use clearance::{AttributionId, Clearance, ProjectInput};

/// Open `input` with default configuration.
pub fn open(input: ProjectInput) -> Clearance {
    Clearance::builder().project(input).build().unwrap()
}

/// Shorthand for an attribution id.
pub fn id(s: &str) -> AttributionId {
    AttributionId::from(s)
}

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
