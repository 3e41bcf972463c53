use std::sync::Arc;

use clearance_core::{ClearanceError, ProjectWriter};

use crate::Clearance;

/// A writer that rejected the save payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFailure {
    /// Writer name.
    pub writer: &'static str,
    /// Error it returned.
    pub error: ClearanceError,
}

impl Clearance {
    /// Hand the save payload to `writer`.
    ///
    /// Behavior and trade-offs:
    /// - Runs the full consistency check of the manual collection first; a
    ///   violation aborts the save before anything reaches the writer.
    /// - Uncommitted attributions and signals are never written.
    ///
    /// # Errors
    /// Returns `ConsistencyViolation` from the check or whatever the writer
    /// returns.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "clearance::ops::save", skip(self, writer), fields(writer = writer.name()))
    )]
    pub async fn save(&self, writer: &dyn ProjectWriter) -> Result<(), ClearanceError> {
        self.manual.check_consistency()?;
        let args = self.save_file_args();
        writer.save(&args).await
    }

    /// Hand the same save payload to several writers concurrently.
    ///
    /// Behavior and trade-offs:
    /// - Every writer is attempted; one failing writer does not stop the
    ///   others. Failures are returned per writer in input order.
    /// - A failed consistency check is reported once per writer and no
    ///   writer is called.
    pub async fn save_all(&self, writers: &[Arc<dyn ProjectWriter>]) -> Vec<SaveFailure> {
        if let Err(error) = self.manual.check_consistency() {
            return writers
                .iter()
                .map(|w| SaveFailure {
                    writer: w.name(),
                    error: error.clone(),
                })
                .collect();
        }
        let args = self.save_file_args();
        let tasks = writers.iter().map(|w| {
            let args = &args;
            async move { (w.name(), w.save(args).await) }
        });
        let results = futures::future::join_all(tasks).await;

        let mut failures = Vec::new();
        for (writer, res) in results {
            if let Err(error) = res {
                #[cfg(feature = "tracing")]
                tracing::warn!(writer, error = %error, "save failed");
                failures.push(SaveFailure { writer, error });
            }
        }
        failures
    }
}
