use async_trait::async_trait;
use clearance_core::{ClearanceError, ProjectWriter, SaveFileArgs};
use tokio::sync::Mutex;

/// Writer that keeps every payload it receives.
pub struct RecordingWriter {
    name: &'static str,
    saved: Mutex<Vec<SaveFileArgs>>,
}

impl Default for RecordingWriter {
    fn default() -> Self {
        Self::new("recording")
    }
}

impl RecordingWriter {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            saved: Mutex::new(Vec::new()),
        }
    }

    /// Payloads received so far, oldest first.
    pub async fn saved(&self) -> Vec<SaveFileArgs> {
        self.saved.lock().await.clone()
    }

    /// Most recent payload.
    pub async fn last(&self) -> Option<SaveFileArgs> {
        self.saved.lock().await.last().cloned()
    }
}

#[async_trait]
impl ProjectWriter for RecordingWriter {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn save(&self, args: &SaveFileArgs) -> Result<(), ClearanceError> {
        self.saved.lock().await.push(args.clone());
        Ok(())
    }
}

/// Writer that rejects every payload.
pub struct FailingWriter {
    name: &'static str,
}

impl Default for FailingWriter {
    fn default() -> Self {
        Self::new("failing")
    }
}

impl FailingWriter {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl ProjectWriter for FailingWriter {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn save(&self, _args: &SaveFileArgs) -> Result<(), ClearanceError> {
        Err(ClearanceError::InvalidArg(format!(
            "forced failure: {} cannot write",
            self.name
        )))
    }
}
