use async_trait::async_trait;

use crate::ClearanceError;
use clearance_types::SaveFileArgs;

/// Sink for save payloads; the file layer implements this.
#[async_trait]
pub trait ProjectWriter: Send + Sync {
    /// Human-readable writer name for logs.
    fn name(&self) -> &'static str;

    /// Persist the manual attributions, their links and the resolved set.
    async fn save(&self, args: &SaveFileArgs) -> Result<(), ClearanceError>;
}
