//! Documentation sync adapter
//!
//! The workbook automation that maintains per-opportunity documentation is
//! an external process. This adapter satisfies the saga ordering contract
//! (documentation synced before an archive move) and records what it was
//! asked to do; wiring in the real automation is a deployment concern.

use async_trait::async_trait;
use labtrack_core::DocumentationSync;
use labtrack_domain::Result;
use tracing::info;

pub struct LoggingDocumentationSync;

#[async_trait]
impl DocumentationSync for LoggingDocumentationSync {
    async fn sync_documentation(&self, opportunity_number: &str) -> Result<()> {
        info!(opportunity_number, "documentation sync requested");
        Ok(())
    }
}
