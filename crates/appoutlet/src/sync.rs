use std::sync::Arc;

use crate::catalog::CatalogError;
use crate::feedback::Feedback;

/// Errors that fail a whole synchronization run.
///
/// Problems with individual applications do not surface here; they are
/// reported through [`SyncReport::feedback`].
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Outcome of a synchronization run that was not skipped.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub synced: u64,
    pub failed: u64,
    pub feedback: Vec<Feedback>,
}

impl SyncReport {
    pub fn record_synced(&mut self) {
        self.synced += 1;
    }

    pub fn record_failure(&mut self, feedback: Feedback) {
        self.failed += 1;
        self.feedback.push(feedback);
    }

    /// False when the run listed applications but stored none of them.
    pub fn refreshed_data(&self) -> bool {
        self.synced > 0 || self.failed == 0
    }
}

/// Copies applications from one external catalog into local storage.
#[async_trait::async_trait]
pub trait Synchronizer: Send + Sync {
    /// Human-readable label identifying the catalog.
    fn label(&self) -> &str;

    /// Run one synchronization pass.
    ///
    /// Returns `Ok(false)` without doing any I/O when synchronization is
    /// disabled for this catalog, and `Ok(true)` once every listed
    /// application has been processed.
    async fn synchronize(&self) -> Result<bool, SyncError>;
}

#[async_trait::async_trait]
impl<T: Synchronizer + ?Sized> Synchronizer for Arc<T> {
    fn label(&self) -> &str {
        (**self).label()
    }

    async fn synchronize(&self) -> Result<bool, SyncError> {
        (**self).synchronize().await
    }
}
