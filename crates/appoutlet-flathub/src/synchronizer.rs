use appoutlet::{ApplicationRepository, Feedback, SyncError, SyncReport, Synchronizer};
use futures::StreamExt;
use tracing::{info, warn};

use crate::client::FlathubCatalog;
use crate::transform;

const DEFAULT_CONCURRENCY: usize = 8;

/// Settings for Flathub synchronization, read once at construction.
#[derive(Debug, Clone)]
pub struct FlathubSyncSettings {
    pub enabled: bool,
    /// Maximum number of applications fetched and saved at once.
    pub concurrency: usize,
}

impl Default for FlathubSyncSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Copies every Flathub application into an [`ApplicationRepository`].
///
/// A failure to list applications fails the run. A failure to fetch or
/// save a single application is logged, reported as feedback, and the
/// run continues with the rest.
pub struct FlathubSynchronizer<C, R> {
    catalog: C,
    repository: R,
    settings: FlathubSyncSettings,
}

impl<C: FlathubCatalog, R: ApplicationRepository> FlathubSynchronizer<C, R> {
    pub fn new(catalog: C, repository: R, settings: FlathubSyncSettings) -> Self {
        if !settings.enabled {
            warn!("Synchronization disabled for Flathub");
        }

        Self {
            catalog,
            repository,
            settings,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Run one synchronization pass. Returns `None` when disabled.
    pub async fn run(&self) -> Result<Option<SyncReport>, SyncError> {
        if !self.settings.enabled {
            return Ok(None);
        }

        let summaries = self.catalog.applications().await?;
        info!(applications = summaries.len(), "synchronizing Flathub");

        let tasks: Vec<_> = summaries
            .into_iter()
            .map(|summary| self.synchronize_application(summary.flatpak_app_id))
            .collect();

        let outcomes: Vec<Result<(), Feedback>> = futures::stream::iter(tasks)
            .buffer_unordered(self.settings.concurrency.max(1))
            .collect()
            .await;

        let mut report = SyncReport::default();
        for outcome in outcomes {
            match outcome {
                Ok(()) => report.record_synced(),
                Err(feedback) => report.record_failure(feedback),
            }
        }

        info!(
            synced = report.synced,
            failed = report.failed,
            "Flathub synchronization finished"
        );

        Ok(Some(report))
    }

    async fn synchronize_application(&self, app_id: String) -> Result<(), Feedback> {
        let details = self
            .catalog
            .application_details(&app_id)
            .await
            .map_err(|e| {
                warn!(%app_id, error = %e, "skipping application");
                Feedback::warning(format!("skipping {app_id}: {e}"))
            })?;

        let application = transform::to_application(&details);

        // Carry the local view count over; upstream knows nothing about it.
        let existing = self
            .repository
            .find_by_id(&application.id)
            .await
            .map_err(|e| save_failure(&app_id, e))?;
        let view_count = existing.and_then(|a| a.view_count);

        self.repository
            .save(application.with_view_count(view_count))
            .await
            .map_err(|e| save_failure(&app_id, e))?;

        Ok(())
    }
}

fn save_failure(app_id: &str, error: impl std::fmt::Display) -> Feedback {
    warn!(app_id, error = %error, "failed to store application");
    Feedback::warning(format!("failed to store {app_id}: {error}"))
}

#[async_trait::async_trait]
impl<C: FlathubCatalog, R: ApplicationRepository> Synchronizer for FlathubSynchronizer<C, R> {
    fn label(&self) -> &str {
        "flathub"
    }

    async fn synchronize(&self) -> Result<bool, SyncError> {
        Ok(self.run().await?.is_some())
    }
}
