use tracing::debug;

use crate::application::{Application, ApplicationId};
use crate::repository::{ApplicationRepository, RepositoryError};

/// Errors returned by [`ApplicationService`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("application not found: {0}")]
    ApplicationNotFound(ApplicationId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Read and update operations on locally stored applications.
pub struct ApplicationService<R> {
    repository: R,
}

impl<R: ApplicationRepository> ApplicationService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn find_all(&self) -> Result<Vec<Application>, ServiceError> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn find_by_id(&self, id: &ApplicationId) -> Result<Application, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::ApplicationNotFound(id.clone()))
    }

    /// Count one more view of an application and persist it.
    ///
    /// This is a plain read-increment-write: two concurrent calls for the
    /// same id may both read the same count, and one increment is lost.
    pub async fn register_visualization(
        &self,
        id: &ApplicationId,
    ) -> Result<Application, ServiceError> {
        let application = self.find_by_id(id).await?.with_incremented_view_count();
        debug!(%id, views = application.views(), "registering visualization");
        self.save(application).await
    }

    pub async fn save(&self, application: Application) -> Result<Application, ServiceError> {
        Ok(self.repository.save(application).await?)
    }
}

#[cfg(test)]
mod tests {
    use crate::application::{ApplicationStore, PackageType};
    use crate::test_support::InMemoryRepository;

    use super::*;

    fn app(id: &str, view_count: Option<u64>) -> Application {
        Application::new(
            ApplicationId::new(id),
            ApplicationStore::Flathub,
            PackageType::Flatpak,
        )
        .with_view_count(view_count)
    }

    #[tokio::test]
    async fn register_visualization_starts_absent_count_at_one() {
        let repository = InMemoryRepository::with(vec![app("org.gimp.GIMP", None)]);
        let service = ApplicationService::new(repository.clone());

        let updated = service
            .register_visualization(&ApplicationId::new("org.gimp.GIMP"))
            .await
            .unwrap();

        assert_eq!(updated.view_count, Some(1));
        let stored = repository.get(&ApplicationId::new("org.gimp.GIMP")).unwrap();
        assert_eq!(stored.view_count, Some(1));
    }

    #[tokio::test]
    async fn register_visualization_adds_one_to_existing_count() {
        let repository = InMemoryRepository::with(vec![app("org.gimp.GIMP", Some(9))]);
        let service = ApplicationService::new(repository.clone());
        let id = ApplicationId::new("org.gimp.GIMP");

        assert_eq!(service.register_visualization(&id).await.unwrap().view_count, Some(10));
        assert_eq!(service.register_visualization(&id).await.unwrap().view_count, Some(11));
        assert_eq!(repository.get(&id).unwrap().view_count, Some(11));
    }

    #[tokio::test]
    async fn register_visualization_for_missing_id_is_not_found_and_writes_nothing() {
        let repository = InMemoryRepository::new();
        let service = ApplicationService::new(repository.clone());

        let result = service
            .register_visualization(&ApplicationId::new("org.example.Missing"))
            .await;

        match result {
            Err(ServiceError::ApplicationNotFound(id)) => {
                assert_eq!(id.as_str(), "org.example.Missing")
            }
            other => panic!("expected ApplicationNotFound, got {other:?}"),
        }
        assert_eq!(repository.save_count(), 0);
    }

    #[tokio::test]
    async fn find_all_passes_through_repository_contents() {
        let repository = InMemoryRepository::with(vec![
            app("org.gimp.GIMP", None),
            app("org.inkscape.Inkscape", Some(3)),
        ]);
        let service = ApplicationService::new(repository);

        let all = service.find_all().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["org.gimp.GIMP", "org.inkscape.Inkscape"]);
    }

    #[tokio::test]
    async fn save_upserts_by_id() {
        let repository = InMemoryRepository::new();
        let service = ApplicationService::new(repository.clone());

        service.save(app("org.gimp.GIMP", None)).await.unwrap();
        service.save(app("org.gimp.GIMP", Some(5))).await.unwrap();

        assert_eq!(repository.len(), 1);
        assert_eq!(
            repository.get(&ApplicationId::new("org.gimp.GIMP")).unwrap().view_count,
            Some(5)
        );
    }
}
