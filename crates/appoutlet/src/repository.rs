use std::sync::Arc;

use crate::application::{Application, ApplicationId};

/// Errors that can occur when interacting with application storage.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    Storage(String),
}

/// Key-value storage of applications, keyed by [`ApplicationId`].
#[async_trait::async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// All stored applications.
    async fn find_all(&self) -> Result<Vec<Application>, RepositoryError>;

    /// The application with the given id, or `None` if it was never saved.
    async fn find_by_id(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;

    /// Insert or replace the application with the same id.
    async fn save(&self, application: Application) -> Result<Application, RepositoryError>;
}

#[async_trait::async_trait]
impl<T: ApplicationRepository + ?Sized> ApplicationRepository for Arc<T> {
    async fn find_all(&self) -> Result<Vec<Application>, RepositoryError> {
        (**self).find_all().await
    }

    async fn find_by_id(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        (**self).find_by_id(id).await
    }

    async fn save(&self, application: Application) -> Result<Application, RepositoryError> {
        (**self).save(application).await
    }
}
