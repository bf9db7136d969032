use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::{Application, ApplicationId, ApplicationRepository, RepositoryError};

/// In-memory repository for testing. Clones share the same contents.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    applications: Arc<Mutex<BTreeMap<ApplicationId, Application>>>,
    saves: Arc<AtomicUsize>,
    failing_ids: Arc<Mutex<Vec<ApplicationId>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository pre-populated with `applications`. Seeding does not
    /// count towards [`save_count`](Self::save_count).
    pub fn with(applications: Vec<Application>) -> Self {
        let repository = Self::new();
        {
            let mut map = repository.applications.lock().unwrap();
            for application in applications {
                map.insert(application.id.clone(), application);
            }
        }
        repository
    }

    /// Make every save of `id` fail with a storage error.
    pub fn fail_saves_for(&self, id: ApplicationId) {
        self.failing_ids.lock().unwrap().push(id);
    }

    pub fn get(&self, id: &ApplicationId) -> Option<Application> {
        self.applications.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.applications.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of successful saves since construction.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Snapshot of every stored application, ordered by id.
    pub fn snapshot(&self) -> Vec<Application> {
        self.applications.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait::async_trait]
impl ApplicationRepository for InMemoryRepository {
    async fn find_all(&self) -> Result<Vec<Application>, RepositoryError> {
        Ok(self.snapshot())
    }

    async fn find_by_id(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Ok(self.get(id))
    }

    async fn save(&self, application: Application) -> Result<Application, RepositoryError> {
        if self.failing_ids.lock().unwrap().contains(&application.id) {
            return Err(RepositoryError::Storage(format!(
                "refusing to save {}",
                application.id
            )));
        }

        self.applications
            .lock()
            .unwrap()
            .insert(application.id.clone(), application.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(application)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ApplicationStore, PackageType};

    use super::*;

    fn app(id: &str) -> Application {
        Application::new(
            ApplicationId::new(id),
            ApplicationStore::Flathub,
            PackageType::Flatpak,
        )
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_missing() {
        let repository = InMemoryRepository::new();
        let found = repository
            .find_by_id(&ApplicationId::new("missing"))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn clones_share_contents() {
        let repository = InMemoryRepository::new();
        let clone = repository.clone();

        clone.save(app("org.gimp.GIMP")).await.unwrap();

        assert_eq!(repository.len(), 1);
        assert_eq!(repository.save_count(), 1);
    }

    #[tokio::test]
    async fn failing_ids_reject_saves() {
        let repository = InMemoryRepository::new();
        repository.fail_saves_for(ApplicationId::new("org.example.Broken"));

        let result = repository.save(app("org.example.Broken")).await;
        assert!(matches!(result, Err(RepositoryError::Storage(_))));
        assert!(repository.is_empty());
        assert_eq!(repository.save_count(), 0);
    }
}
