pub mod application;
pub mod catalog;
pub mod feedback;
pub mod repository;
pub mod service;
pub mod sync;

pub use application::{Application, ApplicationId, ApplicationStore, PackageType};
pub use catalog::CatalogError;
pub use feedback::Feedback;
pub use repository::{ApplicationRepository, RepositoryError};
pub use service::{ApplicationService, ServiceError};
pub use sync::{SyncError, SyncReport, Synchronizer};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
