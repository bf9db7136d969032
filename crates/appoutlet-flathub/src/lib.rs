pub mod client;
pub mod models;
pub mod synchronizer;
pub mod transform;

pub use client::{FlathubCatalog, FlathubClient};
pub use models::{
    FlathubApplicationDetails, FlathubApplicationSummary, FlathubCategory, FlathubScreenshot,
};
pub use synchronizer::{FlathubSyncSettings, FlathubSynchronizer};
