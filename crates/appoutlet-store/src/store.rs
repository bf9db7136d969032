use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use appoutlet::{
    Application, ApplicationId, ApplicationRepository, ApplicationStore, PackageType,
    RepositoryError,
};
use rusqlite::OptionalExtension;
use tracing::debug;

use crate::schema;

/// How fresh the local copy of a catalog is.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncStatus {
    NeverSynced,
    Stale { days_old: u64 },
    Fresh { days_old: u64 },
}

/// Threshold in days before a catalog copy is considered stale.
const STALE_THRESHOLD_DAYS: u64 = 7;

const APPLICATION_COLUMNS: &str = "id, name, summary, description, developer, license, homepage,
     bugtracker_url, donation_url, icon, download_url, version, last_release_date,
     creation_date, tags_json, screenshots_json, store, package_type, view_count";

/// A SQLite-backed [`ApplicationRepository`].
pub struct ApplicationDatabase {
    conn: Mutex<rusqlite::Connection>,
}

impl ApplicationDatabase {
    /// Open a database backed by a file on disk.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn =
            rusqlite::Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = rusqlite::Connection::open_in_memory()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(mut conn: rusqlite::Connection) -> Result<Self, StoreError> {
        schema::migrations()
            .to_latest(&mut conn)
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, rusqlite::Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Database("connection lock poisoned".into()))
    }

    /// Check how fresh the local copy of `store` is.
    pub fn sync_status(&self, store: &ApplicationStore) -> Result<SyncStatus, StoreError> {
        let conn = self.conn()?;

        let result: Option<Option<String>> = conn
            .query_row(
                "SELECT last_synced_at FROM stores WHERE store = ?1",
                [store.to_string()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        match result.flatten() {
            None => Ok(SyncStatus::NeverSynced),
            Some(timestamp) => {
                let days_old = days_since(&timestamp).unwrap_or(0);
                if days_old >= STALE_THRESHOLD_DAYS {
                    Ok(SyncStatus::Stale { days_old })
                } else {
                    Ok(SyncStatus::Fresh { days_old })
                }
            }
        }
    }

    /// Record a completed synchronization of `store` as of now.
    pub fn record_sync(&self, store: &ApplicationStore) -> Result<(), StoreError> {
        self.set_last_synced_at(store, now_epoch_secs())
    }

    /// Set the last_synced_at timestamp manually (for testing staleness).
    pub fn set_last_synced_at(
        &self,
        store: &ApplicationStore,
        epoch_secs: u64,
    ) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO stores (store, last_synced_at) VALUES (?1, ?2)",
            rusqlite::params![store.to_string(), epoch_secs.to_string()],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    /// Insert or replace an application row.
    pub fn upsert_application(&self, application: &Application) -> Result<(), StoreError> {
        let tags_json = serde_json::to_string(&application.tags)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        let screenshots_json = serde_json::to_string(&application.screenshots)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        let view_count = application
            .view_count
            .map(i64::try_from)
            .transpose()
            .map_err(|e| StoreError::Database(format!("view count out of range: {e}")))?;

        let conn = self.conn()?;
        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO applications ({APPLICATION_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)"
            ),
            rusqlite::params![
                application.id.as_str(),
                application.name,
                application.summary,
                application.description,
                application.developer,
                application.license,
                application.homepage,
                application.bugtracker_url,
                application.donation_url,
                application.icon,
                application.download_url,
                application.version,
                application.last_release_date,
                application.creation_date,
                tags_json,
                screenshots_json,
                application.store.to_string(),
                application.package_type.to_string(),
                view_count,
            ],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(id = %application.id, "stored application");
        Ok(())
    }

    fn row_to_application(row: &rusqlite::Row) -> rusqlite::Result<Application> {
        let id: String = row.get(0)?;
        let tags_json: String = row.get(14)?;
        let screenshots_json: String = row.get(15)?;
        let store: String = row.get(16)?;
        let package_type: String = row.get(17)?;
        let view_count: Option<i64> = row.get(18)?;

        Ok(Application {
            id: ApplicationId::new(id),
            name: row.get(1)?,
            summary: row.get(2)?,
            description: row.get(3)?,
            developer: row.get(4)?,
            license: row.get(5)?,
            homepage: row.get(6)?,
            bugtracker_url: row.get(7)?,
            donation_url: row.get(8)?,
            icon: row.get(9)?,
            download_url: row.get(10)?,
            version: row.get(11)?,
            last_release_date: row.get(12)?,
            creation_date: row.get(13)?,
            tags: parse_json_list(14, &tags_json)?,
            screenshots: parse_json_list(15, &screenshots_json)?,
            store: ApplicationStore::parse(&store),
            package_type: PackageType::parse(&package_type),
            view_count: view_count.map(|v| v.max(0) as u64),
        })
    }
}

#[async_trait::async_trait]
impl ApplicationRepository for ApplicationDatabase {
    async fn find_all(&self) -> Result<Vec<Application>, RepositoryError> {
        let conn = self.conn()?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {APPLICATION_COLUMNS} FROM applications ORDER BY name, id"
            ))
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        let applications = stmt
            .query_map([], Self::row_to_application)
            .map_err(|e| RepositoryError::Storage(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(applications)
    }

    async fn find_by_id(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let conn = self.conn()?;

        conn.query_row(
            &format!("SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = ?1"),
            [id.as_str()],
            Self::row_to_application,
        )
        .optional()
        .map_err(|e| RepositoryError::Storage(e.to_string()))
    }

    async fn save(&self, application: Application) -> Result<Application, RepositoryError> {
        self.upsert_application(&application)?;
        Ok(application)
    }
}

/// Decode a JSON array column, failing the row rather than dropping the data.
fn parse_json_list(column: usize, json: &str) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Errors specific to store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("migration error: {0}")]
    Migration(String),
}

impl From<StoreError> for RepositoryError {
    fn from(e: StoreError) -> Self {
        RepositoryError::Storage(e.to_string())
    }
}

fn now_epoch_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn days_since(timestamp: &str) -> Option<u64> {
    let then: u64 = timestamp.parse().ok()?;
    Some(now_epoch_secs().saturating_sub(then) / 86400)
}
