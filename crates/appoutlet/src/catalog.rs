/// Errors that can occur when reading from a remote application catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("application not found in catalog: {0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),
}
