use std::sync::Arc;
use std::time::Duration;

use appoutlet::CatalogError;
use tracing::debug;

use crate::models::{FlathubApplicationDetails, FlathubApplicationSummary};

const DEFAULT_API_BASE: &str = "https://flathub.org";

/// Upper bound for a whole request, body included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Read access to the Flathub catalog.
#[async_trait::async_trait]
pub trait FlathubCatalog: Send + Sync {
    /// List every application Flathub currently publishes.
    async fn applications(&self) -> Result<Vec<FlathubApplicationSummary>, CatalogError>;

    /// Fetch full metadata for one application.
    async fn application_details(
        &self,
        app_id: &str,
    ) -> Result<FlathubApplicationDetails, CatalogError>;
}

#[async_trait::async_trait]
impl<T: FlathubCatalog + ?Sized> FlathubCatalog for Arc<T> {
    async fn applications(&self) -> Result<Vec<FlathubApplicationSummary>, CatalogError> {
        (**self).applications().await
    }

    async fn application_details(
        &self,
        app_id: &str,
    ) -> Result<FlathubApplicationDetails, CatalogError> {
        (**self).application_details(app_id).await
    }
}

/// HTTP client for the Flathub v1 API.
///
/// Every request is bounded by a timeout; a request that runs out of
/// time fails with [`CatalogError::Network`]. Retries are left to callers.
pub struct FlathubClient {
    client: reqwest::Client,
    api_base_url: Option<String>,
}

impl FlathubClient {
    pub fn new(api_base_url: Option<String>) -> Result<Self, CatalogError> {
        Self::with_timeout(api_base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        api_base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base_url,
        })
    }

    fn api_base(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
    }

    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("User-Agent", "appoutlet")
            .header("Accept", "application/json")
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, CatalogError> {
        debug!(%url, "fetching from Flathub");

        let response = self
            .build_request(url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(request_failure(&e)))?;

        if !response.status().is_success() && response.status().as_u16() != 404 {
            return Err(CatalogError::Network(format!(
                "HTTP {}: {}",
                response.status(),
                response
                    .text()
                    .await
                    .unwrap_or_else(|_| "unknown".into())
            )));
        }

        Ok(response)
    }
}

fn request_failure(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {error}")
    } else {
        error.to_string()
    }
}

/// A body that stops arriving is a transport problem, not a malformed one.
fn decode_failure(error: reqwest::Error) -> CatalogError {
    if error.is_timeout() {
        CatalogError::Network(request_failure(&error))
    } else {
        CatalogError::Parse(error.to_string())
    }
}

#[async_trait::async_trait]
impl FlathubCatalog for FlathubClient {
    async fn applications(&self) -> Result<Vec<FlathubApplicationSummary>, CatalogError> {
        let url = format!("{}/api/v1/apps", self.api_base());
        let response = self.get(&url).await?;

        if response.status().as_u16() == 404 {
            return Err(CatalogError::Network(format!("HTTP 404: {url}")));
        }

        response.json().await.map_err(decode_failure)
    }

    async fn application_details(
        &self,
        app_id: &str,
    ) -> Result<FlathubApplicationDetails, CatalogError> {
        let url = format!("{}/api/v1/apps/{}", self.api_base(), app_id);
        let response = self.get(&url).await?;

        if response.status().as_u16() == 404 {
            return Err(CatalogError::NotFound(app_id.to_owned()));
        }

        response.json().await.map_err(decode_failure)
    }
}
