//! Breed catalog client and the one-shot startup sync.
//!
//! The catalog returns a JSON array of breeds; only `id` and `name` are
//! used. Each entry is upserted through the breed service keyed by the
//! catalog id, so running the sync repeatedly never duplicates rows.

use serde::Deserialize;
use spycat_services::BreedService;

use crate::config::CatalogConfig;

/// One breed as listed by the external catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogBreed {
    pub id: String,
    pub name: String,
}

/// Errors from the breed catalog client.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Outcome of one sync run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub fetched: usize,
    pub upserted: usize,
    pub failed: usize,
}

/// HTTP client for the breed catalog.
pub struct CatalogClient {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl CatalogClient {
    /// * `url` - Full breed listing URL, e.g. `https://api.thecatapi.com/v1/breeds`.
    pub fn new(url: String, api_key: Option<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url, api_key)
    }

    pub fn with_client(client: reqwest::Client, url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            url,
            api_key,
        }
    }

    /// Fetch the full breed listing.
    pub async fn fetch_breeds(&self) -> Result<Vec<CatalogBreed>, CatalogError> {
        let mut request = self.client.get(&self.url);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<Vec<CatalogBreed>>().await?)
    }
}

/// Fetch the catalog and upsert every breed.
///
/// A failed fetch fails the run; a failed upsert is logged, counted, and
/// skipped.
pub async fn sync_breeds(
    client: &CatalogClient,
    breeds: &BreedService,
) -> Result<SyncReport, CatalogError> {
    let entries = client.fetch_breeds().await?;
    let mut report = SyncReport {
        fetched: entries.len(),
        ..SyncReport::default()
    };

    for entry in &entries {
        match breeds.upsert(&entry.id, &entry.name).await {
            Ok(_) => report.upserted += 1,
            Err(e) => {
                tracing::error!(catalog_id = %entry.id, error = %e, "Failed to upsert breed");
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

/// Run the sync once at startup. Never fails startup.
pub async fn run_startup_sync(config: &CatalogConfig, breeds: &BreedService) -> Option<SyncReport> {
    let Some(url) = &config.url else {
        tracing::warn!("THE_CAT_API_URL not set, skipping breed catalog sync");
        return None;
    };

    let client = CatalogClient::new(url.clone(), config.api_key.clone());
    match sync_breeds(&client, breeds).await {
        Ok(report) => {
            tracing::info!(
                fetched = report.fetched,
                upserted = report.upserted,
                failed = report.failed,
                "Breed catalog synced"
            );
            Some(report)
        }
        Err(e) => {
            tracing::error!(error = %e, "Breed catalog sync failed");
            None
        }
    }
}
