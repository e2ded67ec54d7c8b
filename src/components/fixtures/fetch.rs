use crate::error::{fetch_error, SyncResult};
use reqwest::Client;
use tracing::{debug, info};

/// Downloads schedule pages
#[derive(Clone, Default)]
pub struct ScheduleFetcher {
    client: Client,
}

impl ScheduleFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// GET the schedule page and return its body; any non-2xx status is fatal
    pub async fn fetch(&self, url: &str) -> SyncResult<String> {
        info!("Fetching schedule from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(&format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(fetch_error(&format!("{}: HTTP {}", url, response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| fetch_error(&format!("Failed to read body of {}: {}", url, e)))?;
        debug!("Fetched {} bytes", body.len());

        Ok(body)
    }
}
