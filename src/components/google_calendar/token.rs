use crate::config::Config;
use crate::error::{config_error, remote_service_error, SyncResult};
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Google OAuth token endpoint
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Tokens this close to expiry are refreshed
const EXPIRY_SKEW_SECS: i64 = 60;

/// Token as persisted on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix timestamp after which the access token is invalid
    pub expires_at: i64,
}

#[derive(Clone)]
pub struct TokenManager {
    path: PathBuf,
    client_id: String,
    client_secret: String,
    token_url: String,
    client: Client,
}

impl TokenManager {
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.token_path.clone(),
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Send refresh requests somewhere else than Google
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Get a valid access token, refreshing the stored one if it expired
    pub async fn get_access_token(&self) -> SyncResult<String> {
        let token = self.load()?;

        if token.expires_at - EXPIRY_SKEW_SECS > Utc::now().timestamp() {
            return Ok(token.access_token);
        }

        debug!("Access token expired, refreshing");
        let refreshed = self.refresh_token(&token).await?;
        Ok(refreshed.access_token)
    }

    /// Refresh an expired token and persist the result
    async fn refresh_token(&self, token: &StoredToken) -> SyncResult<StoredToken> {
        let refresh_token = token
            .refresh_token
            .as_deref()
            .ok_or_else(|| remote_service_error("No refresh token in token data"))?;

        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| remote_service_error(&format!("Failed to refresh token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(remote_service_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let new_token: Value = response
            .json()
            .await
            .map_err(|e| remote_service_error(&format!("Failed to parse token response: {}", e)))?;

        let access_token = new_token
            .get("access_token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| remote_service_error("Token response missing 'access_token' field"))?;
        let expires_in = new_token
            .get("expires_in")
            .and_then(|v| v.as_i64())
            .unwrap_or(3600);

        // Google only sends a new refresh token occasionally
        let refreshed = StoredToken {
            access_token: access_token.to_string(),
            refresh_token: new_token
                .get("refresh_token")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .or_else(|| Some(refresh_token.to_string())),
            expires_at: Utc::now().timestamp() + expires_in,
        };

        self.save(&refreshed)?;
        info!("Refreshed Google access token");

        Ok(refreshed)
    }

    /// Store a token response from the authorization code exchange
    pub fn set_token(&self, token_json: Value) -> SyncResult<()> {
        let token: StoredToken = serde_json::from_value(token_json)?;
        self.save(&token)
    }

    fn load(&self) -> SyncResult<StoredToken> {
        let content = fs::read_to_string(&self.path).map_err(|_| {
            config_error(&format!(
                "No token found at {}. Run get_calendar_token first.",
                self.path.display()
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, token: &StoredToken) -> SyncResult<()> {
        fs::write(&self.path, serde_json::to_string_pretty(token)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn manager(path: PathBuf) -> TokenManager {
        let config = Config {
            google_client_id: "client".to_string(),
            google_client_secret: "secret".to_string(),
            google_calendar_id: "primary".to_string(),
            token_path: path,
            home_team_name: String::new(),
            timezone: chrono_tz::Europe::Budapest,
            create_delay: Duration::ZERO,
            schedules: Vec::new(),
        };
        TokenManager::new(&config)
    }

    #[tokio::test]
    async fn valid_token_is_returned_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(dir.path().join("token.json"));
        manager
            .set_token(json!({
                "access_token": "fresh",
                "refresh_token": "r",
                "expires_at": Utc::now().timestamp() + 3600,
            }))
            .unwrap();

        assert_eq!(manager.get_access_token().await.unwrap(), "fresh");
    }

    #[tokio::test]
    async fn expired_token_is_refreshed_and_saved() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "renewed",
                "expires_in": 3599,
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("token.json");
        let manager = manager(token_path.clone())
            .with_token_url(format!("{}/token", mock_server.uri()));
        manager
            .set_token(json!({
                "access_token": "stale",
                "refresh_token": "keep-me",
                "expires_at": 0,
            }))
            .unwrap();

        assert_eq!(manager.get_access_token().await.unwrap(), "renewed");

        let saved: StoredToken =
            serde_json::from_str(&fs::read_to_string(token_path).unwrap()).unwrap();
        assert_eq!(saved.access_token, "renewed");
        assert_eq!(saved.refresh_token.as_deref(), Some("keep-me"));
    }

    #[tokio::test]
    async fn missing_token_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(dir.path().join("absent.json"));
        assert!(matches!(
            manager.get_access_token().await,
            Err(Error::Config(_))
        ));
    }
}
