//! Graph API authentication
//!
//! The reconciler runs unattended, so it authenticates with the client
//! credentials grant rather than an interactive flow. Tokens are cached in
//! memory and refreshed shortly before expiry.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use labtrack_domain::{LabTrackError, Result, SharePointConfig};
use parking_lot::Mutex;
use reqwest::Client;

use super::types::TokenResponse;

const DEFAULT_TOKEN_ENDPOINT: &str = "https://login.microsoftonline.com";
const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Refresh this long before the reported expiry to avoid racing the server.
const EXPIRY_MARGIN_SECS: u64 = 60;

/// Anything that can hand out a bearer token for Graph calls.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Client-credentials token provider backed by the Microsoft identity
/// platform.
pub struct ClientCredentialsTokenProvider {
    client: Client,
    token_endpoint: String,
    tenant_id: String,
    client_id: String,
    client_secret: String,
    cache: Mutex<Option<CachedToken>>,
}

impl ClientCredentialsTokenProvider {
    /// # Errors
    /// Returns `LabTrackError::Auth` if no client secret is configured.
    pub fn new(config: &SharePointConfig) -> Result<Self> {
        Self::with_endpoint(config, DEFAULT_TOKEN_ENDPOINT)
    }

    /// Use a non-default identity endpoint. Tests point this at a mock
    /// server.
    pub fn with_endpoint(config: &SharePointConfig, endpoint: &str) -> Result<Self> {
        let client_secret = config
            .client_secret
            .clone()
            .ok_or_else(|| LabTrackError::Auth("client secret not configured".to_string()))?;

        Ok(Self {
            client: Client::new(),
            token_endpoint: endpoint.trim_end_matches('/').to_string(),
            tenant_id: config.tenant_id.clone(),
            client_id: config.client_id.clone(),
            client_secret,
            cache: Mutex::new(None),
        })
    }

    fn cached(&self) -> Option<String> {
        let guard = self.cache.lock();
        guard
            .as_ref()
            .filter(|cached| cached.expires_at > Instant::now())
            .map(|cached| cached.token.clone())
    }

    async fn request_token(&self) -> Result<TokenResponse> {
        let url =
            format!("{}/{}/oauth2/v2.0/token", self.token_endpoint, self.tenant_id);

        let response = self
            .client
            .post(&url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "client_credentials"),
                ("scope", GRAPH_SCOPE),
            ])
            .send()
            .await
            .map_err(|e| LabTrackError::Auth(format!("token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "unknown error".to_string());
            return Err(LabTrackError::Auth(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| LabTrackError::Auth(format!("failed to parse token response: {e}")))
    }
}

#[async_trait]
impl AccessTokenProvider for ClientCredentialsTokenProvider {
    async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.cached() {
            return Ok(token);
        }

        let fresh = self.request_token().await?;
        let lifetime = Duration::from_secs(
            u64::try_from(fresh.expires_in)
                .unwrap_or(0)
                .saturating_sub(EXPIRY_MARGIN_SECS),
        );

        let mut guard = self.cache.lock();
        *guard = Some(CachedToken {
            token: fresh.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(fresh.access_token)
    }
}

/// Fixed-token provider for tests and local experiments.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}
