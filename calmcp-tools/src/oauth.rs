//! Google OAuth 2.0: consent URL, code exchange and refresh-token grants.

use std::sync::Arc;

use calmcp_core::ProviderError;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::client::ProviderResult;

pub const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// OAuth client registration plus the long-lived refresh token, if any.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: SecretString,
    pub redirect_uri: Url,
    pub refresh_token: Option<SecretString>,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OAuthClient {
    config: Arc<GoogleConfig>,
    http: reqwest::Client,
    token_endpoint: String,
}

impl OAuthClient {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
            token_endpoint: TOKEN_ENDPOINT.to_string(),
        }
    }

    pub fn with_token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = endpoint.into();
        self
    }

    /// Consent page that yields an authorization code with offline access.
    pub fn authorization_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(AUTH_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", self.config.redirect_uri.as_str())
            .append_pair("response_type", "code")
            .append_pair("scope", CALENDAR_SCOPE)
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent");
        Ok(url)
    }

    pub async fn exchange_code(&self, code: &str) -> ProviderResult<TokenResponse> {
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ])
        .await
    }

    /// Mint a short-lived access token from the configured refresh token.
    pub async fn refresh_access_token(&self) -> ProviderResult<String> {
        let refresh_token = self.config.refresh_token.as_ref().ok_or_else(|| {
            ProviderError::Credentials(
                "GOOGLE_REFRESH_TOKEN is not set; run `calmcp auth-url` to obtain one".into(),
            )
        })?;

        let token = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.expose_secret().as_str()),
            ])
            .await?;
        Ok(token.access_token)
    }

    async fn request_token(&self, grant: &[(&str, &str)]) -> ProviderResult<TokenResponse> {
        let mut form = vec![
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.expose_secret().as_str()),
        ];
        form.extend_from_slice(grant);

        let resp = self
            .http
            .post(&self.token_endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| ProviderError::Credentials(format!("token request failed: {e}")))?;

        let status = resp.status();
        debug!(%status, "token endpoint responded");
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<TokenErrorBody>(&body)
                .map(|b| b.error_description.unwrap_or(b.error))
                .unwrap_or(body);
            return Err(ProviderError::Credentials(format!(
                "token endpoint returned {status}: {reason}"
            )));
        }

        resp.json()
            .await
            .map_err(|e| ProviderError::Credentials(format!("malformed token response: {e}")))
    }
}
