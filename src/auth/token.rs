use crate::auth::error::AuthError;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// A bearer token obtained from the credential provider.
///
/// The token text is deliberately kept out of `Debug` output.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Acquires bearer tokens from the OAuth2 token endpoint using the
/// client-credentials grant.
///
/// A failure here is fatal for the whole run: nothing can be queried without
/// a token, so the binary surfaces it before any location is touched.
pub struct TokenProvider {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl TokenProvider {
    pub fn new(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub async fn fetch_token(&self) -> Result<AccessToken, AuthError> {
        debug!("Requesting access token from {}", self.token_url);

        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::TokenRequest(self.token_url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    AuthError::TokenStatus {
                        url: self.token_url.clone(),
                        status,
                        source: e,
                    }
                } else {
                    AuthError::TokenRequest(self.token_url.clone(), e)
                });
            }
        };

        let body = response
            .text()
            .await
            .map_err(|e| AuthError::TokenBodyRead(self.token_url.clone(), e))?;
        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AuthError::TokenParse(self.token_url.clone(), e))?;

        info!("Acquired access token from {}", self.token_url);
        Ok(AccessToken::new(token.access_token))
    }
}

/// Builds the HTTP client used for all weather queries: bearer authorization
/// installed as a sensitive default header, gzip transport, and a per-request
/// timeout so a hung request surfaces as a query failure instead of wedging
/// the batch.
pub fn build_authorized_client(
    token: &AccessToken,
    timeout: Duration,
) -> Result<Client, AuthError> {
    let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))?;
    auth_value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth_value);

    Client::builder()
        .default_headers(headers)
        .gzip(true)
        .timeout(timeout)
        .build()
        .map_err(AuthError::ClientBuild)
}
