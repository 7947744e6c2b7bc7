use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token request failed for {0}")]
    TokenRequest(String, #[source] reqwest::Error),

    #[error("Token endpoint {url} returned status {status}")]
    TokenStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read the token response body from {0}")]
    TokenBodyRead(String, #[source] reqwest::Error),

    #[error("Failed to parse the token response from {0}")]
    TokenParse(String, #[source] serde_json::Error),

    #[error("Access token is not usable as a header value")]
    TokenHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to build the authorized HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}
