//! Provider error types.

use thiserror::Error;

/// Errors that can occur when interacting with an LLM provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The API answered 2xx but not in a shape we accept.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Map a reqwest send failure.
    pub(crate) fn from_send(e: reqwest::Error, timeout_secs: u64) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout(timeout_secs)
        } else {
            ProviderError::NetworkError(e.to_string())
        }
    }
}

/// Turn a non-success HTTP response into a `ProviderError`, passing
/// successful responses through.
pub(crate) async fn check_status(
    response: reqwest::Response,
    model: &str,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status().as_u16();
    if status == 429 {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5)
            * 1000;
        return Err(ProviderError::RateLimited {
            retry_after_ms: retry_after,
        });
    }
    if status == 401 || status == 403 {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::AuthenticationFailed(body));
    }
    if status == 404 {
        return Err(ProviderError::ModelNotFound(model.to_string()));
    }
    if status >= 400 {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::ApiError {
            status,
            message: body,
        });
    }
    Ok(response)
}
