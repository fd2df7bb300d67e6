//! Shared HTTP plumbing for provider clients.
//!
//! Centralizes client construction and status-code checks (429 with
//! `Retry-After`, other non-success statuses with a bounded body excerpt) so
//! the individual clients stay focused on request shape and response mapping.

use std::time::Duration;

use lens_core::text::truncate_chars;

use crate::error::ProviderError;

/// Longest response-body excerpt kept in [`ProviderError::Api`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Fallback when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Build a client with a user agent and a total per-request timeout.
///
/// # Errors
///
/// Returns [`ProviderError::Http`] if the TLS backend fails to initialize.
pub fn build_client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(ProviderError::from)
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`ProviderError::RateLimited`]
/// - **Non-success status** → [`ProviderError::Api`] with the status code and
///   the start of the response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(ProviderError::Api {
            status,
            message: truncate_chars(body.trim(), MAX_ERROR_BODY_CHARS).to_string(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, headers: &[(&str, &str)], body: &str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        reqwest::Response::from(builder.body(body.to_string()).unwrap())
    }

    #[tokio::test]
    async fn rate_limit_reads_retry_after() {
        let err = check_response(response(429, &[("Retry-After", " 30 ")], ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited { retry_after_secs: 30 }));
    }

    #[tokio::test]
    async fn rate_limit_without_usable_header_uses_default() {
        let err = check_response(response(429, &[("Retry-After", "soon")], ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited { retry_after_secs: 60 }));
    }

    #[tokio::test]
    async fn api_error_keeps_bounded_body() {
        let body = "x".repeat(2_000);
        let err = check_response(response(403, &[], &body)).await.unwrap_err();
        match err {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message.chars().count(), MAX_ERROR_BODY_CHARS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        let resp = check_response(response(200, &[], "{}")).await.unwrap();
        assert_eq!(resp.text().await.unwrap(), "{}");
    }

    #[test]
    fn client_builds() {
        assert!(build_client("lens-test/0.1", Duration::from_secs(1)).is_ok());
    }
}
