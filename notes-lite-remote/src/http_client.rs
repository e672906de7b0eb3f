//! HTTP request execution for the remote backend
//!
//! Sends a prepared `RequestBuilder`, logs it, and turns transport failures and
//! error statuses into [`RemoteError`]. Retrying is opt-in.

use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::RemoteError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Error body returned by PostgREST-style backends.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl ErrorBody {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Human readable message, falling back to the raw body.
    fn message_or(&self, body: &str) -> Option<String> {
        let mut parts: Vec<&str> = Vec::new();
        for part in [&self.message, &self.details, &self.hint].into_iter().flatten() {
            if !part.is_empty() {
                parts.push(part);
            }
        }
        if !parts.is_empty() {
            return Some(parts.join(" | "));
        }
        let body = body.trim();
        (!body.is_empty()).then(|| truncate_for_log(body))
    }
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status code and response text.
    ///
    /// HTTP 429 maps to `RateLimited` and 502/503/504 to `NetworkError`; any
    /// other status is returned to the caller untouched.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), RemoteError> {
        log::debug!("[remote] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                RemoteError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                RemoteError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[remote] Response Status: {status_code}");

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[remote] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(RemoteError::RateLimited {
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[remote] Gateway error (HTTP {status_code})");
            return Err(RemoteError::NetworkError {
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| RemoteError::NetworkError {
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("[remote] Response Body: {}", truncate_for_log(&response_text));

        Ok((status_code, response_text))
    }

    /// Same as [`execute_request`](Self::execute_request) with up to
    /// `max_retries` extra attempts for retryable failures.
    ///
    /// Backoff is exponential (100ms, 200ms, 400ms, ... capped at 10s) unless
    /// the backend sent `Retry-After`, which is honoured up to 30s.
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
        max_retries: u32,
    ) -> Result<(u16, String), RemoteError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, method_name, url).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[remote] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, method_name, url).await;
            };

            match Self::execute_request(req, method_name, url).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[remote] {method_name} {url} failed (attempt {}/{}), retrying in {:.1}s: {e}",
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| RemoteError::NetworkError {
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }

    /// Parse a JSON response body.
    pub fn parse_json<T>(response_text: &str) -> Result<T, RemoteError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[remote] JSON parse failed: {e}");
            log::error!("[remote] Raw response: {}", truncate_for_log(response_text));
            RemoteError::ParseError {
                detail: e.to_string(),
            }
        })
    }

    /// Map a non-success status (and its body) onto a [`RemoteError`].
    pub fn status_error(status: u16, body: &str, table: &str) -> RemoteError {
        let parsed = ErrorBody::parse(body);
        let raw_message = parsed.message_or(body);

        // 42501: insufficient_privilege (row-level security)
        if parsed.code.as_deref() == Some("42501") {
            return RemoteError::PermissionDenied {
                table: table.to_string(),
                raw_message,
            };
        }

        match status {
            401 => RemoteError::InvalidCredentials { raw_message },
            403 => RemoteError::PermissionDenied {
                table: table.to_string(),
                raw_message,
            },
            404 => RemoteError::TableNotFound {
                table: table.to_string(),
                raw_message,
            },
            409 => RemoteError::Conflict {
                table: table.to_string(),
                raw_message,
            },
            500..=599 => RemoteError::ServerError {
                status,
                raw_message,
            },
            _ => RemoteError::Unknown {
                status,
                raw_code: parsed.code,
                raw_message: raw_message.unwrap_or_default(),
            },
        }
    }
}

/// Use `Retry-After` (capped at 30s) when rate limited, exponential backoff otherwise.
fn retry_delay(error: &RemoteError, attempt: u32) -> Duration {
    if let RemoteError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// 100ms, 200ms, 400ms, ... capped at 10 seconds.
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
