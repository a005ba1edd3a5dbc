//! When the HTTP classifier is asked again, and how long to wait.
//!
//! The decision rests on where the call broke. A request that never got an
//! HTTP status back (refused connection, reset, truncated body) or that ran
//! out of time says nothing about the image, so it is repeated. A status
//! tells us the endpoint looked at the upload: only 408, 429 and 5xx are
//! worth another try. Anything the endpoint answered but we could not read
//! as predictions will not improve on retry.

use std::time::Duration;

use crate::error::ClassifierError;

/// Longest pause between two classifier attempts.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Whether `error` is transient for the HTTP classifier.
pub fn is_retryable(error: &ClassifierError) -> bool {
    match error {
        ClassifierError::Timeout { .. } => true,
        ClassifierError::Request {
            status_code: None, ..
        } => true,
        ClassifierError::Request {
            status_code: Some(status),
            ..
        } => matches!(*status, 408 | 429 | 500..=599),
        ClassifierError::Load { .. } | ClassifierError::InvalidResponse { .. } => false,
    }
}

/// Pause before retry number `attempt + 1`: `retry_delay_ms` doubled per
/// attempt, never longer than [`MAX_BACKOFF`].
pub fn backoff_duration(attempt: u32, retry_delay_ms: u64) -> Duration {
    let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
    Duration::from_millis(retry_delay_ms.saturating_mul(factor)).min(MAX_BACKOFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(status_code: Option<u16>, message: &str) -> ClassifierError {
        ClassifierError::Request {
            message: message.to_string(),
            status_code,
        }
    }

    #[test]
    fn test_timeout_is_retryable() {
        assert!(is_retryable(&ClassifierError::Timeout { timeout_ms: 10_000 }));
    }

    #[test]
    fn test_rate_limit_and_server_errors_retryable() {
        assert!(is_retryable(&request(Some(429), "HTTP 429")));
        assert!(is_retryable(&request(Some(503), "HTTP 503")));
    }

    #[test]
    fn test_client_errors_not_retryable() {
        assert!(!is_retryable(&request(Some(400), "HTTP 400")));
        assert!(!is_retryable(&request(Some(401), "HTTP 401")));
    }

    #[test]
    fn test_connection_error_retryable_without_status() {
        assert!(is_retryable(&request(None, "error trying to connect: refused")));
    }

    #[test]
    fn test_request_timeout_status_retryable() {
        assert!(is_retryable(&request(Some(408), "HTTP 408")));
    }

    #[test]
    fn test_load_failure_not_retryable() {
        let err = ClassifierError::Load {
            message: "Failed to build HTTP client".to_string(),
        };
        assert!(!is_retryable(&err));
    }

    #[test]
    fn test_backoff_survives_huge_attempt_counts() {
        assert_eq!(backoff_duration(200, 500), MAX_BACKOFF);
    }

    #[test]
    fn test_invalid_response_not_retryable() {
        let err = ClassifierError::InvalidResponse {
            message: "expected a prediction list".to_string(),
        };
        assert!(!is_retryable(&err));
    }

    #[test]
    fn test_backoff_exponential() {
        assert_eq!(backoff_duration(0, 500), Duration::from_millis(500));
        assert_eq!(backoff_duration(1, 500), Duration::from_millis(1000));
        assert_eq!(backoff_duration(2, 500), Duration::from_millis(2000));
    }

    #[test]
    fn test_backoff_capped_at_30s() {
        assert_eq!(backoff_duration(10, 1000), Duration::from_millis(30_000));
    }
}
