/*
[INPUT]:  Error sources (credentials, transport, exchange, validation, serialization)
[OUTPUT]: Structured error types with retry and re-login hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::responses::ExchangeErrorBody;

/// Exchange codes that mean the key, signature or permissions were refused
const AUTH_REJECTION_CODES: [i64; 3] = [-1022, -2014, -2015];

/// Main error type for the futures adapter
#[derive(Error, Debug)]
pub enum FuturesError {
    /// A signed call was attempted with no credentials stored
    #[error("Not authenticated: set API credentials before calling signed endpoints")]
    Unauthenticated,

    /// Transport failure (connect, DNS, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request exceeded the configured transport timeout
    #[error("Request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Exchange answered with a non-2xx status
    #[error("Exchange rejected request (HTTP {status}, code {code:?}): {message}")]
    Exchange {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    /// Local pre-flight rejection, nothing was sent
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FuturesError {
    /// Check if the caller may retry (with its own backoff)
    pub fn is_retryable(&self) -> bool {
        match self {
            FuturesError::Http(_) | FuturesError::Timeout { .. } => true,
            FuturesError::Exchange { status, .. } => {
                *status == 429 || *status == 418 || *status >= 500
            }
            _ => false,
        }
    }

    /// Check if the caller should log in again
    pub fn is_auth_error(&self) -> bool {
        match self {
            FuturesError::Unauthenticated => true,
            FuturesError::Exchange { status, code, .. } => {
                *status == 401
                    || *status == 403
                    || code.is_some_and(|c| AUTH_REJECTION_CODES.contains(&c))
            }
            _ => false,
        }
    }

    /// Exchange-defined error code, if the exchange sent one
    pub fn exchange_code(&self) -> Option<i64> {
        match self {
            FuturesError::Exchange { code, .. } => *code,
            _ => None,
        }
    }

    /// Build an exchange rejection from a status and raw response body.
    ///
    /// The exchange's `{"code", "msg"}` is copied verbatim; any other body is
    /// carried as the message with no code.
    pub fn from_exchange_body(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ExchangeErrorBody>(body) {
            Ok(parsed) => FuturesError::Exchange {
                status: status.as_u16(),
                code: Some(parsed.code),
                message: parsed.msg,
            },
            Err(_) => FuturesError::Exchange {
                status: status.as_u16(),
                code: None,
                message: body.to_string(),
            },
        }
    }
}

/// Result type alias for futures adapter operations
pub type Result<T> = std::result::Result<T, FuturesError>;
