/*
[INPUT]:  Request descriptor, timestamp and API credentials
[OUTPUT]: Signed query string (HMAC-SHA256, lowercase hex)
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or query canonicalization
*/

use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::Sha256;

use crate::auth::Credentials;
use crate::http::{FuturesError, Result};
use crate::types::QueryParams;

type HmacSha256 = Hmac<Sha256>;

/// Unsigned description of one call, built fresh per request
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub params: QueryParams,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>, params: QueryParams) -> Self {
        Self {
            method,
            path: path.into(),
            params,
        }
    }
}

/// Descriptor plus timestamp and signature over the exact query that is sent
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: Method,
    pub path: String,
    /// Canonical query, `timestamp` included, `signature` excluded
    pub query: String,
    pub timestamp: i64,
    pub signature: String,
}

impl SignedRequest {
    /// Query component as transmitted
    pub fn transmitted_query(&self) -> String {
        format!("{}&signature={}", self.query, self.signature)
    }
}

/// Signs requests with the secret key of one credential set
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
}

impl<'a> RequestSigner<'a> {
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    /// Lowercase hex HMAC-SHA256 of `message`, keyed by the secret key
    pub fn sign(&self, message: &str) -> Result<String> {
        hmac_sha256_hex(self.credentials.expose_secret().as_bytes(), message)
    }

    /// Append `recvWindow` (if any) and `timestamp`, encode in insertion
    /// order and sign the resulting query string.
    pub fn sign_request(
        &self,
        descriptor: RequestDescriptor,
        timestamp_ms: i64,
        recv_window: Option<u64>,
    ) -> Result<SignedRequest> {
        let RequestDescriptor {
            method,
            path,
            mut params,
        } = descriptor;

        params.push_opt("recvWindow", recv_window);
        params.push("timestamp", timestamp_ms);

        let query = params.to_query_string();
        let signature = self.sign(&query)?;

        Ok(SignedRequest {
            method,
            path,
            query,
            timestamp: timestamp_ms,
            signature,
        })
    }
}

pub(crate) fn hmac_sha256_hex(key: &[u8], message: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| FuturesError::Config(format!("invalid HMAC key: {e}")))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
