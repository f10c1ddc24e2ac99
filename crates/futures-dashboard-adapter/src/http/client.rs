/*
[INPUT]:  HTTP configuration (base URLs, timeouts), shared credential store
[OUTPUT]: Configured reqwest client dispatching public and signed calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::{CredentialStore, Credentials};
use crate::http::signature::{RequestDescriptor, RequestSigner};
use crate::http::{FuturesError, Result};
use crate::types::{Network, QueryParams};

/// Base URLs for the futures REST API
pub const PRODUCTION_BASE_URL: &str = "https://fapi.binance.com";
pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// Header carrying the API key on signed calls
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(rename = "timeout_ms", with = "duration_ms")]
    pub timeout: Duration,
    #[serde(rename = "connect_timeout_ms", with = "duration_ms")]
    pub connect_timeout: Duration,
    pub production_base_url: String,
    pub testnet_base_url: String,
    /// Optional `recvWindow` added to every signed call
    pub recv_window: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            production_base_url: PRODUCTION_BASE_URL.to_string(),
            testnet_base_url: TESTNET_BASE_URL.to_string(),
            recv_window: None,
        }
    }
}

impl ClientConfig {
    /// Parse a YAML document; missing keys keep their defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| FuturesError::Config(format!("invalid client config: {e}")))
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FuturesError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Point both networks at the same host (mock servers, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.production_base_url = base_url.clone();
        self.testnet_base_url = base_url;
        self
    }
}

/// Endpoint resolution: network selection to base URL
#[derive(Debug, Clone)]
struct BaseUrls {
    production: Url,
    testnet: Url,
}

impl BaseUrls {
    fn parse(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            production: parse_base_url(&config.production_base_url)?,
            testnet: parse_base_url(&config.testnet_base_url)?,
        })
    }

    fn resolve(&self, network: Network) -> &Url {
        match network {
            Network::Production => &self.production,
            Network::Testnet => &self.testnet,
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim_end_matches('/'))?;
    if url.cannot_be_a_base() {
        return Err(FuturesError::Config(format!("not a base URL: {raw}")));
    }
    Ok(url)
}

/// Exchange client: signs and dispatches every supported operation.
///
/// Holds a handle to a [`CredentialStore`]; credentials and network are read
/// from the store on every call, never cached.
#[derive(Debug, Clone)]
pub struct FuturesClient {
    http_client: Client,
    base_urls: BaseUrls,
    timeout: Duration,
    recv_window: Option<u64>,
    credentials: CredentialStore,
}

impl FuturesClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_store(config, CredentialStore::new())
    }

    /// Create a client bound to an existing credential store
    pub fn with_store(config: ClientConfig, credentials: CredentialStore) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_urls: BaseUrls::parse(&config)?,
            timeout: config.timeout,
            recv_window: config.recv_window,
            credentials,
        })
    }

    /// Set credentials for authenticated requests
    pub fn set_credentials(&self, credentials: Credentials) {
        self.credentials.set(credentials);
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<Credentials> {
        self.credentials.get()
    }

    /// Forget the current credentials
    pub fn clear_credentials(&self) {
        self.credentials.clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_authenticated()
    }

    pub fn credential_store(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Base URL the next call will use, from the credentials stored right now
    pub fn current_base_url(&self) -> &Url {
        self.base_urls.resolve(self.credentials.network())
    }

    fn endpoint_url(&self, base: &Url, path: &str, query: &str) -> Result<Url> {
        let base = base.as_str().trim_end_matches('/');
        let raw = if query.is_empty() {
            format!("{base}{path}")
        } else {
            format!("{base}{path}?{query}")
        };
        Ok(Url::parse(&raw)?)
    }

    /// Build request builder for an unsigned market-data endpoint
    pub(crate) fn public_request(
        &self,
        method: Method,
        path: &str,
        params: &QueryParams,
    ) -> Result<RequestBuilder> {
        let network = self.credentials.network();
        let url = self.endpoint_url(
            self.base_urls.resolve(network),
            path,
            &params.to_query_string(),
        )?;

        debug!(%method, path, %network, "public request");
        Ok(self.http_client.request(method, url))
    }

    /// Build request builder for a signed endpoint.
    ///
    /// Fails with [`FuturesError::Unauthenticated`] before any I/O when no
    /// usable credentials are stored.
    pub(crate) fn signed_request(
        &self,
        method: Method,
        path: &str,
        params: QueryParams,
    ) -> Result<RequestBuilder> {
        let credentials = self
            .credentials
            .authenticated()
            .ok_or(FuturesError::Unauthenticated)?;
        let network = credentials.network();

        let descriptor = RequestDescriptor::new(method, path, params);
        let signed = RequestSigner::new(&credentials).sign_request(
            descriptor,
            Utc::now().timestamp_millis(),
            self.recv_window,
        )?;

        let url = self.endpoint_url(
            self.base_urls.resolve(network),
            &signed.path,
            &signed.transmitted_query(),
        )?;

        debug!(
            method = %signed.method,
            path = %signed.path,
            %network,
            timestamp = signed.timestamp,
            "signed request"
        );

        Ok(self
            .http_client
            .request(signed.method, url)
            .header(API_KEY_HEADER, credentials.api_key()))
    }

    /// Send the request and decode a JSON body, mapping failures to typed errors
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let err = FuturesError::from_exchange_body(status, &body);
            warn!(
                status = status.as_u16(),
                code = ?err.exchange_code(),
                "exchange rejected request"
            );
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "failed to decode exchange response");
            FuturesError::Serialization(e)
        })
    }

    /// Send the request and report only whether the exchange answered 2xx;
    /// the body is not decoded
    pub(crate) async fn send_status(&self, builder: RequestBuilder) -> Result<bool> {
        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = FuturesError::from_exchange_body(status, &body);
            warn!(
                status = status.as_u16(),
                code = ?err.exchange_code(),
                "exchange rejected request"
            );
        }
        Ok(status.is_success())
    }

    pub(crate) async fn get_public<T: DeserializeOwned>(
        &self,
        path: &str,
        params: QueryParams,
    ) -> Result<T> {
        let builder = self.public_request(Method::GET, path, &params)?;
        self.send_json(builder).await
    }

    pub(crate) async fn send_signed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: QueryParams,
    ) -> Result<T> {
        let builder = self.signed_request(method, path, params)?;
        self.send_json(builder).await
    }

    fn transport_error(&self, err: reqwest::Error) -> FuturesError {
        if err.is_timeout() {
            FuturesError::Timeout {
                duration_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            FuturesError::Http(err)
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(value.as_millis()).map_err(serde::ser::Error::custom)?;
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
