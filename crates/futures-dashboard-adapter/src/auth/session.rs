/*
[INPUT]:  Credentials entered by the user and the exchange client
[OUTPUT]: Logged-in session state (credentials stored and verified)
[POS]:    Auth layer - orchestrates login, verification and logout
[UPDATE]: When the login flow or session state changes
*/

use tracing::{info, warn};

use crate::http::{ClientConfig, FuturesClient, Result};

use super::{CredentialStore, Credentials};

/// Owns the session's credential lifecycle on top of a [`FuturesClient`]
#[derive(Debug, Clone)]
pub struct SessionManager {
    client: FuturesClient,
}

impl SessionManager {
    pub fn new(client: FuturesClient) -> Self {
        Self { client }
    }

    /// Create a session with a fresh client and an empty credential store
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = FuturesClient::with_store(config, CredentialStore::new())?;
        Ok(Self::new(client))
    }

    /// Get the client bound to this session's credentials
    pub fn client(&self) -> &FuturesClient {
        &self.client
    }

    /// Store `credentials` and confirm them with one signed call.
    ///
    /// Returns `false` and leaves the store empty when the exchange does not
    /// accept them.
    pub async fn login(&self, credentials: Credentials) -> bool {
        let network = credentials.network();
        self.client.set_credentials(credentials);

        if self.client.verify_credentials().await {
            info!(%network, "session logged in");
            true
        } else {
            self.client.clear_credentials();
            warn!(%network, "login rejected, credentials cleared");
            false
        }
    }

    /// Forget the stored credentials
    pub fn logout(&self) {
        self.client.clear_credentials();
        info!("session logged out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.is_authenticated()
    }
}
