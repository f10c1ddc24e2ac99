/*
[INPUT]:  API key, secret key and network selection supplied at login
[OUTPUT]: In-memory credential set and the shared store holding it
[POS]:    Auth layer - credential lifecycle (leaf, no HTTP knowledge)
[UPDATE]: When credential fields or store semantics change
*/

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use secrecy::{ExposeSecret, SecretString};

use crate::types::Network;

/// One API credential set.
///
/// The secret key is wrapped in `SecretString`: it never shows up in `Debug`
/// output and its memory is zeroed on drop.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    secret_key: SecretString,
    use_test_network: bool,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
        use_test_network: bool,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: SecretString::from(secret_key.into()),
            use_test_network,
        }
    }

    /// Sentinel set with empty key and secret; never authenticates
    pub fn empty() -> Self {
        Self::new(String::new(), String::new(), false)
    }

    /// API key (sent in the request header, safe to show)
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Expose the secret key for HMAC signing only.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }

    pub fn use_test_network(&self) -> bool {
        self.use_test_network
    }

    pub fn network(&self) -> Network {
        Network::from_test_flag(self.use_test_network)
    }

    /// Both key and secret are non-empty
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.expose_secret().is_empty()
    }
}

impl PartialEq for Credentials {
    fn eq(&self, other: &Self) -> bool {
        self.api_key == other.api_key
            && self.use_test_network == other.use_test_network
            && self.expose_secret() == other.expose_secret()
    }
}

impl Eq for Credentials {}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .field("use_test_network", &self.use_test_network)
            .finish()
    }
}

/// Holds zero or one credential set for a session.
///
/// Clones share the same slot, so the client and the session manager see
/// the same credentials.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    slot: Arc<RwLock<Option<Credentials>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored credentials unconditionally
    pub fn set(&self, credentials: Credentials) {
        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(credentials);
    }

    /// Snapshot of the stored credentials, if any
    pub fn get(&self) -> Option<Credentials> {
        let guard = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    /// Snapshot usable for signing: present and non-empty
    pub fn authenticated(&self) -> Option<Credentials> {
        self.get().filter(Credentials::is_complete)
    }

    /// Drop the stored credentials; the secret is zeroed as it is dropped
    pub fn clear(&self) {
        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    pub fn is_authenticated(&self) -> bool {
        let guard = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().is_some_and(Credentials::is_complete)
    }

    /// Network of the stored credentials; production when none are stored
    pub fn network(&self) -> Network {
        let guard = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .map(Credentials::network)
            .unwrap_or_default()
    }
}
