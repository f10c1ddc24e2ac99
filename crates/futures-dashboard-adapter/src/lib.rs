/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public futures dashboard adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{CredentialStore, Credentials, SessionManager};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    FuturesClient,
    FuturesError,
    RequestDescriptor,
    RequestSigner,
    Result,
    SignedRequest,
};

// Re-export all types
pub use types::*;
