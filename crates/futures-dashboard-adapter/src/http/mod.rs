/*
[INPUT]:  HTTP client configuration, credential store and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod public;
pub mod signature;
pub mod trade;
pub mod user;

pub use error::{FuturesError, Result};
pub use signature::{RequestDescriptor, RequestSigner, SignedRequest};

pub use client::{
    API_KEY_HEADER, ClientConfig, FuturesClient, PRODUCTION_BASE_URL, TESTNET_BASE_URL,
};
pub use user::DEFAULT_ORDER_HISTORY_LIMIT;
