/*
[INPUT]:  API credentials supplied by the user
[OUTPUT]: Shared credential store and session login/logout
[POS]:    Auth layer - credential lifecycle for signed exchange calls
[UPDATE]: When credential handling or the login flow changes
*/

pub mod credentials;
pub mod session;

pub use credentials::{CredentialStore, Credentials};
pub use session::SessionManager;
