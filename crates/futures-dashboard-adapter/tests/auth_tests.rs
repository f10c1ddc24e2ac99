/*
[INPUT]:  Mock authentication responses
[OUTPUT]: Test results for credential store and session flow
[POS]:    Integration tests - authentication
[UPDATE]: When credential handling or login flow changes
*/

mod common;

use common::{account_json, client_for, setup_mock_server, test_credentials};
use futures_dashboard_adapter::{
    ClientConfig, CredentialStore, Credentials, FuturesClient, Network, SessionManager,
};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_credentials_roundtrip() {
    let client = assert_ok!(FuturesClient::new());
    let credentials = test_credentials(true);

    client.set_credentials(credentials.clone());
    let stored = client.credentials().expect("credentials should be set");

    assert_eq!(stored, credentials);
    assert_eq!(stored.network(), Network::Testnet);
    assert!(client.is_authenticated());
}

#[test]
fn test_shared_store_seen_by_client() {
    let store = CredentialStore::new();
    let client = assert_ok!(FuturesClient::with_store(ClientConfig::default(), store.clone()));

    store.set(Credentials::new("AK", "SK", true));
    assert!(client.is_authenticated());
    assert_eq!(
        client.current_base_url().as_str(),
        "https://testnet.binancefuture.com/"
    );

    store.clear();
    assert!(!client.is_authenticated());
    assert_eq!(client.current_base_url().as_str(), "https://fapi.binance.com/");
}

#[test]
fn test_credentials_debug_hides_secret() {
    let credentials = Credentials::new("visible-key", "hidden-secret", false);
    let rendered = format!("{credentials:?}");
    assert!(rendered.contains("visible-key"));
    assert!(!rendered.contains("hidden-secret"));
}

#[tokio::test]
async fn test_session_login_success() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/fapi/v2/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(account_json()))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionManager::new(client_for(&server));
    assert!(session.login(test_credentials(true)).await);
    assert!(session.is_authenticated());

    session.logout();
    assert!(!session.is_authenticated());
    assert!(session.client().credentials().is_none());
}

#[tokio::test]
async fn test_session_login_failure_clears_credentials() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/fapi/v2/account"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "code": -2014,
            "msg": "API-key format invalid."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionManager::new(client_for(&server));
    assert!(!session.login(test_credentials(false)).await);
    assert!(!session.is_authenticated());
    assert!(session.client().credentials().is_none());
}

#[tokio::test]
async fn test_session_relogin_replaces_credentials() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/fapi/v2/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(account_json()))
        .expect(2)
        .mount(&server)
        .await;

    let session = SessionManager::new(client_for(&server));
    assert!(session.login(Credentials::new("AK1", "SK1", true)).await);
    assert!(session.login(Credentials::new("AK2", "SK2", false)).await);

    let stored = session.client().credentials().expect("credentials stored");
    assert_eq!(stored.api_key(), "AK2");
    assert_eq!(stored.network(), Network::Production);
}
