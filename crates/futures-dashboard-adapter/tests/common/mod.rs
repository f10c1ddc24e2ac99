/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for futures-dashboard-adapter tests

use futures_dashboard_adapter::{ClientConfig, Credentials, FuturesClient};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "AK";
pub const TEST_SECRET_KEY: &str = "SK";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client whose production and testnet URLs both point at `server`
pub fn client_for(server: &MockServer) -> FuturesClient {
    FuturesClient::with_config(ClientConfig::default().with_base_url(server.uri()))
        .expect("client init")
}

/// Client with production and testnet routed to separate servers
#[allow(dead_code)]
pub fn split_client(production: &MockServer, testnet: &MockServer) -> FuturesClient {
    let config = ClientConfig {
        production_base_url: production.uri(),
        testnet_base_url: testnet.uri(),
        ..ClientConfig::default()
    };
    FuturesClient::with_config(config).expect("client init")
}

pub fn test_credentials(use_test_network: bool) -> Credentials {
    Credentials::new(TEST_API_KEY, TEST_SECRET_KEY, use_test_network)
}

/// Independent HMAC-SHA256 hex, for checking signatures on the wire
#[allow(dead_code)]
pub fn expected_signature(secret: &str, query: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("hmac key");
    mac.update(query.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Order record as the exchange returns it
#[allow(dead_code)]
pub fn order_json(order_id: i64, order_type: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "orderId": order_id,
        "symbol": "BTCUSDT",
        "status": status,
        "clientOrderId": format!("client-{order_id}"),
        "price": "0",
        "avgPrice": "0.00",
        "origQty": "0.01",
        "executedQty": "0",
        "cumQty": "0",
        "cumQuote": "0",
        "timeInForce": "GTC",
        "type": order_type,
        "reduceOnly": false,
        "closePosition": false,
        "side": "BUY",
        "positionSide": "BOTH",
        "stopPrice": "0",
        "workingType": "CONTRACT_PRICE",
        "priceProtect": false,
        "origType": order_type,
        "priceMatch": "NONE",
        "selfTradePreventionMode": "NONE",
        "goodTillDate": 0,
        "updateTime": 1700000000000_i64
    })
}

#[allow(dead_code)]
pub fn account_json() -> serde_json::Value {
    serde_json::json!({
        "feeTier": 0,
        "canTrade": true,
        "canDeposit": true,
        "canWithdraw": true,
        "updateTime": 0,
        "totalInitialMargin": "0.00000000",
        "totalMaintMargin": "0.00000000",
        "totalWalletBalance": "103.12345678",
        "totalUnrealizedProfit": "0.00000000",
        "totalMarginBalance": "103.12345678",
        "totalPositionInitialMargin": "0.00000000",
        "totalOpenOrderInitialMargin": "0.00000000",
        "totalCrossWalletBalance": "103.12345678",
        "totalCrossUnPnl": "0.00000000",
        "availableBalance": "103.12345678",
        "maxWithdrawAmount": "103.12345678",
        "assets": [],
        "positions": []
    })
}
