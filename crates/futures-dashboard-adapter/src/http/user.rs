/*
[INPUT]:  Stored credentials and optional query filters
[OUTPUT]: User account data (balances, positions, orders, position mode)
[POS]:    HTTP layer - user data endpoints (require signature)
[UPDATE]: When adding new user endpoints or changing query parameters
*/

// ### User Endpoints

use crate::http::{FuturesClient, Result};
use crate::types::{AccountInfo, Order, PositionMode, QueryParams};
use reqwest::Method;
use tracing::warn;

/// Page size used when the caller has no preference for order history
pub const DEFAULT_ORDER_HISTORY_LIMIT: u32 = 50;

impl FuturesClient {
    /// Connectivity probe: one signed account call.
    ///
    /// Any 2xx is `true` whatever the body holds. Any failure, including
    /// missing credentials, yields `false`.
    pub async fn verify_credentials(&self) -> bool {
        match self.account_reachable().await {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!(error = %err, auth = err.is_auth_error(), "credential check failed");
                false
            }
        }
    }

    async fn account_reachable(&self) -> Result<bool> {
        let builder = self.signed_request(Method::GET, "/fapi/v2/account", QueryParams::new())?;
        self.send_status(builder).await
    }

    /// Query account balances and positions
    ///
    /// GET /fapi/v2/account
    pub async fn get_account(&self) -> Result<AccountInfo> {
        self.send_signed(Method::GET, "/fapi/v2/account", QueryParams::new()).await
    }

    /// Query open orders, for one symbol or all of them
    ///
    /// GET /fapi/v1/openOrders?symbol={symbol}
    pub async fn get_open_orders(&self, symbol: Option<&str>) -> Result<Vec<Order>> {
        let mut params = QueryParams::new();
        params.push_opt("symbol", symbol);

        self.send_signed(Method::GET, "/fapi/v1/openOrders", params).await
    }

    /// Query order history for a symbol
    ///
    /// GET /fapi/v1/allOrders?symbol={symbol}&limit={limit}
    pub async fn get_all_orders(&self, symbol: &str, limit: u32) -> Result<Vec<Order>> {
        let params = QueryParams::new().with("symbol", symbol).with("limit", limit);
        self.send_signed(Method::GET, "/fapi/v1/allOrders", params).await
    }

    /// Query hedge/one-way position mode
    ///
    /// GET /fapi/v1/positionSide/dual
    pub async fn get_position_mode(&self) -> Result<PositionMode> {
        self.send_signed(Method::GET, "/fapi/v1/positionSide/dual", QueryParams::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::http::{ClientConfig, FuturesError};
    use crate::types::{OrderStatus, Side};
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn authed_client(server: &MockServer) -> FuturesClient {
        let client = FuturesClient::with_config(ClientConfig::default().with_base_url(server.uri()))
            .expect("client init");
        client.set_credentials(Credentials::new("AK", "SK", true));
        client
    }

    fn order_json(order_id: i64, status: &str) -> serde_json::Value {
        serde_json::json!({
            "orderId": order_id,
            "symbol": "BTCUSDT",
            "status": status,
            "clientOrderId": "abc",
            "price": "30000",
            "avgPrice": "0.00000",
            "origQty": "0.010",
            "executedQty": "0",
            "cumQuote": "0",
            "timeInForce": "GTC",
            "type": "LIMIT",
            "reduceOnly": false,
            "closePosition": false,
            "side": "BUY",
            "positionSide": "BOTH",
            "stopPrice": "0",
            "workingType": "CONTRACT_PRICE",
            "priceProtect": false,
            "origType": "LIMIT",
            "time": 1700000000000_i64,
            "updateTime": 1700000000000_i64
        })
    }

    #[tokio::test]
    async fn test_get_open_orders_with_and_without_symbol() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fapi/v1/openOrders"))
            .and(query_param("symbol", "BTCUSDT"))
            .and(header("X-MBX-APIKEY", "AK"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([order_json(1, "NEW")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/fapi/v1/openOrders"))
            .and(query_param_is_missing("symbol"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = authed_client(&server);

        let orders = client.get_open_orders(Some("BTCUSDT")).await.expect("open orders");
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_id, 1);
        assert_eq!(orders[0].status, OrderStatus::New);
        assert_eq!(orders[0].side, Side::Buy);

        let none = client.get_open_orders(None).await.expect("open orders");
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_get_all_orders_sends_symbol_and_limit() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fapi/v1/allOrders"))
            .and(query_param("symbol", "BTCUSDT"))
            .and(query_param("limit", DEFAULT_ORDER_HISTORY_LIMIT.to_string().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                order_json(1, "FILLED"),
                order_json(2, "CANCELED")
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = authed_client(&server);
        let orders = client
            .get_all_orders("BTCUSDT", DEFAULT_ORDER_HISTORY_LIMIT)
            .await
            .expect("all orders");

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].status, OrderStatus::Canceled);
    }

    #[tokio::test]
    async fn test_get_position_mode() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fapi/v1/positionSide/dual"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"dualSidePosition": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = authed_client(&server);
        let mode = client.get_position_mode().await.expect("position mode");
        assert!(mode.dual_side_position);
    }

    #[rstest::rstest]
    #[case("{}")]
    #[case("")]
    #[tokio::test]
    async fn test_verify_credentials_true_on_any_success_body(#[case] body: &str) {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fapi/v2/account"))
            .and(header("X-MBX-APIKEY", "AK"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let client = authed_client(&server);
        assert!(client.verify_credentials().await);
    }

    #[tokio::test]
    async fn test_verify_credentials_false_on_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fapi/v2/account"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "code": -2015,
                "msg": "Invalid API-key, IP, or permissions for action."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = authed_client(&server);
        assert!(!client.verify_credentials().await);
    }

    #[tokio::test]
    async fn test_verify_credentials_false_without_credentials() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fapi/v2/account"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = FuturesClient::with_config(ClientConfig::default().with_base_url(server.uri()))
            .expect("client init");

        assert!(!client.verify_credentials().await);
        assert!(matches!(
            client.get_account().await,
            Err(FuturesError::Unauthenticated)
        ));
    }
}
