/*
[INPUT]:  Caller-supplied order and query parameters
[OUTPUT]: Ordered query parameters and locally validated order requests
[POS]:    Data layer - request types for API communication
[UPDATE]: When API schema changes or new request fields added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderType, PositionSide, Side, TimeInForce, WorkingType};
use crate::http::{FuturesError, Result};

/// Lowest leverage the exchange accepts
pub const MIN_LEVERAGE: u32 = 1;
/// Highest leverage the exchange accepts
pub const MAX_LEVERAGE: u32 = 125;

/// Query parameters in insertion order.
///
/// The order is what gets signed and what gets sent, so it is never sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    pub fn push_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `application/x-www-form-urlencoded` rendering, insertion order preserved
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}

/// New order for `POST /fapi/v1/order`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrderRequest {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default)]
    pub position_side: Option<PositionSide>,
    #[serde(default)]
    pub reduce_only: Option<bool>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub stop_price: Option<Decimal>,
    #[serde(default)]
    pub close_position: Option<bool>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub activation_price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub callback_rate: Option<Decimal>,
    #[serde(default)]
    pub working_type: Option<WorkingType>,
    #[serde(default)]
    pub price_protect: Option<bool>,
    #[serde(default)]
    pub new_client_order_id: Option<String>,
}

impl NewOrderRequest {
    fn base(symbol: impl Into<String>, side: Side, order_type: OrderType, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            quantity,
            price: None,
            time_in_force: None,
            position_side: None,
            reduce_only: None,
            stop_price: None,
            close_position: None,
            activation_price: None,
            callback_rate: None,
            working_type: None,
            price_protect: None,
            new_client_order_id: None,
        }
    }

    pub fn market(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        Self::base(symbol, side, OrderType::Market, quantity)
    }

    /// Limit order resting until cancelled (GTC)
    pub fn limit(symbol: impl Into<String>, side: Side, quantity: Decimal, price: Decimal) -> Self {
        let mut req = Self::base(symbol, side, OrderType::Limit, quantity);
        req.price = Some(price);
        req.time_in_force = Some(TimeInForce::Gtc);
        req
    }

    /// Opposite-side reduce-only market order that flattens `held_side` exposure
    pub fn close_position(symbol: impl Into<String>, held_side: Side, quantity: Decimal) -> Self {
        Self::market(symbol, held_side.opposite(), quantity).reduce_only(true)
    }

    pub fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    pub fn position_side(mut self, position_side: PositionSide) -> Self {
        self.position_side = Some(position_side);
        self
    }

    pub fn reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = Some(reduce_only);
        self
    }

    pub fn stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    pub fn client_order_id(mut self, id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(id.into());
        self
    }

    /// Reject orders the exchange would refuse for missing mandatory fields.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(FuturesError::Validation("symbol is required".to_string()));
        }

        if self.closes_position() {
            if !matches!(self.order_type, OrderType::StopMarket | OrderType::TakeProfitMarket) {
                return Err(FuturesError::Validation(format!(
                    "closePosition needs STOP_MARKET or TAKE_PROFIT_MARKET, got {}",
                    self.order_type.as_str()
                )));
            }
        } else if self.quantity <= Decimal::ZERO {
            return Err(FuturesError::Validation(format!(
                "quantity must be positive, got {}",
                self.quantity
            )));
        }

        if let Some(price) = self.price
            && price <= Decimal::ZERO
        {
            return Err(FuturesError::Validation(format!(
                "price must be positive, got {price}"
            )));
        }

        match self.order_type {
            OrderType::Limit => {
                self.require_price()?;
                if self.time_in_force.is_none() {
                    return Err(FuturesError::Validation(
                        "LIMIT order requires timeInForce".to_string(),
                    ));
                }
            }
            OrderType::Stop | OrderType::TakeProfit => {
                self.require_price()?;
                self.require_stop_price()?;
            }
            OrderType::StopMarket | OrderType::TakeProfitMarket => {
                self.require_stop_price()?;
            }
            OrderType::TrailingStopMarket => {
                if self.callback_rate.is_none() {
                    return Err(FuturesError::Validation(
                        "TRAILING_STOP_MARKET order requires callbackRate".to_string(),
                    ));
                }
            }
            OrderType::Market => {}
        }

        Ok(())
    }

    /// Stop order that closes the whole position; quantity is not sent
    fn closes_position(&self) -> bool {
        self.close_position.unwrap_or(false)
    }

    fn require_price(&self) -> Result<()> {
        if self.price.is_none() {
            return Err(FuturesError::Validation(format!(
                "{} order requires price",
                self.order_type.as_str()
            )));
        }
        Ok(())
    }

    fn require_stop_price(&self) -> Result<()> {
        if self.stop_price.is_none() {
            return Err(FuturesError::Validation(format!(
                "{} order requires stopPrice",
                self.order_type.as_str()
            )));
        }
        Ok(())
    }

    /// Wire parameters: `symbol, side, type, quantity`, then optional fields.
    /// `quantity` is left out when the order closes the whole position.
    pub fn to_params(&self) -> QueryParams {
        let quantity = (!self.closes_position()).then_some(self.quantity);

        let mut params = QueryParams::new();
        params
            .push("symbol", &self.symbol)
            .push("side", self.side.as_str())
            .push("type", self.order_type.as_str())
            .push_opt("quantity", quantity)
            .push_opt("price", self.price)
            .push_opt("timeInForce", self.time_in_force.map(|t| t.as_str()))
            .push_opt("positionSide", self.position_side.map(|p| p.as_str()))
            .push_opt("reduceOnly", self.reduce_only)
            .push_opt("stopPrice", self.stop_price)
            .push_opt("closePosition", self.close_position)
            .push_opt("activationPrice", self.activation_price)
            .push_opt("callbackRate", self.callback_rate)
            .push_opt("workingType", self.working_type.map(|w| w.as_str()))
            .push_opt("priceProtect", self.price_protect)
            .push_opt("newClientOrderId", self.new_client_order_id.as_deref());
        params
    }
}

/// Reject leverage values outside the exchange's 1..=125 range
pub fn validate_leverage(leverage: u32) -> Result<()> {
    if !(MIN_LEVERAGE..=MAX_LEVERAGE).contains(&leverage) {
        return Err(FuturesError::Validation(format!(
            "leverage must be between {MIN_LEVERAGE} and {MAX_LEVERAGE}, got {leverage}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn test_query_params_preserve_insertion_order() {
        let params: QueryParams = [("zebra", "1"), ("alpha", "2")].into_iter().collect();
        assert_eq!(params.to_query_string(), "zebra=1&alpha=2");
    }

    #[test]
    fn test_query_params_form_encode_values() {
        let params = QueryParams::new().with("newClientOrderId", "a b&c=d");
        assert_eq!(params.to_query_string(), "newClientOrderId=a+b%26c%3Dd");
    }

    #[test]
    fn test_market_order_params() {
        let req = NewOrderRequest::market("BTCUSDT", Side::Buy, dec("0.01"));
        assert_eq!(
            req.to_params().to_query_string(),
            "symbol=BTCUSDT&side=BUY&type=MARKET&quantity=0.01"
        );
    }

    #[test]
    fn test_limit_order_params() {
        let req = NewOrderRequest::limit("ETHUSDT", Side::Sell, dec("1.250"), dec("3850.50"))
            .position_side(PositionSide::Short)
            .reduce_only(true);
        assert_eq!(
            req.to_params().to_query_string(),
            "symbol=ETHUSDT&side=SELL&type=LIMIT&quantity=1.250&price=3850.50\
             &timeInForce=GTC&positionSide=SHORT&reduceOnly=true"
        );
    }

    #[test]
    fn test_limit_without_price_rejected() {
        let mut req = NewOrderRequest::limit("BTCUSDT", Side::Buy, dec("0.01"), dec("100"));
        req.price = None;
        let err = req.validate().unwrap_err();
        assert!(matches!(err, FuturesError::Validation(msg) if msg.contains("price")));
    }

    #[test]
    fn test_limit_without_time_in_force_rejected() {
        let mut req = NewOrderRequest::limit("BTCUSDT", Side::Buy, dec("0.01"), dec("100"));
        req.time_in_force = None;
        assert!(matches!(req.validate(), Err(FuturesError::Validation(_))));
    }

    #[test]
    fn test_market_without_price_passes() {
        let req = NewOrderRequest::market("BTCUSDT", Side::Buy, dec("0.01"));
        assert!(req.validate().is_ok());
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    fn test_non_positive_quantity_rejected(#[case] qty: &str) {
        let req = NewOrderRequest::market("BTCUSDT", Side::Buy, dec(qty));
        assert!(matches!(req.validate(), Err(FuturesError::Validation(_))));
    }

    #[rstest]
    #[case(OrderType::StopMarket)]
    #[case(OrderType::TakeProfitMarket)]
    fn test_stop_market_requires_stop_price(#[case] order_type: OrderType) {
        let mut req = NewOrderRequest::market("BTCUSDT", Side::Sell, dec("1"));
        req.order_type = order_type;
        assert!(req.validate().is_err());
        assert!(req.stop_price(dec("9300")).validate().is_ok());
    }

    #[test]
    fn test_close_position_flips_side_and_reduces() {
        let req = NewOrderRequest::close_position("BTCUSDT", Side::Buy, dec("0.060"));
        assert_eq!(req.side, Side::Sell);
        assert_eq!(req.order_type, OrderType::Market);
        assert_eq!(req.reduce_only, Some(true));
        assert!(req.validate().is_ok());
    }

    #[rstest]
    #[case("0")]
    #[case("0.01")]
    fn test_close_position_flag_rejected_on_market(#[case] qty: &str) {
        let mut req = NewOrderRequest::market("BTCUSDT", Side::Sell, dec(qty));
        req.close_position = Some(true);
        let err = req.validate().unwrap_err();
        assert!(matches!(err, FuturesError::Validation(msg) if msg.contains("closePosition")));
    }

    #[test]
    fn test_stop_market_close_position_omits_quantity() {
        let mut req = NewOrderRequest::market("BTCUSDT", Side::Sell, Decimal::ZERO)
            .stop_price(dec("9300"));
        req.order_type = OrderType::StopMarket;
        req.close_position = Some(true);

        assert!(req.validate().is_ok());
        assert_eq!(
            req.to_params().to_query_string(),
            "symbol=BTCUSDT&side=SELL&type=STOP_MARKET&stopPrice=9300&closePosition=true"
        );
    }

    #[test]
    fn test_stop_market_close_position_still_requires_stop_price() {
        let mut req = NewOrderRequest::market("BTCUSDT", Side::Sell, Decimal::ZERO);
        req.order_type = OrderType::TakeProfitMarket;
        req.close_position = Some(true);
        let err = req.validate().unwrap_err();
        assert!(matches!(err, FuturesError::Validation(msg) if msg.contains("stopPrice")));
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(20, true)]
    #[case(125, true)]
    #[case(126, false)]
    fn test_validate_leverage(#[case] leverage: u32, #[case] ok: bool) {
        assert_eq!(validate_leverage(leverage).is_ok(), ok);
    }
}
