/*
[INPUT]:  Order requests and account settings, signed with stored credentials
[OUTPUT]: Order records and exchange acknowledgements
[POS]:    HTTP layer - trading endpoints (require signature)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use reqwest::Method;
use tracing::{debug, info};

use crate::http::{FuturesClient, Result};
use crate::types::{
    ExchangeAck, LeverageChange, MarginType, NewOrderRequest, Order, QueryParams, ReplacedOrder,
    validate_leverage,
};

impl FuturesClient {
    /// Place a new order
    ///
    /// POST /fapi/v1/order
    /// Validated locally first; an invalid order never reaches the network.
    pub async fn place_order(&self, req: NewOrderRequest) -> Result<Order> {
        req.validate()?;
        debug!(
            symbol = %req.symbol,
            side = req.side.as_str(),
            order_type = req.order_type.as_str(),
            "placing order"
        );
        self.send_signed(Method::POST, "/fapi/v1/order", req.to_params()).await
    }

    /// Cancel an existing order
    ///
    /// DELETE /fapi/v1/order?symbol={symbol}&orderId={order_id}
    pub async fn cancel_order(&self, symbol: &str, order_id: i64) -> Result<Order> {
        let params = QueryParams::new()
            .with("symbol", symbol)
            .with("orderId", order_id);
        self.send_signed(Method::DELETE, "/fapi/v1/order", params).await
    }

    /// Cancel every open order on a symbol
    ///
    /// DELETE /fapi/v1/allOpenOrders?symbol={symbol}
    pub async fn cancel_all_orders(&self, symbol: &str) -> Result<ExchangeAck> {
        let params = QueryParams::new().with("symbol", symbol);
        self.send_signed(Method::DELETE, "/fapi/v1/allOpenOrders", params).await
    }

    /// Change leverage for a symbol
    ///
    /// POST /fapi/v1/leverage
    pub async fn change_leverage(&self, symbol: &str, leverage: u32) -> Result<LeverageChange> {
        validate_leverage(leverage)?;
        let params = QueryParams::new()
            .with("symbol", symbol)
            .with("leverage", leverage);
        self.send_signed(Method::POST, "/fapi/v1/leverage", params).await
    }

    /// Switch a symbol between isolated and cross margin
    ///
    /// POST /fapi/v1/marginType
    pub async fn change_margin_type(
        &self,
        symbol: &str,
        margin_type: MarginType,
    ) -> Result<ExchangeAck> {
        let params = QueryParams::new()
            .with("symbol", symbol)
            .with("marginType", margin_type.as_str());
        self.send_signed(Method::POST, "/fapi/v1/marginType", params).await
    }

    /// Switch between hedge (`true`) and one-way (`false`) position mode
    ///
    /// POST /fapi/v1/positionSide/dual
    pub async fn change_position_mode(&self, dual_side_position: bool) -> Result<ExchangeAck> {
        let params = QueryParams::new().with("dualSidePosition", dual_side_position);
        self.send_signed(Method::POST, "/fapi/v1/positionSide/dual", params).await
    }

    /// Cancel `order_id` and place `replacement` in its stead.
    ///
    /// The replacement is validated before anything is sent. If the cancel
    /// is rejected nothing is placed.
    pub async fn replace_order(
        &self,
        symbol: &str,
        order_id: i64,
        replacement: NewOrderRequest,
    ) -> Result<ReplacedOrder> {
        replacement.validate()?;

        let canceled = self.cancel_order(symbol, order_id).await?;
        let placed = self.place_order(replacement).await?;

        info!(
            symbol,
            canceled = canceled.order_id,
            placed = placed.order_id,
            "order replaced"
        );
        Ok(ReplacedOrder { canceled, placed })
    }
}
