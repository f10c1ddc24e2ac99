/*
[INPUT]:  Symbol identifiers and query parameters
[OUTPUT]: Market data (order book, ticker prices, 24h statistics, klines)
[POS]:    HTTP layer - public market data endpoints (no signature)
[UPDATE]: When adding new public endpoints or changing response format
*/

use crate::http::{FuturesClient, Result};
use crate::types::{Kline, KlineInterval, OrderBook, QueryParams, Ticker24hr, TickerPrice};

impl FuturesClient {
    /// Query order book depth
    ///
    /// GET /fapi/v1/depth?symbol={symbol}&limit={limit}
    pub async fn get_order_book(&self, symbol: &str, limit: u32) -> Result<OrderBook> {
        let params = QueryParams::new().with("symbol", symbol).with("limit", limit);
        self.get_public("/fapi/v1/depth", params).await
    }

    /// Latest price for one symbol
    ///
    /// GET /fapi/v1/ticker/price?symbol={symbol}
    pub async fn get_ticker_price(&self, symbol: &str) -> Result<TickerPrice> {
        let params = QueryParams::new().with("symbol", symbol);
        self.get_public("/fapi/v1/ticker/price", params).await
    }

    /// Latest price for every symbol
    ///
    /// GET /fapi/v1/ticker/price
    pub async fn get_all_ticker_prices(&self) -> Result<Vec<TickerPrice>> {
        self.get_public("/fapi/v1/ticker/price", QueryParams::new()).await
    }

    /// 24-hour rolling statistics
    ///
    /// GET /fapi/v1/ticker/24hr?symbol={symbol}
    pub async fn get_24hr_ticker(&self, symbol: &str) -> Result<Ticker24hr> {
        let params = QueryParams::new().with("symbol", symbol);
        self.get_public("/fapi/v1/ticker/24hr", params).await
    }

    /// Candlestick series, oldest first
    ///
    /// GET /fapi/v1/klines?symbol={symbol}&interval={interval}&limit={limit}
    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        limit: u32,
    ) -> Result<Vec<Kline>> {
        let params = QueryParams::new()
            .with("symbol", symbol)
            .with("interval", interval.as_str())
            .with("limit", limit);
        self.get_public("/fapi/v1/klines", params).await
    }
}
