/*
[INPUT]:  Exchange acknowledgement and configuration response schemas
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::models::Order;

/// Plain `{code, msg}` acknowledgement, passed through unchanged.
///
/// Some endpoints send `code` as a number, others as a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeAck {
    #[serde(deserialize_with = "serde_helpers::deserialize_code")]
    pub code: i64,
    pub msg: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeverageChange {
    pub leverage: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub max_notional_value: Decimal,
    pub symbol: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionMode {
    /// `true` for hedge mode, `false` for one-way mode
    pub dual_side_position: bool,
}

/// Result of cancelling an order and placing its replacement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacedOrder {
    pub canceled: Order,
    pub placed: Order,
}

/// Error body the exchange sends with non-2xx statuses
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct ExchangeErrorBody {
    pub code: i64,
    pub msg: String,
}

mod serde_helpers {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        String(String),
    }

    pub fn deserialize_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(code) => Ok(code),
            NumberOrString::String(raw) => raw.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}
