use serde::Serialize;

use crate::core::charge_type::ChargeType;

/// Parse the price typed by the user.
///
/// Only finite positive decimals are valid.
#[must_use]
pub fn parse_price(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|price| price.is_finite() && *price > 0.0)
}

#[must_use]
pub fn can_submit(text: &str, is_loading: bool) -> bool {
    !is_loading && parse_price(text).is_some()
}

/// Webhook payload.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ChargeRecord {
    #[serde(rename = "p")]
    pub price: f64,

    #[serde(rename = "t")]
    pub charge_type: ChargeType,

    method: &'static str,
}

impl ChargeRecord {
    #[must_use]
    pub const fn new(price: f64, charge_type: ChargeType) -> Self {
        Self { price, charge_type, method: "POST" }
    }

    pub fn try_new(text: &str, charge_type: ChargeType) -> Result<Self, SubmitError> {
        parse_price(text).map(|price| Self::new(price, charge_type)).ok_or(SubmitError::InvalidPrice)
    }
}

/// Submission failure, displayed as the user-facing message.
#[derive(Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum SubmitError {
    #[display("請輸入有效的價格")]
    InvalidPrice,

    /// The webhook answered with a non-success status.
    #[display("{_0}")]
    Rejected(String),

    #[display("網路連線失敗，請檢查網路後重試")]
    Network,
}

impl std::error::Error for SubmitError {}
