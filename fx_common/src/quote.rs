//! Quote data model shared by the relay server and the client.
//!
//! A `QuoteRecord` is built once from an upstream response and then either
//! stored or dropped as a duplicate. Only its `bid` ever leaves the server,
//! wrapped in a `BidResponse`.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Undecoded upstream response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload(Vec<u8>);

impl RawPayload {
    /// Wrap a response body.
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        RawPayload(body.into())
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lossy text form, used when logging rejected payloads.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

/// Exchange rate quote for one currency pair at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    /// Base currency code (e.g., `USD`).
    pub code: String,
    /// Counter currency code (e.g., `BRL`).
    pub counter_code: String,
    /// Human readable pair name.
    pub name: String,
    /// Session high.
    pub high: Decimal,
    /// Session low.
    pub low: Decimal,
    /// Absolute bid variation.
    pub var_bid: Decimal,
    /// Percentage change.
    pub pct_change: Decimal,
    /// Bid price; the only field relayed to clients.
    pub bid: Decimal,
    /// Ask price.
    pub ask: Decimal,
    /// Quote time in seconds since the Unix epoch. Natural key of the ledger.
    pub timestamp: i64,
    /// Provider display timestamp, kept verbatim.
    pub create_date: String,
}

/// Body returned by the relay endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BidResponse {
    /// Bid price as a JSON number.
    #[serde(rename = "Bid")]
    pub bid: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bid_response_uses_provider_casing() {
        let json = serde_json::to_string(&BidResponse { bid: 5.05 }).unwrap();
        assert_eq!(json, r#"{"Bid":5.05}"#);

        let decoded: BidResponse = serde_json::from_str(r#"{"Bid": 4.9871}"#).unwrap();
        assert_eq!(decoded.bid, 4.9871);
    }

    #[test]
    fn raw_payload_text_is_lossy() {
        let payload = RawPayload::new(vec![b'o', b'k', 0xff]);
        assert_eq!(payload.to_text(), "ok\u{fffd}");
        assert_eq!(payload.as_bytes().len(), 3);
    }
}
