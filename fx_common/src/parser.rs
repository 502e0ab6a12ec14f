//! Decoding of the upstream provider payload into a `QuoteRecord`.
//!
//! The provider nests the quote under the pair key and encodes every numeric
//! value as a JSON string:
//!
//! ```json
//! {"USDBRL":{"Code":"USD","Codein":"BRL","Name":"Dólar/Real","High":"5.10",
//!  "Low":"5.00","VarBid":"0.01","PctChange":"0.2","Bid":"5.05","Ask":"5.06",
//!  "Timestamp":"1700000000","create_date":"2023-11-14 12:00:00"}}
//! ```
//!
//! The live provider spells the keys in lower camel case, so both spellings
//! are accepted. Decoding is all-or-nothing: one bad field rejects the record.
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::net::PAIR_KEY;
use crate::quote::{QuoteRecord, RawPayload};

/// Quote object exactly as the provider sends it.
#[derive(Debug, Deserialize)]
struct ProviderQuote {
    #[serde(rename = "Code", alias = "code")]
    code: String,
    #[serde(rename = "Codein", alias = "codein")]
    codein: String,
    #[serde(rename = "Name", alias = "name")]
    name: String,
    #[serde(rename = "High", alias = "high")]
    high: String,
    #[serde(rename = "Low", alias = "low")]
    low: String,
    #[serde(rename = "VarBid", alias = "varBid")]
    var_bid: String,
    #[serde(rename = "PctChange", alias = "pctChange")]
    pct_change: String,
    #[serde(rename = "Bid", alias = "bid")]
    bid: String,
    #[serde(rename = "Ask", alias = "ask")]
    ask: String,
    #[serde(rename = "Timestamp", alias = "timestamp")]
    timestamp: String,
    create_date: String,
}

fn decimal(name: &str, text: &str) -> Result<Decimal, ParseError> {
    Decimal::from_str(text).map_err(|e| ParseError::field(name, text, e))
}

impl TryFrom<ProviderQuote> for QuoteRecord {
    type Error = ParseError;

    fn try_from(raw: ProviderQuote) -> Result<Self, Self::Error> {
        let timestamp = raw
            .timestamp
            .parse::<i64>()
            .map_err(|e| ParseError::field("Timestamp", &raw.timestamp, e))?;

        Ok(QuoteRecord {
            high: decimal("High", &raw.high)?,
            low: decimal("Low", &raw.low)?,
            var_bid: decimal("VarBid", &raw.var_bid)?,
            pct_change: decimal("PctChange", &raw.pct_change)?,
            bid: decimal("Bid", &raw.bid)?,
            ask: decimal("Ask", &raw.ask)?,
            timestamp,
            code: raw.code,
            counter_code: raw.codein,
            name: raw.name,
            create_date: raw.create_date,
        })
    }
}

/// Decode an upstream payload.
///
/// Returns `ParseError::Malformed` if the body is not a JSON object, the
/// `USDBRL` entry is absent, any field is missing, or any numeric text fails
/// to convert.
pub fn parse(payload: &RawPayload) -> Result<QuoteRecord, ParseError> {
    let mut root: Map<String, Value> = serde_json::from_slice(payload.as_bytes())?;
    let entry = root
        .remove(PAIR_KEY)
        .ok_or_else(|| ParseError::Malformed(format!("missing `{}` object", PAIR_KEY)))?;
    let quote: ProviderQuote = serde_json::from_value(entry)?;
    QuoteRecord::try_from(quote)
}
