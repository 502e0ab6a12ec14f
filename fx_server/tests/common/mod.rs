#![allow(dead_code)]

use std::path::Path;

use fx_common::{QuoteRecord, RawPayload, parser};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const UPSTREAM_PATH: &str = "/json/last/USD-BRL";

pub const SAMPLE: &str = r#"{"USDBRL":{"Code":"USD","Codein":"BRL","Name":"Dólar/Real","High":"5.10","Low":"5.00","VarBid":"0.01","PctChange":"0.2","Bid":"5.05","Ask":"5.06","Timestamp":"1700000000","create_date":"2023-11-14 12:00:00"}}"#;

pub fn payload_at(timestamp: i64) -> String {
    SAMPLE.replace("1700000000", &timestamp.to_string())
}

pub fn record_at(timestamp: i64) -> QuoteRecord {
    parser::parse(&RawPayload::new(payload_at(timestamp))).unwrap()
}

pub fn sqlite_url(dir: &Path) -> String {
    format!("sqlite://{}", dir.join("exchange.db").display())
}

/// Mount `response` on the upstream path, expecting exactly `calls` hits.
pub async fn mount_upstream(server: &MockServer, response: ResponseTemplate, calls: u64) {
    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .respond_with(response)
        .expect(calls)
        .mount(server)
        .await;
}

pub fn upstream_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), UPSTREAM_PATH)
}
