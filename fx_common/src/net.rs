//! Shared networking constants used by the relay server and the client.

/// Default TCP port of the relay endpoint.
pub const RELAY_PORT: u16 = 8080;
/// Route that serves the latest bid.
pub const RELAY_PATH: &str = "/cotacao";
/// Liveness route of the relay.
pub const HEALTH_PATH: &str = "/health";
/// Upstream provider URL for the USD/BRL pair.
pub const UPSTREAM_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";
/// Key under which the provider nests the quote object.
pub const PAIR_KEY: &str = "USDBRL";

/// Default overall budget of one acquisition on the server, in milliseconds.
pub const REQUEST_TIMEOUT_MS: u64 = 250;
/// Default upstream fetch timeout, in milliseconds.
pub const UPSTREAM_TIMEOUT_MS: u64 = 200;
/// Default timeout of a single ledger operation, in milliseconds.
pub const STORE_TIMEOUT_MS: u64 = 20;
/// Default client-side outer deadline, in milliseconds.
pub const CLIENT_TIMEOUT_MS: u64 = 300;
/// Default allowance for connection setup and round trip, in milliseconds.
pub const TRANSPORT_ALLOWANCE_MS: u64 = 30;

/// Helper to format a host and port like "host:port".
pub fn addr(host: &str, port: u16) -> String {
    format!("{}:{}", host, port)
}

/// Helper to build the relay URL served on `host:port`.
pub fn relay_url(host: &str, port: u16) -> String {
    format!("http://{}{}", addr(host, port), RELAY_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_url_points_at_quote_route() {
        assert_eq!(relay_url("localhost", RELAY_PORT), "http://localhost:8080/cotacao");
    }
}
