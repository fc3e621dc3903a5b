//! Shared networking constants and helpers used by client and server.

/// TCP port the rate server listens on.
pub const SERVER_PORT: u16 = 8080;
/// HTTP path of the exchange rate endpoint.
pub const RATE_PATH: &str = "/cotacao";
/// Upstream rate provider queried by the server.
pub const UPSTREAM_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";

/// Helper to format an IPv4 address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// Full URL of the rate endpoint on a given host.
pub fn rate_url(host: &str) -> String {
    format!("http://{}:{}{}", host, SERVER_PORT, RATE_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_rate_url() {
        assert_eq!(rate_url("localhost"), "http://localhost:8080/cotacao");
    }
}
