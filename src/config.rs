use std::env;
use std::net::SocketAddr;

const LISTEN_ADDR: &str = "LISTEN_ADDR";
const SYMBOLS: &str = "SYMBOLS";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_SYMBOLS: [(&str, i64); 3] = [("AAPL", 213), ("TSLA", 249), ("MSFT", 388)];

/// Runtime configuration for the `api_server` binary: listen address and the
/// seeded symbol list (symbol, opening price).
#[derive(Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub symbols: Vec<(String, i64)>,
}

impl Config {
    /// Reads `LISTEN_ADDR` and `SYMBOLS` (as `SYM:PRICE,SYM:PRICE,...`) from
    /// the environment, falling back to the canonical three-symbol seed.
    pub fn from_env() -> Config {
        let listen_addr = env::var(LISTEN_ADDR)
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .expect("LISTEN_ADDR must be a valid socket address");

        let symbols = match env::var(SYMBOLS) {
            Ok(raw) => raw
                .split(',')
                .map(|entry| {
                    let (symbol, price) = entry
                        .split_once(':')
                        .unwrap_or_else(|| panic!("SYMBOLS entry must be SYMBOL:PRICE, got {entry}"));
                    let price: i64 = price
                        .parse()
                        .unwrap_or_else(|_| panic!("SYMBOLS entry has non-integer price: {entry}"));
                    (symbol.to_string(), price)
                })
                .collect(),
            Err(_) => DEFAULT_SYMBOLS
                .iter()
                .map(|(symbol, price)| (symbol.to_string(), *price))
                .collect(),
        };

        Config { listen_addr, symbols }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_symbols_match_canonical_seed() {
        let symbols: Vec<(String, i64)> = DEFAULT_SYMBOLS
            .iter()
            .map(|(s, p)| (s.to_string(), *p))
            .collect();
        assert_eq!(symbols, vec![("AAPL".into(), 213), ("TSLA".into(), 249), ("MSFT".into(), 388)]);
    }
}
