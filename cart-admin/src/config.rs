use cart_client::ClientConfig;

use crate::invoice::StoreInfo;

/// Longest accepted recency window, about a century
const MAX_RECENCY_HOURS: i64 = 876_000;

/// cart-admin configuration, read from the environment after `.env` is loaded
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | CART_API_URL | https://serverfoodcart.onrender.com | Order API base URL |
/// | CART_TIMEOUT_SECS | 5 | Per-request timeout |
/// | CART_RECENCY_HOURS | 48 | Orders older than this are not loaded (1..=876000) |
/// | PRINTER_ADDR | unset | Network receipt printer, e.g. 192.168.1.50:9100 |
/// | PRINTER_WIDTH | 48 | Characters per line (32 for 58mm paper) |
/// | PRINTER_ENCODING | windows-1252 | Printer code page label |
/// | STORE_NAME | HooShop GROUP OF RESTAURANTS | Invoice header |
/// | STORE_ADDRESS | Rohtak, Haryana\|Rohtak - 124001 | Address lines, `\|`-separated |
/// | STORE_CONTACT | 9817409607 | Phone shown on the invoice |
/// | LOG_LEVEL | info | Default log filter (RUST_LOG wins) |
/// | LOG_DIR | unset | Write daily log files here when the directory exists |
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
    pub recency_hours: i64,
    pub printer_addr: Option<String>,
    pub printer_width: usize,
    pub printer_encoding: String,
    pub store: StoreInfo,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparseable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ClientConfig::default();
        let store_defaults = StoreInfo::default();

        Self {
            api_url: lookup("CART_API_URL").unwrap_or(defaults.base_url),
            timeout_secs: lookup("CART_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout),
            recency_hours: lookup("CART_RECENCY_HOURS")
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|h| (1..=MAX_RECENCY_HOURS).contains(h))
                .unwrap_or(defaults.recency_window_hours),
            printer_addr: lookup("PRINTER_ADDR").filter(|v| !v.trim().is_empty()),
            printer_width: lookup("PRINTER_WIDTH")
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|w| *w >= 24)
                .unwrap_or(48),
            printer_encoding: lookup("PRINTER_ENCODING")
                .unwrap_or_else(|| "windows-1252".into()),
            store: StoreInfo {
                name: lookup("STORE_NAME").unwrap_or(store_defaults.name),
                address_lines: lookup("STORE_ADDRESS")
                    .map(|v| v.split('|').map(|l| l.trim().to_string()).collect())
                    .unwrap_or(store_defaults.address_lines),
                contact: lookup("STORE_CONTACT").unwrap_or(store_defaults.contact),
            },
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR"),
        }
    }

    /// Order API client settings
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone())
            .with_timeout(self.timeout_secs)
            .with_recency_window_hours(self.recency_hours)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, cart_client::DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.recency_hours, 48);
        assert_eq!(config.printer_width, 48);
        assert_eq!(config.printer_encoding, "windows-1252");
        assert!(config.printer_addr.is_none());
        assert_eq!(config.store.name, "HooShop GROUP OF RESTAURANTS");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CART_API_URL", "http://localhost:4000"),
            ("CART_TIMEOUT_SECS", "2"),
            ("CART_RECENCY_HOURS", "24"),
            ("PRINTER_ADDR", "192.168.1.50:9100"),
            ("PRINTER_WIDTH", "32"),
            ("STORE_ADDRESS", "MG Road | Gurugram - 122001"),
        ]);
        let config = Config::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.api_url, "http://localhost:4000");
        assert_eq!(config.printer_addr.as_deref(), Some("192.168.1.50:9100"));
        assert_eq!(config.printer_width, 32);
        assert_eq!(
            config.store.address_lines,
            vec!["MG Road".to_string(), "Gurugram - 122001".to_string()]
        );

        let client = config.client_config();
        assert_eq!(client.timeout, 2);
        assert_eq!(client.recency_window_hours, 24);
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = Config::from_lookup(|k| match k {
            "CART_TIMEOUT_SECS" => Some("soon".into()),
            "PRINTER_WIDTH" => Some("8".into()),
            _ => None,
        });
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.printer_width, 48);
    }

    #[test]
    fn test_recency_hours_out_of_range_fall_back() {
        for raw in ["99999999999999999", "-24", "0"] {
            let config = Config::from_lookup(|k| {
                (k == "CART_RECENCY_HOURS").then(|| raw.to_string())
            });
            assert_eq!(config.recency_hours, 48, "CART_RECENCY_HOURS={}", raw);
        }
    }
}
