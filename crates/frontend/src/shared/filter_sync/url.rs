//! Address bar access: reading the query string on mount and replacing it
//! as filters change.

use std::sync::{Arc, Mutex};
use web_sys::window;

pub trait UrlWriter {
    /// Replace the current query string (without the leading `?`) without
    /// adding a history entry.
    fn replace_query(&self, query: &str);
}

/// Query string of the current location, without the leading `?`.
pub fn current_query() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .map(|s| s.trim_start_matches('?').to_string())
        .unwrap_or_default()
}

pub fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Real navigation between pages: adds a history entry.
pub fn push_path(path: &str) {
    if let Some(w) = window() {
        if let Ok(history) = w.history() {
            let _ = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path));
        }
    }
}

/// Decoded `key=value` pairs of a query string, in their original order.
///
/// Every key is read on its own: a repeated or malformed parameter never
/// hides the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Accepts a leading `?`. `+` reads as a space; pairs that fail to
    /// percent-decode are skipped.
    pub fn parse(query: &str) -> Self {
        let decode = |raw: &str| {
            urlencoding::decode(&raw.replace('+', " ")).map(|v| v.into_owned())
        };
        let pairs = query
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                match (decode(key), decode(value)) {
                    (Ok(key), Ok(value)) => Some((key, value)),
                    _ => {
                        log::warn!("url: skipping undecodable parameter '{}'", pair);
                        None
                    }
                }
            })
            .collect();
        Self(pairs)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First value of `key`; later repeats are ignored.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value of `key`, trimmed, `None` when blank.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }
}

/// Whole rupees from a price parameter. Decimals are rounded; negative,
/// non-finite and non-numeric values are `None`.
pub fn parse_price(raw: &str) -> Option<u64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u64)
}

/// Writes through `history.replaceState`, so filter tweaks never pile up
/// in the back-button history.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserUrl;

impl UrlWriter for BrowserUrl {
    fn replace_query(&self, query: &str) {
        let Some(w) = window() else { return };

        let current = w.location().search().unwrap_or_default();
        let wanted = if query.is_empty() {
            String::new()
        } else {
            format!("?{}", query)
        };
        // Only update URL if it actually changed
        if current == wanted {
            return;
        }

        let path = w.location().pathname().unwrap_or_else(|_| "/".to_string());
        if let Ok(history) = w.history() {
            let _ = history.replace_state_with_url(
                &wasm_bindgen::JsValue::NULL,
                "",
                Some(&format!("{}{}", path, wanted)),
            );
        }
    }
}

/// Keeps every replaced query in memory; the last one is the "address bar".
#[derive(Debug, Clone, Default)]
pub struct MemoryUrl {
    writes: Arc<Mutex<Vec<String>>>,
}

impl MemoryUrl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<String> {
        self.writes.lock().ok()?.last().cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| w.len()).unwrap_or(0)
    }
}

impl UrlWriter for MemoryUrl {
    fn replace_query(&self, query: &str) {
        if let Ok(mut writes) = self.writes.lock() {
            writes.push(query.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_first_value_wins() {
        let params = QueryParams::parse("?search=a&search=b&brands=LG");
        assert_eq!(params.get("search"), Some("a"));
        assert_eq!(params.get("brands"), Some("LG"));
        assert_eq!(params.get("page"), None);
    }

    #[test]
    fn test_query_params_decoding() {
        let params = QueryParams::parse("search=Mi+TV&brands=LG%2CSony&bad=%E0%A4&flag&rating=");
        assert_eq!(params.get("search"), Some("Mi TV"));
        assert_eq!(params.get("brands"), Some("LG,Sony"));
        assert_eq!(params.get("bad"), None);
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.non_empty("rating"), None);
        assert!(QueryParams::parse("?").is_empty());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("12500"), Some(12_500));
        assert_eq!(parse_price("12500.5"), Some(12_501));
        assert_eq!(parse_price(" 999.4 "), Some(999));
        assert_eq!(parse_price("-1"), None);
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price("inf"), None);
    }
}
