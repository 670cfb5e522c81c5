use once_cell::sync::Lazy;
use serde::Deserialize;

/// Application configuration.
///
/// Every field has a default, so the embedded `config.toml` only needs to
/// list what differs.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub best_deals: BestDealsConfig,
    pub compare: CompareConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Absolute backend URL; empty means "same host as the page".
    pub base_url: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            port: 8000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BestDealsConfig {
    pub storage_key: String,
    pub scroll_key: String,
    pub page_size: u32,
    /// Any `max_price` at or above this is not sent to the backend.
    pub unbounded_price: u64,
    pub search_debounce_ms: u32,
    pub scroll_restore_delay_ms: u32,
    pub visible_brands: usize,
}

impl Default for BestDealsConfig {
    fn default() -> Self {
        Self {
            storage_key: "bestDeals_filters".to_string(),
            scroll_key: "bestDeals_scrollPosition".to_string(),
            page_size: 24,
            unbounded_price: 999_999_999,
            search_debounce_ms: 500,
            scroll_restore_delay_ms: 100,
            visible_brands: 6,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CompareConfig {
    pub storage_key: String,
    pub scroll_key: String,
    pub selected_key: String,
    pub max_selected: usize,
    pub scroll_restore_delay_ms: u32,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            storage_key: "compare_state".to_string(),
            scroll_key: "compare_scrollPosition".to_string(),
            selected_key: "compare_selected_products".to_string(),
            max_selected: crate::shared::filter_sync::selection::MAX_SELECTED,
            scroll_restore_delay_ms: 100,
        }
    }
}

/// Configuration embedded in the bundle
const EMBEDDED_CONFIG: &str = include_str!("../../config.toml");

static CONFIG: Lazy<AppConfig> = Lazy::new(|| match load_config(EMBEDDED_CONFIG) {
    Ok(cfg) => cfg,
    Err(e) => {
        log::error!("config.toml is invalid, using defaults: {}", e);
        AppConfig::default()
    }
});

pub fn load_config(raw: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(raw)
}

pub fn config() -> &'static AppConfig {
    &CONFIG
}
