use crate::shared::filter_sync::store::{load_json, save_json, PersistedStore};
use crate::shared::filter_sync::url::{parse_price, QueryParams};
use contracts::projections::p911_compare::dto::{ProductDto, ProductFilterQuery};
use serde::{Deserialize, Serialize};

/// Last search of the compare page, restored when coming back to it
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompareSnapshot {
    pub search_text: String,
    pub products: Vec<ProductDto>,
}

/// How the page fills its list on mount
#[derive(Clone, Debug, PartialEq)]
pub enum CompareEntry {
    /// Arrived from a catalog facet (brand / price / display / size)
    Filter {
        query: ProductFilterQuery,
        screen_size: Option<u32>,
    },
    /// Shared or reloaded `?search=` link
    Search(String),
    Restored(CompareSnapshot),
    Empty,
}

#[derive(Debug, Default, Serialize)]
struct CompareUrl {
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<String>,
}

/// Facet parameters win over `search`, which wins over the saved snapshot.
pub fn resolve_entry(query: &str, store: &impl PersistedStore, storage_key: &str) -> CompareEntry {
    let params = QueryParams::parse(query);
    let owned = |key: &str| params.non_empty(key).map(str::to_string);

    let filter = ProductFilterQuery {
        brand: owned("brand"),
        min_price: params.non_empty("min_price").and_then(parse_price),
        max_price: params.non_empty("max_price").and_then(parse_price),
        display_type: owned("display_type"),
    };
    let screen_size = params
        .non_empty("screen_size")
        .and_then(|v| v.parse().ok());
    if !filter.is_empty() || screen_size.is_some() {
        return CompareEntry::Filter {
            query: filter,
            screen_size,
        };
    }

    if let Some(search) = owned("search") {
        return CompareEntry::Search(search);
    }

    match load_json::<CompareSnapshot>(store, storage_key) {
        Some(snapshot) if !snapshot.products.is_empty() => CompareEntry::Restored(snapshot),
        _ => CompareEntry::Empty,
    }
}

pub fn save_snapshot(store: &impl PersistedStore, storage_key: &str, snapshot: &CompareSnapshot) {
    save_json(store, storage_key, snapshot);
}

/// `search=<text>` for a non-blank search, otherwise `None` (URL untouched)
pub fn search_query(search_text: &str) -> Option<String> {
    if search_text.trim().is_empty() {
        return None;
    }
    let url = CompareUrl {
        search: Some(search_text.to_string()),
    };
    serde_qs::to_string(&url).ok()
}
