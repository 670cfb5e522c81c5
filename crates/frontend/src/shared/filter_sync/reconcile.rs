//! Reconciliation of the filter state between the address bar, the session
//! snapshot and the in-memory model.
//!
//! Load precedence: a non-empty query string wins outright, then the
//! session snapshot, then defaults. After initialization every change is
//! written back to both: the full state to the store, only the non-default
//! fields to the URL.

use super::filter_state::{apply_patch, FilterPatch, FilterState, SortBy, SortOrder, DEFAULT_MAX_PRICE};
use super::store::{load_json, save_json, PersistedStore};
use super::url::{parse_price, QueryParams, UrlWriter};
use serde::Serialize;

/// Query-string shape. Field order is the order of parameters in the URL.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct UrlFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brands: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<String>,
}

fn positive<T: std::str::FromStr + Default + PartialEq>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|v| v.trim().parse::<T>().ok())
        .filter(|v| *v != T::default())
}

fn positive_price(raw: Option<&str>) -> Option<u64> {
    raw.and_then(parse_price).filter(|v| *v > 0)
}

/// Parses filters from a query string (leading `?` allowed).
///
/// Returns `None` for an empty query. Each parameter is read on its own
/// (first occurrence wins); missing, zero or unparseable values fall back
/// to their defaults.
pub fn parse_query(query: &str) -> Option<FilterState> {
    let params = QueryParams::parse(query);
    if params.is_empty() {
        return None;
    }

    let defaults = FilterState::default();
    let state = FilterState {
        search_text: params.get("search").unwrap_or_default().to_string(),
        selected_categories: params
            .get("brands")
            .map(|b| {
                b.split(',')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        min_price: positive_price(params.get("minPrice")).unwrap_or(0),
        max_price: positive_price(params.get("maxPrice")).unwrap_or(DEFAULT_MAX_PRICE),
        min_discount: params.get("discount").and_then(|v| v.trim().parse().ok()),
        min_rating: params.get("rating").and_then(|v| v.trim().parse().ok()),
        sort_by: params
            .get("sortBy")
            .and_then(|v| v.parse::<SortBy>().ok())
            .unwrap_or(defaults.sort_by),
        sort_order: params
            .get("sortOrder")
            .and_then(|v| v.parse::<SortOrder>().ok())
            .unwrap_or(defaults.sort_order),
        page: positive(params.get("page")).unwrap_or(1),
    };
    Some(state.normalized())
}

/// Minimal, shareable query string for `state`: only fields that differ
/// from their defaults. `observed_max` is the catalog's upper price bound;
/// a `max_price` at or above it is not a restriction and is left out.
pub fn to_query(state: &FilterState, observed_max: u64) -> String {
    let defaults = FilterState::default();
    let raw = UrlFilters {
        search: (!state.search_text.is_empty()).then(|| state.search_text.clone()),
        brands: (!state.selected_categories.is_empty()).then(|| {
            state
                .selected_categories
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(",")
        }),
        min_price: (state.min_price > 0).then(|| state.min_price.to_string()),
        max_price: (state.max_price > 0 && state.max_price < observed_max)
            .then(|| state.max_price.to_string()),
        discount: state.min_discount.map(|v| v.to_string()),
        rating: state.min_rating.map(|v| v.to_string()),
        sort_by: (state.sort_by != defaults.sort_by).then(|| state.sort_by.to_string()),
        sort_order: (state.sort_order != defaults.sort_order)
            .then(|| state.sort_order.to_string()),
        page: (state.page > 1).then(|| state.page.to_string()),
    };
    serde_qs::to_string(&raw).unwrap_or_else(|e| {
        log::warn!("filter_sync: failed to encode query: {}", e);
        String::new()
    })
}

/// Where the initial state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateOrigin {
    Url,
    Store,
    Defaults,
}

/// Resolves the initial state: URL, then store, then defaults.
pub fn resolve_initial(
    query: &str,
    store: &impl PersistedStore,
    storage_key: &str,
) -> (FilterState, StateOrigin) {
    if let Some(state) = parse_query(query) {
        return (state, StateOrigin::Url);
    }
    if let Some(state) = load_json::<FilterState>(store, storage_key) {
        return (state.normalized(), StateOrigin::Store);
    }
    (FilterState::default(), StateOrigin::Defaults)
}

/// Owner of a page's [`FilterState`], keeping URL and store in step with it.
///
/// Nothing is written until [`FilterSync::complete_initialization`] ran, so
/// a restored snapshot cannot be overwritten by bootstrap defaults.
pub struct FilterSync<S, U> {
    store: S,
    url: U,
    storage_key: String,
    state: FilterState,
    origin: StateOrigin,
    observed_max: u64,
    initialized: bool,
}

impl<S: PersistedStore, U: UrlWriter> FilterSync<S, U> {
    pub fn bootstrap(query: &str, store: S, url: U, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let (state, origin) = resolve_initial(query, &store, &storage_key);
        log::debug!("filter_sync[{}]: initial state from {:?}", storage_key, origin);
        Self {
            store,
            url,
            storage_key,
            state,
            origin,
            observed_max: DEFAULT_MAX_PRICE,
            initialized: false,
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn origin(&self) -> StateOrigin {
        self.origin
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn observed_max(&self) -> u64 {
        self.observed_max
    }

    /// Marks bootstrap as done. `observed_max` is the catalog's upper price
    /// bound, `None` when it could not be fetched. A `max_price` still at
    /// the placeholder default is widened to the observed bound.
    pub fn complete_initialization(&mut self, observed_max: Option<u64>) {
        if let Some(max) = observed_max.filter(|m| *m > 0) {
            self.observed_max = max;
            if self.state.max_price == DEFAULT_MAX_PRICE {
                self.state.max_price = max;
                self.state = std::mem::take(&mut self.state).normalized();
            }
        }
        self.initialized = true;
        self.sync();
    }

    /// Applies a patch; returns `false` when it changed nothing.
    pub fn apply(&mut self, patch: &FilterPatch) -> bool {
        let next = apply_patch(&self.state, patch);
        if next == self.state {
            return false;
        }
        self.state = next;
        if self.initialized {
            self.sync();
        }
        true
    }

    /// Clears every filter (sorting is kept), drops the snapshot and
    /// shortens the URL accordingly.
    pub fn reset(&mut self) {
        self.state = self.state.cleared(self.observed_max);
        self.store.remove(&self.storage_key);
        self.url.replace_query(&self.url_query());
    }

    pub fn url_query(&self) -> String {
        to_query(&self.state, self.observed_max)
    }

    fn sync(&self) {
        save_json(&self.store, &self.storage_key, &self.state);
        self.url.replace_query(&self.url_query());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::filter_sync::store::{MemoryStore, StoreError};
    use crate::shared::filter_sync::url::MemoryUrl;
    use std::collections::BTreeSet;

    const KEY: &str = "bestDeals_filters";

    fn sync_with(query: &str, store: &MemoryStore) -> (FilterSync<MemoryStore, MemoryUrl>, MemoryUrl) {
        let url = MemoryUrl::new();
        (FilterSync::bootstrap(query, store.clone(), url.clone(), KEY), url)
    }

    #[test]
    fn test_samsung_scenario_query() {
        let state = FilterState {
            search_text: "Samsung".to_string(),
            min_price: 0,
            max_price: 50_000,
            page: 1,
            ..FilterState::default()
        };
        let q = to_query(&state, DEFAULT_MAX_PRICE);
        assert_eq!(q, "search=Samsung&maxPrice=50000");
        assert!(!q.contains("minPrice"));
        assert!(!q.contains("page"));
    }

    #[test]
    fn test_default_state_has_empty_query() {
        assert_eq!(to_query(&FilterState::default(), DEFAULT_MAX_PRICE), "");
        let at_max = FilterState {
            max_price: 320_000,
            ..FilterState::default()
        };
        assert_eq!(to_query(&at_max, 320_000), "");
    }

    #[test]
    fn test_query_roundtrip_reproduces_non_defaults() {
        let state = FilterState {
            search_text: "mini led".to_string(),
            selected_categories: ["LG", "Sony"].iter().map(|s| s.to_string()).collect(),
            min_price: 20_000,
            max_price: 100_000,
            min_discount: Some(30),
            min_rating: Some(4),
            sort_by: SortBy::Price,
            sort_order: SortOrder::Asc,
            page: 3,
        };
        let q = to_query(&state, DEFAULT_MAX_PRICE);
        assert_eq!(parse_query(&q), Some(state));
    }

    #[test]
    fn test_parse_query_fallbacks() {
        let s = parse_query("?maxPrice=0&minPrice=abc&page=0&sortBy=bogus&rating=&brands=,LG,,")
            .unwrap();
        assert_eq!(s.max_price, DEFAULT_MAX_PRICE);
        assert_eq!(s.min_price, 0);
        assert_eq!(s.page, 1);
        assert_eq!(s.sort_by, SortBy::Savings);
        assert_eq!(s.min_rating, None);
        assert_eq!(
            s.selected_categories,
            BTreeSet::from(["LG".to_string()])
        );
        assert_eq!(parse_query(""), None);
        assert_eq!(parse_query("?"), None);
    }

    #[test]
    fn test_repeated_parameter_keeps_the_others() {
        let s = parse_query("search=a&search=b&brands=LG").unwrap();
        assert_eq!(s.search_text, "a");
        assert_eq!(s.selected_categories, BTreeSet::from(["LG".to_string()]));
    }

    #[test]
    fn test_decimal_prices_are_rounded() {
        let s = parse_query("minPrice=12500.5&maxPrice=49999.4").unwrap();
        assert_eq!(s.min_price, 12_501);
        assert_eq!(s.max_price, 49_999);
    }

    #[test]
    fn test_parse_query_zero_discount_is_kept() {
        let s = parse_query("discount=0").unwrap();
        assert_eq!(s.min_discount, Some(0));
    }

    #[test]
    fn test_parse_query_repairs_inverted_range() {
        let s = parse_query("minPrice=90000&maxPrice=20000").unwrap();
        assert!(s.min_price <= s.max_price);
    }

    #[test]
    fn test_url_wins_over_store() {
        let store = MemoryStore::new();
        let saved = FilterState {
            search_text: "from store".to_string(),
            selected_categories: BTreeSet::from(["Sony".to_string()]),
            min_rating: Some(4),
            page: 7,
            ..FilterState::default()
        };
        save_json(&store, KEY, &saved);

        let (sync, _) = sync_with("search=Samsung", &store);
        assert_eq!(sync.origin(), StateOrigin::Url);
        assert_eq!(sync.state().search_text, "Samsung");
        assert!(sync.state().selected_categories.is_empty());
        assert_eq!(sync.state().min_rating, None);
        assert_eq!(sync.state().page, 1);
    }

    #[test]
    fn test_store_used_without_query() {
        let store = MemoryStore::new();
        let saved = FilterState {
            min_price: 10_000,
            page: 2,
            ..FilterState::default()
        };
        save_json(&store, KEY, &saved);

        let (sync, _) = sync_with("", &store);
        assert_eq!(sync.origin(), StateOrigin::Store);
        assert_eq!(sync.state(), &saved);
    }

    #[test]
    fn test_malformed_snapshot_falls_back_to_defaults() {
        let store = MemoryStore::new();
        store.set(KEY, "{\"searchText\": 5");
        let (sync, _) = sync_with("", &store);
        assert_eq!(sync.origin(), StateOrigin::Defaults);
        assert_eq!(sync.state(), &FilterState::default());
    }

    #[test]
    fn test_no_writes_before_initialization() {
        let store = MemoryStore::new();
        let (mut sync, url) = sync_with("", &store);
        assert!(sync.apply(&FilterPatch::search("oled")));
        assert!(store.is_empty());
        assert_eq!(url.write_count(), 0);

        sync.complete_initialization(Some(350_000));
        assert!(sync.is_initialized());
        assert_eq!(url.last().as_deref(), Some("search=oled"));
        let saved: FilterState = load_json(&store, KEY).unwrap();
        assert_eq!(saved.search_text, "oled");
    }

    #[test]
    fn test_initialization_widens_default_max() {
        let store = MemoryStore::new();
        let (mut sync, url) = sync_with("", &store);
        sync.complete_initialization(Some(650_000));
        assert_eq!(sync.state().max_price, 650_000);
        assert_eq!(sync.observed_max(), 650_000);
        assert_eq!(url.last().as_deref(), Some(""));
    }

    #[test]
    fn test_initialization_keeps_restored_max() {
        let store = MemoryStore::new();
        save_json(
            &store,
            KEY,
            &FilterState {
                max_price: 75_000,
                ..FilterState::default()
            },
        );
        let (mut sync, url) = sync_with("", &store);
        sync.complete_initialization(Some(650_000));
        assert_eq!(sync.state().max_price, 75_000);
        assert_eq!(url.last().as_deref(), Some("maxPrice=75000"));
    }

    #[test]
    fn test_initialization_without_price_range() {
        let store = MemoryStore::new();
        let (mut sync, _) = sync_with("", &store);
        sync.complete_initialization(None);
        assert!(sync.is_initialized());
        assert_eq!(sync.state().max_price, DEFAULT_MAX_PRICE);
        assert_eq!(sync.observed_max(), DEFAULT_MAX_PRICE);
    }

    #[test]
    fn test_every_change_writes_full_snapshot_and_minimal_url() {
        let store = MemoryStore::new();
        let (mut sync, url) = sync_with("", &store);
        sync.complete_initialization(Some(DEFAULT_MAX_PRICE));

        sync.apply(&FilterPatch::sort_by(SortBy::Rating));
        assert_eq!(url.last().as_deref(), Some("sortBy=rating"));
        let saved: FilterState = load_json(&store, KEY).unwrap();
        assert_eq!(saved.sort_by, SortBy::Rating);
        assert_eq!(saved.max_price, DEFAULT_MAX_PRICE);

        let writes = url.write_count();
        assert!(!sync.apply(&FilterPatch::sort_by(SortBy::Rating)));
        assert_eq!(url.write_count(), writes);
    }

    #[test]
    fn test_reset_clears_snapshot_and_url() {
        let store = MemoryStore::new();
        let (mut sync, url) = sync_with("search=tv&brands=LG&sortOrder=asc&page=3", &store);
        sync.complete_initialization(Some(400_000));
        assert!(store.get(KEY).is_some());

        sync.reset();
        assert_eq!(store.get(KEY), None);
        assert_eq!(url.last().as_deref(), Some("sortOrder=asc"));
        assert_eq!(sync.state().search_text, "");
        assert_eq!(sync.state().max_price, 400_000);
        assert_eq!(sync.state().page, 1);
        assert_eq!(sync.state().sort_order, SortOrder::Asc);
    }

    struct BrokenStore;

    impl PersistedStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn try_set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disabled".to_string()))
        }
        fn remove(&self, _key: &str) {}
    }

    #[test]
    fn test_storage_failure_keeps_state_working() {
        let url = MemoryUrl::new();
        let mut sync = FilterSync::bootstrap("", BrokenStore, url.clone(), KEY);
        sync.complete_initialization(Some(DEFAULT_MAX_PRICE));

        assert!(sync.apply(&FilterPatch::search("Samsung")));
        assert!(sync.apply(&FilterPatch::max_price(50_000)));
        assert_eq!(sync.state().search_text, "Samsung");
        assert_eq!(sync.state().max_price, 50_000);
        assert_eq!(url.last().as_deref(), Some("search=Samsung&maxPrice=50000"));

        sync.reset();
        assert_eq!(sync.state().search_text, "");
    }
}
