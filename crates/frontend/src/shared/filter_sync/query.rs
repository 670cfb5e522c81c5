//! Request lifecycle of a filtered list: ticketed executions so that only
//! the latest response lands, and a debouncer for free-text input.

use super::filter_state::FilterState;
use crate::shared::api_utils::ApiError;
use contracts::projections::p910_best_deals::dto::BestDealsQuery;

/// Request parameters for a best-deals page. Fields at their no-op value
/// are left out: `min_price` 0, `max_price` at or above `unbounded`,
/// unset or zero facets, empty brand list and search text.
pub fn best_deals_query(state: &FilterState, page_size: u32, unbounded: u64) -> BestDealsQuery {
    BestDealsQuery {
        page: state.page.max(1),
        page_size,
        sort_by: state.sort_by.to_string(),
        order: state.sort_order.to_string(),
        min_price: (state.min_price > 0).then_some(state.min_price),
        max_price: (state.max_price > 0 && state.max_price < unbounded).then_some(state.max_price),
        brands: (!state.selected_categories.is_empty()).then(|| {
            state
                .selected_categories
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(",")
        }),
        min_discount: state.min_discount.filter(|v| *v > 0),
        min_rating: state.min_rating.filter(|v| *v > 0),
        search: (!state.search_text.is_empty()).then(|| state.search_text.clone()),
    }
}

/// Identifies one execution. Only the most recent ticket may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(ApiError),
}

/// `Idle -> Loading -> {Success, Error}` with stale-response protection.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryExecutor<T> {
    latest: u64,
    status: QueryStatus,
    results: Vec<T>,
}

impl<T> Default for QueryExecutor<T> {
    fn default() -> Self {
        Self {
            latest: 0,
            status: QueryStatus::Idle,
            results: Vec::new(),
        }
    }
}

impl<T> QueryExecutor<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an execution; any earlier one becomes stale.
    pub fn begin(&mut self) -> RequestTicket {
        self.latest += 1;
        self.status = QueryStatus::Loading;
        RequestTicket(self.latest)
    }

    /// Lands a response. Returns `false` (and changes nothing) when a newer
    /// execution was started or the executor was cancelled meanwhile.
    /// On error the previous results are cleared.
    pub fn complete(&mut self, ticket: RequestTicket, result: Result<Vec<T>, ApiError>) -> bool {
        if ticket.0 != self.latest {
            log::debug!(
                "query: discarding stale response #{} (latest #{})",
                ticket.0,
                self.latest
            );
            return false;
        }
        match result {
            Ok(items) => {
                self.results = items;
                self.status = QueryStatus::Success;
            }
            Err(e) => {
                log::warn!("query: request #{} failed: {}", ticket.0, e);
                self.results.clear();
                self.status = QueryStatus::Error(e);
            }
        }
        true
    }

    /// Invalidates every outstanding ticket, e.g. when the page goes away.
    pub fn cancel(&mut self) {
        self.latest += 1;
        if self.status == QueryStatus::Loading {
            self.status = QueryStatus::Idle;
        }
    }

    pub fn status(&self) -> &QueryStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn error(&self) -> Option<&ApiError> {
        match &self.status {
            QueryStatus::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn results(&self) -> &[T] {
        &self.results
    }

    /// Seeds results without a request (restored snapshot).
    pub fn preload(&mut self, items: Vec<T>) {
        self.latest += 1;
        self.results = items;
        self.status = QueryStatus::Success;
    }
}

/// Generation counter behind a debounced action: every keystroke schedules
/// a new token, and only the newest token is still current when its timer
/// fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debouncer {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceToken(u64);

impl Debouncer {
    pub fn schedule(&mut self) -> DebounceToken {
        self.generation += 1;
        DebounceToken(self.generation)
    }

    pub fn is_current(&self, token: DebounceToken) -> bool {
        token.0 == self.generation
    }

    /// Drops whatever is pending (e.g. an explicit search click).
    pub fn flush(&mut self) {
        self.generation += 1;
    }
}
