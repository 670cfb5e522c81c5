//! Filter, selection and scroll state of product list pages, kept in step
//! with the address bar and the tab's session storage.

pub mod filter_state;
pub mod query;
pub mod reconcile;
pub mod scroll;
pub mod selection;
pub mod store;
pub mod url;

pub use filter_state::{apply_patch, FilterPatch, FilterState, SortBy, SortOrder};
pub use query::{best_deals_query, Debouncer, QueryExecutor, QueryStatus};
pub use reconcile::{FilterSync, StateOrigin};
pub use scroll::{ScrollTracker, WindowViewport};
pub use selection::{BoundedSelection, SelectionError, MAX_SELECTED};
pub use store::{MemoryStore, PersistedStore, SessionStore};
pub use url::{BrowserUrl, MemoryUrl, UrlWriter};
