use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Upper price placeholder used until the backend reports the real range.
pub const DEFAULT_MAX_PRICE: u64 = 500_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Savings,
    SavingsPercent,
    Price,
    Discount,
    Rating,
}

impl SortBy {
    pub const ALL: [SortBy; 5] = [
        SortBy::Savings,
        SortBy::SavingsPercent,
        SortBy::Price,
        SortBy::Discount,
        SortBy::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Savings => "savings",
            SortBy::SavingsPercent => "savings_percent",
            SortBy::Price => "price",
            SortBy::Discount => "discount",
            SortBy::Rating => "rating",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::Savings => "Best Savings (₹)",
            SortBy::SavingsPercent => "Best Savings (%)",
            SortBy::Price => "Price",
            SortBy::Discount => "Discount",
            SortBy::Rating => "Rating",
        }
    }
}

impl FromStr for SortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical filter query of a product list page.
///
/// Serialized as the session snapshot, so keys are camelCase and every
/// field falls back to its default when missing from an older blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub search_text: String,
    #[serde(alias = "selectedBrands")]
    pub selected_categories: BTreeSet<String>,
    pub min_price: u64,
    pub max_price: u64,
    pub min_discount: Option<u32>,
    pub min_rating: Option<u32>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            selected_categories: BTreeSet::new(),
            min_price: 0,
            max_price: DEFAULT_MAX_PRICE,
            min_discount: None,
            min_rating: None,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
            page: 1,
        }
    }
}

impl FilterState {
    /// Repairs values that can only come from hand-edited URLs or old
    /// snapshots: page 0 and an inverted price range.
    pub fn normalized(mut self) -> Self {
        if self.page == 0 {
            self.page = 1;
        }
        if self.min_price > self.max_price {
            self.max_price = self.min_price;
        }
        self
    }

    /// Same query with the filters cleared. Sorting survives a reset.
    pub fn cleared(&self, max_price: u64) -> Self {
        Self {
            max_price,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            ..Self::default()
        }
    }

    fn same_filters(&self, other: &Self) -> bool {
        self.search_text == other.search_text
            && self.selected_categories == other.selected_categories
            && self.min_price == other.min_price
            && self.max_price == other.max_price
            && self.min_discount == other.min_discount
            && self.min_rating == other.min_rating
    }
}

/// Partial update of a [`FilterState`], applied by [`apply_patch`].
///
/// `min_discount` / `min_rating` carry toggle semantics: the value is
/// cleared when it is already active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub search_text: Option<String>,
    pub categories: Option<BTreeSet<String>>,
    pub toggle_category: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub min_discount: Option<u32>,
    pub min_rating: Option<u32>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<u32>,
}

impl FilterPatch {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn toggle_category(name: impl Into<String>) -> Self {
        Self {
            toggle_category: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn categories(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            categories: Some(names.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn min_price(v: u64) -> Self {
        Self {
            min_price: Some(v),
            ..Self::default()
        }
    }

    pub fn max_price(v: u64) -> Self {
        Self {
            max_price: Some(v),
            ..Self::default()
        }
    }

    pub fn price_range(min: u64, max: u64) -> Self {
        Self {
            min_price: Some(min),
            max_price: Some(max),
            ..Self::default()
        }
    }

    pub fn toggle_min_discount(v: u32) -> Self {
        Self {
            min_discount: Some(v),
            ..Self::default()
        }
    }

    pub fn toggle_min_rating(v: u32) -> Self {
        Self {
            min_rating: Some(v),
            ..Self::default()
        }
    }

    pub fn sort_by(v: SortBy) -> Self {
        Self {
            sort_by: Some(v),
            ..Self::default()
        }
    }

    pub fn sort_order(v: SortOrder) -> Self {
        Self {
            sort_order: Some(v),
            ..Self::default()
        }
    }

    pub fn page(v: u32) -> Self {
        Self {
            page: Some(v),
            ..Self::default()
        }
    }
}

fn toggle(current: Option<u32>, value: u32) -> Option<u32> {
    if current == Some(value) {
        None
    } else {
        Some(value)
    }
}

/// Applies `patch` to `state` and returns the new state.
///
/// Cross-field rules:
/// - the edited price bound wins and drags the other one along so that
///   `min_price <= max_price` always holds (min is applied before max);
/// - any change to search text, categories, price bounds or facets sends
///   the list back to page 1, overriding a page carried by the same patch;
/// - sorting changes keep the current page.
pub fn apply_patch(state: &FilterState, patch: &FilterPatch) -> FilterState {
    let mut next = state.clone();

    if let Some(text) = &patch.search_text {
        next.search_text = text.clone();
    }
    if let Some(categories) = &patch.categories {
        next.selected_categories = categories.clone();
    }
    if let Some(name) = &patch.toggle_category {
        if !next.selected_categories.remove(name) {
            next.selected_categories.insert(name.clone());
        }
    }
    if let Some(v) = patch.min_price {
        next.min_price = v;
        if v > next.max_price {
            next.max_price = v;
        }
    }
    if let Some(v) = patch.max_price {
        next.max_price = v;
        if v < next.min_price {
            next.min_price = v;
        }
    }
    if let Some(v) = patch.min_discount {
        next.min_discount = toggle(next.min_discount, v);
    }
    if let Some(v) = patch.min_rating {
        next.min_rating = toggle(next.min_rating, v);
    }
    if let Some(v) = patch.sort_by {
        next.sort_by = v;
    }
    if let Some(v) = patch.sort_order {
        next.sort_order = v;
    }
    if let Some(v) = patch.page {
        next.page = v.max(1);
    }

    if !next.same_filters(state) {
        next.page = 1;
    }
    next
}
