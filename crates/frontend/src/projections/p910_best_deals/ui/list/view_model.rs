use contracts::projections::shared_filters::dto::BrandCountDto;

/// Savings share above which a deal gets the "Hot Deal" badge
const HOT_DEAL_PERCENT: f64 = 33.0;

pub const RATING_OPTIONS: [u32; 4] = [4, 3, 2, 1];

pub const DISCOUNT_OPTIONS: [(u32, &str); 4] = [
    (30, "30% or more"),
    (20, "20% or more"),
    (10, "10% or more"),
    (0, "10% and below"),
];

pub const MIN_PRICE_OPTIONS: [u64; 7] = [0, 10_000, 20_000, 30_000, 50_000, 75_000, 100_000];

const MAX_PRICE_OPTIONS: [u64; 7] = [20_000, 30_000, 50_000, 75_000, 100_000, 200_000, 500_000];

/// Upper-bound choices: the fixed steps plus the catalog maximum and the
/// current bound, so the select always has an option for its value.
pub fn max_price_options(observed_max: u64, current: u64) -> Vec<u64> {
    let mut options = MAX_PRICE_OPTIONS.to_vec();
    for extra in [observed_max, current] {
        if extra > 0 && !options.contains(&extra) {
            options.push(extra);
        }
    }
    options.sort_unstable();
    options
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub full: usize,
    pub half: bool,
    pub empty: usize,
}

/// Five-star breakdown of a rating; a fraction of .5 or more shows a half star.
pub fn star_rating(rating: Option<f64>) -> StarRating {
    let r = rating.unwrap_or(0.0).clamp(0.0, 5.0);
    let full = r.floor() as usize;
    let half = full < 5 && r - r.floor() >= 0.5;
    StarRating {
        full,
        half,
        empty: 5 - full - usize::from(half),
    }
}

pub fn is_hot_deal(savings_percent: f64) -> bool {
    savings_percent > HOT_DEAL_PERCENT
}

/// Brands matching the brand search box, cut to `limit` unless expanded.
pub fn visible_brands(
    brands: &[BrandCountDto],
    search: &str,
    show_more: bool,
    limit: usize,
) -> Vec<BrandCountDto> {
    let needle = search.to_lowercase();
    let matching = brands
        .iter()
        .filter(|b| b.brand.to_lowercase().contains(&needle))
        .cloned();
    if show_more {
        matching.collect()
    } else {
        matching.take(limit).collect()
    }
}

/// The backend does not report totals: a full page means there may be more.
pub fn has_next_page(loaded: usize, page_size: u32) -> bool {
    loaded >= page_size as usize
}

pub fn next_page(page: u32) -> u32 {
    page.saturating_add(1)
}

pub fn previous_page(page: u32) -> u32 {
    page.saturating_sub(1).max(1)
}
