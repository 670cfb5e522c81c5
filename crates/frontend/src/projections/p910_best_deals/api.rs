use contracts::projections::p910_best_deals::dto::{BestDealDto, BestDealsQuery};
use contracts::projections::shared_filters::dto::{BrandCountDto, PriceRangeDto};

use crate::shared::api_utils::{api_url, get_json, ApiError};

/// One page of best deals for the given filters
pub async fn fetch_best_deals(query: &BestDealsQuery) -> Result<Vec<BestDealDto>, ApiError> {
    let url = api_url("/products/best-deals", Some(query))?;
    get_json(&url).await
}

/// All brands with their model counts
pub async fn fetch_brands() -> Result<Vec<BrandCountDto>, ApiError> {
    let url = api_url::<()>("/filters/brands", None)?;
    get_json(&url).await
}

/// Catalog-wide price bounds
pub async fn fetch_price_range() -> Result<PriceRangeDto, ApiError> {
    let url = api_url::<()>("/filters/price-range", None)?;
    get_json(&url).await
}
