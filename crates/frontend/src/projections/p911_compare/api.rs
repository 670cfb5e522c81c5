use contracts::projections::p911_compare::dto::{ProductDto, ProductFilterQuery, ProductSearchQuery};

use crate::shared::api_utils::{api_url, get_json, ApiError};

/// Free-text product search
pub async fn search_products(q: &str) -> Result<Vec<ProductDto>, ApiError> {
    let query = ProductSearchQuery { q: q.to_string() };
    let url = api_url("/products/search", Some(&query))?;
    get_json(&url).await
}

/// Products matching brand / price / display type
pub async fn filter_products(query: &ProductFilterQuery) -> Result<Vec<ProductDto>, ApiError> {
    let url = api_url("/products/filter", Some(query))?;
    get_json(&url).await
}
