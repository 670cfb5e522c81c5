//! API utilities for frontend-backend communication
//!
//! Provides the API base URL, the JSON GET helper used by every page and
//! the error type for failed requests.

use crate::shared::config::config;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Network failure of a backend call. Never fatal: pages show it with a
/// retry action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("HTTP error: {0}")]
    Status(u16),
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Get the base URL for API requests
///
/// Uses `api.base_url` from the configuration when set, otherwise builds
/// it from the current window location and the configured backend port.
///
/// # Returns
/// - API base URL like "http://localhost:8000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let cfg = &config().api;
    if !cfg.base_url.is_empty() {
        return cfg.base_url.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, cfg.port)
}

/// Build a full API URL from a path and optional query parameters
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/products/best-deals", Some(&query))?;
/// ```
pub fn api_url<Q: Serialize>(path: &str, query: Option<&Q>) -> Result<String, ApiError> {
    join_url(&api_base(), path, query)
}

fn join_url<Q: Serialize>(base: &str, path: &str, query: Option<&Q>) -> Result<String, ApiError> {
    let mut url = format!("{}{}", base, path);
    if let Some(query) = query {
        let qs = serde_qs::to_string(query).map_err(|e| ApiError::Request(e.to_string()))?;
        if !qs.is_empty() {
            url.push('?');
            url.push_str(&qs);
        }
    }
    Ok(url)
}

/// GET `url` and decode the JSON body. Non-2xx statuses are errors.
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    log::debug!("GET {}", url);
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::projections::p911_compare::dto::{ProductFilterQuery, ProductSearchQuery};

    #[test]
    fn test_error_messages() {
        assert_eq!(ApiError::Status(503).to_string(), "HTTP error: 503");
        assert_eq!(
            ApiError::Request("offline".to_string()).to_string(),
            "Request failed: offline"
        );
    }

    #[test]
    fn test_join_url_with_query() {
        let base = "http://localhost:8000";
        let search = ProductSearchQuery {
            q: "Samsung".to_string(),
        };
        assert_eq!(
            join_url(base, "/products/search", Some(&search)).unwrap(),
            "http://localhost:8000/products/search?q=Samsung"
        );

        let filter = ProductFilterQuery {
            brand: Some("LG".to_string()),
            max_price: Some(60_000),
            ..Default::default()
        };
        let filter_ref: &ProductFilterQuery = &filter;
        assert_eq!(
            join_url(base, "/products/filter", Some(filter_ref)).unwrap(),
            "http://localhost:8000/products/filter?brand=LG&max_price=60000"
        );
    }

    #[test]
    fn test_join_url_without_query() {
        assert_eq!(
            join_url::<ProductFilterQuery>("", "/filters/brands", None).unwrap(),
            "/filters/brands"
        );
        assert_eq!(
            join_url("", "/products/filter", Some(&ProductFilterQuery::default())).unwrap(),
            "/products/filter"
        );
    }
}
