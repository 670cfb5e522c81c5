use serde::{Deserialize, Serialize};
use crate::shared::serde_helpers::null_as_default;
use std::collections::BTreeMap;

/// Aggregated deal for one TV model across all platforms
/// (`GET /products/best-deals`).
///
/// Only the fields the list page reads are typed; everything else the
/// backend sends is kept in `extra` and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestDealDto {
    pub model_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub min_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_cost: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_discount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform_count: u32,
    /// platform name -> price on that platform
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform_prices: BTreeMap<String, f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub savings_percent: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_difference: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock_status: String,
    #[serde(default)]
    pub avg_rating: Option<f64>,
    #[serde(default)]
    pub display_type: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BestDealDto {
    pub fn in_stock(&self) -> bool {
        self.stock_status == "in_stock"
    }
}

/// Query parameters of `GET /products/best-deals`.
///
/// Optional fields are left out of the query string entirely, so the
/// backend applies its own defaults for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestDealsQuery {
    pub page: u32,
    pub page_size: u32,
    pub sort_by: String,
    pub order: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
    /// Comma separated brand names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brands: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_discount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_deal_defaults_missing_fields() {
        let raw = r#"{"model_id":"UA43","full_name":"Samsung 43 inch","min_price":29999}"#;
        let deal: BestDealDto = serde_json::from_str(raw).unwrap();
        assert_eq!(deal.model_id, "UA43");
        assert_eq!(deal.min_price, 29999.0);
        assert_eq!(deal.platform_count, 0);
        assert_eq!(deal.avg_rating, None);
        assert!(deal.platform_prices.is_empty());
        assert!(!deal.in_stock());
    }

    #[test]
    fn test_best_deal_keeps_unknown_fields() {
        let raw = r#"{"model_id":"X1","stock_status":"in_stock","warranty":"2y"}"#;
        let deal: BestDealDto = serde_json::from_str(raw).unwrap();
        assert!(deal.in_stock());
        assert_eq!(deal.extra.get("warranty"), Some(&serde_json::json!("2y")));

        let back = serde_json::to_value(&deal).unwrap();
        assert_eq!(back["warranty"], "2y");
    }

    #[test]
    fn test_best_deal_null_rating() {
        let raw = r#"{"model_id":"X2","avg_rating":null,"platform_prices":{"Amazon":100.0}}"#;
        let deal: BestDealDto = serde_json::from_str(raw).unwrap();
        assert_eq!(deal.avg_rating, None);
        assert_eq!(deal.platform_prices.get("Amazon"), Some(&100.0));
    }

    #[test]
    fn test_best_deal_null_scalars_read_as_defaults() {
        let raw = r#"{"model_id":"X3","full_name":null,"min_price":null,"max_discount":null,
            "stock_status":null,"savings_percent":null,"price_difference":null,
            "platform_count":null,"platform_prices":null}"#;
        let deal: BestDealDto = serde_json::from_str(raw).unwrap();
        assert_eq!(deal.full_name, "");
        assert_eq!(deal.max_discount, 0.0);
        assert_eq!(deal.stock_status, "");
        assert_eq!(deal.platform_count, 0);
        assert!(deal.platform_prices.is_empty());
        assert!(deal.extra.is_empty());
    }
}
