use serde::{Deserialize, Serialize};
use crate::shared::serde_helpers::null_as_default;

/// Single platform listing of a TV model
/// (`GET /products/filter`, `GET /products/search`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    pub model_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sale_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discount: f64,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Query parameters of `GET /products/filter`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilterQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
}

/// Query parameters of `GET /products/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSearchQuery {
    pub q: String,
}

impl ProductFilterQuery {
    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.display_type.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_defaults() {
        let p: ProductDto = serde_json::from_str(r#"{"model_id":"A"}"#).unwrap();
        assert_eq!(p.sale_price, 0.0);
        assert_eq!(p.rating, None);
        assert!(p.extra.is_empty());
    }

    #[test]
    fn test_null_fields_do_not_fail_the_list() {
        let raw = r#"[
            {"model_id":"A","full_name":"LG 43 inch","sale_price":25999,"discount":null,"platform":"amazon"},
            {"model_id":"B","full_name":null,"sale_price":null,"discount":12.5,"platform":null,"rating":null}
        ]"#;
        let products: Vec<ProductDto> = serde_json::from_str(raw).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].discount, 0.0);
        assert_eq!(products[1].full_name, "");
        assert_eq!(products[1].sale_price, 0.0);
        assert_eq!(products[1].platform, "");
        assert_eq!(products[1].discount, 12.5);
    }

    #[test]
    fn test_filter_query_is_empty() {
        assert!(ProductFilterQuery::default().is_empty());
        let q = ProductFilterQuery {
            brand: Some("LG".to_string()),
            ..Default::default()
        };
        assert!(!q.is_empty());
    }
}
