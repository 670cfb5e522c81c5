use serde::{Deserialize, Serialize};
use crate::shared::serde_helpers::null_as_default;

/// Brand with the number of models listed for it (`GET /filters/brands`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandCountDto {
    pub brand: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u32,
}

/// Catalog-wide price bounds (`GET /filters/price-range`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRangeDto {
    #[serde(default, deserialize_with = "null_as_default")]
    pub min_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_price: f64,
}

impl PriceRangeDto {
    /// Upper bound rounded up to whole rupees, `None` when the backend
    /// reports nothing usable.
    pub fn max_whole(&self) -> Option<u64> {
        if self.max_price.is_finite() && self.max_price > 0.0 {
            Some(self.max_price.ceil() as u64)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_whole() {
        let r = PriceRangeDto {
            min_price: 0.0,
            max_price: 349999.5,
        };
        assert_eq!(r.max_whole(), Some(350000));

        let empty = PriceRangeDto {
            min_price: 0.0,
            max_price: 0.0,
        };
        assert_eq!(empty.max_whole(), None);
    }
}
