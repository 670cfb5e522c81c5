pub mod p910_best_deals;
pub mod p911_compare;
