pub mod api_utils;
pub mod config;
pub mod filter_sync;
pub mod number_format;
