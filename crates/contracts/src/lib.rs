pub mod projections;
pub mod shared;
