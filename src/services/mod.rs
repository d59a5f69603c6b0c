// Service exports
pub mod geocoding;

pub use geocoding::{LocationResolver, PopularCitiesResolver};
