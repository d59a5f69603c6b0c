//! Poolo Match - ride matching and route scoring for the Poolo carpooling app
//!
//! Decides which published rides serve a rider's pickup/drop pair and ranks
//! them. Matching is geometric only: great-circle distances and a detour-ratio
//! test stand in for road routing.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{classify, distance::distance_km, is_along_route, Matcher, RankedRides};
pub use models::{
    GeoPoint, MatchResult, MatchSettings, MatchType, Place, RankedRide, RideCandidate, RideFilters,
    RiderRequest, RouteTolerance,
};
