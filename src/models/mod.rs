// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    DistancePresets, GeoPoint, GeoPointError, MatchResult, MatchSettings, MatchType, Place,
    RankedRide, RideCandidate, RideFilters, RideStatus, RiderRequest, Route, RouteTolerance,
    VehicleType,
};
pub use requests::{ClassifyRequest, PlaceInput, RideRecord, SearchRidesRequest};
pub use responses::{
    DistancePresetsResponse, ErrorResponse, HealthResponse, MatchSummary, RankedRideResponse,
    SearchRidesResponse,
};
