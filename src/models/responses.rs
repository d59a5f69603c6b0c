use serde::{Deserialize, Serialize};
use crate::core::distance::round_km;
use crate::models::domain::{MatchResult, MatchType, RankedRide, RideCandidate};

/// Match details as shown to the rider
///
/// Distances are rounded to one decimal place here and nowhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub matches: bool,
    pub match_type: MatchType,
    pub score: f64,
    pub pickup_distance_km: f64,
    pub drop_distance_km: f64,
    pub label: String,
}

impl From<&MatchResult> for MatchSummary {
    fn from(result: &MatchResult) -> Self {
        Self {
            matches: result.matches,
            match_type: result.match_type,
            score: result.score,
            pickup_distance_km: round_km(result.pickup_distance_km),
            drop_distance_km: round_km(result.drop_distance_km),
            label: result.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedRideResponse {
    pub ride: RideCandidate,
    #[serde(rename = "match")]
    pub match_summary: MatchSummary,
}

impl From<RankedRide> for RankedRideResponse {
    fn from(ranked: RankedRide) -> Self {
        Self {
            match_summary: MatchSummary::from(&ranked.result),
            ride: ranked.ride,
        }
    }
}

/// Response for the ride search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRidesResponse {
    pub search_id: uuid::Uuid,
    pub max_distance_km: f64,
    pub total_candidates: usize,
    pub total_results: usize,
    pub results: Vec<RankedRideResponse>,
}

/// Response for the distance presets endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistancePresetsResponse {
    pub presets_km: Vec<u16>,
    pub default_km: u16,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
