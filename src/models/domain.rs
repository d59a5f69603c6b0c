use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::distance::format_distance;

/// Errors raised when building a [`GeoPoint`] through its checked constructor
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoPointError {
    #[error("latitude {0} is outside -90..=90")]
    InvalidLatitude(f64),

    #[error("longitude {0} is outside -180..=180")]
    InvalidLongitude(f64),
}

/// A WGS84 coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Build a point, rejecting NaN and out-of-range values
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoPointError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GeoPointError::InvalidLatitude(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(GeoPointError::InvalidLongitude(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Whether the point can take part in distance arithmetic
    #[inline]
    pub fn is_valid(&self) -> bool {
        Self::new(self.lat, self.lng).is_ok()
    }

    /// Drop points that would poison distance arithmetic with NaN
    #[inline]
    pub fn usable(point: Option<GeoPoint>) -> Option<GeoPoint> {
        point.filter(GeoPoint::is_valid)
    }
}

/// Straight-line proxy for a driving path between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub start: GeoPoint,
    pub end: GeoPoint,
}

impl Route {
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self { start, end }
    }
}

/// Free-text address plus the coordinates it resolved to, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub address: String,
    #[serde(default)]
    pub point: Option<GeoPoint>,
}

impl Place {
    pub fn new(address: impl Into<String>, point: Option<GeoPoint>) -> Self {
        Self {
            address: address.into(),
            point,
        }
    }

    /// Place known only by its address text
    pub fn unresolved(address: impl Into<String>) -> Self {
        Self::new(address, None)
    }

    /// Coordinates that are present and numerically sound
    #[inline]
    pub fn usable_point(&self) -> Option<GeoPoint> {
        GeoPoint::usable(self.point)
    }

    /// First comma-delimited segment of the address, trimmed and lower-cased
    ///
    /// "Connaught Place, New Delhi, India" -> "connaught place"
    pub fn primary_segment(&self) -> String {
        self.address
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Bike,
    Car,
    Cab,
    Suv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RideStatus {
    Available,
    Active,
    Completed,
    Cancelled,
}

/// A published ride, normalized once when it enters the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideCandidate {
    pub id: String,
    pub pickup: Place,
    pub drop: Place,
    pub pickup_time: Option<chrono::DateTime<chrono::Utc>>,
    pub total_seats: u8,
    pub available_seats: u8,
    pub vehicle_type: VehicleType,
    pub price_per_seat: f64,
    pub status: RideStatus,
    pub driver_name: Option<String>,
}

impl RideCandidate {
    /// The driver's route when both ends carry usable coordinates
    pub fn route(&self) -> Option<Route> {
        Some(Route::new(self.pickup.usable_point()?, self.drop.usable_point()?))
    }
}

/// What a rider is searching for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderRequest {
    pub pickup: Place,
    pub drop: Place,
}

impl RiderRequest {
    pub fn new(pickup: Place, drop: Place) -> Self {
        Self { pickup, drop }
    }
}

/// Category assigned by the match classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    DropAlongRoute,
    PickupAlongRoute,
    SubsetJourney,
    NearbyPickup,
    /// Degraded match on address text, used when coordinates are missing
    AddressText,
    NoMatch,
    NoCoords,
}

impl MatchType {
    #[inline]
    pub fn is_match(self) -> bool {
        !matches!(self, MatchType::NoMatch | MatchType::NoCoords)
    }

    /// Whether the decision was made from coordinates rather than text
    #[inline]
    pub fn is_geographic(self) -> bool {
        !matches!(self, MatchType::AddressText | MatchType::NoCoords)
    }
}

/// Outcome of classifying one (request, ride) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matches: bool,
    pub match_type: MatchType,
    pub score: f64,
    pub pickup_distance_km: f64,
    pub drop_distance_km: f64,
}

impl MatchResult {
    /// Build a result, deriving `matches` from the type
    ///
    /// Scores are clamped to 0..=100 and forced to zero for non-matches.
    pub fn new(
        match_type: MatchType,
        score: f64,
        pickup_distance_km: f64,
        drop_distance_km: f64,
    ) -> Self {
        let matches = match_type.is_match();
        let score = if matches && score.is_finite() {
            score.clamp(0.0, 100.0)
        } else {
            0.0
        };

        Self {
            matches,
            match_type,
            score,
            pickup_distance_km,
            drop_distance_km,
        }
    }

    pub fn no_coords() -> Self {
        Self::new(MatchType::NoCoords, 0.0, 0.0, 0.0)
    }

    pub fn no_match(pickup_distance_km: f64, drop_distance_km: f64) -> Self {
        Self::new(MatchType::NoMatch, 0.0, pickup_distance_km, drop_distance_km)
    }

    pub fn address_text(score: f64) -> Self {
        Self::new(MatchType::AddressText, score, 0.0, 0.0)
    }

    /// Short human-readable description for result lists
    pub fn label(&self) -> String {
        match self.match_type {
            MatchType::Exact => "Exact match".to_string(),
            MatchType::DropAlongRoute => format!(
                "Pickup {} away, drop on the route",
                format_distance(self.pickup_distance_km)
            ),
            MatchType::PickupAlongRoute => format!(
                "Pickup on the route, drop {} away",
                format_distance(self.drop_distance_km)
            ),
            MatchType::SubsetJourney => "Your trip is on the driver's route".to_string(),
            MatchType::NearbyPickup => format!(
                "Nearby pickup ({} away)",
                format_distance(self.pickup_distance_km)
            ),
            MatchType::AddressText => "Matched by address".to_string(),
            MatchType::NoMatch => "Too far".to_string(),
            MatchType::NoCoords => "Location unavailable".to_string(),
        }
    }
}

/// Tolerances for the detour-ratio route test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteTolerance {
    /// Accepted extra detour over the direct distance, in percent
    pub tolerance_percent: f64,
    /// Routes shorter than this are treated as a single spot
    pub micro_route_km: f64,
    /// Radius around either endpoint accepted on a micro route
    pub micro_route_radius_km: f64,
}

impl Default for RouteTolerance {
    fn default() -> Self {
        Self {
            tolerance_percent: 30.0,
            micro_route_km: 1.0,
            micro_route_radius_km: 2.0,
        }
    }
}

/// Tunables for classification and ranking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchSettings {
    pub tolerance: RouteTolerance,
    /// Multiplier on the max distance for the nearby-pickup rule
    pub nearby_pickup_factor: f64,
    /// Flat score for rides matched only by address text
    pub text_fallback_score: f64,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            tolerance: RouteTolerance::default(),
            nearby_pickup_factor: 1.5,
            text_fallback_score: 20.0,
        }
    }
}

/// Non-geographic constraints applied before any distance work
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RideFilters {
    /// `None` accepts every vehicle type
    pub vehicle_type: Option<VehicleType>,
    pub min_seats: u8,
    pub max_price_per_seat: Option<f64>,
}

impl Default for RideFilters {
    fn default() -> Self {
        Self {
            vehicle_type: None,
            min_seats: 1,
            max_price_per_seat: None,
        }
    }
}

/// Allowed values for the search radius, in kilometres
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistancePresets {
    presets_km: Vec<u16>,
    default_km: u16,
}

impl DistancePresets {
    /// Presets are sorted and deduplicated; `default_km` must be one of them
    pub fn new(mut presets_km: Vec<u16>, default_km: u16) -> Option<Self> {
        presets_km.sort_unstable();
        presets_km.dedup();
        if presets_km.is_empty() || presets_km[0] == 0 || !presets_km.contains(&default_km) {
            return None;
        }
        Some(Self {
            presets_km,
            default_km,
        })
    }

    pub fn presets_km(&self) -> &[u16] {
        &self.presets_km
    }

    pub fn default_km(&self) -> u16 {
        self.default_km
    }

    /// Resolve a requested radius, falling back to the default when absent
    pub fn select(&self, requested: Option<u16>) -> Option<f64> {
        match requested {
            None => Some(f64::from(self.default_km)),
            Some(km) if self.presets_km.contains(&km) => Some(f64::from(km)),
            Some(_) => None,
        }
    }
}

impl Default for DistancePresets {
    fn default() -> Self {
        Self {
            presets_km: vec![1, 5, 10, 20, 50],
            default_km: 10,
        }
    }
}

/// A ride that survived ranking, with the reason it matched
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRide {
    pub ride: RideCandidate,
    pub result: MatchResult,
}
