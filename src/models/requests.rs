use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{
    GeoPoint, Place, RideCandidate, RideFilters, RideStatus, RiderRequest, VehicleType,
};

/// Location as typed by the rider, with coordinates when the client has them
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlaceInput {
    #[validate(length(min = 1))]
    pub address: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl From<PlaceInput> for Place {
    fn from(input: PlaceInput) -> Self {
        let point = match (input.lat, input.lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
            _ => None,
        };
        Place::new(input.address, point)
    }
}

/// Ride record as returned by the rides API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideRecord {
    pub id: String,
    #[serde(default)]
    pub driver_id: Option<String>,
    pub pickup_address: String,
    #[serde(default)]
    pub pickup_latitude: Option<f64>,
    #[serde(default)]
    pub pickup_longitude: Option<f64>,
    pub drop_address: String,
    #[serde(default)]
    pub drop_latitude: Option<f64>,
    #[serde(default)]
    pub drop_longitude: Option<f64>,
    #[serde(default)]
    pub pickup_time: Option<chrono::DateTime<chrono::Utc>>,
    pub total_seats: u8,
    pub available_seats: u8,
    pub vehicle_type: VehicleType,
    pub price_per_seat: f64,
    #[serde(default = "default_status")]
    pub status: RideStatus,
    #[serde(default)]
    pub driver_name: Option<String>,
}

fn default_status() -> RideStatus {
    RideStatus::Available
}

fn point_from(lat: Option<f64>, lng: Option<f64>) -> Option<GeoPoint> {
    Some(GeoPoint { lat: lat?, lng: lng? })
}

impl From<RideRecord> for RideCandidate {
    fn from(record: RideRecord) -> Self {
        RideCandidate {
            id: record.id,
            pickup: Place::new(
                record.pickup_address,
                point_from(record.pickup_latitude, record.pickup_longitude),
            ),
            drop: Place::new(
                record.drop_address,
                point_from(record.drop_latitude, record.drop_longitude),
            ),
            pickup_time: record.pickup_time,
            total_seats: record.total_seats,
            available_seats: record.available_seats,
            vehicle_type: record.vehicle_type,
            price_per_seat: record.price_per_seat,
            status: record.status,
            driver_name: record.driver_name,
        }
    }
}

/// Request to rank rides for a rider's trip
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRidesRequest {
    #[validate(nested)]
    pub pickup: PlaceInput,
    #[validate(nested)]
    pub drop: PlaceInput,
    #[serde(default = "default_seats")]
    #[validate(range(min = 1, max = 4))]
    pub seats_needed: u8,
    #[serde(default)]
    pub vehicle_type: Option<VehicleType>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub max_distance_km: Option<u16>,
    #[serde(default)]
    pub rides: Vec<RideRecord>,
}

fn default_seats() -> u8 {
    1
}

impl SearchRidesRequest {
    pub fn filters(&self) -> RideFilters {
        RideFilters {
            vehicle_type: self.vehicle_type,
            min_seats: self.seats_needed,
            max_price_per_seat: self.max_price,
        }
    }

    /// Split into the rider's trip and the normalized candidates
    pub fn into_parts(self) -> (RiderRequest, Vec<RideCandidate>) {
        let request = RiderRequest::new(self.pickup.into(), self.drop.into());
        let candidates = self.rides.into_iter().map(RideCandidate::from).collect();
        (request, candidates)
    }
}

/// Request to classify a single rider trip against a single driver route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub pickup: Option<GeoPoint>,
    pub drop: Option<GeoPoint>,
    pub ride_pickup: Option<GeoPoint>,
    pub ride_drop: Option<GeoPoint>,
    #[serde(default)]
    pub max_distance_km: Option<u16>,
}
