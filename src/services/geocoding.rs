use std::collections::HashMap;

use crate::models::{GeoPoint, Place};

/// Turns free-text locations into coordinates
///
/// Implementations may fail to resolve anything; callers then fall back to
/// matching on address text.
pub trait LocationResolver: Send + Sync {
    fn resolve(&self, text: &str) -> Option<GeoPoint>;

    /// Fill in missing or unusable coordinates on a place, if resolvable
    fn complete(&self, place: Place) -> Place {
        if place.usable_point().is_some() {
            return place;
        }

        match self.resolve(&place.address) {
            Some(point) => {
                tracing::debug!("Resolved '{}' to ({}, {})", place.address, point.lat, point.lng);
                Place::new(place.address, Some(point))
            }
            None => {
                tracing::debug!("Could not resolve '{}', falling back to text", place.address);
                place
            }
        }
    }
}

/// Resolver backed by the popular cities offered as one-tap choices in the app
#[derive(Debug, Clone)]
pub struct PopularCitiesResolver {
    cities: HashMap<String, GeoPoint>,
}

const POPULAR_CITIES: [(&str, f64, f64); 8] = [
    ("delhi", 28.6139, 77.2090),
    ("mumbai", 19.0760, 72.8777),
    ("bangalore", 12.9716, 77.5946),
    ("gurgaon", 28.4595, 77.0266),
    ("noida", 28.5355, 77.3910),
    ("pune", 18.5204, 73.8567),
    ("hyderabad", 17.3850, 78.4867),
    ("chennai", 13.0827, 80.2707),
];

impl PopularCitiesResolver {
    pub fn new() -> Self {
        let cities = POPULAR_CITIES
            .iter()
            .map(|&(name, lat, lng)| (name.to_string(), GeoPoint { lat, lng }))
            .collect();
        Self { cities }
    }

    /// Add or replace a named location
    pub fn with_city(mut self, name: &str, point: GeoPoint) -> Self {
        self.cities.insert(name.trim().to_lowercase(), point);
        self
    }
}

impl Default for PopularCitiesResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationResolver for PopularCitiesResolver {
    /// Looks up the first comma-delimited segment, case-insensitively
    fn resolve(&self, text: &str) -> Option<GeoPoint> {
        let key = Place::unresolved(text).primary_segment();
        self.cities.get(&key).copied()
    }
}
