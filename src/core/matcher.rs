use std::cmp::Ordering;

use crate::core::{
    classifier::classify,
    filters::{matches_address_text, passes_filters},
};
use crate::models::{MatchResult, MatchSettings, RankedRide, RideCandidate, RideFilters, RiderRequest};

/// Result of ranking a candidate list
#[derive(Debug)]
pub struct RankedRides {
    pub rides: Vec<RankedRide>,
    pub total_candidates: usize,
}

/// Ride matching orchestrator
///
/// # Pipeline Stages
/// 1. Non-geographic filters (status, vehicle type, seats, price)
/// 2. Rule-based classification, or address text fallback without coordinates
/// 3. Drop non-matches
/// 4. Stable sort: geographic before address text, then score, pickup distance, drop distance
#[derive(Debug, Clone)]
pub struct Matcher {
    settings: MatchSettings,
}

impl Matcher {
    pub fn new(settings: MatchSettings) -> Self {
        Self { settings }
    }

    pub fn with_default_settings() -> Self {
        Self {
            settings: MatchSettings::default(),
        }
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// Decide whether one ride serves the rider's trip
    ///
    /// Uses the geometric rules when the rider and the ride both have usable
    /// coordinates at each end, and the address text fallback otherwise.
    pub fn match_ride(
        &self,
        request: &RiderRequest,
        ride: &RideCandidate,
        max_distance_km: f64,
    ) -> MatchResult {
        let geo_ready = request.pickup.usable_point().is_some()
            && request.drop.usable_point().is_some()
            && ride.route().is_some();

        if geo_ready {
            return classify(
                request.pickup.point,
                request.drop.point,
                ride.pickup.point,
                ride.drop.point,
                max_distance_km,
                &self.settings,
            );
        }

        if matches_address_text(request, ride) {
            MatchResult::address_text(self.settings.text_fallback_score)
        } else {
            MatchResult::no_coords()
        }
    }

    /// Filter, classify and order candidate rides for a rider
    ///
    /// # Arguments
    /// * `request` - The rider's pickup and drop
    /// * `candidates` - Published rides to consider
    /// * `filters` - Non-geographic constraints, applied first
    /// * `max_distance_km` - Search radius for pickup and drop
    ///
    /// # Returns
    /// Matching rides, best first. Never fails; an empty list means no ride fits.
    pub fn rank(
        &self,
        request: &RiderRequest,
        candidates: Vec<RideCandidate>,
        filters: &RideFilters,
        max_distance_km: f64,
    ) -> RankedRides {
        let total_candidates = candidates.len();

        let eligible: Vec<RideCandidate> = candidates
            .into_iter()
            .filter(|ride| passes_filters(ride, filters))
            .collect();

        tracing::debug!(
            "{} of {} rides passed filters",
            eligible.len(),
            total_candidates
        );

        let mut rides: Vec<RankedRide> = eligible
            .into_iter()
            .filter_map(|ride| {
                let result = self.match_ride(request, &ride, max_distance_km);
                result.matches.then_some(RankedRide { ride, result })
            })
            .collect();

        // `sort_by` is stable, so full ties keep their input order
        rides.sort_by(|a, b| compare_results(&a.result, &b.result));

        let text_matches = rides
            .iter()
            .filter(|r| !r.result.match_type.is_geographic())
            .count();
        tracing::debug!(
            "Ranked {} rides ({} by address text)",
            rides.len(),
            text_matches
        );

        RankedRides {
            rides,
            total_candidates,
        }
    }
}

/// Geographic matches before address text matches, then score descending,
/// then pickup distance ascending, then drop distance ascending
pub fn compare_results(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.match_type
        .is_geographic()
        .cmp(&a.match_type.is_geographic())
        .then_with(|| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal))
        .then_with(|| {
            a.pickup_distance_km
                .partial_cmp(&b.pickup_distance_km)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| {
            a.drop_distance_km
                .partial_cmp(&b.drop_distance_km)
                .unwrap_or(Ordering::Equal)
        })
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_settings()
    }
}
