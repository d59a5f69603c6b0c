//! Prioritized match rules.
//!
//! Each rule pairs a predicate with a scorer. The classifier walks the table
//! in order and the first rule whose predicate holds decides the match type
//! and score. Rules can be tested on their own through [`RouteContext`].

use crate::core::{distance::distance_km, route::is_on_route};
use crate::models::{GeoPoint, MatchSettings, MatchType, Route};

/// Everything a rule may look at for one (request, ride) pair
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    pub rider_pickup: GeoPoint,
    pub rider_drop: GeoPoint,
    pub driver: Route,
    pub pickup_distance_km: f64,
    pub drop_distance_km: f64,
    pub max_distance_km: f64,
    pub settings: &'a MatchSettings,
}

impl<'a> RouteContext<'a> {
    pub fn new(
        rider_pickup: GeoPoint,
        rider_drop: GeoPoint,
        driver: Route,
        max_distance_km: f64,
        settings: &'a MatchSettings,
    ) -> Self {
        Self {
            rider_pickup,
            rider_drop,
            driver,
            pickup_distance_km: distance_km(rider_pickup, driver.start),
            drop_distance_km: distance_km(rider_drop, driver.end),
            max_distance_km,
            settings,
        }
    }

    #[inline]
    pub fn pickup_within_reach(&self) -> bool {
        self.pickup_distance_km <= self.max_distance_km
    }

    #[inline]
    pub fn drop_within_reach(&self) -> bool {
        self.drop_distance_km <= self.max_distance_km
    }

    #[inline]
    pub fn rider_pickup_on_route(&self) -> bool {
        is_on_route(self.rider_pickup, &self.driver, &self.settings.tolerance)
    }

    #[inline]
    pub fn rider_drop_on_route(&self) -> bool {
        is_on_route(self.rider_drop, &self.driver, &self.settings.tolerance)
    }

    /// Rider's drop is further from the driver's start than the rider's pickup
    #[inline]
    pub fn same_direction(&self) -> bool {
        distance_km(self.driver.start, self.rider_drop)
            > distance_km(self.driver.start, self.rider_pickup)
    }

    #[inline]
    pub fn average_distance_km(&self) -> f64 {
        (self.pickup_distance_km + self.drop_distance_km) / 2.0
    }
}

/// One row of the match table
#[derive(Debug, Clone, Copy)]
pub struct MatchRule {
    pub match_type: MatchType,
    pub applies: fn(&RouteContext<'_>) -> bool,
    pub score: fn(&RouteContext<'_>) -> f64,
}

impl MatchRule {
    /// Score this rule would give, if its predicate holds
    pub fn evaluate(&self, ctx: &RouteContext<'_>) -> Option<f64> {
        (self.applies)(ctx).then(|| (self.score)(ctx))
    }
}

fn exact_applies(ctx: &RouteContext<'_>) -> bool {
    ctx.pickup_within_reach() && ctx.drop_within_reach()
}

fn exact_score(ctx: &RouteContext<'_>) -> f64 {
    (100.0 - ctx.average_distance_km() * 2.0).max(0.0)
}

fn drop_along_route_applies(ctx: &RouteContext<'_>) -> bool {
    ctx.pickup_within_reach() && ctx.rider_drop_on_route()
}

fn drop_along_route_score(ctx: &RouteContext<'_>) -> f64 {
    (85.0 - ctx.pickup_distance_km * 2.0).max(0.0)
}

fn pickup_along_route_applies(ctx: &RouteContext<'_>) -> bool {
    ctx.drop_within_reach() && ctx.rider_pickup_on_route()
}

fn pickup_along_route_score(ctx: &RouteContext<'_>) -> f64 {
    (80.0 - ctx.drop_distance_km * 2.0).max(0.0)
}

fn subset_journey_applies(ctx: &RouteContext<'_>) -> bool {
    ctx.rider_pickup_on_route() && ctx.rider_drop_on_route() && ctx.same_direction()
}

fn subset_journey_score(_: &RouteContext<'_>) -> f64 {
    75.0
}

fn nearby_pickup_applies(ctx: &RouteContext<'_>) -> bool {
    ctx.pickup_distance_km <= ctx.max_distance_km * ctx.settings.nearby_pickup_factor
}

fn nearby_pickup_score(_: &RouteContext<'_>) -> f64 {
    40.0
}

/// The standard table, highest priority first
pub const DEFAULT_RULES: [MatchRule; 5] = [
    MatchRule {
        match_type: MatchType::Exact,
        applies: exact_applies,
        score: exact_score,
    },
    MatchRule {
        match_type: MatchType::DropAlongRoute,
        applies: drop_along_route_applies,
        score: drop_along_route_score,
    },
    MatchRule {
        match_type: MatchType::PickupAlongRoute,
        applies: pickup_along_route_applies,
        score: pickup_along_route_score,
    },
    MatchRule {
        match_type: MatchType::SubsetJourney,
        applies: subset_journey_applies,
        score: subset_journey_score,
    },
    MatchRule {
        match_type: MatchType::NearbyPickup,
        applies: nearby_pickup_applies,
        score: nearby_pickup_score,
    },
];
