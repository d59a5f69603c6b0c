use crate::core::rules::{MatchRule, RouteContext, DEFAULT_RULES};
use crate::models::{GeoPoint, MatchResult, MatchSettings, Route};

/// Classify a rider's trip against a driver's route using the standard rules
///
/// Any absent or unusable coordinate yields `no_coords` with a zero score;
/// a score is never made up from partial data.
pub fn classify(
    request_pickup: Option<GeoPoint>,
    request_drop: Option<GeoPoint>,
    ride_pickup: Option<GeoPoint>,
    ride_drop: Option<GeoPoint>,
    max_distance_km: f64,
    settings: &MatchSettings,
) -> MatchResult {
    classify_with_rules(
        &DEFAULT_RULES,
        request_pickup,
        request_drop,
        ride_pickup,
        ride_drop,
        max_distance_km,
        settings,
    )
}

/// Classify against a custom rule table; the first rule that applies wins
pub fn classify_with_rules(
    rules: &[MatchRule],
    request_pickup: Option<GeoPoint>,
    request_drop: Option<GeoPoint>,
    ride_pickup: Option<GeoPoint>,
    ride_drop: Option<GeoPoint>,
    max_distance_km: f64,
    settings: &MatchSettings,
) -> MatchResult {
    let points = (
        GeoPoint::usable(request_pickup),
        GeoPoint::usable(request_drop),
        GeoPoint::usable(ride_pickup),
        GeoPoint::usable(ride_drop),
    );
    let (Some(rider_pickup), Some(rider_drop), Some(driver_pickup), Some(driver_drop)) = points
    else {
        return MatchResult::no_coords();
    };

    // A NaN radius would make every comparison false except the route checks
    let max_distance_km = if max_distance_km.is_finite() {
        max_distance_km.max(0.0)
    } else {
        0.0
    };

    let ctx = RouteContext::new(
        rider_pickup,
        rider_drop,
        Route::new(driver_pickup, driver_drop),
        max_distance_km,
        settings,
    );

    rules
        .iter()
        .find_map(|rule| {
            rule.evaluate(&ctx).map(|score| {
                MatchResult::new(rule.match_type, score, ctx.pickup_distance_km, ctx.drop_distance_km)
            })
        })
        .unwrap_or_else(|| MatchResult::no_match(ctx.pickup_distance_km, ctx.drop_distance_km))
}
