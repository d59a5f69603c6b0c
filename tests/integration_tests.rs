// Integration tests for Poolo Match

use actix_web::{http::StatusCode, test as actix_test, web, App};
use poolo_match::core::Matcher;
use poolo_match::models::{
    DistancePresets, GeoPoint, MatchType, Place, RideCandidate, RideFilters, RideStatus,
    RiderRequest, VehicleType,
};
use poolo_match::routes::{configure_routes, rides::AppState};
use poolo_match::services::PopularCitiesResolver;
use rstest::{fixture, rstest};
use serde_json::{json, Value};
use std::sync::Arc;

fn point(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint { lat, lng }
}

fn create_ride(id: &str, pickup: Option<GeoPoint>, drop: Option<GeoPoint>) -> RideCandidate {
    RideCandidate {
        id: id.to_string(),
        pickup: Place::new("Connaught Place, New Delhi", pickup),
        drop: Place::new("Rohini Sector 3, Delhi", drop),
        pickup_time: None,
        total_seats: 4,
        available_seats: 3,
        vehicle_type: VehicleType::Car,
        price_per_seat: 150.0,
        status: RideStatus::Available,
        driver_name: Some("Driver".to_string()),
    }
}

#[fixture]
fn rider() -> RiderRequest {
    RiderRequest::new(
        Place::new("Connaught Place", Some(point(28.60, 77.20))),
        Place::new("Rohini", Some(point(28.70, 77.30))),
    )
}

#[rstest]
fn test_scenario_close_ride_is_exact(rider: RiderRequest) {
    let ride = create_ride("a", Some(point(28.61, 77.21)), Some(point(28.69, 77.29)));
    let result = Matcher::default().match_ride(&rider, &ride, 10.0);

    assert!(result.matches);
    assert_eq!(result.match_type, MatchType::Exact);
    assert!(result.score > 90.0);
    assert!((result.pickup_distance_km - 1.48).abs() < 0.05);
    assert!((result.drop_distance_km - 1.48).abs() < 0.05);
}

#[test]
fn test_scenario_drop_far_off_route_is_nearby_pickup() {
    let rider = RiderRequest::new(
        Place::new("Pickup", Some(point(28.62, 77.20))),
        Place::new("Drop", Some(point(28.60, 77.80))),
    );
    let ride = create_ride("b", Some(point(28.60, 77.20)), Some(point(28.70, 77.30)));

    let result = Matcher::default().match_ride(&rider, &ride, 10.0);

    assert!(result.matches);
    assert_eq!(result.match_type, MatchType::NearbyPickup);
    assert_eq!(result.score, 40.0);
    assert!(result.drop_distance_km > 45.0);
}

#[test]
fn test_scenario_missing_rider_drop_is_no_coords() {
    let rider = RiderRequest::new(
        Place::new("Connaught Place", Some(point(28.60, 77.20))),
        Place::new("", None),
    );
    let ride = create_ride("c", Some(point(28.61, 77.21)), Some(point(28.69, 77.29)));

    let result = Matcher::default().match_ride(&rider, &ride, 10.0);

    assert!(!result.matches);
    assert_eq!(result.match_type, MatchType::NoCoords);
    assert_eq!(result.score, 0.0);
}

#[rstest]
fn test_scenario_identical_trip_scores_full(rider: RiderRequest) {
    let ride = create_ride("d", Some(point(28.60, 77.20)), Some(point(28.70, 77.30)));
    let result = Matcher::default().match_ride(&rider, &ride, 10.0);

    assert_eq!(result.match_type, MatchType::Exact);
    assert_eq!(result.score, 100.0);
}

#[rstest]
fn test_rank_orders_and_filters(rider: RiderRequest) {
    let mut completed = create_ride("completed", Some(point(28.60, 77.20)), Some(point(28.70, 77.30)));
    completed.status = RideStatus::Completed;

    let candidates = vec![
        create_ride("nearby", Some(point(28.61, 77.21)), Some(point(28.40, 77.00))),
        create_ride("close", Some(point(28.61, 77.21)), Some(point(28.69, 77.29))),
        completed,
        create_ride("mumbai", Some(point(19.07, 72.87)), Some(point(18.52, 73.85))),
        create_ride("identical", Some(point(28.60, 77.20)), Some(point(28.70, 77.30))),
    ];

    let ranked = Matcher::default().rank(&rider, candidates, &RideFilters::default(), 10.0);
    let ids: Vec<&str> = ranked.rides.iter().map(|r| r.ride.id.as_str()).collect();

    assert_eq!(ranked.total_candidates, 5);
    assert_eq!(ids, vec!["identical", "close", "nearby"]);
    assert!(ranked.rides.iter().all(|r| r.result.matches));
}

#[rstest]
fn test_rank_keeps_input_order_for_full_ties(rider: RiderRequest) {
    let candidates: Vec<RideCandidate> = ["first", "second", "third"]
        .iter()
        .map(|id| create_ride(id, Some(point(28.61, 77.21)), Some(point(28.69, 77.29))))
        .collect();

    let ranked = Matcher::default().rank(&rider, candidates, &RideFilters::default(), 10.0);
    let ids: Vec<&str> = ranked.rides.iter().map(|r| r.ride.id.as_str()).collect();

    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[test]
fn test_rank_text_fallback_without_coordinates() {
    let rider = RiderRequest::new(
        Place::unresolved("Connaught Place, Delhi"),
        Place::unresolved("Rohini"),
    );
    let candidates = vec![
        create_ride("text", None, None),
        create_ride("geo", Some(point(28.61, 77.21)), Some(point(28.69, 77.29))),
    ];

    let ranked = Matcher::default().rank(&rider, candidates, &RideFilters::default(), 10.0);

    assert_eq!(ranked.rides.len(), 2);
    assert!(ranked
        .rides
        .iter()
        .all(|r| r.result.match_type == MatchType::AddressText && r.result.score == 20.0));
}

#[rstest]
#[case(RideFilters { vehicle_type: Some(VehicleType::Bike), ..RideFilters::default() }, 0)]
#[case(RideFilters { min_seats: 4, ..RideFilters::default() }, 0)]
#[case(RideFilters { max_price_per_seat: Some(100.0), ..RideFilters::default() }, 0)]
#[case(RideFilters { vehicle_type: Some(VehicleType::Car), min_seats: 3, max_price_per_seat: Some(150.0) }, 1)]
fn test_rank_applies_filters_first(
    rider: RiderRequest,
    #[case] filters: RideFilters,
    #[case] expected: usize,
) {
    let candidates = vec![create_ride("close", Some(point(28.61, 77.21)), Some(point(28.69, 77.29)))];
    let ranked = Matcher::default().rank(&rider, candidates, &filters, 10.0);

    assert_eq!(ranked.total_candidates, 1);
    assert_eq!(ranked.rides.len(), expected);
}

fn app_state() -> AppState {
    AppState {
        matcher: Matcher::with_default_settings(),
        resolver: Arc::new(PopularCitiesResolver::new()),
        presets: DistancePresets::default(),
    }
}

fn ride_record(id: &str, pickup: (f64, f64), drop: (f64, f64)) -> Value {
    json!({
        "id": id,
        "pickup_address": "Connaught Place, New Delhi",
        "pickup_latitude": pickup.0,
        "pickup_longitude": pickup.1,
        "drop_address": "Rohini, Delhi",
        "drop_latitude": drop.0,
        "drop_longitude": drop.1,
        "total_seats": 4,
        "available_seats": 2,
        "vehicle_type": "car",
        "price_per_seat": 120.0
    })
}

#[actix_web::test]
async fn test_search_endpoint_ranks_rides() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(app_state()))
            .configure(configure_routes),
    )
    .await;

    let mut completed = ride_record("completed", (28.60, 77.20), (28.70, 77.30));
    completed["status"] = json!("completed");

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/rides/search")
        .set_json(json!({
            "pickup": { "address": "Connaught Place", "lat": 28.60, "lng": 77.20 },
            "drop": { "address": "Rohini", "lat": 28.70, "lng": 77.30 },
            "seats_needed": 2,
            "max_distance_km": 10,
            "rides": [
                ride_record("nearby", (28.61, 77.21), (28.40, 77.00)),
                ride_record("close", (28.61, 77.21), (28.69, 77.29)),
                completed,
                ride_record("identical", (28.60, 77.20), (28.70, 77.30)),
            ]
        }))
        .to_request();

    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["max_distance_km"], 10.0);
    assert_eq!(body["total_candidates"], 4);
    assert_eq!(body["total_results"], 3);
    assert_eq!(body["results"][0]["ride"]["id"], "identical");
    assert_eq!(body["results"][1]["ride"]["id"], "close");
    assert_eq!(body["results"][1]["match"]["match_type"], "exact");
    assert_eq!(body["results"][1]["match"]["pickup_distance_km"], 1.5);
    assert_eq!(body["results"][2]["match"]["match_type"], "nearby_pickup");
    assert_eq!(body["results"][2]["match"]["score"], 40.0);
}

#[actix_web::test]
async fn test_search_endpoint_resolves_city_names() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(app_state()))
            .configure(configure_routes),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/rides/search")
        .set_json(json!({
            "pickup": { "address": "Delhi" },
            "drop": { "address": "Noida, Uttar Pradesh" },
            "rides": [ride_record("delhi-noida", (28.6139, 77.2090), (28.5355, 77.3910))]
        }))
        .to_request();

    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["max_distance_km"], 10.0);
    assert_eq!(body["total_results"], 1);
    assert_eq!(body["results"][0]["match"]["match_type"], "exact");
    assert_eq!(body["results"][0]["match"]["score"], 100.0);
}

#[actix_web::test]
async fn test_search_endpoint_rejects_bad_requests() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(app_state()))
            .configure(configure_routes),
    )
    .await;

    let payloads = [
        json!({ "pickup": { "address": "Delhi" }, "drop": { "address": "Noida" }, "max_distance_km": 7 }),
        json!({ "pickup": { "address": "Delhi" }, "drop": { "address": "Noida" }, "seats_needed": 9 }),
        json!({ "pickup": { "address": "" }, "drop": { "address": "Noida" } }),
    ];

    for payload in payloads {
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/rides/search")
            .set_json(&payload)
            .to_request();

        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);
    }
}

#[actix_web::test]
async fn test_classify_endpoint() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(app_state()))
            .configure(configure_routes),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/rides/classify")
        .set_json(json!({
            "pickup": { "lat": 28.60, "lng": 77.20 },
            "drop": null,
            "ride_pickup": { "lat": 28.61, "lng": 77.21 },
            "ride_drop": { "lat": 28.69, "lng": 77.29 }
        }))
        .to_request();

    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["matches"], false);
    assert_eq!(body["match_type"], "no_coords");
    assert_eq!(body["score"], 0.0);
}
