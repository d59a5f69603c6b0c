use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use std::sync::Arc;

use crate::core::{classify, Matcher};
use crate::models::{
    ClassifyRequest, DistancePresets, DistancePresetsResponse, ErrorResponse, HealthResponse,
    MatchSummary, RankedRideResponse, SearchRidesRequest, SearchRidesResponse,
};
use crate::services::LocationResolver;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub resolver: Arc<dyn LocationResolver>,
    pub presets: DistancePresets,
}

/// Configure all ride matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/rides/distance-presets", web::get().to(distance_presets))
        .route("/rides/search", web::post().to(search_rides))
        .route("/rides/classify", web::post().to(classify_pair));
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

fn unknown_distance(state: &AppState, requested: Option<u16>) -> HttpResponse {
    tracing::warn!("Rejected max_distance_km={:?}", requested);
    bad_request(
        "Invalid distance",
        format!(
            "max_distance_km must be one of {:?}",
            state.presets.presets_km()
        ),
    )
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Allowed search radii
///
/// GET /api/v1/rides/distance-presets
async fn distance_presets(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(DistancePresetsResponse {
        presets_km: state.presets.presets_km().to_vec(),
        default_km: state.presets.default_km(),
    })
}

/// Rank rides for a rider's trip
///
/// POST /api/v1/rides/search
///
/// Request body:
/// ```json
/// {
///   "pickup": { "address": "Connaught Place, Delhi", "lat": 28.63, "lng": 77.22 },
///   "drop": { "address": "Noida" },
///   "seats_needed": 1,
///   "vehicle_type": "car",
///   "max_price": 200,
///   "max_distance_km": 10,
///   "rides": [ ... ]
/// }
/// ```
async fn search_rides(
    state: web::Data<AppState>,
    req: web::Json<SearchRidesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let req = req.into_inner();

    let Some(max_distance_km) = state.presets.select(req.max_distance_km) else {
        return unknown_distance(&state, req.max_distance_km);
    };

    let search_id = uuid::Uuid::new_v4();
    let filters = req.filters();
    let (mut request, candidates) = req.into_parts();

    request.pickup = state.resolver.complete(request.pickup);
    request.drop = state.resolver.complete(request.drop);

    tracing::info!(
        "Search {}: '{}' -> '{}' within {}km over {} rides",
        search_id,
        request.pickup.address,
        request.drop.address,
        max_distance_km,
        candidates.len()
    );

    let ranked = state
        .matcher
        .rank(&request, candidates, &filters, max_distance_km);

    let response = SearchRidesResponse {
        search_id,
        max_distance_km,
        total_candidates: ranked.total_candidates,
        total_results: ranked.rides.len(),
        results: ranked.rides.into_iter().map(RankedRideResponse::from).collect(),
    };

    tracing::info!(
        "Search {}: returning {} rides (from {} candidates)",
        search_id,
        response.total_results,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Classify one rider trip against one driver route
///
/// POST /api/v1/rides/classify
async fn classify_pair(
    state: web::Data<AppState>,
    req: web::Json<ClassifyRequest>,
) -> impl Responder {
    let Some(max_distance_km) = state.presets.select(req.max_distance_km) else {
        return unknown_distance(&state, req.max_distance_km);
    };

    let result = classify(
        req.pickup,
        req.drop,
        req.ride_pickup,
        req.ride_drop,
        max_distance_km,
        state.matcher.settings(),
    );

    tracing::debug!("Classified pair as {:?} ({})", result.match_type, result.score);

    HttpResponse::Ok().json(MatchSummary::from(&result))
}
