use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use poolo_match::config::Settings;
use poolo_match::core::Matcher;
use poolo_match::routes::{self, rides::AppState};
use poolo_match::services::PopularCitiesResolver;
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Build the subscriber for a log level filter and output format
///
/// `format` is `json`, `pretty` or anything else for compact text.
fn build_subscriber(level: &str, format: &str) -> Box<dyn tracing::Subscriber + Send + Sync> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match format {
        "pretty" => Box::new(builder.pretty().finish()),
        "json" => Box::new(builder.json().finish()),
        _ => Box::new(builder.compact().finish()),
    }
}

fn init_logging(level: &str, format: &str) {
    build_subscriber(level, format).init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    // LOG_LEVEL / LOG_FORMAT win over the config file
    let (log_level, log_format) = match &settings {
        Ok(s) => (s.logging.level.clone(), s.logging.format.clone()),
        Err(_) => ("info".to_string(), "json".to_string()),
    };
    let log_level = std::env::var("LOG_LEVEL").unwrap_or(log_level);
    let log_format = std::env::var("LOG_FORMAT").unwrap_or(log_format);
    init_logging(&log_level, &log_format);

    info!("Starting Poolo ride matching service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Configuration loaded successfully");

    let presets = settings.matching.distance_presets().map_err(|e| {
        error!("Invalid distance presets: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let match_settings = settings.matching.match_settings();
    let matcher = Matcher::new(match_settings);

    info!("Matcher initialized with settings: {:?}", match_settings);
    info!(
        "Distance presets: {:?}km (default {}km)",
        presets.presets_km(),
        presets.default_km()
    );

    let app_state = AppState {
        matcher,
        resolver: Arc::new(PopularCitiesResolver::new()),
        presets,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
