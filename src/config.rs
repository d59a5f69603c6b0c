use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::models::{DistancePresets, MatchSettings, RouteTolerance};

/// Errors raised while loading or checking configuration
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Distance presets must be a non-empty list of positive values, got {0:?}")]
    InvalidPresets(Vec<u16>),

    #[error("Default distance {default_km}km is not one of the presets {presets:?}")]
    UnknownDefaultDistance { default_km: u16, presets: Vec<u16> },

    #[error("Route tolerance must be non-negative, got {0}")]
    NegativeTolerance(f64),

    #[error("matching.{name} must be a non-negative number, got {value}")]
    NegativeSetting { name: &'static str, value: f64 },

    #[error("Text fallback score must be within 0..=100, got {0}")]
    FallbackScoreOutOfRange(f64),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_distance_presets")]
    pub distance_presets_km: Vec<u16>,
    #[serde(default = "default_max_distance")]
    pub default_max_distance_km: u16,
    #[serde(default = "default_tolerance_percent")]
    pub route_tolerance_percent: f64,
    #[serde(default = "default_micro_route_km")]
    pub micro_route_km: f64,
    #[serde(default = "default_micro_route_radius_km")]
    pub micro_route_radius_km: f64,
    #[serde(default = "default_nearby_pickup_factor")]
    pub nearby_pickup_factor: f64,
    #[serde(default = "default_text_fallback_score")]
    pub text_fallback_score: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            distance_presets_km: default_distance_presets(),
            default_max_distance_km: default_max_distance(),
            route_tolerance_percent: default_tolerance_percent(),
            micro_route_km: default_micro_route_km(),
            micro_route_radius_km: default_micro_route_radius_km(),
            nearby_pickup_factor: default_nearby_pickup_factor(),
            text_fallback_score: default_text_fallback_score(),
        }
    }
}

fn default_distance_presets() -> Vec<u16> { vec![1, 5, 10, 20, 50] }
fn default_max_distance() -> u16 { 10 }
fn default_tolerance_percent() -> f64 { 30.0 }
fn default_micro_route_km() -> f64 { 1.0 }
fn default_micro_route_radius_km() -> f64 { 2.0 }
fn default_nearby_pickup_factor() -> f64 { 1.5 }
fn default_text_fallback_score() -> f64 { 20.0 }

impl MatchingSettings {
    /// Matcher tunables described by this section
    pub fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            tolerance: RouteTolerance {
                tolerance_percent: self.route_tolerance_percent,
                micro_route_km: self.micro_route_km,
                micro_route_radius_km: self.micro_route_radius_km,
            },
            nearby_pickup_factor: self.nearby_pickup_factor,
            text_fallback_score: self.text_fallback_score,
        }
    }

    /// Allowed search radii, checked
    pub fn distance_presets(&self) -> Result<DistancePresets, SettingsError> {
        if self.distance_presets_km.is_empty() || self.distance_presets_km.contains(&0) {
            return Err(SettingsError::InvalidPresets(self.distance_presets_km.clone()));
        }

        DistancePresets::new(self.distance_presets_km.clone(), self.default_max_distance_km)
            .ok_or_else(|| SettingsError::UnknownDefaultDistance {
                default_km: self.default_max_distance_km,
                presets: self.distance_presets_km.clone(),
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with POOLO)
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., POOLO__MATCHING__DEFAULT_MAX_DISTANCE_KM -> matching.default_max_distance_km
            .add_source(environment())
            .build()?;

        Self::from_config(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::from_config(settings)
    }

    fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the matcher cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.matching.distance_presets()?;

        let matching = &self.matching;

        // NaN fails every check below
        if !(matching.route_tolerance_percent >= 0.0) {
            return Err(SettingsError::NegativeTolerance(matching.route_tolerance_percent));
        }

        let non_negative = [
            ("micro_route_km", matching.micro_route_km),
            ("micro_route_radius_km", matching.micro_route_radius_km),
            ("nearby_pickup_factor", matching.nearby_pickup_factor),
        ];
        if let Some(&(name, value)) = non_negative.iter().find(|(_, value)| !(*value >= 0.0)) {
            return Err(SettingsError::NegativeSetting { name, value });
        }

        if !(0.0..=100.0).contains(&matching.text_fallback_score) {
            return Err(SettingsError::FallbackScoreOutOfRange(matching.text_fallback_score));
        }

        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix("POOLO")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("matching.distance_presets_km")
}
