// Core algorithm exports
pub mod classifier;
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod route;
pub mod rules;

pub use classifier::{classify, classify_with_rules};
pub use distance::{distance_km, format_distance, haversine_distance, round_km};
pub use filters::{matches_address_text, passes_filters};
pub use matcher::{compare_results, Matcher, RankedRides};
pub use route::{is_along_route, is_on_route};
pub use rules::{MatchRule, RouteContext, DEFAULT_RULES};
