//! Cheap "is this point on the way" test without road routing.
//!
//! The test compares the detour through a point against the direct distance
//! between the route endpoints. It is not a projection onto the segment, so
//! it both under- and over-matches compared with real road distance.

use crate::core::distance::{distance_km, is_near_endpoints};
use crate::models::{GeoPoint, Route, RouteTolerance};

/// Whether `point` lies roughly along the straight route `route_start -> route_end`
///
/// Routes shorter than `tolerance.micro_route_km` are treated as a single spot:
/// the point passes when it is within `tolerance.micro_route_radius_km` of
/// either endpoint, whatever the tolerance percentage. Unusable coordinates
/// never pass.
pub fn is_along_route(
    point: GeoPoint,
    route_start: GeoPoint,
    route_end: GeoPoint,
    tolerance: &RouteTolerance,
) -> bool {
    if !(point.is_valid() && route_start.is_valid() && route_end.is_valid()) {
        return false;
    }

    let total_route_distance = distance_km(route_start, route_end);

    if total_route_distance < tolerance.micro_route_km {
        return is_near_endpoints(
            point,
            route_start,
            route_end,
            tolerance.micro_route_radius_km,
        );
    }

    let via_distance = distance_km(route_start, point) + distance_km(point, route_end);

    via_distance <= total_route_distance * (1.0 + tolerance.tolerance_percent / 100.0)
}

/// [`is_along_route`] over a [`Route`]
#[inline]
pub fn is_on_route(point: GeoPoint, route: &Route, tolerance: &RouteTolerance) -> bool {
    is_along_route(point, route.start, route.end, tolerance)
}
