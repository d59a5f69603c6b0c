use crate::models::{RideCandidate, RideFilters, RideStatus, RiderRequest};

/// Check a ride against the rider's non-geographic constraints
///
/// This runs before any distance work so rejected rides cost nothing.
#[inline]
pub fn passes_filters(ride: &RideCandidate, filters: &RideFilters) -> bool {
    // Only rides still open for booking
    if ride.status != RideStatus::Available {
        return false;
    }

    if let Some(vehicle_type) = filters.vehicle_type {
        if ride.vehicle_type != vehicle_type {
            return false;
        }
    }

    if ride.available_seats < filters.min_seats {
        return false;
    }

    if let Some(max_price) = filters.max_price_per_seat {
        // Written negated so a NaN price fails
        if !(ride.price_per_seat <= max_price) {
            return false;
        }
    }

    true
}

/// Degraded match on address text, for rides or requests without coordinates
///
/// The first comma-delimited segment of each rider address must appear,
/// case-insensitively, in the ride's address on the same side. An empty
/// rider segment matches nothing.
pub fn matches_address_text(request: &RiderRequest, ride: &RideCandidate) -> bool {
    let pickup = request.pickup.primary_segment();
    let drop = request.drop.primary_segment();

    if pickup.is_empty() || drop.is_empty() {
        return false;
    }

    ride.pickup.address.to_lowercase().contains(&pickup)
        && ride.drop.address.to_lowercase().contains(&drop)
}
