//! Totals for a sequenced route.

use tracing::warn;

use crate::matrix::{OriginIndex, StopIndex, TravelCostMatrix};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteMetrics {
    pub total_distance_km: f64,
    pub total_duration_minutes: u64,
}

impl RouteMetrics {
    pub const ZERO: RouteMetrics = RouteMetrics {
        total_distance_km: 0.0,
        total_duration_minutes: 0,
    };
}

/// Sums start -> first -> second -> ... along `order`.
///
/// A missing or unreachable leg contributes nothing.
pub fn aggregate(order: &[StopIndex], matrix: &TravelCostMatrix) -> RouteMetrics {
    let mut meters = 0.0;
    let mut seconds = 0.0;
    let mut current = OriginIndex::START;

    for &stop in order {
        match matrix.cell(current, stop).filter(|cell| cell.is_reachable()) {
            Some(cell) => {
                meters += cell.distance_meters;
                seconds += cell.duration_seconds;
            }
            None => {
                warn!(from = current.0, to = stop.0, "route leg has no travel cost");
            }
        }
        current = OriginIndex::of_stop(stop);
    }

    RouteMetrics {
        total_distance_km: meters / 1000.0,
        total_duration_minutes: (seconds / 60.0).round() as u64,
    }
}
