//! Haversine travel cost provider (fallback when no routing service is set up).
//!
//! Uses great-circle distance and estimates travel time from it.
//! Less accurate than a road network (ignores roads) but always available.

use crate::matrix::MatrixCell;
use crate::model::Coordinates;
use crate::traits::{DistanceMatrixProvider, ProviderOutcome};

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine-based travel cost provider.
///
/// Estimates travel time using straight-line distance and an assumed speed.
#[derive(Debug, Clone)]
pub struct HaversineMatrix {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineMatrix {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineMatrix {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Great-circle distance between two points in kilometers.
    pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
        let lat1_rad = from.latitude.to_radians();
        let lat2_rad = to.latitude.to_radians();
        let delta_lat = (to.latitude - from.latitude).to_radians();
        let delta_lng = (to.longitude - from.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    fn km_to_seconds(&self, km: f64) -> f64 {
        (km / self.speed_kmh * 3600.0).round()
    }

    fn cell(&self, from: Coordinates, to: Coordinates) -> MatrixCell {
        let km = Self::haversine_km(from, to);
        MatrixCell::ok((km * 1000.0).round(), self.km_to_seconds(km))
    }
}

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(
        &self,
        origins: &[Coordinates],
        destinations: &[Coordinates],
    ) -> ProviderOutcome<Vec<Vec<MatrixCell>>> {
        let rows = origins
            .iter()
            .map(|from| destinations.iter().map(|to| self.cell(*from, *to)).collect())
            .collect();

        ProviderOutcome::Success(rows)
    }
}
