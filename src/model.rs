//! Request, response and route data types.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// `lat,lng` with six decimals, the form every provider accepts.
    pub fn to_param(&self) -> String {
        format!("{:.6},{:.6}", self.latitude, self.longitude)
    }
}

/// A delivery destination as submitted by the caller.
///
/// Latitude and longitude travel together: either both are present or the
/// stop needs geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryStop {
    pub id: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl DeliveryStop {
    pub fn new(id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }

    pub fn set_coordinates(&mut self, coords: Coordinates) {
        self.latitude = Some(coords.latitude);
        self.longitude = Some(coords.longitude);
    }

    /// True when exactly one of latitude/longitude is present.
    pub fn has_partial_coordinates(&self) -> bool {
        self.latitude.is_some() != self.longitude.is_some()
    }
}

/// The depot the route starts from. Always fully specified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

impl StartLocation {
    pub fn new(latitude: f64, longitude: f64, address: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            address: address.into(),
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// A stop whose coordinates are known.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStop {
    pub stop: DeliveryStop,
    pub coordinates: Coordinates,
}

impl ResolvedStop {
    pub fn new(mut stop: DeliveryStop, coordinates: Coordinates) -> Self {
        stop.set_coordinates(coordinates);
        Self { stop, coordinates }
    }
}

/// Outcome of one optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    /// Indices into `resolved_stops`, in visiting order.
    pub order: Vec<usize>,
    pub total_distance_km: f64,
    pub total_duration_minutes: u64,
    /// Resolved stops in their original submission order.
    pub resolved_stops: Vec<DeliveryStop>,
    pub unresolved_count: usize,
    pub unreachable_pairs: usize,
    pub navigation_reference: String,
}

/// Inbound JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub deliveries: Vec<DeliveryStop>,
    pub start_location: StartLocation,
}

/// Outbound JSON body on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub optimized_order: Vec<usize>,
    pub total_distance: f64,
    pub total_duration: u64,
    pub deliveries: Vec<DeliveryStop>,
    pub geocoding_failures: usize,
    pub unreachable_pairs: usize,
    pub navigation_reference: String,
}

impl From<RouteResult> for OptimizeResponse {
    fn from(result: RouteResult) -> Self {
        Self {
            optimized_order: result.order,
            total_distance: result.total_distance_km,
            total_duration: result.total_duration_minutes,
            deliveries: result.resolved_stops,
            geocoding_failures: result.unresolved_count,
            unreachable_pairs: result.unreachable_pairs,
            navigation_reference: result.navigation_reference,
        }
    }
}
