//! Google Maps Platform adapter: Geocoding and Distance Matrix APIs.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::GoogleMapsConfig;
use crate::matrix::MatrixCell;
use crate::model::Coordinates;
use crate::traits::{DistanceMatrixProvider, Geocoder, ProviderOutcome};

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Google Maps geocoder and distance matrix provider.
///
/// The Distance Matrix API allows at most 100 elements per request. The
/// single batched matrix is `(n + 1) x n` cells, so 10 or more resolved stops
/// come back as `MAX_ELEMENTS_EXCEEDED` and the request fails as a provider
/// error. Use [`OsrmClient`](crate::osrm::OsrmClient) or
/// [`HaversineMatrix`](crate::haversine::HaversineMatrix) for larger routes.
#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    config: GoogleMapsConfig,
    client: reqwest::blocking::Client,
}

impl GoogleMapsClient {
    pub fn new(config: GoogleMapsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn fetch<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ProviderOutcome<T> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);

        let response = match self
            .client
            .get(url)
            .query(query)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
        {
            Ok(response) => response,
            Err(err) => return err.into(),
        };

        let status = response.status();
        if !status.is_success() {
            return ProviderOutcome::provider_error(status.as_str(), format!("HTTP {}", status));
        }

        match response.json::<T>() {
            Ok(body) => ProviderOutcome::Success(body),
            Err(err) => err.into(),
        }
    }
}

impl Geocoder for GoogleMapsClient {
    fn geocode(&self, address: &str, region: &str) -> ProviderOutcome<Option<Coordinates>> {
        let query = [("address", address.to_string()), ("region", region.to_string())];
        match self.fetch::<GeocodeResponse>("/maps/api/geocode/json", &query) {
            ProviderOutcome::Success(body) => geocode_outcome(body),
            ProviderOutcome::ProviderError { status, message } => {
                ProviderOutcome::ProviderError { status, message }
            }
            ProviderOutcome::NetworkError(reason) => ProviderOutcome::NetworkError(reason),
        }
    }
}

impl DistanceMatrixProvider for GoogleMapsClient {
    fn matrix_for(
        &self,
        origins: &[Coordinates],
        destinations: &[Coordinates],
    ) -> ProviderOutcome<Vec<Vec<MatrixCell>>> {
        if origins.is_empty() || destinations.is_empty() {
            return ProviderOutcome::Success(Vec::new());
        }

        let query = [
            ("origins", join_coordinates(origins)),
            ("destinations", join_coordinates(destinations)),
            ("mode", "driving".to_string()),
            ("units", "metric".to_string()),
        ];
        debug!(origins = origins.len(), destinations = destinations.len(), "google distance matrix");

        match self.fetch::<DistanceMatrixResponse>("/maps/api/distancematrix/json", &query) {
            ProviderOutcome::Success(body) => matrix_outcome(body),
            ProviderOutcome::ProviderError { status, message } => {
                ProviderOutcome::ProviderError { status, message }
            }
            ProviderOutcome::NetworkError(reason) => ProviderOutcome::NetworkError(reason),
        }
    }
}

fn join_coordinates(coords: &[Coordinates]) -> String {
    coords
        .iter()
        .map(Coordinates::to_param)
        .collect::<Vec<_>>()
        .join("|")
}

fn geocode_outcome(body: GeocodeResponse) -> ProviderOutcome<Option<Coordinates>> {
    match body.status.as_str() {
        STATUS_OK => ProviderOutcome::Success(
            body.results
                .first()
                .map(|result| Coordinates::new(result.geometry.location.lat, result.geometry.location.lng)),
        ),
        STATUS_ZERO_RESULTS => ProviderOutcome::Success(None),
        _ => ProviderOutcome::provider_error(body.status, body.error_message.unwrap_or_default()),
    }
}

fn matrix_outcome(body: DistanceMatrixResponse) -> ProviderOutcome<Vec<Vec<MatrixCell>>> {
    if body.status != STATUS_OK {
        return ProviderOutcome::provider_error(body.status, body.error_message.unwrap_or_default());
    }

    let rows = body
        .rows
        .into_iter()
        .map(|row| row.elements.into_iter().map(element_cell).collect())
        .collect();

    ProviderOutcome::Success(rows)
}

fn element_cell(element: Element) -> MatrixCell {
    match (element.status.as_str(), element.distance, element.duration) {
        (STATUS_OK, Some(distance), Some(duration)) => MatrixCell::ok(distance.value, duration.value),
        _ => MatrixCell::unreachable(element.status),
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<Row>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Row {
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
struct Element {
    status: String,
    distance: Option<ValueField>,
    duration: Option<ValueField>,
}

#[derive(Debug, Deserialize)]
struct ValueField {
    value: f64,
}
