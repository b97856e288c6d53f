//! OSRM HTTP adapter for travel cost matrices.

use serde::Deserialize;
use tracing::debug;

use crate::config::OsrmConfig;
use crate::matrix::MatrixCell;
use crate::model::Coordinates;
use crate::traits::{DistanceMatrixProvider, ProviderOutcome};

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Table URL with origins first, destinations after them.
    fn table_url(&self, origins: &[Coordinates], destinations: &[Coordinates]) -> String {
        let coords = origins
            .iter()
            .chain(destinations)
            .map(|c| format!("{:.6},{:.6}", c.longitude, c.latitude))
            .collect::<Vec<_>>()
            .join(";");
        let sources = index_list(0..origins.len());
        let targets = index_list(origins.len()..origins.len() + destinations.len());

        format!(
            "{}/table/v1/{}/{}?sources={}&destinations={}&annotations=distance,duration",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords,
            sources,
            targets
        )
    }
}

impl DistanceMatrixProvider for OsrmClient {
    fn matrix_for(
        &self,
        origins: &[Coordinates],
        destinations: &[Coordinates],
    ) -> ProviderOutcome<Vec<Vec<MatrixCell>>> {
        if origins.is_empty() || destinations.is_empty() {
            return ProviderOutcome::Success(Vec::new());
        }

        let url = self.table_url(origins, destinations);
        debug!(%url, "osrm table request");

        // OSRM reports failures with 4xx plus a JSON body carrying `code`,
        // so the body is decoded regardless of the HTTP status.
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.json::<OsrmTableResponse>());

        match response {
            Ok(body) => table_outcome(body),
            Err(err) => err.into(),
        }
    }
}

fn index_list(range: std::ops::Range<usize>) -> String {
    range.map(|i| i.to_string()).collect::<Vec<_>>().join(";")
}

fn table_outcome(body: OsrmTableResponse) -> ProviderOutcome<Vec<Vec<MatrixCell>>> {
    if body.code != "Ok" {
        return ProviderOutcome::provider_error(body.code, body.message.unwrap_or_default());
    }

    let distances = body.distances.unwrap_or_default();
    let durations = body.durations.unwrap_or_default();

    let rows = distances
        .into_iter()
        .zip(durations)
        .map(|(distance_row, duration_row)| {
            distance_row
                .into_iter()
                .zip(duration_row)
                .map(|cell| match cell {
                    (Some(distance), Some(duration)) => MatrixCell::ok(distance, duration),
                    _ => MatrixCell::unreachable("NoRoute"),
                })
                .collect()
        })
        .collect();

    ProviderOutcome::Success(rows)
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    code: String,
    message: Option<String>,
    distances: Option<Vec<Vec<Option<f64>>>>,
    durations: Option<Vec<Vec<Option<f64>>>>,
}
