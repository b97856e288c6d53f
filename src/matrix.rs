//! Travel cost matrix between the start location and resolved stops.
//!
//! Rows are origins, columns are destinations. A `StopIndex` addresses the
//! resolved-stops list (and therefore a column), an `OriginIndex` addresses
//! a row. Row 0 is the start location and row `i + 1` is stop `i`;
//! `OriginIndex::of_stop` is the only place that offset is applied.

use tracing::{debug, warn};

use crate::error::OptimizeError;
use crate::model::{ResolvedStop, StartLocation};
use crate::traits::{DistanceMatrixProvider, ProviderOutcome};

/// Index into the resolved-stops list; also the matrix column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopIndex(pub usize);

/// Matrix row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OriginIndex(pub usize);

impl OriginIndex {
    pub const START: OriginIndex = OriginIndex(0);

    /// Row holding the distances from `stop` to every stop.
    pub fn of_stop(stop: StopIndex) -> Self {
        OriginIndex(stop.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellStatus {
    Ok,
    /// Non-OK cell status as reported by the provider (e.g. `ZERO_RESULTS`).
    Unreachable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixCell {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub status: CellStatus,
}

impl MatrixCell {
    pub fn ok(distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            distance_meters,
            duration_seconds,
            status: CellStatus::Ok,
        }
    }

    pub fn unreachable(status: impl Into<String>) -> Self {
        Self {
            distance_meters: f64::INFINITY,
            duration_seconds: f64::INFINITY,
            status: CellStatus::Unreachable(status.into()),
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.status == CellStatus::Ok
            && self.distance_meters.is_finite()
            && self.duration_seconds.is_finite()
    }
}

/// Immutable cost table for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelCostMatrix {
    stop_count: usize,
    rows: Vec<Vec<MatrixCell>>,
}

impl TravelCostMatrix {
    /// Builds a matrix of `stop_count + 1` rows by `stop_count` columns.
    ///
    /// Cells the provider did not supply are recorded as unreachable and
    /// surplus cells are dropped.
    pub fn from_rows(stop_count: usize, mut rows: Vec<Vec<MatrixCell>>) -> Self {
        let expected_rows = stop_count + 1;
        if rows.len() != expected_rows || rows.iter().any(|row| row.len() != stop_count) {
            warn!(
                expected_rows,
                expected_columns = stop_count,
                actual_rows = rows.len(),
                "matrix shape mismatch, filling gaps as unreachable"
            );
        }

        rows.truncate(expected_rows);
        rows.resize_with(expected_rows, Vec::new);
        for row in &mut rows {
            row.truncate(stop_count);
            row.resize_with(stop_count, || MatrixCell::unreachable("MISSING"));
        }

        Self { stop_count, rows }
    }

    pub fn stop_count(&self) -> usize {
        self.stop_count
    }

    pub fn cell(&self, from: OriginIndex, to: StopIndex) -> Option<&MatrixCell> {
        self.rows.get(from.0).and_then(|row| row.get(to.0))
    }

    /// Distance in meters if the pair is reachable.
    pub fn reachable_distance(&self, from: OriginIndex, to: StopIndex) -> Option<f64> {
        self.cell(from, to)
            .filter(|cell| cell.is_reachable())
            .map(|cell| cell.distance_meters)
    }

    /// Count of unreachable origin/destination pairs, ignoring stop-to-self.
    pub fn unreachable_pairs(&self) -> usize {
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|(column, cell)| {
                        OriginIndex(row) != OriginIndex::of_stop(StopIndex(*column))
                            && !cell.is_reachable()
                    })
                    .count()
            })
            .sum()
    }
}

/// Requests the cost matrix for a request in one batched provider call.
pub struct TravelCostMatrixBuilder<'a, M: DistanceMatrixProvider + ?Sized> {
    provider: &'a M,
}

impl<'a, M: DistanceMatrixProvider + ?Sized> TravelCostMatrixBuilder<'a, M> {
    pub fn new(provider: &'a M) -> Self {
        Self { provider }
    }

    /// Origins are the start plus every stop, destinations every stop.
    pub fn build(
        &self,
        start: &StartLocation,
        stops: &[ResolvedStop],
    ) -> Result<TravelCostMatrix, OptimizeError> {
        if stops.is_empty() {
            return Err(OptimizeError::NoValidDestinations);
        }

        let destinations: Vec<_> = stops.iter().map(|stop| stop.coordinates).collect();
        let mut origins = Vec::with_capacity(stops.len() + 1);
        origins.push(start.coordinates());
        origins.extend(destinations.iter().copied());

        debug!(
            origins = origins.len(),
            destinations = destinations.len(),
            "requesting travel cost matrix"
        );

        match self.provider.matrix_for(&origins, &destinations) {
            ProviderOutcome::Success(rows) => Ok(TravelCostMatrix::from_rows(stops.len(), rows)),
            ProviderOutcome::ProviderError { status, message } => {
                warn!(%status, %message, "matrix provider rejected request");
                Err(OptimizeError::RoutingProviderError { status })
            }
            ProviderOutcome::NetworkError(reason) => {
                warn!(%reason, "matrix provider unreachable");
                Err(OptimizeError::ProviderUnavailable(reason))
            }
        }
    }
}
