//! Test fixtures for route-optimizer.
//!
//! Provides:
//! - Real Las Vegas delivery addresses
//! - In-process providers that record how often they were called

#![allow(dead_code)]

pub mod las_vegas_stops;

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use route_optimizer::matrix::MatrixCell;
use route_optimizer::model::Coordinates;
use route_optimizer::traits::{DistanceMatrixProvider, Geocoder, ProviderOutcome, RouteObserver};

pub const TOKEN: &str = "Bearer dispatcher-session";

/// Geocoder answering from a fixed address table. Unknown addresses yield
/// no results.
#[derive(Default)]
pub struct TableGeocoder {
    table: HashMap<String, ProviderOutcome<Option<Coordinates>>>,
    calls: AtomicUsize,
}

impl TableGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, address: &str, coords: Coordinates) -> Self {
        self.table
            .insert(address.to_string(), ProviderOutcome::Success(Some(coords)));
        self
    }

    pub fn failing(mut self, address: &str, outcome: ProviderOutcome<Option<Coordinates>>) -> Self {
        self.table.insert(address.to_string(), outcome);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for TableGeocoder {
    fn geocode(&self, address: &str, _region: &str) -> ProviderOutcome<Option<Coordinates>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.table
            .get(address)
            .cloned()
            .unwrap_or(ProviderOutcome::Success(None))
    }
}

/// Matrix provider returning a canned answer and recording the request.
pub struct FixedMatrix {
    outcome: ProviderOutcome<Vec<Vec<MatrixCell>>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<(Vec<Coordinates>, Vec<Coordinates>)>>,
}

impl FixedMatrix {
    pub fn new(outcome: ProviderOutcome<Vec<Vec<MatrixCell>>>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn rows(rows: Vec<Vec<MatrixCell>>) -> Self {
        Self::new(ProviderOutcome::Success(rows))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(Vec<Coordinates>, Vec<Coordinates>)> {
        self.last_request.lock().unwrap().clone()
    }
}

impl DistanceMatrixProvider for FixedMatrix {
    fn matrix_for(
        &self,
        origins: &[Coordinates],
        destinations: &[Coordinates],
    ) -> ProviderOutcome<Vec<Vec<MatrixCell>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some((origins.to_vec(), destinations.to_vec()));
        self.outcome.clone()
    }
}

/// Observer that keeps every event it receives.
#[derive(Default)]
pub struct RecordingObserver {
    pub rejected: Mutex<Vec<String>>,
    pub geocoding_failures: Mutex<Vec<String>>,
    pub unreachable: AtomicUsize,
    pub completed: AtomicUsize,
}

impl RouteObserver for RecordingObserver {
    fn request_rejected(&self, reason: &str) {
        self.rejected.lock().unwrap().push(reason.to_string());
    }

    fn geocoding_failed(&self, stop_id: &str, _reason: &str) {
        self.geocoding_failures.lock().unwrap().push(stop_id.to_string());
    }

    fn unreachable_pairs(&self, count: usize) {
        self.unreachable.fetch_add(count, Ordering::SeqCst);
    }

    fn route_completed(&self, _stops: usize, _distance_km: f64, _duration_minutes: u64) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Cell with distance in km and duration in minutes.
pub fn leg(km: f64, minutes: f64) -> MatrixCell {
    MatrixCell::ok(km * 1000.0, minutes * 60.0)
}
