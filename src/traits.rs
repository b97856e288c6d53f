//! Collaborator interfaces for the route optimizer.
//!
//! These are intentionally minimal. Concrete deployments implement them
//! over their own geocoding/routing services and auth layer.

use std::sync::Arc;

use crate::matrix::MatrixCell;
use crate::model::Coordinates;

/// Tagged result of one call to an external provider.
///
/// Keeps "the provider answered with an error" apart from "the provider
/// could not be reached" so every call site handles both.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome<T> {
    Success(T),
    ProviderError { status: String, message: String },
    NetworkError(String),
}

impl<T> ProviderOutcome<T> {
    pub fn provider_error(status: impl Into<String>, message: impl Into<String>) -> Self {
        ProviderOutcome::ProviderError {
            status: status.into(),
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProviderOutcome::Success(_))
    }
}

impl<T> From<reqwest::Error> for ProviderOutcome<T> {
    fn from(err: reqwest::Error) -> Self {
        // request URLs carry credentials such as API keys
        ProviderOutcome::NetworkError(err.without_url().to_string())
    }
}

/// Turns a free-text address into coordinates.
pub trait Geocoder: Send + Sync {
    /// Looks up `address`, biased toward `region` (ccTLD-style code such as
    /// `"us"`). `Success(None)` means the provider found no candidate.
    fn geocode(&self, address: &str, region: &str) -> ProviderOutcome<Option<Coordinates>>;
}

/// Provides travel distance/duration between sets of locations.
pub trait DistanceMatrixProvider: Send + Sync {
    /// Returns a row-major grid with one row per origin and one cell per
    /// destination, fetched in a single round trip.
    fn matrix_for(
        &self,
        origins: &[Coordinates],
        destinations: &[Coordinates],
    ) -> ProviderOutcome<Vec<Vec<MatrixCell>>>;
}

/// Validates the bearer credential attached to a request.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, token: &str) -> bool;
}

/// Accepts any non-empty token. Useful when auth is enforced upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyNonEmptyToken;

impl CredentialVerifier for AnyNonEmptyToken {
    fn verify(&self, token: &str) -> bool {
        !token.trim().is_empty()
    }
}

/// Receives engine events. Every method defaults to doing nothing.
pub trait RouteObserver: Send + Sync {
    fn request_rejected(&self, _reason: &str) {}

    fn geocoding_failed(&self, _stop_id: &str, _reason: &str) {}

    fn unreachable_pairs(&self, _count: usize) {}

    fn route_completed(&self, _stops: usize, _distance_km: f64, _duration_minutes: u64) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RouteObserver for NoopObserver {}

macro_rules! forward_impls {
    ($($wrapper:ty),*) => {
        $(
            impl<T: Geocoder + ?Sized> Geocoder for $wrapper {
                fn geocode(&self, address: &str, region: &str) -> ProviderOutcome<Option<Coordinates>> {
                    (**self).geocode(address, region)
                }
            }

            impl<T: DistanceMatrixProvider + ?Sized> DistanceMatrixProvider for $wrapper {
                fn matrix_for(
                    &self,
                    origins: &[Coordinates],
                    destinations: &[Coordinates],
                ) -> ProviderOutcome<Vec<Vec<MatrixCell>>> {
                    (**self).matrix_for(origins, destinations)
                }
            }

            impl<T: CredentialVerifier + ?Sized> CredentialVerifier for $wrapper {
                fn verify(&self, token: &str) -> bool {
                    (**self).verify(token)
                }
            }

            impl<T: RouteObserver + ?Sized> RouteObserver for $wrapper {
                fn request_rejected(&self, reason: &str) {
                    (**self).request_rejected(reason)
                }

                fn geocoding_failed(&self, stop_id: &str, reason: &str) {
                    (**self).geocoding_failed(stop_id, reason)
                }

                fn unreachable_pairs(&self, count: usize) {
                    (**self).unreachable_pairs(count)
                }

                fn route_completed(&self, stops: usize, distance_km: f64, duration_minutes: u64) {
                    (**self).route_completed(stops, distance_km, duration_minutes)
                }
            }
        )*
    };
}

forward_impls!(&T, Arc<T>, Box<T>);
