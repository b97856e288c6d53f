//! Fills in missing stop coordinates via geocoding.

use std::fmt;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::model::{DeliveryStop, ResolvedStop};
use crate::traits::{Geocoder, NoopObserver, ProviderOutcome, RouteObserver};

/// Why a stop could not be located. Recovered locally; never fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodingFailure {
    EmptyAddress,
    NoResults,
    InvalidCoordinates,
    Provider { status: String },
    Network(String),
}

impl fmt::Display for GeocodingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodingFailure::EmptyAddress => write!(f, "address is empty"),
            GeocodingFailure::NoResults => write!(f, "no geocoding results"),
            GeocodingFailure::InvalidCoordinates => write!(f, "geocoder returned invalid coordinates"),
            GeocodingFailure::Provider { status } => write!(f, "geocoder status {}", status),
            GeocodingFailure::Network(reason) => write!(f, "geocoder unreachable: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedStop {
    pub stop: DeliveryStop,
    pub reason: GeocodingFailure,
}

/// Resolved stops (original order kept) and the ones that were dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resolution {
    pub resolved: Vec<ResolvedStop>,
    pub unresolved: Vec<UnresolvedStop>,
}

impl Resolution {
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }
}

pub struct CoordinateResolver<'a, G: Geocoder + ?Sized> {
    geocoder: &'a G,
    region: &'a str,
    observer: &'a dyn RouteObserver,
}

impl<'a, G: Geocoder + ?Sized> CoordinateResolver<'a, G> {
    pub fn new(geocoder: &'a G, region: &'a str) -> Self {
        Self {
            geocoder,
            region,
            observer: &NoopObserver,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn RouteObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Looks up every stop lacking coordinates, one task per stop, and waits
    /// for all of them. A failed lookup only drops that stop. No retries.
    ///
    /// Lookups run on a pool owned by this call, one thread per pending stop.
    pub fn resolve(&self, stops: Vec<DeliveryStop>) -> Resolution {
        let mut outcomes: Vec<Option<Result<ResolvedStop, UnresolvedStop>>> =
            Vec::with_capacity(stops.len());
        let mut pending = Vec::new();
        for (index, stop) in stops.into_iter().enumerate() {
            match stop.coordinates() {
                Some(coords) => outcomes.push(Some(Ok(ResolvedStop::new(stop, coords)))),
                None => {
                    outcomes.push(None);
                    pending.push((index, stop));
                }
            }
        }
        debug!(
            total = outcomes.len(),
            pending = pending.len(),
            region = self.region,
            "resolving coordinates"
        );

        for (index, outcome) in self.lookup_all(pending) {
            outcomes[index] = Some(outcome);
        }

        let mut resolution = Resolution::default();
        for outcome in outcomes.into_iter().flatten() {
            match outcome {
                Ok(resolved) => resolution.resolved.push(resolved),
                Err(unresolved) => {
                    warn!(
                        stop_id = %unresolved.stop.id,
                        reason = %unresolved.reason,
                        "dropping stop that could not be geocoded"
                    );
                    self.observer
                        .geocoding_failed(&unresolved.stop.id, &unresolved.reason.to_string());
                    resolution.unresolved.push(unresolved);
                }
            }
        }

        resolution
    }

    fn lookup_all(
        &self,
        pending: Vec<(usize, DeliveryStop)>,
    ) -> Vec<(usize, Result<ResolvedStop, UnresolvedStop>)> {
        if pending.is_empty() {
            return Vec::new();
        }

        let lookup = |pending: Vec<(usize, DeliveryStop)>| {
            pending
                .into_par_iter()
                .with_max_len(1)
                .map(|(index, stop)| (index, self.resolve_one(stop)))
                .collect::<Vec<_>>()
        };

        match ThreadPoolBuilder::new()
            .num_threads(pending.len())
            .thread_name(|i| format!("geocode-{}", i))
            .build()
        {
            Ok(pool) => pool.install(|| lookup(pending)),
            Err(err) => {
                warn!(error = %err, "geocoding pool unavailable, using the shared pool");
                lookup(pending)
            }
        }
    }

    fn resolve_one(&self, stop: DeliveryStop) -> Result<ResolvedStop, UnresolvedStop> {
        if let Some(coords) = stop.coordinates() {
            return Ok(ResolvedStop::new(stop, coords));
        }

        if stop.address.trim().is_empty() {
            return Err(UnresolvedStop {
                stop,
                reason: GeocodingFailure::EmptyAddress,
            });
        }

        let reason = match self.geocoder.geocode(stop.address.trim(), self.region) {
            ProviderOutcome::Success(Some(coords)) if coords.is_valid() => {
                debug!(stop_id = %stop.id, lat = coords.latitude, lng = coords.longitude, "geocoded stop");
                return Ok(ResolvedStop::new(stop, coords));
            }
            ProviderOutcome::Success(Some(_)) => GeocodingFailure::InvalidCoordinates,
            ProviderOutcome::Success(None) => GeocodingFailure::NoResults,
            ProviderOutcome::ProviderError { status, .. } => GeocodingFailure::Provider { status },
            ProviderOutcome::NetworkError(reason) => GeocodingFailure::Network(reason),
        };

        Err(UnresolvedStop { stop, reason })
    }
}
