//! Request boundary: auth, validation, orchestration and response shaping.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::OptimizerConfig;
use crate::error::OptimizeError;
use crate::geocode::CoordinateResolver;
use crate::matrix::{StopIndex, TravelCostMatrixBuilder};
use crate::metrics::{aggregate, RouteMetrics};
use crate::model::{DeliveryStop, OptimizeRequest, OptimizeResponse, RouteResult};
use crate::reference::build_reference;
use crate::sequencer::nearest_neighbor_order;
use crate::traits::{
    CredentialVerifier, DistanceMatrixProvider, Geocoder, NoopObserver, RouteObserver,
};

/// Status code plus JSON body, ready to hand to any HTTP layer.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

pub struct OptimizationRequestHandler<G, M, C> {
    geocoder: G,
    matrix_provider: M,
    verifier: C,
    observer: Box<dyn RouteObserver>,
    config: OptimizerConfig,
}

impl<G, M, C> OptimizationRequestHandler<G, M, C>
where
    G: Geocoder,
    M: DistanceMatrixProvider,
    C: CredentialVerifier,
{
    pub fn new(geocoder: G, matrix_provider: M, verifier: C, config: OptimizerConfig) -> Self {
        Self {
            geocoder,
            matrix_provider,
            verifier,
            observer: Box::new(NoopObserver),
            config,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn RouteObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Runs one optimization. `authorization` is the raw header value,
    /// expected as `Bearer <token>`.
    pub fn handle(
        &self,
        authorization: Option<&str>,
        request: OptimizeRequest,
    ) -> Result<RouteResult, OptimizeError> {
        self.authorize(authorization)?;
        self.optimize(request)
    }

    /// JSON-in/JSON-out variant of [`handle`](Self::handle). The credential
    /// is checked before the body is even parsed.
    pub fn handle_json(&self, authorization: Option<&str>, body: &str) -> HandlerResponse {
        let result = self
            .authorize(authorization)
            .and_then(|_| serde_json::from_str::<OptimizeRequest>(body).map_err(OptimizeError::from))
            .and_then(|request| self.optimize(request));

        match result {
            Ok(route) => match serde_json::to_string(&OptimizeResponse::from(route)) {
                Ok(body) => HandlerResponse { status: 200, body },
                Err(err) => {
                    warn!(error = %err, "failed to serialize response");
                    error_response(500, "internal error")
                }
            },
            Err(err) => error_response(err.status_code(), err.public_message()),
        }
    }

    fn authorize(&self, authorization: Option<&str>) -> Result<(), OptimizeError> {
        match authorization.and_then(bearer_token) {
            Some(token) if self.verifier.verify(token) => Ok(()),
            _ => {
                self.reject(&OptimizeError::Unauthorized);
                Err(OptimizeError::Unauthorized)
            }
        }
    }

    fn optimize(&self, request: OptimizeRequest) -> Result<RouteResult, OptimizeError> {
        if let Err(err) = validate(&request) {
            self.reject(&err);
            return Err(err);
        }

        // a timeout too large to represent means no deadline
        let deadline =
            Instant::now().checked_add(Duration::from_secs(self.config.request_timeout_secs));
        let submitted = request.deliveries.len();
        let start = request.start_location;

        let resolution = CoordinateResolver::new(&self.geocoder, &self.config.region_bias)
            .with_observer(self.observer.as_ref())
            .resolve(request.deliveries);
        self.check_deadline(deadline)?;

        let unresolved_count = resolution.unresolved_count();
        let resolved = resolution.resolved;
        debug!(submitted, resolved = resolved.len(), unresolved_count, "coordinates resolved");

        if resolved.is_empty() {
            self.reject(&OptimizeError::NoValidDestinations);
            return Err(OptimizeError::NoValidDestinations);
        }

        let resolved_stops: Vec<DeliveryStop> =
            resolved.iter().map(|resolved| resolved.stop.clone()).collect();

        let (order, metrics, unreachable_pairs) = if resolved.len() == 1 {
            (vec![StopIndex(0)], RouteMetrics::ZERO, 0)
        } else {
            let matrix = TravelCostMatrixBuilder::new(&self.matrix_provider)
                .build(&start, &resolved)
                .inspect_err(|err| self.reject(err))?;
            self.check_deadline(deadline)?;

            let unreachable_pairs = matrix.unreachable_pairs();
            if unreachable_pairs > 0 {
                self.observer.unreachable_pairs(unreachable_pairs);
            }

            let order = nearest_neighbor_order(&matrix);
            let metrics = aggregate(&order, &matrix);
            (order, metrics, unreachable_pairs)
        };

        let ordered: Vec<&DeliveryStop> = order.iter().map(|index| &resolved_stops[index.0]).collect();
        let reference = build_reference(&start, &ordered);

        info!(
            stops = resolved_stops.len(),
            sequenced = order.len(),
            unresolved_count,
            unreachable_pairs,
            distance_km = metrics.total_distance_km,
            duration_minutes = metrics.total_duration_minutes,
            "route optimized"
        );
        self.observer.route_completed(
            order.len(),
            metrics.total_distance_km,
            metrics.total_duration_minutes,
        );

        Ok(RouteResult {
            order: order.into_iter().map(|index| index.0).collect(),
            total_distance_km: metrics.total_distance_km,
            total_duration_minutes: metrics.total_duration_minutes,
            resolved_stops,
            unresolved_count,
            unreachable_pairs,
            navigation_reference: reference.url,
        })
    }

    fn check_deadline(&self, deadline: Option<Instant>) -> Result<(), OptimizeError> {
        if deadline.is_some_and(|deadline| Instant::now() > deadline) {
            self.reject(&OptimizeError::Timeout);
            return Err(OptimizeError::Timeout);
        }
        Ok(())
    }

    fn reject(&self, err: &OptimizeError) {
        warn!(status = err.status_code(), error = %err, "optimization request rejected");
        self.observer.request_rejected(&err.to_string());
    }
}

/// Extracts the token from a `Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn validate(request: &OptimizeRequest) -> Result<(), OptimizeError> {
    if request.deliveries.is_empty() {
        return Err(OptimizeError::EmptyRequest);
    }

    if !request.start_location.coordinates().is_valid() {
        return Err(OptimizeError::InvalidRequest(
            "start location has invalid coordinates".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for stop in &request.deliveries {
        if !seen.insert(stop.id.as_str()) {
            return Err(OptimizeError::InvalidRequest(format!(
                "duplicate delivery id {}",
                stop.id
            )));
        }
        if stop.has_partial_coordinates() {
            return Err(OptimizeError::InvalidRequest(format!(
                "delivery {} has only one of latitude/longitude",
                stop.id
            )));
        }
        if stop.coordinates().is_some_and(|coords| !coords.is_valid()) {
            return Err(OptimizeError::InvalidRequest(format!(
                "delivery {} has out-of-range coordinates",
                stop.id
            )));
        }
    }

    Ok(())
}

fn error_response(status: u16, message: &str) -> HandlerResponse {
    let body = serde_json::to_string(&ErrorBody { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", message));
    HandlerResponse { status, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StartLocation;

    fn request(deliveries: Vec<DeliveryStop>) -> OptimizeRequest {
        OptimizeRequest {
            deliveries,
            start_location: StartLocation::new(36.1, -115.1, "Depot"),
        }
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer   abc "), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(validate(&request(vec![])), Err(OptimizeError::EmptyRequest));
    }

    #[test]
    fn test_validate_duplicate_ids() {
        let result = validate(&request(vec![
            DeliveryStop::new("a", "x"),
            DeliveryStop::new("a", "y"),
        ]));
        assert!(matches!(result, Err(OptimizeError::InvalidRequest(_))));
    }

    #[test]
    fn test_validate_partial_coordinates() {
        let mut stop = DeliveryStop::new("a", "x");
        stop.longitude = Some(-115.0);
        assert!(matches!(
            validate(&request(vec![stop])),
            Err(OptimizeError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_validate_accepts_mixed_stops() {
        let result = validate(&request(vec![
            DeliveryStop::new("a", "x"),
            DeliveryStop::new("b", "y").with_coordinates(36.2, -115.2),
        ]));
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_error_response_body() {
        let response = error_response(422, "no deliveries could be located");
        assert_eq!(response.status, 422);
        assert_eq!(response.body, r#"{"error":"no deliveries could be located"}"#);
    }
}
