//! route-optimizer
//!
//! Orders a single vehicle's delivery stops from a depot: geocodes stops
//! missing coordinates, fetches a travel cost matrix, sequences stops with a
//! nearest-neighbor heuristic and reports totals plus a navigation link.

pub mod config;
pub mod error;
pub mod geocode;
pub mod google;
pub mod handler;
pub mod haversine;
pub mod matrix;
pub mod metrics;
pub mod model;
pub mod osrm;
pub mod reference;
pub mod sequencer;
pub mod traits;

pub use error::OptimizeError;
pub use handler::{HandlerResponse, OptimizationRequestHandler};
pub use model::{DeliveryStop, OptimizeRequest, OptimizeResponse, RouteResult, StartLocation};
