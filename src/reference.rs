//! Navigation reference for a sequenced route.
//!
//! Renders a Google Maps directions link: the start is the origin, the last
//! stop is the destination, and the stops in between become waypoints.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::model::{DeliveryStop, StartLocation};

const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationReference {
    pub waypoints: Vec<String>,
    pub url: String,
}

impl NavigationReference {
    pub fn empty() -> Self {
        Self {
            waypoints: Vec::new(),
            url: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }
}

/// Builds the reference from stops already in visiting order.
///
/// Uses coordinates for every stop that has them. Only when no ordered stop
/// has coordinates does it fall back to address text.
pub fn build_reference(start: &StartLocation, ordered: &[&DeliveryStop]) -> NavigationReference {
    let by_coordinates: Vec<String> = ordered
        .iter()
        .filter_map(|stop| stop.coordinates())
        .map(|coords| coords.to_param())
        .collect();

    let (origin, stops) = if !by_coordinates.is_empty() {
        (start.coordinates().to_param(), by_coordinates)
    } else {
        let by_address: Vec<String> = ordered
            .iter()
            .map(|stop| stop.address.trim().to_string())
            .filter(|address| !address.is_empty())
            .collect();
        (start.address.trim().to_string(), by_address)
    };

    let Some((destination, waypoints)) = stops.split_last() else {
        return NavigationReference::empty();
    };

    let mut params = vec![
        ("api", "1".to_string()),
        ("origin", origin),
        ("destination", destination.clone()),
    ];
    if !waypoints.is_empty() {
        params.push(("waypoints", waypoints.join("|")));
    }
    params.push(("travelmode", "driving".to_string()));

    match Url::parse_with_params(DIRECTIONS_URL, &params) {
        Ok(url) => NavigationReference {
            waypoints: stops,
            url: url.to_string(),
        },
        Err(_) => NavigationReference::empty(),
    }
}
