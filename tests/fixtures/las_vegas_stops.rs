//! Real Las Vegas delivery addresses for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. They are routable with OSRM
//! Nevada data.

use route_optimizer::model::{Coordinates, DeliveryStop, StartLocation};

/// A named delivery address with its known coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Place {
    pub name: &'static str,
    pub address: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub const fn new(name: &'static str, address: &'static str, lat: f64, lng: f64) -> Self {
        Self {
            name,
            address,
            lat,
            lng,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    /// Stop carrying only the address, so it has to be geocoded.
    pub fn unlocated_stop(&self, id: &str) -> DeliveryStop {
        DeliveryStop::new(id, self.address)
    }

    pub fn located_stop(&self, id: &str) -> DeliveryStop {
        DeliveryStop::new(id, self.address).with_coordinates(self.lat, self.lng)
    }
}

pub const DEPOT: Place = Place::new(
    "Longhorn Casino",
    "5288 Boulder Hwy, Las Vegas, NV 89122",
    36.1070664,
    -115.0591256,
);

pub fn depot() -> StartLocation {
    StartLocation::new(DEPOT.lat, DEPOT.lng, DEPOT.address)
}

pub const STRIP: &[Place] = &[
    Place::new("Wynn Las Vegas", "3131 S Las Vegas Blvd, Las Vegas, NV 89109", 36.1263781, -115.1658180),
    Place::new("MGM Grand", "3799 S Las Vegas Blvd, Las Vegas, NV 89109", 36.1023654, -115.1688720),
    Place::new("Bellagio", "3600 S Las Vegas Blvd, Las Vegas, NV 89109", 36.1126, -115.1767),
    Place::new("Caesars Palace", "3570 S Las Vegas Blvd, Las Vegas, NV 89109", 36.1162, -115.1745),
    Place::new("Hard Rock Cafe", "3771 S Las Vegas Blvd, Las Vegas, NV 89109", 36.1041592, -115.1722166),
    Place::new("Brooklyn Bowl", "3545 S Las Vegas Blvd, Las Vegas, NV 89109", 36.1175388, -115.1695094),
];

pub const EAST_SIDE: &[Place] = &[
    Place::new("Sam's Town", "5111 Boulder Hwy, Las Vegas, NV 89122", 36.1118, -115.0637),
    Place::new("Boulder Station", "4111 Boulder Hwy, Las Vegas, NV 89121", 36.1362, -115.0870),
    Place::new("Arizona Charlie's Boulder", "4575 Boulder Hwy, Las Vegas, NV 89121", 36.1226, -115.0773),
];

pub fn all_places() -> Vec<Place> {
    STRIP.iter().chain(EAST_SIDE).copied().collect()
}
