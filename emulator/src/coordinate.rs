use std::fmt;

use crate::{invalid, Result};

/// A position in decimal degrees. Latitude is in [-90, 90] and longitude in [-180, 180].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            invalid!("latitude {lat} is outside [-90, 90]");
        }
        if !(-180.0..=180.0).contains(&lon) {
            invalid!("longitude {lon} is outside [-180, 180]");
        }
        Ok(Self { lat, lon })
    }

    /// Only for values the geodesic math already produced in range.
    pub(crate) fn new_unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}
