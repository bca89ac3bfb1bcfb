use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// The kinds of traveler the routing provider plans for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Car,
    Truck,
    Taxi,
    Bus,
    Van,
    Motorcycle,
    Bicycle,
    Pedestrian,
}

impl TravelMode {
    pub const ALL: [TravelMode; 8] = [
        TravelMode::Car,
        TravelMode::Truck,
        TravelMode::Taxi,
        TravelMode::Bus,
        TravelMode::Van,
        TravelMode::Motorcycle,
        TravelMode::Bicycle,
        TravelMode::Pedestrian,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Car => "car",
            TravelMode::Truck => "truck",
            TravelMode::Taxi => "taxi",
            TravelMode::Bus => "bus",
            TravelMode::Van => "van",
            TravelMode::Motorcycle => "motorcycle",
            TravelMode::Bicycle => "bicycle",
            TravelMode::Pedestrian => "pedestrian",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(x: &str) -> Result<Self, Self::Err> {
        let lower = x.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == lower)
            .ok_or_else(|| format!("unknown travel mode {x:?}"))
    }
}
