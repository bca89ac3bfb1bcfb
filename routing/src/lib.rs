#[macro_use]
extern crate log;

mod azure;
mod travel_mode;

use std::fmt;

use serde::Deserialize;

use emulator::{Coordinate, Sampler, SampleSequence};

pub use self::azure::AzureMapsClient;
pub use self::travel_mode::TravelMode;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("routing request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("routing provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed routing response: {0}")]
    Malformed(String),
    #[error("routing provider found no route")]
    NoRoute,
}

/// A road route between two points, as a routing provider describes it.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub waypoints: Vec<Coordinate>,
    /// The provider's own figure, which follows the road more closely than the polyline does.
    pub total_distance_m: f64,
}

impl Route {
    pub fn sample(
        &self,
        sampler: &Sampler,
        speed_mps: f64,
        period_s: f64,
    ) -> emulator::Result<SampleSequence> {
        sampler.sample_along_polyline(
            &self.waypoints,
            Some(self.total_distance_m),
            speed_mps,
            period_s,
        )
    }
}

pub trait RouteProvider {
    fn fetch_route(
        &self,
        start: Coordinate,
        stop: Coordinate,
        mode: TravelMode,
    ) -> Result<Route, ProviderError>;
}

#[derive(Clone, Deserialize)]
pub struct RoutingConfig {
    pub api_key: String,
    #[serde(default)]
    pub travel_mode: TravelMode,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout for calls to the provider
    #[serde(default = "default_timeout_s")]
    pub timeout_s: u64,
}

pub fn default_base_url() -> String {
    "https://atlas.microsoft.com".to_string()
}

fn default_timeout_s() -> u64 {
    30
}

impl RoutingConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            travel_mode: TravelMode::default(),
            base_url: default_base_url(),
            timeout_s: default_timeout_s(),
        }
    }
}

// Keep the key out of logs
impl fmt::Debug for RoutingConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RoutingConfig")
            .field("api_key", &"<redacted>")
            .field("travel_mode", &self.travel_mode)
            .field("base_url", &self.base_url)
            .field("timeout_s", &self.timeout_s)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config: RoutingConfig = serde_json::from_str(r#"{"api_key": "abc"}"#).unwrap();
        assert_eq!(config.travel_mode, TravelMode::Car);
        assert_eq!(config.base_url, "https://atlas.microsoft.com");
        assert_eq!(config.timeout_s, 30);

        let config: RoutingConfig =
            serde_json::from_str(r#"{"api_key": "abc", "travel_mode": "bicycle"}"#).unwrap();
        assert_eq!(config.travel_mode, TravelMode::Bicycle);
    }

    #[test]
    fn debug_hides_the_key() {
        let config = RoutingConfig::new("super-secret".to_string());
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    struct Canned(Route);

    impl RouteProvider for Canned {
        fn fetch_route(
            &self,
            _: Coordinate,
            _: Coordinate,
            _: TravelMode,
        ) -> Result<Route, ProviderError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn sample_a_fetched_route() {
        let start = Coordinate::new(0.0, 0.0).unwrap();
        let stop = Coordinate::new(0.0, 0.01).unwrap();
        let provider = Canned(Route {
            waypoints: vec![start, stop],
            total_distance_m: 1500.0,
        });
        let route = provider.fetch_route(start, stop, TravelMode::Car).unwrap();
        let samples = route.sample(&Sampler::default(), 15.0, 10.0).unwrap();
        assert_eq!(samples.len(), 11);
        assert_eq!(samples.first(), start);
    }
}
