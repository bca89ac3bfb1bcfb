use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use emulator::Coordinate;

use crate::{ProviderError, Route, RouteProvider, RoutingConfig, TravelMode};

/// Talks to the Azure Maps route directions API.
pub struct AzureMapsClient {
    config: RoutingConfig,
    client: Client,
}

impl AzureMapsClient {
    pub fn new(config: RoutingConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_s))
            .build()?;
        Ok(Self { config, client })
    }
}

impl RouteProvider for AzureMapsClient {
    fn fetch_route(
        &self,
        start: Coordinate,
        stop: Coordinate,
        mode: TravelMode,
    ) -> Result<Route, ProviderError> {
        let url = format!("{}/route/directions/json", self.config.base_url);
        info!("Requesting a {mode} route from {start} to {stop}");

        let query = format!(
            "{},{}:{},{}",
            start.lat(),
            start.lon(),
            stop.lat(),
            stop.lon()
        );
        let response = self
            .client
            .get(&url)
            .query(&[
                ("subscription-key", self.config.api_key.as_str()),
                ("api-version", "1.0"),
                ("query", query.as_str()),
                ("travelMode", mode.as_str()),
                ("traffic", "false"),
                ("computeBestOrder", "true"),
                ("routeRepresentation", "polyline"),
            ])
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let route = parse_route(&body)?;
        info!(
            "Got a {}m route with {} points",
            route.total_distance_m,
            route.waypoints.len()
        );
        Ok(route)
    }
}

/// Extracts the first leg of the first route from a route directions response.
fn parse_route(body: &str) -> Result<Route, ProviderError> {
    let response: Response =
        serde_json::from_str(body).map_err(|err| ProviderError::Malformed(err.to_string()))?;
    let route = response.routes.into_iter().next().ok_or(ProviderError::NoRoute)?;
    let leg = route.legs.into_iter().next().ok_or(ProviderError::NoRoute)?;

    let mut waypoints = Vec::with_capacity(leg.points.len());
    for pt in leg.points {
        let coordinate = Coordinate::new(pt.latitude, pt.longitude)
            .map_err(|err| ProviderError::Malformed(err.to_string()))?;
        waypoints.push(coordinate);
    }
    if waypoints.len() < 2 {
        return Err(ProviderError::Malformed(format!(
            "route has {} points, needs at least 2",
            waypoints.len()
        )));
    }

    let total_distance_m = route.summary.length_in_meters;
    if total_distance_m.is_nan() || total_distance_m <= 0.0 {
        return Err(ProviderError::Malformed(format!(
            "route length is {total_distance_m}m"
        )));
    }

    Ok(Route {
        waypoints,
        total_distance_m,
    })
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    routes: Vec<RouteRecord>,
}

#[derive(Deserialize)]
struct RouteRecord {
    summary: Summary,
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Deserialize)]
struct Summary {
    #[serde(rename = "lengthInMeters")]
    length_in_meters: f64,
}

#[derive(Deserialize)]
struct Leg {
    points: Vec<Point>,
}

#[derive(Deserialize)]
struct Point {
    latitude: f64,
    longitude: f64,
}
