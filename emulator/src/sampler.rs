use serde::Deserialize;

use crate::geodesic::{initial_bearing, Sphere, EARTH_RADIUS_M};
use crate::{invalid, Coordinate, Result};

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub earth_radius_m: f64,
    /// Requests that would produce more samples than this are rejected up front.
    pub max_samples: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            earth_radius_m: EARTH_RADIUS_M,
            max_samples: 1_000_000,
        }
    }
}

/// Walks a route at constant speed, dropping a sample every period.
#[derive(Clone, Copy, Debug)]
pub struct Sampler {
    sphere: Sphere,
    max_samples: usize,
}

/// Evenly time-spaced positions along a route. The first sample is the start of the route.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSequence {
    points: Vec<Coordinate>,
    speed_mps: f64,
    period_s: f64,
}

// How a route of some length gets divided into steps
struct Plan {
    sample_count: usize,
    step_distance: f64,
}

impl Sampler {
    pub fn new(config: &SamplerConfig) -> Result<Self> {
        if !(config.earth_radius_m.is_finite() && config.earth_radius_m > 0.0) {
            invalid!("earth radius must be positive, not {}", config.earth_radius_m);
        }
        if config.max_samples == 0 {
            invalid!("max_samples must be at least 1");
        }
        Ok(Self {
            sphere: Sphere {
                radius_m: config.earth_radius_m,
            },
            max_samples: config.max_samples,
        })
    }

    /// Walks from `start` toward `stop` holding the initial bearing fixed. The heading is never
    /// corrected, so the last sample drifts from `stop` by a small amount that grows with the
    /// route length.
    pub fn sample_direct(
        &self,
        start: Coordinate,
        stop: Coordinate,
        speed_mps: f64,
        period_s: f64,
    ) -> Result<SampleSequence> {
        let total_distance = self.sphere.distance(start, stop);
        if total_distance == 0.0 {
            invalid!("start and stop are the same point {start}");
        }
        let plan = self.plan(total_distance, speed_mps, period_s)?;
        debug!(
            "Sampling {} steps of {:.1}m directly from {start} to {stop}",
            plan.sample_count, plan.step_distance
        );

        let bearing = initial_bearing(start, stop);
        let mut points = Vec::with_capacity(plan.sample_count + 1);
        points.push(start);
        for i in 1..=plan.sample_count {
            points.push(
                self.sphere
                    .destination(points[i - 1], bearing, plan.step_distance),
            );
        }
        Ok(SampleSequence {
            points,
            speed_mps,
            period_s,
        })
    }

    /// Follows a polyline by periodically re-aiming at the waypoint pair that corresponds to
    /// the fraction of the trip completed so far. `total_distance_m` is the length a routing
    /// provider reported; without one, the polyline's own length is used.
    pub fn sample_along_polyline(
        &self,
        waypoints: &[Coordinate],
        total_distance_m: Option<f64>,
        speed_mps: f64,
        period_s: f64,
    ) -> Result<SampleSequence> {
        if waypoints.len() < 2 {
            invalid!("a route needs at least 2 waypoints, got {}", waypoints.len());
        }
        let total_distance = match total_distance_m {
            Some(d) => d,
            None => waypoints
                .windows(2)
                .map(|pair| self.sphere.distance(pair[0], pair[1]))
                .sum(),
        };
        if !(total_distance.is_finite() && total_distance > 0.0) {
            invalid!("route length must be positive, not {total_distance}");
        }
        let plan = self.plan(total_distance, speed_mps, period_s)?;
        debug!(
            "Sampling {} steps of {:.1}m along {} waypoints",
            plan.sample_count,
            plan.step_distance,
            waypoints.len()
        );

        // Not a count; the segment index is how many of these intervals have elapsed
        let recompute_interval = plan.sample_count as f64 / waypoints.len() as f64;
        let last = waypoints.len() - 1;

        let mut bearing = initial_bearing(waypoints[0], waypoints[1]);
        let mut segment = 0;
        let mut points = Vec::with_capacity(plan.sample_count + 1);
        points.push(waypoints[0]);
        for i in 1..=plan.sample_count {
            points.push(
                self.sphere
                    .destination(points[i - 1], bearing, plan.step_distance),
            );

            let next_segment = (i as f64 / recompute_interval) as usize;
            if next_segment != segment {
                segment = next_segment;
                let (from, to) = if segment >= last {
                    (waypoints[last - 1], waypoints[last])
                } else {
                    (waypoints[segment], waypoints[segment + 1])
                };
                bearing = initial_bearing(from, to);
            }
        }
        Ok(SampleSequence {
            points,
            speed_mps,
            period_s,
        })
    }

    fn plan(&self, total_distance: f64, speed_mps: f64, period_s: f64) -> Result<Plan> {
        if !(speed_mps.is_finite() && speed_mps > 0.0) {
            invalid!("speed must be positive, not {speed_mps}");
        }
        if !(period_s.is_finite() && period_s > 0.0) {
            invalid!("sample period must be positive, not {period_s}");
        }

        let travel_time = total_distance / speed_mps;
        let count = (travel_time / period_s).floor();
        if count < 1.0 {
            invalid!(
                "{total_distance:.1}m at {speed_mps}m/s takes {travel_time:.1}s, shorter than one \
                 {period_s}s sample period"
            );
        }
        if count > self.max_samples as f64 {
            invalid!(
                "request would produce {count} samples, more than the limit of {}",
                self.max_samples
            );
        }
        let sample_count = count as usize;
        Ok(Plan {
            sample_count,
            step_distance: total_distance / sample_count as f64,
        })
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            sphere: Sphere::EARTH,
            max_samples: SamplerConfig::default().max_samples,
        }
    }
}

impl SampleSequence {
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a sequence holds at least the start and one step.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Coordinate {
        self.points[0]
    }

    pub fn last(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }

    pub fn speed_mps(&self) -> f64 {
        self.speed_mps
    }

    pub fn period_s(&self) -> f64 {
        self.period_s
    }

    /// Each sample paired with its offset in seconds from departure.
    pub fn timed(&self) -> impl Iterator<Item = (f64, Coordinate)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(move |(i, pt)| (i as f64 * self.period_s, *pt))
    }
}
