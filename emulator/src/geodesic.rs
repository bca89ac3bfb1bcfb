//! Great-circle math on a spherical Earth. Angles cross the API in degrees and distances in
//! meters; everything in between is radians.

use crate::Coordinate;

/// Mean Earth radius
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub radius_m: f64,
}

impl Sphere {
    pub const EARTH: Sphere = Sphere {
        radius_m: EARTH_RADIUS_M,
    };

    /// Haversine distance along the surface, in meters.
    pub fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        let lat1 = a.lat().to_radians();
        let lat2 = b.lat().to_radians();
        let delta_lat = (b.lat() - a.lat()).to_radians();
        let delta_lon = (b.lon() - a.lon()).to_radians();

        let h = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        // Rounding can push h a hair outside [0, 1] near antipodes
        let h = h.clamp(0.0, 1.0);
        let angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
        self.radius_m * angle
    }

    /// The point reached by walking `distance_m` from `origin` with initial heading
    /// `bearing_deg`.
    pub fn destination(&self, origin: Coordinate, bearing_deg: f64, distance_m: f64) -> Coordinate {
        if distance_m == 0.0 {
            return origin;
        }

        let lat = origin.lat().to_radians();
        let lon = origin.lon().to_radians();
        let bearing = bearing_deg.to_radians();
        let angle = distance_m / self.radius_m;

        let new_lat = (lat.sin() * angle.cos() + lat.cos() * angle.sin() * bearing.cos()).asin();
        let new_lon = lon
            + (bearing.sin() * angle.sin() * lat.cos())
                .atan2(angle.cos() - lat.sin() * new_lat.sin());

        Coordinate::new_unchecked(new_lat.to_degrees(), wrap_longitude(new_lon.to_degrees()))
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::EARTH
    }
}

/// Great-circle distance in meters on the mean-radius Earth.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    Sphere::EARTH.distance(a, b)
}

/// Compass heading at `a` toward `b`, in [0, 360).
pub fn initial_bearing(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let delta_lon = (b.lon() - a.lon()).to_radians();

    let x = delta_lon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    (x.atan2(y).to_degrees() + 360.0) % 360.0
}

pub fn destination(origin: Coordinate, bearing_deg: f64, distance_m: f64) -> Coordinate {
    Sphere::EARTH.destination(origin, bearing_deg, distance_m)
}

// Projection across the antimeridian leaves longitude past +/-180
fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 540.0).rem_euclid(360.0) - 180.0
    }
}
