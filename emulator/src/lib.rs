#[macro_use]
extern crate log;

mod coordinate;
mod geodesic;
mod output;
mod sampler;

pub use self::coordinate::Coordinate;
pub use self::geodesic::{destination, distance, initial_bearing, Sphere, EARTH_RADIUS_M};
pub use self::output::{save_csv, save_geojson, to_geojson, write_csv};
pub use self::sampler::{SampleSequence, Sampler, SamplerConfig};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request can't produce a sample sequence: bad speed, period, coordinates, or a route
    /// too short to fit a single sample.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

macro_rules! invalid {
    ($($arg:tt)*) => {
        return Err($crate::Error::InvalidRequest(format!($($arg)*)))
    };
}
pub(crate) use invalid;
