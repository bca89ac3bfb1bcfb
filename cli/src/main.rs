#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod config;

use std::path::{Path, PathBuf};

use anyhow::Result;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use structopt::StructOpt;

use emulator::{Coordinate, SampleSequence, Sampler};
use routing::{AzureMapsClient, RouteProvider, TravelMode};

use self::config::ConfigFile;

#[derive(StructOpt)]
#[structopt(
    name = "gps-emulator",
    about = "Generates GPS coordinates for an object moving at constant speed"
)]
struct Args {
    /// Prints extra logging
    #[structopt(short, long)]
    verbose: bool,
    /// A JSON file with `sampler` and `routing` sections
    #[structopt(long)]
    config: Option<PathBuf>,
    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(StructOpt)]
enum Command {
    /// Walks the great-circle path between the two points
    Compute {
        #[structopt(flatten)]
        trip: Trip,
        /// Where to write the samples as latitude,longitude rows
        #[structopt(long, default_value = "coordinates_compute.csv")]
        output: PathBuf,
    },
    /// Follows a road route planned by Azure Maps
    AzureMaps {
        #[structopt(flatten)]
        trip: Trip,
        /// Where to write the samples as latitude,longitude rows
        #[structopt(long, default_value = "coordinates_azure_maps.csv")]
        output: PathBuf,
        #[structopt(long, env = "AZURE_MAPS_SUBSCRIPTION_KEY", hide_env_values = true)]
        api_key: Option<String>,
        /// car, truck, taxi, bus, van, motorcycle, bicycle, or pedestrian
        #[structopt(long, env = "TRAVEL_MODE")]
        travel_mode: Option<TravelMode>,
    },
}

#[derive(StructOpt)]
struct Trip {
    #[structopt(long, allow_hyphen_values = true)]
    start_lat: f64,
    #[structopt(long, allow_hyphen_values = true)]
    start_lon: f64,
    #[structopt(long, allow_hyphen_values = true)]
    stop_lat: f64,
    #[structopt(long, allow_hyphen_values = true)]
    stop_lon: f64,
    /// Moving speed in meters/second
    #[structopt(long, default_value = "1")]
    speed: f64,
    /// Time interval in seconds between generated coordinates
    #[structopt(long, default_value = "1")]
    frequency: f64,
    /// Also write the samples as a GeoJSON LineString
    #[structopt(long)]
    geojson: Option<PathBuf>,
}

impl Trip {
    fn endpoints(&self) -> Result<(Coordinate, Coordinate)> {
        Ok((
            Coordinate::new(self.start_lat, self.start_lon)?,
            Coordinate::new(self.stop_lat, self.stop_lon)?,
        ))
    }

    fn save(&self, samples: &SampleSequence, output: &Path) -> Result<()> {
        emulator::save_csv(samples, output)?;
        if let Some(ref path) = self.geojson {
            emulator::save_geojson(samples, path)?;
        }
        Ok(())
    }
}

fn main() {
    let args = Args::from_args();
    if let Err(err) = setup_logger(args.verbose) {
        eprintln!("Unable to initialize logger: {err}");
    }

    if let Err(err) = run(args) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn setup_logger(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config = match args.config {
        Some(ref path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let sampler = Sampler::new(&config.sampler)?;

    let samples = match args.cmd {
        Command::Compute { trip, output } => {
            let (start, stop) = trip.endpoints()?;
            let samples = sampler.sample_direct(start, stop, trip.speed, trip.frequency)?;
            trip.save(&samples, &output)?;
            samples
        }
        Command::AzureMaps {
            trip,
            output,
            api_key,
            travel_mode,
        } => {
            let (start, stop) = trip.endpoints()?;
            let routing = config.routing(api_key, travel_mode)?;
            debug!("Routing with {:?}", routing);
            let mode = routing.travel_mode;
            let route = AzureMapsClient::new(routing)?.fetch_route(start, stop, mode)?;
            let samples = route.sample(&sampler, trip.speed, trip.frequency)?;
            trip.save(&samples, &output)?;
            samples
        }
    };

    info!(
        "Generated {} coordinates, one every {}s",
        samples.len(),
        samples.period_s()
    );
    let pairs: Vec<(f64, f64)> = samples
        .points()
        .iter()
        .map(|pt| (pt.lat(), pt.lon()))
        .collect();
    println!("{}", serde_json::to_string(&pairs)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_compute_args() {
        let args = Args::from_iter_safe(&[
            "gps-emulator",
            "compute",
            "--start-lat",
            "-33.86",
            "--start-lon",
            "151.2",
            "--stop-lat",
            "-33.87",
            "--stop-lon",
            "151.21",
        ])
        .unwrap();
        match args.cmd {
            Command::Compute { trip, output } => {
                assert_eq!(trip.start_lat, -33.86);
                assert_eq!(trip.speed, 1.0);
                assert_eq!(trip.frequency, 1.0);
                assert_eq!(output, PathBuf::from("coordinates_compute.csv"));
                assert!(trip.geojson.is_none());
            }
            Command::AzureMaps { .. } => panic!("parsed the wrong subcommand"),
        }
    }

    #[test]
    fn parse_azure_maps_args() {
        let args = Args::from_iter_safe(&[
            "gps-emulator",
            "-v",
            "azure-maps",
            "--start-lat",
            "1",
            "--start-lon",
            "2",
            "--stop-lat",
            "3",
            "--stop-lon",
            "4",
            "--speed",
            "12.5",
            "--api-key",
            "abc",
            "--travel-mode",
            "pedestrian",
        ])
        .unwrap();
        assert!(args.verbose);
        match args.cmd {
            Command::AzureMaps {
                trip,
                output,
                api_key,
                travel_mode,
            } => {
                assert_eq!(trip.speed, 12.5);
                assert_eq!(output, PathBuf::from("coordinates_azure_maps.csv"));
                assert_eq!(api_key.as_deref(), Some("abc"));
                assert_eq!(travel_mode, Some(TravelMode::Pedestrian));
            }
            Command::Compute { .. } => panic!("parsed the wrong subcommand"),
        }
    }

    #[test]
    fn out_of_range_endpoints_are_rejected() {
        let trip = Trip {
            start_lat: 95.0,
            start_lon: 0.0,
            stop_lat: 0.0,
            stop_lon: 0.0,
            speed: 1.0,
            frequency: 1.0,
            geojson: None,
        };
        assert!(trip.endpoints().is_err());
    }
}
