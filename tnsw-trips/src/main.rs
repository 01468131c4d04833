use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tnsw_trips::config::{ConfiguredTrip, TripsConfig};
use tnsw_trips::domain::{FareType, JourneyRecord, TransportMode, TripSpec};
use tnsw_trips::tnsw::{MockFetcher, TnswClient, TnswConfig};
use tnsw_trips::{Fetch, TripClient};

/// Upcoming Transport NSW journeys between two stops.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Origin stop id
    #[arg(required_unless_present = "config", conflicts_with = "config")]
    origin: Option<String>,

    /// Destination stop id
    #[arg(required_unless_present = "config")]
    destination: Option<String>,

    #[arg(default_value_t = 1)]
    num_journeys: usize,

    /// JSON file with a list of trips, instead of a single trip
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Allowed modes, e.g. `train,bus`
    #[arg(long, env = "TNSW_MODES", value_delimiter = ',')]
    modes: Vec<TransportMode>,

    #[arg(long, env = "TNSW_FARE_TYPE")]
    fare_type: Option<FareType>,

    #[arg(long, env = "TNSW_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Serve canned `{origin}.json` responses from this directory
    #[arg(long, env = "TNSW_MOCK_DIR")]
    mock_dir: Option<PathBuf>,
}

impl Args {
    /// Trips from the config file, or the single trip given on the command line.
    fn trips(&self) -> Result<Vec<ConfiguredTrip>, String> {
        if let Some(path) = &self.config {
            let config = TripsConfig::load(path).map_err(|e| e.to_string())?;
            return config.to_trips().map_err(|e| e.to_string());
        }

        let (Some(origin), Some(destination)) = (&self.origin, &self.destination) else {
            return Err("missing origin or destination".to_string());
        };

        let mut builder = TripSpec::builder(origin, destination).num_journeys(self.num_journeys);
        if !self.modes.is_empty() {
            builder = builder.modes(self.modes.iter().copied());
        }
        if let Some(fare_type) = self.fare_type {
            builder = builder.fare_type(fare_type);
        }
        let spec = builder.build().map_err(|e| e.to_string())?;

        Ok(vec![ConfiguredTrip {
            name: format!("{origin} to {destination}"),
            spec,
        }])
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let trips = match args.trips() {
        Ok(trips) => trips,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    // Serve canned responses when a mock data directory is given
    if let Some(dir) = &args.mock_dir {
        return match MockFetcher::from_dir(dir) {
            Ok(mock) => run(TripClient::new(mock), &trips).await,
            Err(e) => {
                eprintln!("Failed to load mock data: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let api_key = args.api_key.unwrap_or_else(|| {
        eprintln!("Warning: TNSW_API_KEY not set. API calls will fail.");
        String::new()
    });

    match TnswClient::new(TnswConfig::new(api_key)) {
        Ok(client) => run(TripClient::new(client), &trips).await,
        Err(e) => {
            eprintln!("Failed to create Transport NSW client: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run<F: Fetch>(client: TripClient<F>, trips: &[ConfiguredTrip]) -> ExitCode {
    let specs: Vec<TripSpec> = trips.iter().map(|t| t.spec.clone()).collect();
    let results = client.query_all(&specs).await;

    let mut failed = false;
    for (trip, result) in trips.iter().zip(results) {
        println!("== {} ==", trip.name);
        match result {
            Ok(journeys) if journeys.is_empty() => println!("No upcoming journeys"),
            Ok(journeys) => {
                for (i, journey) in journeys.iter().enumerate() {
                    print_journey(i + 1, journey);
                }
            }
            Err(e) => {
                eprintln!("Query failed: {e}");
                failed = true;
            }
        }
        println!();
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_journey(position: usize, journey: &JourneyRecord) {
    let now = Utc::now().fixed_offset();
    let mode = journey.mode.map_or("unknown".to_string(), |m| m.to_string());
    let line = journey
        .line
        .as_ref()
        .and_then(|l| l.short_name.clone().or_else(|| l.number.clone()))
        .unwrap_or_default();

    println!(
        "{position}. {} ({} min) {mode} {line}",
        journey.departure.format("%H:%M"),
        journey.minutes_until_departure(now)
    );
    if let Some(origin) = &journey.origin {
        println!("   From: {}", origin.name.as_deref().unwrap_or(&origin.id));
    }
    if let Some(destination) = &journey.destination {
        println!(
            "   To:   {}",
            destination.name.as_deref().unwrap_or(&destination.id)
        );
    }
    if let Some(arrival) = journey.arrival {
        println!("   Arrives: {}", arrival.format("%H:%M"));
    }
    if let Some(transfers) = journey.transfers {
        println!("   Changes: {transfers}");
    }
    match journey.delay {
        Some(delay) if !delay.is_zero() => println!("   Delay: {} min", delay.num_minutes()),
        Some(_) => println!("   On time"),
        None => println!("   Scheduled (no real-time data)"),
    }
    if let Some(fare) = &journey.fare
        && let Some(price) = fare.price_display()
    {
        println!("   Fare ({}): ${price}", fare.fare_type);
    }
}
