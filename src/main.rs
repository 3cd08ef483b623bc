use clap::Parser;

use iss_locator::config::Config;
use iss_locator::geo::Coordinate;
use iss_locator::location::ServiceResolver;
use iss_locator::server::{self, LocateResponse};

/// ISS Locator — where is the ISS right now, relative to you?
///
/// Fetches the station's current position, computes the great-circle
/// distance to the given observer, and names the spot below the station.
///
/// Requires GEOCODER_API_KEY and GEONAMES_USER in the environment;
/// serve mode additionally requires CLIENT_TOKENS.
///
/// Examples:
///   iss-locator --lat 37.39 --lng -122.08
///   iss-locator --serve --port 8080
#[derive(Parser)]
#[command(name = "iss-locator", version, about, long_about = None)]
struct Cli {
    /// Observer latitude (-90 to 90).
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Observer longitude (-180 to 180).
    #[arg(long, allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Run the HTTP server instead of a one-shot lookup.
    #[arg(long)]
    serve: bool,

    /// Server bind host.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Server bind port.
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn main() {
    let cli = Cli::parse();

    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("Error: Cannot start async runtime: {}", e);
            std::process::exit(1);
        });
        runtime.block_on(server::start(config, &cli.host, cli.port));
        return;
    }

    // ── One-shot lookup ─────────────────────────────────────────

    let observer = match (cli.lat, cli.lng) {
        (Some(lat), Some(lng)) => Coordinate::new(lat, lng),
        _ => {
            eprintln!("Error: No observer given.");
            eprintln!();
            eprintln!("Usage:");
            eprintln!("  iss-locator --lat 37.39 --lng -122.08");
            eprintln!("  iss-locator --serve --port 8080");
            std::process::exit(1);
        }
    };

    if !observer.in_range() {
        eprintln!("Error: Invalid coordinates. Lat: -90..90, Lng: -180..180");
        std::process::exit(1);
    }

    let resolver = ServiceResolver::from_config(&config);
    let result = resolver.locate(observer).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&LocateResponse::from_result(&result)).unwrap()
    );
}
