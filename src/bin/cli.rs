//! flyby-cli - find great-circle paths passing close to a reference location
//!
//! Usage:
//!   flyby-cli search <locations.csv> --reference <LABEL> [--output <file>]
//!   flyby-cli find <locations.csv> <REGEX>
//!   flyby-cli path <locations.csv> <LABEL>...
//!
//! Location files use the native 13-column CSV layout. Labels look like
//! `ICAO:VRMG`, `IATA:GAN` or `Name:Kudahuvadhoo`.

use clap::{Parser, Subcommand};
use regex::Regex;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use flybymatch::{
    find_pairs_passing_within_radius, locations, max_pairs, records, FlybyConfig, Location,
    LocationKind, Result,
};

#[derive(Parser)]
#[command(name = "flyby-cli")]
#[command(about = "Find location pairs whose great-circle path passes a reference point", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search all airport and waypoint pairs for flybys of a reference location
    Search {
        /// Native location CSV file
        locations: PathBuf,

        /// Label of the reference location, e.g. "Name:Kudahuvadhoo"
        #[arg(short, long)]
        reference: String,

        /// JSON file with search settings; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum path length in km
        #[arg(long)]
        amax: Option<f64>,

        /// Maximum distance from path start to reference in km
        #[arg(long)]
        bmax: Option<f64>,

        /// Maximum distance from path end to reference in km
        #[arg(long)]
        cmax: Option<f64>,

        /// Maximum closest-approach distance in km
        #[arg(long)]
        dmax: Option<f64>,

        /// Heading window in degrees from north, e.g. --heading -45 0
        #[arg(long, num_args = 2, allow_negative_numbers = true)]
        heading: Option<Vec<f64>>,

        /// Number of parallel workers
        #[arg(short, long)]
        workers: Option<usize>,

        /// Output CSV file for results
        #[arg(short, long, default_value = "result.csv")]
        output: PathBuf,
    },

    /// List locations whose name or codes match a regular expression
    Find {
        /// Native location CSV file
        locations: PathBuf,

        /// Regular expression; use \b to match whole words
        pattern: String,
    },

    /// Great-circle length of a path through labelled locations
    Path {
        /// Native location CSV file
        locations: PathBuf,

        /// Location labels in path order
        #[arg(required = true, num_args = 2..)]
        labels: Vec<String>,
    },
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Search {
            locations,
            reference,
            config,
            amax,
            bmax,
            cmax,
            dmax,
            heading,
            workers,
            output,
        } => load_config(config.as_deref()).and_then(|mut cfg| {
            if let Some(v) = amax {
                cfg.amax_km = v;
            }
            if let Some(v) = bmax {
                cfg.bmax_km = v;
            }
            if let Some(v) = cmax {
                cfg.cmax_km = v;
            }
            if let Some(v) = dmax {
                cfg.dmax_km = v;
            }
            if let Some(v) = heading {
                cfg.heading_deg = v;
            }
            if let Some(v) = workers {
                cfg.workers = v;
            }
            run_search(&locations, &reference, &cfg, &output)
        }),
        Commands::Find { locations, pattern } => run_find(&locations, &pattern),
        Commands::Path { locations, labels } => run_path(&locations, &labels),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<FlybyConfig> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            Ok(serde_json::from_reader(BufReader::new(file))?)
        }
        None => Ok(FlybyConfig::default()),
    }
}

fn load_locations(path: &Path) -> Result<Vec<Location>> {
    let file = File::open(path)?;
    let locs = records::read_locations(BufReader::new(file))?;
    log::info!("Read {} locations from {}", locs.len(), path.display());
    Ok(locs)
}

fn run_search(path: &Path, reference: &str, config: &FlybyConfig, output: &Path) -> Result<()> {
    let all = load_locations(path)?;

    // Resolve the reference before culling locations that aren't waypoints or airports
    let reference = locations::require_label(&all, reference)?.clone();
    let filters = config.build_filters(&reference)?;

    let chosen = locations::navigational(all);
    let airports = chosen
        .iter()
        .filter(|l| l.kind == LocationKind::Airport)
        .count();

    println!("\n{}", "=".repeat(60));
    println!("Reference: {}", reference);
    println!("{} airports, {} waypoints", airports, chosen.len() - airports);
    println!(
        "{} great circles from chosen",
        max_pairs(0, chosen.len().saturating_sub(1))?
    );
    println!("{}", "=".repeat(60));

    let start = Instant::now();
    let result = find_pairs_passing_within_radius(&chosen, filters)?;
    println!(
        "Found {} pairs fitting criteria in {:.1?}",
        result.matches.len(),
        start.elapsed()
    );
    for stats in &result.workers {
        println!(
            "  worker {:2}: tried {:10} avoided {:10} found {:6} ({}ms)",
            stats.partition.index, stats.tried, stats.avoided, stats.found, stats.elapsed_ms
        );
    }

    println!(
        "Writing {} results to {}",
        result.matches.len(),
        output.display()
    );
    records::save_flybys(output, &result.matches)?;
    Ok(())
}

fn run_find(path: &Path, pattern: &str) -> Result<()> {
    let all = load_locations(path)?;
    let regex = Regex::new(pattern)?;
    let found = locations::find_matching(&all, &regex);

    println!(
        "Results matching regular expression {:?} from {} locations:",
        pattern,
        all.len()
    );
    for loc in &found {
        println!("  {}", loc);
    }
    println!("{} found", found.len());
    Ok(())
}

fn run_path(path: &Path, labels: &[String]) -> Result<()> {
    let all = load_locations(path)?;
    let stops = locations::resolve_labels(&all, labels)?;
    println!(
        "Great circle path length across {} locations is {:.1} km",
        stops.len(),
        locations::path_length_km(&stops)
    );
    Ok(())
}
