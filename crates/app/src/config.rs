//! Configuration for the freight-synth application.
//!
//! Handles parsing command-line arguments into a run configuration.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: no flags is the canonical run
//! (seed 42, 10000 rows, 2023-01-01..2024-12-31, default output paths).
//! Every flag is an override of that contract.

use chrono::NaiveDate;
use freight_synth_core::GenerationConfig;
use std::path::PathBuf;

/// Default raw table location.
pub const DEFAULT_RAW_OUT: &str = "data/raw/raw_logistics_data.csv";

/// Default processed table location.
pub const DEFAULT_PROCESSED_OUT: &str = "data/processed/processed_logistics_data.csv";

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Config),
    Help,
}

/// Complete configuration for a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // === Generation ===
    pub generation: GenerationConfig,

    // === Files ===
    /// Raw table output path
    pub raw_out: PathBuf,

    /// Processed table output path
    pub processed_out: PathBuf,

    /// Where to write `key=value` run metrics (None = don't)
    pub metrics_out: Option<PathBuf>,

    // === Behavior ===
    /// Whether to print the resolved config
    pub print_config: bool,

    /// Whether to print the metrics summary
    pub print_metrics: bool,

    /// Debug-level logging
    pub verbose: bool,

    /// Errors only
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            raw_out: PathBuf::from(DEFAULT_RAW_OUT),
            processed_out: PathBuf::from(DEFAULT_PROCESSED_OUT),
            metrics_out: None,
            print_config: false,
            print_metrics: true,
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Parse configuration from command-line arguments (program name excluded).
    pub fn from_args(args: &[String]) -> Result<Command, String> {
        let mut config = Config::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--rows" => {
                    config.generation.rows = parse_number(next_value(args, &mut i, "--rows requires a number")?, "rows")?;
                }
                "--seed" => {
                    config.generation.seed = parse_number(next_value(args, &mut i, "--seed requires a number")?, "seed")?;
                }
                "--start" => {
                    config.generation.start_date = parse_date(next_value(args, &mut i, "--start requires a date")?)?;
                }
                "--end" => {
                    config.generation.end_date = parse_date(next_value(args, &mut i, "--end requires a date")?)?;
                }
                "--raw-out" => {
                    config.raw_out = PathBuf::from(next_value(args, &mut i, "--raw-out requires a path")?);
                }
                "--processed-out" => {
                    config.processed_out = PathBuf::from(next_value(args, &mut i, "--processed-out requires a path")?);
                }
                "--metrics-out" => {
                    config.metrics_out = Some(PathBuf::from(next_value(args, &mut i, "--metrics-out requires a path")?));
                }
                "--print-config" => {
                    config.print_config = true;
                }
                "--no-metrics" => {
                    config.print_metrics = false;
                }
                "--verbose" | "-v" => {
                    config.verbose = true;
                }
                "--quiet" | "-q" => {
                    config.quiet = true;
                }
                "--help" | "-h" => {
                    return Ok(Command::Help);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        config.generation.validate().map_err(|e| e.to_string())?;

        Ok(Command::Run(config))
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Rows: {}", self.generation.rows);
        println!("Seed: {}", self.generation.seed);
        println!("Order dates: {} .. {}", self.generation.start_date, self.generation.end_date);
        println!();
        println!("Raw table:       {}", self.raw_out.display());
        println!("Processed table: {}", self.processed_out.display());
        if let Some(path) = &self.metrics_out {
            println!("Metrics:         {}", path.display());
        }
        println!();
    }
}

/// Advance past a flag and return its value.
fn next_value<'a>(args: &'a [String], i: &mut usize, missing: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i).map(String::as_str).ok_or_else(|| missing.to_string())
}

fn parse_number<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, String> {
    value.parse().map_err(|_| format!("invalid {}: {}", name, value))
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| format!("invalid date (expected YYYY-MM-DD): {}", value))
}

pub fn print_help() {
    println!("freight-synth: Synthetic freight shipment dataset generator");
    println!();
    println!("USAGE:");
    println!("    freight-synth [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --rows <N>               Shipments to generate (default: 10000)");
    println!("    --seed <N>               Random seed (default: 42)");
    println!("    --start <YYYY-MM-DD>     First order date (default: 2023-01-01)");
    println!("    --end <YYYY-MM-DD>       Last order date (default: 2024-12-31)");
    println!();
    println!("    --raw-out <PATH>         Raw table (default: {})", DEFAULT_RAW_OUT);
    println!("    --processed-out <PATH>   Processed table (default: {})", DEFAULT_PROCESSED_OUT);
    println!();
    println!("    --metrics-out <PATH>     Write run metrics as key=value lines");
    println!();
    println!("    --print-config           Print resolved configuration");
    println!("    --no-metrics             Don't print metrics summary");
    println!("    --verbose, -v            Debug logging");
    println!("    --quiet, -q              Errors only");
    println!("    --help, -h               Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    freight-synth                            # Canonical dataset");
    println!("    freight-synth --rows 100 --seed 7        # Small deterministic sample");
    println!("    freight-synth --start 2024-01-01 -q      # One year, errors only");
    println!();
}
