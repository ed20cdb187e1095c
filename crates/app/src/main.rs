//! freight-synth: writes the mock logistics dataset.
//!
//! Generates every shipment with one seeded RNG, then writes the raw and
//! processed tables and prints a run summary.

mod config;

use config::{Command, Config};
use freight_synth_core::metrics::GenerationMetrics;
use freight_synth_core::{write_dataset, Registry, ShipmentSampler};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn run(config: &Config) -> freight_synth_core::Result<GenerationMetrics> {
    let mut metrics = GenerationMetrics::new();

    let registry = Registry::standard();
    let mut sampler = ShipmentSampler::new(&registry, config.generation.clone())?;
    let records = sampler.generate()?;

    records.iter().for_each(|r| metrics.record(r));
    metrics.absorb(sampler.stats());

    let written = write_dataset(&records, &config.raw_out, &config.processed_out)?;
    metrics.set_written(written);
    metrics.complete();

    Ok(metrics)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            config::print_help();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run with --help for usage");
            return ExitCode::from(2);
        }
    };

    setup_logging(config.verbose, config.quiet);

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(metrics) => {
            if config.print_metrics && !config.quiet {
                metrics.print_summary();
            }
            if let Some(path) = &config.metrics_out {
                if let Err(e) = std::fs::write(path, metrics.export_text()) {
                    error!("failed to write metrics to {}: {}", path.display(), e);
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("generation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
