//! Run metrics for dataset generation.
//!
//! Collects what a run produced and how it got there:
//! - Timing and generation rate
//! - Delivery status mix and on-time rate
//! - Cost outliers
//! - How often mode or carrier resolution fell back
//! - Records per shipment mode
//! - Bytes written per table
//!
//! # Design
//!
//! A plain struct updated once per record by the caller, then summarized.
//! Not thread-safe; generation is single-threaded.

use crate::record::{DeliveryStatus, ShipmentRecord};
use crate::sampler::SamplerStats;
use crate::writer::WriteSummary;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Metrics for one generation run.
#[derive(Debug, Clone)]
pub struct GenerationMetrics {
    // === Timing ===
    /// When generation started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Records ===
    /// Records generated
    pub rows: u64,

    pub delivered: u64,
    pub delayed: u64,
    pub early: u64,

    /// Invoices with an injected billing spike
    pub cost_outliers: u64,

    /// Records per shipment mode name
    pub per_mode: BTreeMap<&'static str, u64>,

    // === Resolution ===
    /// Mode filters left no candidate
    pub mode_fallbacks: u64,

    /// Drawn carrier supported no candidate mode
    pub carrier_mode_fallbacks: u64,

    /// No carrier served the route class
    pub unconstrained_carriers: u64,

    // === Output ===
    pub raw_bytes: u64,
    pub processed_bytes: u64,
}

impl GenerationMetrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            rows: 0,
            delivered: 0,
            delayed: 0,
            early: 0,
            cost_outliers: 0,
            per_mode: BTreeMap::new(),
            mode_fallbacks: 0,
            carrier_mode_fallbacks: 0,
            unconstrained_carriers: 0,
            raw_bytes: 0,
            processed_bytes: 0,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Total duration (or elapsed so far if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Count one generated record.
    pub fn record(&mut self, record: &ShipmentRecord) {
        self.rows += 1;

        match record.status {
            DeliveryStatus::Delivered => self.delivered += 1,
            DeliveryStatus::Delayed => self.delayed += 1,
            DeliveryStatus::Early => self.early += 1,
        }

        if record.is_cost_outlier {
            self.cost_outliers += 1;
        }

        *self.per_mode.entry(record.shipment_mode).or_insert(0) += 1;
    }

    /// Take over the sampler's resolution counters.
    pub fn absorb(&mut self, stats: SamplerStats) {
        self.mode_fallbacks = stats.mode_fallbacks;
        self.carrier_mode_fallbacks = stats.carrier_mode_fallbacks;
        self.unconstrained_carriers = stats.unconstrained_carriers;
    }

    pub fn set_written(&mut self, summary: WriteSummary) {
        self.raw_bytes = summary.raw_bytes;
        self.processed_bytes = summary.processed_bytes;
    }

    /// (delivered + early) / rows.
    pub fn on_time_rate(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            (self.delivered + self.early) as f64 / self.rows as f64
        }
    }

    pub fn outlier_rate(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            self.cost_outliers as f64 / self.rows as f64
        }
    }

    /// Records generated per second.
    pub fn rows_per_sec(&self) -> f64 {
        let secs = self.duration().as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.rows as f64 / secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Generation Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!("Rows: {}", self.rows);
        println!("Rate: {:.0} rows/s", self.rows_per_sec());
        println!();

        println!("=== Delivery ===");
        println!("Delivered: {}", self.delivered);
        println!("Delayed: {}", self.delayed);
        println!("Early: {}", self.early);
        println!("On-time rate: {:.1}%", self.on_time_rate() * 100.0);
        println!("Cost outliers: {} ({:.2}%)", self.cost_outliers, self.outlier_rate() * 100.0);
        println!();

        println!("=== Modes ===");
        for (mode, count) in &self.per_mode {
            println!("{:<14} {}", mode, count);
        }
        println!("Mode fallbacks: {}", self.mode_fallbacks);
        println!("Carrier mode fallbacks: {}", self.carrier_mode_fallbacks);
        println!("Unconstrained carriers: {}", self.unconstrained_carriers);
        println!();

        println!("=== Output ===");
        println!("Raw: {} bytes ({:.2} MiB)", self.raw_bytes, self.raw_bytes as f64 / 1024.0 / 1024.0);
        println!(
            "Processed: {} bytes ({:.2} MiB)",
            self.processed_bytes,
            self.processed_bytes as f64 / 1024.0 / 1024.0
        );
        println!();
    }

    /// Export metrics as `key=value` lines.
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             rows={}\n\
             delivered={}\n\
             delayed={}\n\
             early={}\n\
             on_time_rate={:.4}\n\
             cost_outliers={}\n\
             mode_fallbacks={}\n\
             carrier_mode_fallbacks={}\n\
             raw_bytes={}\n\
             processed_bytes={}\n",
            self.duration().as_millis(),
            self.rows,
            self.delivered,
            self.delayed,
            self.early,
            self.on_time_rate(),
            self.cost_outliers,
            self.mode_fallbacks,
            self.carrier_mode_fallbacks,
            self.raw_bytes,
            self.processed_bytes,
        )
    }
}

impl Default for GenerationMetrics {
    fn default() -> Self {
        Self::new()
    }
}
