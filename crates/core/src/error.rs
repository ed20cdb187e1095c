//! Error types for the freight-synth system.
//!
//! Generation is expected to run to completion. The failures that can occur
//! are configuration defects (a lookup into the reference tables that misses)
//! and output I/O. Both surface as structured errors and abort the run
//! instead of producing a partially derived row.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Registry: a reference-table lookup missed its closed key set
/// - Sampling: a categorical draw was given no items or unusable weights
/// - I/O: writing the output tables
/// - Config: rejected run parameters
#[derive(Debug, Error)]
pub enum Error {
    /// Reference data lookup failed (configuration defect)
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Weighted or uniform draw could not be performed
    #[error("sampling error: {0}")]
    Sampling(#[from] SamplingError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Reference table lookup errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Destination city has no route options
    #[error("no route options for {origin} -> {destination}")]
    NoRoutes {
        origin: &'static str,
        destination: String,
    },

    /// Route name has no congestion pattern
    #[error("unknown route: {0}")]
    UnknownRoute(String),

    /// Carrier name is not in the transporter table
    #[error("unknown carrier: {0}")]
    UnknownCarrier(String),

    /// Intercontinental route has no travel time for the selected mode
    #[error("route {route} has no travel time for mode {mode}")]
    MissingTravelTime { route: String, mode: &'static str },

    /// Calendar month outside 1..=12
    #[error("invalid month: {0}")]
    InvalidMonth(u32),

    /// Product category index has no reserved ID block
    #[error("no product ID block for category index {0}")]
    UnknownCategory(usize),
}

/// Random selection errors.
#[derive(Debug, Error)]
pub enum SamplingError {
    /// Nothing to choose from
    #[error("empty choice set at {site}")]
    EmptyChoice { site: &'static str },

    /// Weights were negative, non-finite, or all zero
    #[error("invalid weights at {site}: {reason}")]
    InvalidWeights { site: &'static str, reason: String },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
