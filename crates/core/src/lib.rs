//! freight-synth-core: Seeded generator of synthetic freight-shipment data
//!
//! This library produces a reproducible dataset of outbound shipments from a
//! single manufacturing origin and writes it as two CSV tables:
//! - Samples destination, route, customer, product, and service level
//! - Picks a shipment mode and carrier through ordered eligibility filters
//! - Prices the shipment and simulates the invoiced cost
//! - Simulates the journey and classifies the delivery outcome
//!
//! # Architecture
//!
//! - `registry`: Immutable reference data (routes, products, modes, carriers)
//! - `sampling`: Weighted and uniform draws over a caller-owned RNG
//! - `modes`: Mode eligibility filters and carrier selection
//! - `pricing`: Billable weight, quote, invoice, derived cost metrics
//! - `transit`: Expected and simulated delivery time
//! - `record`: The shipment record and its output columns
//! - `sampler`: The per-record generation loop
//! - `writer`: CSV serialization of the raw and processed tables
//! - `metrics`: Run summary
//!
//! # Design Principles
//!
//! - **No panics**: Lookup misses surface as structured errors
//! - **Deterministic**: One seeded ChaCha8 generator drives every draw
//! - **No globals**: The registry is a value passed by reference

pub mod error;
pub mod metrics;
pub mod modes;
pub mod pricing;
pub mod record;
pub mod registry;
pub mod sampler;
pub mod sampling;
pub mod transit;
pub mod writer;

// Re-export commonly used types
pub use error::{Error, Result};
pub use record::{Column, DeliveryStatus, ShipmentRecord, PROCESSED_COLUMNS, RAW_COLUMNS};
pub use registry::Registry;
pub use sampler::{generate, GenerationConfig, SamplerStats, ShipmentSampler};
pub use writer::{write_dataset, WriteSummary};
