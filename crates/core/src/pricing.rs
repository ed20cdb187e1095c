//! Freight pricing: billable weight, quoted cost, and simulated invoice.
//!
//! # Quote
//!
//! ```text
//! distance_cost = distance/100 * base_rate * billable_kg * slab_multiplier
//! quote         = (distance_cost + fixed_fee) * carrier_cost_mod
//!               + distance_cost * 20%                      (fuel)
//! quote         = max(quote, minimum_charge) * (1 ± 1%)     (noise)
//! quote         = max(10, round2(quote))
//! ```
//!
//! # Invoice
//!
//! The actual cost starts from the quote, swaps the flat fuel surcharge for
//! a resampled rate inflated by route deviation, may pick up an unexpected
//! surcharge, is scaled by the seasonal cost factor, and occasionally
//! spikes to model billing outliers.

use crate::registry::{ContentType, ShipmentMode, Transporter};
use crate::sampling::{chance, round_to, uniform};
use rand::Rng;

/// Fuel surcharge assumed in the quote, as a share of distance cost.
pub const FUEL_SURCHARGE_RATE: f64 = 0.20;

/// No quote or invoice is ever below this.
pub const MIN_COST_USD: f64 = 10.0;

/// Chance of an invoice spike.
const OUTLIER_PROBABILITY: f64 = 0.02;

/// Base chance of an unexpected surcharge, scaled by the seasonal cost factor.
const SURCHARGE_PROBABILITY: f64 = 0.15;

/// Routes above this complexity attract larger surcharges.
const COMPLEX_ROUTE_THRESHOLD: f64 = 1.2;

/// (lower kg inclusive, upper kg exclusive, multiplier); heavier is cheaper per kg.
const WEIGHT_SLABS: [(f64, f64, f64); 6] = [
    (0.0, 5.0, 2.0),
    (5.0, 10.0, 1.5),
    (10.0, 25.0, 1.2),
    (25.0, 100.0, 1.0),
    (100.0, 500.0, 0.8),
    (500.0, f64::INFINITY, 0.6),
];

/// max(actual weight, volume x the mode's volumetric factor).
pub fn billable_weight(weight_kg: f64, volume_m3: f64, mode: &ShipmentMode) -> f64 {
    let volumetric_kg = round_to(volume_m3 * mode.volumetric_factor, 2);
    weight_kg.max(volumetric_kg)
}

/// Per-kg rate multiplier for a billable weight.
pub fn weight_slab_multiplier(billable_kg: f64) -> f64 {
    WEIGHT_SLABS
        .iter()
        .find(|(low, high, _)| billable_kg >= *low && billable_kg < *high)
        .map_or(1.0, |(_, _, multiplier)| *multiplier)
}

/// Floor applied to a quote before noise.
pub fn minimum_charge(distance_km: f64) -> f64 {
    if distance_km < 1000.0 {
        50.0
    } else {
        100.0
    }
}

/// A carrier's quote for one shipment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    /// Distance-driven component, before fixed fee and modifiers
    pub distance_cost: f64,

    /// Fuel surcharge included in the quote
    pub fuel_surcharge: f64,

    /// Quoted total (USD, 2dp)
    pub total: f64,
}

/// Price a shipment.
pub fn quote<R: Rng + ?Sized>(
    distance_km: f64,
    billable_kg: f64,
    mode: &ShipmentMode,
    carrier: &Transporter,
    rng: &mut R,
) -> Quote {
    let distance_cost =
        (distance_km / 100.0) * mode.cost_per_100km_per_kg * billable_kg * weight_slab_multiplier(billable_kg);
    let fuel_surcharge = distance_cost * FUEL_SURCHARGE_RATE;

    let mut total = (distance_cost + mode.fixed_fee) * carrier.cost_modifier + fuel_surcharge;
    total = total.max(minimum_charge(distance_km));
    total += total * uniform(rng, -0.01, 0.01);

    Quote {
        distance_cost,
        fuel_surcharge,
        total: round_to(total, 2).max(MIN_COST_USD),
    }
}

/// Conditions that move the invoice away from the quote.
#[derive(Debug, Clone, Copy)]
pub struct InvoiceConditions {
    pub seasonal_cost: f64,
    pub complexity: f64,
    pub route_deviation: f64,
    pub content_type: ContentType,
}

/// Simulated final invoice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Invoice {
    /// Invoiced total (USD, 2dp)
    pub total: f64,

    /// Unexpected surcharge applied before the seasonal factor (USD)
    pub surcharge: f64,

    /// Whether a billing spike was injected
    pub is_outlier: bool,
}

/// Simulate what the carrier actually bills.
pub fn invoice<R: Rng + ?Sized>(quote: &Quote, conditions: &InvoiceConditions, rng: &mut R) -> Invoice {
    let mut total = quote.total;

    let fuel = quote.distance_cost * uniform(rng, 0.18, 0.28) * conditions.route_deviation;
    total += fuel - quote.fuel_surcharge;

    let mut surcharge = 0.0;
    if chance(rng, SURCHARGE_PROBABILITY * conditions.seasonal_cost) {
        surcharge = uniform(rng, 10.0, 150.0);
        if conditions.complexity > COMPLEX_ROUTE_THRESHOLD {
            surcharge *= uniform(rng, 1.0, 1.5);
        }
        if conditions.content_type.needs_special_handling() {
            surcharge *= uniform(rng, 1.0, 1.3);
        }
        surcharge *= conditions.seasonal_cost;
    }
    total += surcharge;

    total *= conditions.seasonal_cost;

    let is_outlier = chance(rng, OUTLIER_PROBABILITY);
    if is_outlier {
        total += uniform(rng, 0.8 * total, 3.0 * total);
    }

    Invoice {
        total: round_to(total, 2).max(MIN_COST_USD),
        surcharge,
        is_outlier,
    }
}

/// Invoiced cost per billable kg; 0 when nothing is billable.
pub fn cost_per_billable_kg(actual_usd: f64, billable_kg: f64) -> f64 {
    if billable_kg > 0.0 {
        round_to(actual_usd / billable_kg, 2)
    } else {
        0.0
    }
}

/// (actual - proposed, that difference as a percent of proposed).
pub fn price_variance(actual_usd: f64, proposed_usd: f64) -> (f64, f64) {
    let variance = round_to(actual_usd - proposed_usd, 2);
    let percent = if proposed_usd > 0.0 {
        round_to(variance / proposed_usd * 100.0, 2)
    } else {
        0.0
    };
    (variance, percent)
}

/// kg CO2 for moving the billable load over the (deviated) route.
pub fn carbon_emissions(distance_km: f64, billable_kg: f64, mode: &ShipmentMode, route_deviation: f64) -> f64 {
    let tonnes = billable_kg / 1000.0;
    round_to((distance_km * tonnes * mode.emissions_factor * route_deviation).max(0.0), 2)
}
