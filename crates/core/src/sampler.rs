//! The record sampler: one seeded loop producing every shipment.
//!
//! # Design
//!
//! [`ShipmentSampler`] owns the run's only RNG (ChaCha8, seeded once) and
//! borrows the [`Registry`]. Each call to [`ShipmentSampler::sample`] draws
//! every random input for one shipment, derives the physical and commercial
//! quantities, and returns a finished [`ShipmentRecord`]. A record is either
//! fully derived or the call fails; nothing is retried or partially kept.
//!
//! # Determinism
//!
//! Draw order is fixed by the code, so a given seed and configuration always
//! yield the same records.

use crate::error::{Error, RegistryError, Result};
use crate::modes::{self, ModeQuery, ResolutionPath};
use crate::pricing::{self, billable_weight, carbon_emissions, cost_per_billable_kg, price_variance, InvoiceConditions};
use crate::record::{DeliveryStatus, ShipmentRecord};
use crate::registry::{
    Destination, Packaging, Registry, ServiceLevel, Weather, MANUFACTURING_SITE, ORIGIN_CITY, ORIGIN_COUNTRY,
};
use crate::sampling::{choose, round_to, uniform, WeightedTable};
use crate::transit::{delay_days, expected_delivery_days, simulate_journey, JourneyConditions};
use chrono::{Datelike, Days, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, trace};

/// Parameters of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Number of shipments to generate
    pub rows: usize,

    /// RNG seed; the same seed reproduces the same dataset
    pub seed: u64,

    /// First possible order date (inclusive)
    pub start_date: NaiveDate,

    /// Last possible order date (inclusive)
    pub end_date: NaiveDate,
}

impl GenerationConfig {
    pub const DEFAULT_ROWS: usize = 10_000;
    pub const DEFAULT_SEED: u64 = 42;

    /// Reject an inverted date range, or one ending too close to the
    /// calendar limit to hold the shipping jitter.
    pub fn validate(&self) -> Result<()> {
        if self.end_date < self.start_date {
            return Err(Error::Config(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }
        if self.end_date.checked_add_days(Days::new(MAX_SHIP_DELAY_DAYS)).is_none() {
            return Err(Error::Config(format!(
                "end date {} leaves no room for shipment dates",
                self.end_date
            )));
        }
        Ok(())
    }
}

/// Longest gap between order and shipment.
pub const MAX_SHIP_DELAY_DAYS: u64 = 3;

/// `date + days`, or a config error past the last representable date.
fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| Error::Config(format!("{} + {} days is out of the calendar range", date, days)))
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            rows: Self::DEFAULT_ROWS,
            seed: Self::DEFAULT_SEED,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(NaiveDate::MIN),
        }
    }
}

/// Counters describing how records were resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamplerStats {
    /// Records produced
    pub records: u64,

    /// Mode filters emptied the candidate set
    pub mode_fallbacks: u64,

    /// Drawn carrier supported none of the candidate modes
    pub carrier_mode_fallbacks: u64,

    /// No carrier served the route class
    pub unconstrained_carriers: u64,
}

/// Packed volume relative to the standard packaging volume.
///
/// Loose cargo has no standard volume, so its efficiency is 1.0.
pub fn packaging_efficiency(volume_m3: f64, packaging: Packaging, quantity: u32) -> f64 {
    let standard = packaging.standard_volume_m3();
    if standard > 0.0 && quantity > 0 {
        round_to(volume_m3 / (standard * f64::from(quantity)), 2)
    } else {
        1.0
    }
}

/// Seeded generator of shipment records.
pub struct ShipmentSampler<'r> {
    registry: &'r Registry,
    config: GenerationConfig,
    rng: ChaCha8Rng,

    // Categorical draws, built once
    destinations: WeightedTable<&'r Destination>,
    categories: WeightedTable<usize>,
    service_levels: WeightedTable<ServiceLevel>,
    packaging: WeightedTable<Packaging>,
    weather: WeightedTable<Weather>,

    /// Days between start and end date
    span_days: u64,

    next_index: usize,
    stats: SamplerStats,
}

impl<'r> ShipmentSampler<'r> {
    /// Create a sampler over `registry` for the given run.
    pub fn new(registry: &'r Registry, config: GenerationConfig) -> Result<Self> {
        config.validate()?;

        let span_days = (config.end_date - config.start_date).num_days().unsigned_abs();

        Ok(Self {
            registry,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            destinations: WeightedTable::new(
                registry.destinations().iter().map(|d| (d, d.weight)),
                "destination",
            )?,
            categories: WeightedTable::new(
                registry.categories().iter().enumerate().map(|(i, c)| (i, c.weight)),
                "product category",
            )?,
            service_levels: WeightedTable::new(ServiceLevel::WEIGHTED, "service level")?,
            packaging: WeightedTable::new(Packaging::WEIGHTED, "packaging")?,
            weather: WeightedTable::new(Weather::WEIGHTED, "weather")?,
            span_days,
            next_index: 0,
            stats: SamplerStats::default(),
            config,
        })
    }

    pub fn stats(&self) -> SamplerStats {
        self.stats
    }

    /// Generate all configured rows.
    pub fn generate(&mut self) -> Result<Vec<ShipmentRecord>> {
        info!(
            rows = self.config.rows,
            seed = self.config.seed,
            start = %self.config.start_date,
            end = %self.config.end_date,
            "generating shipments"
        );

        let mut records = Vec::with_capacity(self.config.rows);
        for _ in 0..self.config.rows {
            records.push(self.sample()?);
        }

        info!(
            records = records.len(),
            mode_fallbacks = self.stats.mode_fallbacks,
            "generation complete"
        );
        Ok(records)
    }

    /// Produce the next shipment record.
    pub fn sample(&mut self) -> Result<ShipmentRecord> {
        let registry = self.registry;
        let rng = &mut self.rng;

        let index = self.next_index;
        self.next_index += 1;

        // === Dates ===
        let order_date = add_days(self.config.start_date, rng.gen_range(0..=self.span_days))?;
        let shipment_date = add_days(order_date, rng.gen_range(0..=MAX_SHIP_DELAY_DAYS))?;
        let month = shipment_date.month();

        // === Route ===
        let destination = *self.destinations.sample(rng);
        let routes = registry.routes_for(destination.city)?;
        let route = *choose(rng, &routes, "route")?;
        let class = destination.class();
        let congestion = registry.congestion(route.name, month)?;
        let season = registry.seasonal(month)?;

        // === Customer and product ===
        let customer_id = choose(rng, registry.customer_ids(), "customer")?.clone();
        let service_level = *self.service_levels.sample(rng);
        let category_index = *self.categories.sample(rng);
        let category = &registry.categories()[category_index];
        let product_id = choose(rng, registry.product_ids(category_index)?, "product")?.clone();

        let quantity = rng.gen_range(1..=category.max_quantity());
        let units = f64::from(quantity);
        let unit_price = round_to(uniform(rng, category.value_per_unit.0, category.value_per_unit.1), 2);
        let pack_price = round_to(unit_price * uniform(rng, 0.98, 1.02), 2);
        let line_item_value = round_to(units * unit_price, 2);
        let weight_kg = round_to(units * uniform(rng, category.weight_per_unit.0, category.weight_per_unit.1), 2);
        let volume_m3 = round_to(units * uniform(rng, category.volume_per_unit.0, category.volume_per_unit.1), 3);

        let packaging = *self.packaging.sample(rng);
        let efficiency = packaging_efficiency(volume_m3, packaging, quantity);

        // === Mode and carrier ===
        let query = ModeQuery {
            distance_km: route.distance_km,
            content_type: category.content_type,
            service_level,
            class,
            weight_kg,
            volume_m3,
            category: category.name,
        };
        let resolution = modes::resolve(registry, &query, rng)?;
        match resolution.path {
            ResolutionPath::Filtered => {}
            ResolutionPath::ModeFallback => self.stats.mode_fallbacks += 1,
            ResolutionPath::CarrierModeFallback => self.stats.carrier_mode_fallbacks += 1,
            ResolutionPath::Unconstrained => self.stats.unconstrained_carriers += 1,
        }
        let mode = registry.mode(resolution.mode);
        let carrier = resolution.carrier;

        // === Quote ===
        let billable_kg = billable_weight(weight_kg, volume_m3, mode);
        let quote = pricing::quote(route.distance_km, billable_kg, mode, carrier, rng);

        // === Timing ===
        let base_hours = route
            .travel_time
            .hours_for(mode.kind)
            .ok_or_else(|| RegistryError::MissingTravelTime {
                route: route.name.to_string(),
                mode: mode.kind.name(),
            })?;
        let expected_days =
            expected_delivery_days(base_hours, carrier.speed_modifier, service_level, route.complexity, rng);

        let weather = *self.weather.sample(rng);
        let journey = simulate_journey(
            mode,
            &JourneyConditions {
                distance_km: route.distance_km,
                complexity: route.complexity,
                congestion,
                seasonal_delay: season.delay,
                class,
                weather,
            },
            rng,
        );

        let delay = delay_days(journey.actual_days, expected_days);
        let status = DeliveryStatus::from_delay(delay);
        let actual_delivery_date = add_days(shipment_date, journey.actual_days.round() as u64)?;

        // === Invoice ===
        let invoice = pricing::invoice(
            &quote,
            &InvoiceConditions {
                seasonal_cost: season.cost,
                complexity: route.complexity,
                route_deviation: journey.route_deviation,
                content_type: category.content_type,
            },
            rng,
        );
        let (variance_usd, variance_pct) = price_variance(invoice.total, quote.total);

        self.stats.records += 1;

        let record = ShipmentRecord {
            shipment_id: format!("SHIP{:05}", index + 1),
            order_date,
            shipment_date,
            actual_delivery_date,
            origin_city: ORIGIN_CITY,
            origin_country: ORIGIN_COUNTRY,
            manufacturing_site: MANUFACTURING_SITE,
            destination_country: destination.country,
            destination_city: destination.city,
            route_name: route.name,
            distance_km: route.distance_km,
            customer_id,
            service_level: service_level.label(),
            product_id,
            product_category: category.name,
            content_type: category.content_type.label(),
            packaging_type: packaging.label(),
            packaging_efficiency: efficiency,
            quantity,
            unit_price_usd: unit_price,
            pack_price_usd: pack_price,
            line_item_value_usd: line_item_value,
            weight_kg,
            volume_m3,
            billable_weight_kg: billable_kg,
            shipment_mode: mode.kind.name(),
            transporter: carrier.name,
            carrier_fit_score: registry.specialization(carrier.name, category.name),
            expected_delivery_days: expected_days,
            actual_delivery_days: journey.actual_days,
            delay_days: delay,
            avg_speed_kph: round_to(journey.avg_speed_kph, 1),
            halt_hours: journey.halt_hours,
            route_deviation: round_to(journey.route_deviation, 2),
            weather: weather.label(),
            customs_delay_hours: journey.customs_hours,
            congestion_factor: round_to(congestion, 2),
            seasonal_cost_factor: season.cost,
            seasonal_delay_factor: season.delay,
            proposed_cost_usd: quote.total,
            actual_cost_usd: invoice.total,
            cost_per_billable_kg_usd: cost_per_billable_kg(invoice.total, billable_kg),
            price_variance_usd: variance_usd,
            price_variance_pct: variance_pct,
            carbon_emissions_kg: carbon_emissions(route.distance_km, billable_kg, mode, journey.route_deviation),
            status,
            is_cost_outlier: invoice.is_outlier,
        };

        trace!(
            id = %record.shipment_id,
            destination = record.destination_city,
            mode = record.shipment_mode,
            carrier = record.transporter,
            "sampled shipment"
        );

        Ok(record)
    }
}

/// Generate a dataset with the standard registry in one call.
pub fn generate(config: GenerationConfig) -> Result<(Vec<ShipmentRecord>, SamplerStats)> {
    let registry = Registry::standard();
    let mut sampler = ShipmentSampler::new(&registry, config)?;
    let records = sampler.generate()?;
    Ok((records, sampler.stats()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(rows: usize, seed: u64) -> GenerationConfig {
        GenerationConfig {
            rows,
            seed,
            ..GenerationConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = GenerationConfig::default();
        assert_eq!(config.rows, 10_000);
        assert_eq!(config.seed, 42);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(config.end_date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = GenerationConfig {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            ..GenerationConfig::default()
        };
        let registry = Registry::standard();
        assert!(matches!(ShipmentSampler::new(&registry, config), Err(Error::Config(_))));
    }

    #[test]
    fn test_end_date_at_calendar_limit_rejected() {
        let config = GenerationConfig {
            rows: 50,
            seed: 1,
            start_date: NaiveDate::MAX.checked_sub_days(Days::new(10)).unwrap(),
            end_date: NaiveDate::MAX,
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert!(matches!(generate(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_delivery_past_calendar_limit_is_an_error() {
        // Passes validation, but deliveries run past the last date
        let day = NaiveDate::MAX.checked_sub_days(Days::new(MAX_SHIP_DELAY_DAYS)).unwrap();
        let config = GenerationConfig {
            rows: 200,
            seed: 4,
            start_date: day,
            end_date: day,
        };
        assert!(config.validate().is_ok());
        assert!(matches!(generate(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_packaging_efficiency() {
        assert_eq!(packaging_efficiency(5.0, Packaging::Loose, 10), 1.0);
        assert_eq!(packaging_efficiency(0.0, Packaging::Loose, 10), 1.0);
        // 0.5 m³ in 10 boxes of 0.1 m³
        assert_eq!(packaging_efficiency(0.5, Packaging::Box, 10), 0.5);
        assert_eq!(packaging_efficiency(0.5, Packaging::Box, 0), 1.0);
    }

    #[test]
    fn test_ids_and_dates() {
        let registry = Registry::standard();
        let config = small_config(50, 1);
        let (start, end) = (config.start_date, config.end_date);
        let mut sampler = ShipmentSampler::new(&registry, config).unwrap();
        let records = sampler.generate().unwrap();

        assert_eq!(records[0].shipment_id, "SHIP00001");
        assert_eq!(records[49].shipment_id, "SHIP00050");

        for r in &records {
            assert!(r.order_date >= start && r.order_date <= end);
            let jitter = (r.shipment_date - r.order_date).num_days();
            assert!((0..=3).contains(&jitter));
            assert!(r.actual_delivery_date >= r.shipment_date);
        }
        assert_eq!(sampler.stats().records, 50);
    }

    #[test]
    fn test_single_day_range() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let config = GenerationConfig {
            rows: 20,
            seed: 5,
            start_date: day,
            end_date: day,
        };

        let (records, _) = generate(config).unwrap();
        assert!(records.iter().all(|r| r.order_date == day));
    }

    #[test]
    fn test_product_ids_match_category() {
        let registry = Registry::standard();
        let (records, _) = generate(small_config(300, 8)).unwrap();

        for r in &records {
            let index = registry
                .categories()
                .iter()
                .position(|c| c.name == r.product_category)
                .unwrap();
            assert!(registry.product_ids(index).unwrap().contains(&r.product_id));
        }
    }

    #[test]
    fn test_quantity_caps() {
        let (records, _) = generate(small_config(1000, 21)).unwrap();

        for r in &records {
            let cap = match r.product_category {
                "Machinery Parts" | "Hazardous Materials" => 20,
                _ => 500,
            };
            assert!(r.quantity >= 1 && r.quantity <= cap);
        }
    }

    #[test]
    fn test_same_seed_same_records() {
        let (a, _) = generate(small_config(100, 42)).unwrap();
        let (b, _) = generate(small_config(100, 42)).unwrap();
        assert_eq!(a, b);

        let (c, _) = generate(small_config(100, 43)).unwrap();
        assert_ne!(a, c);
    }
}
