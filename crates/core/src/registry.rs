//! Reference data for the shipment network.
//!
//! Every table the generator consults lives here: destinations and their
//! alternative routes, product categories, shipment modes, carriers and
//! their product specializations, seasonal multipliers, and the monthly
//! congestion pattern derived for each route.
//!
//! # Design
//!
//! The tables are authored as `const` data and assembled once into a
//! [`Registry`] value by [`Registry::standard`]. The registry is never
//! mutated afterwards; the sampler borrows it for the whole run.
//!
//! Lookups are over a closed key set. A miss means the tables are
//! inconsistent, so it is returned as a [`RegistryError`] and generation
//! stops. The only defined fallback is the neutral specialization score for
//! carrier/product pairs that are not rated.

use crate::error::{RegistryError, Result};
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

/// City every shipment leaves from.
pub const ORIGIN_CITY: &str = "Gurugram";

/// Country of the origin; destinations in this country are domestic.
pub const ORIGIN_COUNTRY: &str = "India";

/// Name of the manufacturing site at the origin.
pub const MANUFACTURING_SITE: &str = "Gurugram Mfg Hub";

/// Number of product IDs reserved for each category.
pub const PRODUCTS_PER_CATEGORY: usize = 20;

/// Number of customer accounts (`CUST001`..).
pub const CUSTOMER_COUNT: usize = 50;

/// Specialization score used when a carrier has no rating for a category.
pub const DEFAULT_SPECIALIZATION: u8 = 5;

// ============================================================================
// Modes
// ============================================================================

/// Shipment modes, in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModeKind {
    Road,
    Rail,
    AirCargo,
    Sea,
    ExpressAir,
    ExpressRoad,
}

impl ModeKind {
    /// All modes in registry order.
    pub const ALL: [ModeKind; 6] = [
        ModeKind::Road,
        ModeKind::Rail,
        ModeKind::AirCargo,
        ModeKind::Sea,
        ModeKind::ExpressAir,
        ModeKind::ExpressRoad,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ModeKind::Road => "Road",
            ModeKind::Rail => "Rail",
            ModeKind::AirCargo => "Air Cargo",
            ModeKind::Sea => "Sea",
            ModeKind::ExpressAir => "Express Air",
            ModeKind::ExpressRoad => "Express Road",
        }
    }

    /// Air Cargo or Express Air.
    pub fn is_air(self) -> bool {
        matches!(self, ModeKind::AirCargo | ModeKind::ExpressAir)
    }

    /// Express Air or Express Road.
    pub fn is_express(self) -> bool {
        matches!(self, ModeKind::ExpressAir | ModeKind::ExpressRoad)
    }

    /// Modes suited to heavy or voluminous loads.
    pub fn is_surface(self) -> bool {
        matches!(self, ModeKind::Road | ModeKind::Rail | ModeKind::Sea)
    }

    /// Modes whose halts are mostly terminal dwell rather than road stops.
    pub fn is_line_haul(self) -> bool {
        matches!(self, ModeKind::AirCargo | ModeKind::Sea | ModeKind::ExpressAir)
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Physical and commercial parameters of a mode.
#[derive(Debug, Clone, Copy)]
pub struct ShipmentMode {
    pub kind: ModeKind,

    /// Cruising speed in km/h
    pub speed_kph: f64,

    /// Base rate per 100 km per billable kg (USD)
    pub cost_per_100km_per_kg: f64,

    /// Flat fee per shipment (USD)
    pub fixed_fee: f64,

    /// Longest distance this mode is offered for
    pub distance_limit_km: f64,

    /// kg charged per m³ of volume
    pub volumetric_factor: f64,

    /// kg CO2 per tonne-km
    pub emissions_factor: f64,
}

const MODES: [ShipmentMode; 6] = [
    ShipmentMode {
        kind: ModeKind::Road,
        speed_kph: 40.0,
        cost_per_100km_per_kg: 0.5,
        fixed_fee: 20.0,
        distance_limit_km: 3000.0,
        volumetric_factor: 250.0,
        emissions_factor: 0.06,
    },
    ShipmentMode {
        kind: ModeKind::Rail,
        speed_kph: 30.0,
        cost_per_100km_per_kg: 0.4,
        fixed_fee: 30.0,
        distance_limit_km: 3000.0,
        volumetric_factor: 200.0,
        emissions_factor: 0.02,
    },
    ShipmentMode {
        kind: ModeKind::AirCargo,
        speed_kph: 700.0,
        cost_per_100km_per_kg: 3.0,
        fixed_fee: 100.0,
        distance_limit_km: 20000.0,
        volumetric_factor: 167.0,
        emissions_factor: 0.8,
    },
    ShipmentMode {
        kind: ModeKind::Sea,
        speed_kph: 25.0,
        cost_per_100km_per_kg: 0.1,
        fixed_fee: 150.0,
        distance_limit_km: 30000.0,
        volumetric_factor: 1000.0,
        emissions_factor: 0.01,
    },
    ShipmentMode {
        kind: ModeKind::ExpressAir,
        speed_kph: 1000.0,
        cost_per_100km_per_kg: 5.0,
        fixed_fee: 50.0,
        distance_limit_km: 20000.0,
        volumetric_factor: 200.0,
        emissions_factor: 1.0,
    },
    ShipmentMode {
        kind: ModeKind::ExpressRoad,
        speed_kph: 50.0,
        cost_per_100km_per_kg: 0.8,
        fixed_fee: 30.0,
        distance_limit_km: 1500.0,
        volumetric_factor: 250.0,
        emissions_factor: 0.07,
    },
];

// ============================================================================
// Destinations and routes
// ============================================================================

/// Domestic or international leg, decided by the destination country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Domestic,
    International,
}

impl RouteClass {
    pub fn for_country(country: &str) -> Self {
        if country == ORIGIN_COUNTRY {
            RouteClass::Domestic
        } else {
            RouteClass::International
        }
    }

    /// Prefix of a carrier focus tag that serves this class.
    fn focus_prefix(self) -> &'static str {
        match self {
            RouteClass::Domestic => "Domestic",
            RouteClass::International => "International",
        }
    }
}

/// A destination city with its OD-pair selection weight.
#[derive(Debug, Clone, Copy)]
pub struct Destination {
    pub city: &'static str,
    pub country: &'static str,
    pub weight: f64,
}

impl Destination {
    pub fn class(&self) -> RouteClass {
        RouteClass::for_country(self.country)
    }
}

const DESTINATIONS: [Destination; 17] = [
    Destination { city: "Mumbai", country: "India", weight: 10.0 },
    Destination { city: "Chennai", country: "India", weight: 8.0 },
    Destination { city: "Bangalore", country: "India", weight: 8.0 },
    Destination { city: "Kolkata", country: "India", weight: 6.0 },
    Destination { city: "Pune", country: "India", weight: 7.0 },
    Destination { city: "Ahmedabad", country: "India", weight: 5.0 },
    Destination { city: "Jaipur", country: "India", weight: 4.0 },
    Destination { city: "New York", country: "United States", weight: 5.0 },
    Destination { city: "Los Angeles", country: "United States", weight: 4.0 },
    Destination { city: "Frankfurt", country: "Germany", weight: 6.0 },
    Destination { city: "London", country: "United Kingdom", weight: 6.0 },
    Destination { city: "Dubai", country: "United Arab Emirates", weight: 9.0 },
    Destination { city: "Singapore", country: "Singapore", weight: 5.0 },
    Destination { city: "Sydney", country: "Australia", weight: 3.0 },
    Destination { city: "Shanghai", country: "China", weight: 4.0 },
    Destination { city: "Tokyo", country: "Japan", weight: 3.0 },
    Destination { city: "Toronto", country: "Canada", weight: 2.0 },
];

/// Baseline travel time of a route.
#[derive(Debug, Clone, Copy)]
pub enum TravelTime {
    /// Same for every mode (domestic surface routes)
    Hours(f64),
    /// Per-mode hours (intercontinental legs)
    PerMode(&'static [(ModeKind, f64)]),
}

impl TravelTime {
    pub fn hours_for(&self, mode: ModeKind) -> Option<f64> {
        match self {
            TravelTime::Hours(h) => Some(*h),
            TravelTime::PerMode(table) => table.iter().find(|(m, _)| *m == mode).map(|(_, h)| *h),
        }
    }
}

/// One path from the origin to a destination.
#[derive(Debug, Clone, Copy)]
pub struct RouteOption {
    pub destination: &'static str,
    pub name: &'static str,
    pub distance_km: f64,
    pub travel_time: TravelTime,

    /// Static difficulty multiplier, >= 1.0
    pub complexity: f64,
}

const fn route(
    destination: &'static str,
    name: &'static str,
    distance_km: f64,
    travel_time: TravelTime,
    complexity: f64,
) -> RouteOption {
    RouteOption {
        destination,
        name,
        distance_km,
        travel_time,
        complexity,
    }
}

const fn intercontinental(air: f64, sea: f64, express: f64) -> [(ModeKind, f64); 3] {
    [
        (ModeKind::AirCargo, air),
        (ModeKind::Sea, sea),
        (ModeKind::ExpressAir, express),
    ]
}

const NY_HOURS: [(ModeKind, f64); 3] = intercontinental(120.0, 720.0, 72.0);
const LA_HOURS: [(ModeKind, f64); 3] = intercontinental(130.0, 750.0, 78.0);
const FRA_HOURS: [(ModeKind, f64); 3] = intercontinental(80.0, 500.0, 48.0);
const LDN_HOURS: [(ModeKind, f64); 3] = intercontinental(85.0, 520.0, 50.0);
const DXB_HOURS: [(ModeKind, f64); 3] = intercontinental(24.0, 120.0, 18.0);
const SIN_HOURS: [(ModeKind, f64); 3] = intercontinental(48.0, 200.0, 30.0);
const SYD_HOURS: [(ModeKind, f64); 3] = intercontinental(150.0, 600.0, 96.0);
const SHA_HOURS: [(ModeKind, f64); 3] = intercontinental(55.0, 250.0, 36.0);
const TYO_HOURS: [(ModeKind, f64); 3] = intercontinental(70.0, 300.0, 42.0);
const YYZ_HOURS: [(ModeKind, f64); 3] = intercontinental(125.0, 700.0, 75.0);

const ROUTES: [RouteOption; 21] = [
    route("Mumbai", "NH 48 Direct", 1400.0, TravelTime::Hours(28.0), 1.1),
    route("Mumbai", "Via Jaipur-Udaipur", 1450.0, TravelTime::Hours(30.0), 1.2),
    route("Mumbai", "Via Agra-Indore", 1500.0, TravelTime::Hours(32.0), 1.3),
    route("Chennai", "NH 44 South", 2200.0, TravelTime::Hours(40.0), 1.2),
    route("Chennai", "East Coast detour", 2350.0, TravelTime::Hours(45.0), 1.4),
    route("Bangalore", "NH 44 Standard", 2150.0, TravelTime::Hours(38.0), 1.1),
    route("Bangalore", "Western Bypass", 2200.0, TravelTime::Hours(40.0), 1.2),
    route("Kolkata", "NH 19 East", 1500.0, TravelTime::Hours(30.0), 1.0),
    route("Pune", "Standard Route", 1450.0, TravelTime::Hours(29.0), 1.0),
    route("Ahmedabad", "NH 48 West", 800.0, TravelTime::Hours(14.0), 1.0),
    route("Jaipur", "NH 48 Short", 300.0, TravelTime::Hours(5.0), 1.0),
    route("New York", "Air/Sea Route NY", 12000.0, TravelTime::PerMode(&NY_HOURS), 1.3),
    route("Los Angeles", "Air/Sea Route LA", 13500.0, TravelTime::PerMode(&LA_HOURS), 1.3),
    route("Frankfurt", "Air/Sea Route FRA", 6500.0, TravelTime::PerMode(&FRA_HOURS), 1.1),
    route("London", "Air/Sea Route LDN", 6700.0, TravelTime::PerMode(&LDN_HOURS), 1.2),
    route("Dubai", "Air/Sea Route DXB", 2200.0, TravelTime::PerMode(&DXB_HOURS), 1.0),
    route("Singapore", "Air/Sea Route SIN", 4000.0, TravelTime::PerMode(&SIN_HOURS), 1.0),
    route("Sydney", "Air/Sea Route SYD", 10000.0, TravelTime::PerMode(&SYD_HOURS), 1.4),
    route("Shanghai", "Air/Sea Route SHA", 4500.0, TravelTime::PerMode(&SHA_HOURS), 1.2),
    route("Tokyo", "Air/Sea Route TYO", 5800.0, TravelTime::PerMode(&TYO_HOURS), 1.1),
    route("Toronto", "Air/Sea Route YYZ", 11500.0, TravelTime::PerMode(&YYZ_HOURS), 1.3),
];

// ============================================================================
// Products
// ============================================================================

/// Handling class of a product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Fragile,
    TemperatureControlled,
    GeneralGoods,
    HeavyBulky,
    Hazardous,
}

impl ContentType {
    pub fn label(self) -> &'static str {
        match self {
            ContentType::Fragile => "Fragile",
            ContentType::TemperatureControlled => "Temperature Controlled",
            ContentType::GeneralGoods => "General Goods",
            ContentType::HeavyBulky => "Heavy/Bulky",
            ContentType::Hazardous => "Hazardous",
        }
    }

    /// Content that carries special-handling surcharges.
    pub fn needs_special_handling(self) -> bool {
        matches!(self, ContentType::Hazardous | ContentType::TemperatureControlled)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProductCategory {
    pub name: &'static str,

    /// kg per unit (min, max)
    pub weight_per_unit: (f64, f64),

    /// m³ per unit (min, max)
    pub volume_per_unit: (f64, f64),

    /// USD per unit (min, max)
    pub value_per_unit: (f64, f64),

    pub content_type: ContentType,

    /// Relative order frequency
    pub weight: f64,
}

impl ProductCategory {
    /// Largest line-item quantity ordered for this category.
    pub fn max_quantity(&self) -> u32 {
        match self.content_type {
            ContentType::HeavyBulky | ContentType::Hazardous => 20,
            _ => 500,
        }
    }
}

const CATEGORIES: [ProductCategory; 6] = [
    ProductCategory {
        name: "Electronics",
        weight_per_unit: (0.1, 5.0),
        volume_per_unit: (0.001, 0.05),
        value_per_unit: (100.0, 5000.0),
        content_type: ContentType::Fragile,
        weight: 10.0,
    },
    ProductCategory {
        name: "Pharma",
        weight_per_unit: (0.05, 2.0),
        volume_per_unit: (0.0005, 0.02),
        value_per_unit: (50.0, 2000.0),
        content_type: ContentType::TemperatureControlled,
        weight: 8.0,
    },
    ProductCategory {
        name: "Textiles",
        weight_per_unit: (0.2, 10.0),
        volume_per_unit: (0.005, 0.1),
        value_per_unit: (10.0, 500.0),
        content_type: ContentType::GeneralGoods,
        weight: 12.0,
    },
    ProductCategory {
        name: "Machinery Parts",
        weight_per_unit: (5.0, 500.0),
        volume_per_unit: (0.05, 5.0),
        value_per_unit: (500.0, 10000.0),
        content_type: ContentType::HeavyBulky,
        weight: 5.0,
    },
    ProductCategory {
        name: "Consumer Goods",
        weight_per_unit: (0.5, 15.0),
        volume_per_unit: (0.01, 0.2),
        value_per_unit: (20.0, 300.0),
        content_type: ContentType::GeneralGoods,
        weight: 15.0,
    },
    ProductCategory {
        name: "Hazardous Materials",
        weight_per_unit: (1.0, 200.0),
        volume_per_unit: (0.01, 1.0),
        value_per_unit: (100.0, 5000.0),
        content_type: ContentType::Hazardous,
        weight: 1.0,
    },
];

// ============================================================================
// Carriers
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Transporter {
    pub name: &'static str,
    pub modes: &'static [ModeKind],
    pub cost_modifier: f64,
    pub speed_modifier: f64,

    /// e.g. "Domestic/Surface", "International/Sea"
    pub focus: &'static str,

    /// 1-10 fit score per product category
    pub specialization: &'static [(&'static str, u8)],
}

impl Transporter {
    pub fn supports(&self, mode: ModeKind) -> bool {
        self.modes.contains(&mode)
    }

    pub fn serves(&self, class: RouteClass) -> bool {
        self.focus.contains(class.focus_prefix())
    }

    pub fn specialization_for(&self, category: &str) -> u8 {
        self.specialization
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(DEFAULT_SPECIALIZATION, |(_, score)| *score)
    }
}

const fn scores(
    electronics: u8,
    pharma: u8,
    textiles: u8,
    machinery: u8,
    consumer: u8,
    hazardous: u8,
) -> [(&'static str, u8); 6] {
    [
        ("Electronics", electronics),
        ("Pharma", pharma),
        ("Textiles", textiles),
        ("Machinery Parts", machinery),
        ("Consumer Goods", consumer),
        ("Hazardous Materials", hazardous),
    ]
}

const BLUE_DART_SCORES: [(&str, u8); 6] = scores(9, 8, 6, 5, 8, 4);
const DELHIVERY_SCORES: [(&str, u8); 6] = scores(8, 7, 7, 6, 9, 5);
const SAFEEXPRESS_SCORES: [(&str, u8); 6] = scores(5, 6, 9, 8, 7, 7);
const GATI_SCORES: [(&str, u8); 6] = scores(7, 6, 8, 7, 8, 6);
const DHL_SCORES: [(&str, u8); 6] = scores(10, 9, 7, 6, 8, 5);
const FEDEX_SCORES: [(&str, u8); 6] = scores(9, 9, 7, 6, 8, 5);
const OCEAN_SCORES: [(&str, u8); 6] = scores(4, 5, 10, 9, 6, 8);
const LOCAL_SCORES: [(&str, u8); 6] = scores(5, 5, 7, 6, 7, 6);

const FULL_NETWORK: [ModeKind; 4] = [
    ModeKind::AirCargo,
    ModeKind::ExpressAir,
    ModeKind::Road,
    ModeKind::ExpressRoad,
];
const AIR_ONLY: [ModeKind; 2] = [ModeKind::AirCargo, ModeKind::ExpressAir];

const CARRIERS: [Transporter; 9] = [
    Transporter {
        name: "Blue Dart",
        modes: &FULL_NETWORK,
        cost_modifier: 1.1,
        speed_modifier: 1.2,
        focus: "Domestic/Premium",
        specialization: &BLUE_DART_SCORES,
    },
    Transporter {
        name: "Delhivery",
        modes: &FULL_NETWORK,
        cost_modifier: 0.95,
        speed_modifier: 1.0,
        focus: "Domestic/WideNetwork",
        specialization: &DELHIVERY_SCORES,
    },
    Transporter {
        name: "Safeexpress",
        modes: &[ModeKind::Road, ModeKind::Rail],
        cost_modifier: 0.9,
        speed_modifier: 0.9,
        focus: "Domestic/Surface",
        specialization: &SAFEEXPRESS_SCORES,
    },
    Transporter {
        name: "Gati",
        modes: &[ModeKind::Road, ModeKind::AirCargo],
        cost_modifier: 1.0,
        speed_modifier: 1.05,
        focus: "Domestic/Integrated",
        specialization: &GATI_SCORES,
    },
    Transporter {
        name: "DHL",
        modes: &AIR_ONLY,
        cost_modifier: 1.3,
        speed_modifier: 1.3,
        focus: "International/Premium",
        specialization: &DHL_SCORES,
    },
    Transporter {
        name: "FedEx",
        modes: &AIR_ONLY,
        cost_modifier: 1.25,
        speed_modifier: 1.25,
        focus: "International/Premium",
        specialization: &FEDEX_SCORES,
    },
    Transporter {
        name: "Maersk",
        modes: &[ModeKind::Sea],
        cost_modifier: 0.85,
        speed_modifier: 0.8,
        focus: "International/Sea",
        specialization: &OCEAN_SCORES,
    },
    Transporter {
        name: "MSC",
        modes: &[ModeKind::Sea],
        cost_modifier: 0.88,
        speed_modifier: 0.82,
        focus: "International/Sea",
        specialization: &OCEAN_SCORES,
    },
    Transporter {
        name: "Local Carriers",
        modes: &[ModeKind::Road],
        cost_modifier: 0.7,
        speed_modifier: 0.8,
        focus: "Domestic/Local/Budget",
        specialization: &LOCAL_SCORES,
    },
];

// ============================================================================
// Seasonality, service, packaging, weather
// ============================================================================

/// Cost and delay multipliers for a calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalFactor {
    pub cost: f64,
    pub delay: f64,
}

const fn season(cost: f64, delay: f64) -> SeasonalFactor {
    SeasonalFactor { cost, delay }
}

// Fog in January, monsoon June-August, festival season October-December.
const SEASONAL: [SeasonalFactor; 12] = [
    season(1.05, 1.1),
    season(1.0, 1.0),
    season(1.0, 1.0),
    season(0.98, 0.95),
    season(0.95, 0.95),
    season(1.0, 1.05),
    season(1.08, 1.25),
    season(1.05, 1.15),
    season(1.0, 1.0),
    season(1.1, 1.05),
    season(1.2, 1.15),
    season(1.15, 1.1),
];

// (month index, multiplier)
const MAJOR_HIGHWAY_CONGESTION: [(usize, f64); 5] = [(6, 1.2), (7, 1.3), (9, 1.2), (10, 1.4), (11, 1.3)];
const ALTERNATE_ROUTE_CONGESTION: [(usize, f64); 4] = [(6, 1.3), (7, 1.4), (9, 1.1), (10, 1.2)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceLevel {
    Standard,
    Express,
    Critical,
}

impl ServiceLevel {
    pub const WEIGHTED: [(ServiceLevel, f64); 3] = [
        (ServiceLevel::Standard, 0.7),
        (ServiceLevel::Express, 0.2),
        (ServiceLevel::Critical, 0.1),
    ];

    pub fn label(self) -> &'static str {
        match self {
            ServiceLevel::Standard => "Standard",
            ServiceLevel::Express => "Express",
            ServiceLevel::Critical => "Critical",
        }
    }

    pub fn speed_modifier(self) -> f64 {
        match self {
            ServiceLevel::Standard => 1.0,
            ServiceLevel::Express => 1.2,
            ServiceLevel::Critical => 1.5,
        }
    }

    pub fn is_urgent(self) -> bool {
        !matches!(self, ServiceLevel::Standard)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packaging {
    Box,
    Pallet,
    Crate,
    Carton,
    Loose,
}

impl Packaging {
    pub const WEIGHTED: [(Packaging, f64); 5] = [
        (Packaging::Box, 4.0),
        (Packaging::Pallet, 3.0),
        (Packaging::Crate, 1.0),
        (Packaging::Carton, 4.0),
        (Packaging::Loose, 2.0),
    ];

    pub fn label(self) -> &'static str {
        match self {
            Packaging::Box => "Box",
            Packaging::Pallet => "Pallet",
            Packaging::Crate => "Crate",
            Packaging::Carton => "Carton",
            Packaging::Loose => "Loose",
        }
    }

    /// Average m³ held by one unit of this packaging (0 for loose cargo).
    pub fn standard_volume_m3(self) -> f64 {
        match self {
            Packaging::Box => 0.1,
            Packaging::Pallet => 1.5,
            Packaging::Crate => 2.0,
            Packaging::Carton => 0.05,
            Packaging::Loose => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weather {
    Clear,
    MinorRainFog,
    ModerateRainFog,
    Severe,
}

impl Weather {
    pub const WEIGHTED: [(Weather, f64); 4] = [
        (Weather::Clear, 0.7),
        (Weather::MinorRainFog, 0.2),
        (Weather::ModerateRainFog, 0.07),
        (Weather::Severe, 0.03),
    ];

    pub fn label(self) -> &'static str {
        match self {
            Weather::Clear => "None",
            Weather::MinorRainFog => "Minor Rain/Fog",
            Weather::ModerateRainFog => "Moderate Rain/Fog",
            Weather::Severe => "Severe Weather",
        }
    }

    pub fn speed_modifier(self) -> f64 {
        match self {
            Weather::Clear => 1.0,
            Weather::MinorRainFog => 0.98,
            Weather::ModerateRainFog => 0.9,
            Weather::Severe => 0.7,
        }
    }

    /// Weather bad enough to add unscheduled halts.
    pub fn is_disruptive(self) -> bool {
        matches!(self, Weather::ModerateRainFog | Weather::Severe)
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Immutable reference tables for one generation run.
#[derive(Debug, Clone)]
pub struct Registry {
    destinations: Vec<Destination>,
    routes: Vec<RouteOption>,
    categories: Vec<ProductCategory>,
    modes: Vec<ShipmentMode>,
    carriers: Vec<Transporter>,
    seasonal: [SeasonalFactor; 12],
    congestion: HashMap<&'static str, [f64; 12]>,
    customer_ids: Vec<String>,
    product_ids: Vec<String>,
}

impl Registry {
    /// Assemble the standard network: one origin, 17 destinations.
    pub fn standard() -> Self {
        // A route without a destination gets no congestion entry, so any
        // lookup of it fails as `UnknownRoute`
        let congestion = ROUTES
            .iter()
            .filter_map(|r| {
                let destination = DESTINATIONS.iter().find(|d| d.city == r.destination);
                debug_assert!(destination.is_some(), "route {} has unknown destination {}", r.name, r.destination);
                destination.map(|d| (r.name, congestion_pattern(r, d.class())))
            })
            .collect();

        Self {
            destinations: DESTINATIONS.to_vec(),
            routes: ROUTES.to_vec(),
            categories: CATEGORIES.to_vec(),
            modes: MODES.to_vec(),
            carriers: CARRIERS.to_vec(),
            seasonal: SEASONAL,
            congestion,
            customer_ids: (1..=CUSTOMER_COUNT).map(|i| format!("CUST{:03}", i)).collect(),
            product_ids: (1..=CATEGORIES.len() * PRODUCTS_PER_CATEGORY)
                .map(|i| format!("PROD{:04}", i))
                .collect(),
        }
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// All route options leaving the origin, in table order.
    pub fn routes(&self) -> &[RouteOption] {
        &self.routes
    }

    /// Alternative routes to a destination city.
    pub fn routes_for(&self, destination: &str) -> Result<Vec<&RouteOption>> {
        let options: Vec<&RouteOption> = self
            .routes
            .iter()
            .filter(|r| r.destination == destination)
            .collect();

        if options.is_empty() {
            return Err(RegistryError::NoRoutes {
                origin: ORIGIN_CITY,
                destination: destination.to_string(),
            }
            .into());
        }
        Ok(options)
    }

    pub fn categories(&self) -> &[ProductCategory] {
        &self.categories
    }

    /// Product IDs reserved for the category at `index`.
    pub fn product_ids(&self, index: usize) -> Result<&[String]> {
        let range: Range<usize> = index * PRODUCTS_PER_CATEGORY..(index + 1) * PRODUCTS_PER_CATEGORY;
        self.product_ids
            .get(range)
            .ok_or_else(|| RegistryError::UnknownCategory(index).into())
    }

    pub fn mode(&self, kind: ModeKind) -> &ShipmentMode {
        // MODES is authored in ModeKind::ALL order
        &self.modes[kind as usize]
    }

    /// Modes whose distance limit covers `distance_km`, in registry order.
    pub fn modes_within(&self, distance_km: f64) -> Vec<ModeKind> {
        self.modes
            .iter()
            .filter(|m| distance_km <= m.distance_limit_km)
            .map(|m| m.kind)
            .collect()
    }

    pub fn carriers(&self) -> &[Transporter] {
        &self.carriers
    }

    pub fn carrier(&self, name: &str) -> Result<&Transporter> {
        self.carriers
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| RegistryError::UnknownCarrier(name.to_string()).into())
    }

    /// Fit score of a carrier for a product category (default 5).
    pub fn specialization(&self, carrier: &str, category: &str) -> u8 {
        self.carrier(carrier)
            .map_or(DEFAULT_SPECIALIZATION, |c| c.specialization_for(category))
    }

    /// Seasonal multipliers for a 1-based calendar month.
    pub fn seasonal(&self, month: u32) -> Result<SeasonalFactor> {
        month_index(month).map(|i| self.seasonal[i])
    }

    /// Congestion multiplier for a route in a 1-based calendar month.
    pub fn congestion(&self, route: &str, month: u32) -> Result<f64> {
        let index = month_index(month)?;
        self.congestion
            .get(route)
            .map(|pattern| pattern[index])
            .ok_or_else(|| RegistryError::UnknownRoute(route.to_string()).into())
    }

    pub fn customer_ids(&self) -> &[String] {
        &self.customer_ids
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

fn month_index(month: u32) -> Result<usize> {
    if (1..=12).contains(&month) {
        Ok(month as usize - 1)
    } else {
        Err(RegistryError::InvalidMonth(month).into())
    }
}

/// Monthly congestion for a route: base complexity, raised on domestic
/// highways during monsoon and festival months.
fn congestion_pattern(route: &RouteOption, class: RouteClass) -> [f64; 12] {
    let mut monthly = [route.complexity; 12];

    if class == RouteClass::Domestic {
        let adjustments: &[(usize, f64)] = if route.name.contains("NH 48") || route.name.contains("NH 44") {
            &MAJOR_HIGHWAY_CONGESTION
        } else if route.name.contains("Via") || route.name.contains("detour") {
            &ALTERNATE_ROUTE_CONGESTION
        } else {
            &[]
        };

        for &(month, factor) in adjustments {
            monthly[month] *= factor;
        }
    }

    monthly
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_destination_has_routes() {
        let registry = Registry::standard();

        for dest in registry.destinations() {
            let routes = registry.routes_for(dest.city).unwrap();
            assert!(!routes.is_empty(), "{} has no routes", dest.city);
        }
    }

    #[test]
    fn test_every_route_has_a_destination() {
        let registry = Registry::standard();

        for route in registry.routes() {
            assert!(
                registry.destinations().iter().any(|d| d.city == route.destination),
                "route {} points at unknown city {}",
                route.name,
                route.destination
            );
            assert!(route.complexity >= 1.0);
        }
    }

    #[test]
    fn test_unknown_destination() {
        let registry = Registry::standard();
        assert!(matches!(
            registry.routes_for("Atlantis"),
            Err(crate::Error::Registry(RegistryError::NoRoutes { .. }))
        ));
    }

    #[test]
    fn test_intercontinental_travel_times_cover_international_modes() {
        let registry = Registry::standard();

        for route in registry.routes() {
            if let TravelTime::PerMode(_) = route.travel_time {
                for mode in [ModeKind::AirCargo, ModeKind::Sea, ModeKind::ExpressAir] {
                    assert!(route.travel_time.hours_for(mode).is_some());
                }
                assert!(route.travel_time.hours_for(ModeKind::Rail).is_none());
            }
        }
    }

    #[test]
    fn test_mode_lookup_matches_kind() {
        let registry = Registry::standard();
        for kind in ModeKind::ALL {
            assert_eq!(registry.mode(kind).kind, kind);
        }
    }

    #[test]
    fn test_modes_within_distance() {
        let registry = Registry::standard();

        assert_eq!(registry.modes_within(300.0).len(), 6);
        // Express Road stops at 1500 km, Road/Rail at 3000 km
        assert!(!registry.modes_within(2200.0).contains(&ModeKind::ExpressRoad));
        assert_eq!(
            registry.modes_within(12000.0),
            vec![ModeKind::AirCargo, ModeKind::Sea, ModeKind::ExpressAir]
        );
    }

    #[test]
    fn test_product_id_blocks() {
        let registry = Registry::standard();

        let first = registry.product_ids(0).unwrap();
        assert_eq!(first.len(), PRODUCTS_PER_CATEGORY);
        assert_eq!(first[0], "PROD0001");
        assert_eq!(first[19], "PROD0020");

        let last = registry.product_ids(5).unwrap();
        assert_eq!(last[19], "PROD0120");

        assert!(registry.product_ids(6).is_err());
    }

    #[test]
    fn test_specialization_default() {
        let registry = Registry::standard();

        assert_eq!(registry.specialization("DHL", "Electronics"), 10);
        assert_eq!(registry.specialization("DHL", "Unrated Widgets"), DEFAULT_SPECIALIZATION);
        assert_eq!(registry.specialization("Unknown Co", "Pharma"), DEFAULT_SPECIALIZATION);
    }

    #[test]
    fn test_seasonal_months() {
        let registry = Registry::standard();

        assert_eq!(registry.seasonal(7).unwrap(), SeasonalFactor { cost: 1.08, delay: 1.25 });
        assert_eq!(registry.seasonal(11).unwrap().cost, 1.2);
        assert!(registry.seasonal(0).is_err());
        assert!(registry.seasonal(13).is_err());
    }

    #[test]
    fn test_congestion_major_highway() {
        let registry = Registry::standard();

        // NH 48 Direct: complexity 1.1, November x1.4
        let nov = registry.congestion("NH 48 Direct", 11).unwrap();
        assert!((nov - 1.1 * 1.4).abs() < 1e-9);

        let march = registry.congestion("NH 48 Direct", 3).unwrap();
        assert_eq!(march, 1.1);
    }

    #[test]
    fn test_congestion_alternate_route() {
        let registry = Registry::standard();

        // Via Agra-Indore: complexity 1.3, August x1.4, December unchanged
        let aug = registry.congestion("Via Agra-Indore", 8).unwrap();
        assert!((aug - 1.3 * 1.4).abs() < 1e-9);
        assert_eq!(registry.congestion("Via Agra-Indore", 12).unwrap(), 1.3);
    }

    #[test]
    fn test_congestion_international_is_flat() {
        let registry = Registry::standard();

        for month in 1..=12 {
            assert_eq!(registry.congestion("Air/Sea Route NY", month).unwrap(), 1.3);
        }
        assert!(registry.congestion("Unknown Route", 1).is_err());
    }

    #[test]
    fn test_every_route_has_congestion_pattern() {
        let registry = Registry::standard();

        for route in registry.routes() {
            for month in 1..=12 {
                assert!(registry.congestion(route.name, month).is_ok());
            }
        }
    }

    #[test]
    fn test_route_class() {
        let registry = Registry::standard();

        let domestic = registry.destinations().iter().filter(|d| d.class() == RouteClass::Domestic).count();
        assert_eq!(domestic, 7);
        assert_eq!(registry.destinations().len() - domestic, 10);
    }

    #[test]
    fn test_carrier_focus() {
        let registry = Registry::standard();

        let maersk = registry.carrier("Maersk").unwrap();
        assert!(maersk.serves(RouteClass::International));
        assert!(!maersk.serves(RouteClass::Domestic));

        let local = registry.carrier("Local Carriers").unwrap();
        assert!(local.serves(RouteClass::Domestic));
        assert!(registry.carrier("Nobody").is_err());
    }

    #[test]
    fn test_customers() {
        let registry = Registry::standard();
        let ids = registry.customer_ids();
        assert_eq!(ids.len(), CUSTOMER_COUNT);
        assert_eq!(ids[0], "CUST001");
        assert_eq!(ids[49], "CUST050");
    }
}
