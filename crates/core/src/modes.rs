//! Shipment mode and carrier resolution.
//!
//! # Pipeline
//!
//! Candidate modes start as every mode whose distance limit covers the
//! route, then pass through ordered filter stages:
//!
//! 1. **content**: hazardous and temperature-controlled goods only travel
//!    by compatible modes
//! 2. **urgency**: Express/Critical service keeps express or air modes, or
//!    plain Road on short hauls
//! 3. **route class**: domestic legs exclude Sea, international legs only
//!    fly or sail
//! 4. **load**: when more than one mode survives, heavy/bulky loads keep
//!    surface modes and light loads keep express/air modes
//!
//! Each stage is a pure function over the candidate list and may leave it
//! empty. An empty list resolves to the terminal fallback (Road under
//! 1500 km, else Air Cargo).
//!
//! A carrier is then drawn among those offering a candidate mode and
//! serving the route class, weighted by mode fit and product
//! specialization, and the mode is drawn among the carrier's supported
//! candidates.

use crate::error::Result;
use crate::registry::{ContentType, ModeKind, Registry, RouteClass, ServiceLevel, Transporter};
use crate::sampling::{choose, WeightedTable};
use rand::Rng;
use tracing::{debug, trace};

/// Distance under which the fallback mode is Road.
const FALLBACK_ROAD_LIMIT_KM: f64 = 1500.0;

/// Distance under which plain Road still counts as urgent-capable.
const URGENT_ROAD_LIMIT_KM: f64 = 1000.0;

/// Weight bonus for carriers offering the primary candidate mode.
const MODE_FIT_BONUS: f64 = 1.5;

/// Shipment attributes that constrain the mode.
#[derive(Debug, Clone, Copy)]
pub struct ModeQuery<'a> {
    pub distance_km: f64,
    pub content_type: ContentType,
    pub service_level: ServiceLevel,
    pub class: RouteClass,
    pub weight_kg: f64,
    pub volume_m3: f64,

    /// Product category name, for carrier specialization
    pub category: &'a str,
}

/// How the final mode/carrier pair was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionPath {
    /// Filters left candidates and a focused carrier supports one
    Filtered,
    /// Filters emptied the candidate set; fixed fallback mode used
    ModeFallback,
    /// Drawn carrier supports none of the candidates
    CarrierModeFallback,
    /// No carrier matched the route class; carrier and mode unconstrained
    Unconstrained,
}

/// Selected mode and carrier for one shipment.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'r> {
    pub mode: ModeKind,
    pub carrier: &'r Transporter,
    pub path: ResolutionPath,
}

type ModeStage = fn(&ModeQuery<'_>, Vec<ModeKind>) -> Vec<ModeKind>;

/// Filter stages, applied in order after distance eligibility.
const STAGES: [(&str, ModeStage); 4] = [
    ("content", by_content),
    ("urgency", by_urgency),
    ("route class", by_route_class),
    ("load", by_load),
];

fn by_content(query: &ModeQuery<'_>, mut modes: Vec<ModeKind>) -> Vec<ModeKind> {
    match query.content_type {
        ContentType::Hazardous => {
            modes.retain(|m| matches!(m, ModeKind::Road | ModeKind::Sea | ModeKind::AirCargo))
        }
        ContentType::TemperatureControlled => {
            modes.retain(|m| matches!(m, ModeKind::AirCargo | ModeKind::ExpressAir | ModeKind::Road))
        }
        _ => {}
    }
    modes
}

fn by_urgency(query: &ModeQuery<'_>, mut modes: Vec<ModeKind>) -> Vec<ModeKind> {
    if query.service_level.is_urgent() {
        modes.retain(|m| {
            m.is_express() || m.is_air() || (*m == ModeKind::Road && query.distance_km < URGENT_ROAD_LIMIT_KM)
        });
    }
    modes
}

fn by_route_class(query: &ModeQuery<'_>, mut modes: Vec<ModeKind>) -> Vec<ModeKind> {
    match query.class {
        RouteClass::Domestic => modes.retain(|m| *m != ModeKind::Sea),
        RouteClass::International => {
            modes.retain(|m| matches!(m, ModeKind::AirCargo | ModeKind::Sea | ModeKind::ExpressAir))
        }
    }
    modes
}

fn by_load(query: &ModeQuery<'_>, mut modes: Vec<ModeKind>) -> Vec<ModeKind> {
    if modes.len() <= 1 {
        return modes;
    }

    if query.weight_kg > 500.0 || query.volume_m3 > 3.0 {
        modes.retain(|m| m.is_surface());
    } else if query.weight_kg < 10.0 || (query.volume_m3 < 0.1 && query.service_level.is_urgent()) {
        modes.retain(|m| m.is_express() || m.is_air());
    }
    modes
}

/// Candidate modes after distance eligibility and every filter stage.
///
/// May be empty; see [`fallback_mode`].
pub fn candidate_modes(registry: &Registry, query: &ModeQuery<'_>) -> Vec<ModeKind> {
    STAGES
        .iter()
        .fold(registry.modes_within(query.distance_km), |modes, (name, stage)| {
            let modes = stage(query, modes);
            trace!(stage = *name, remaining = modes.len(), "mode filter");
            modes
        })
}

/// Mode used when the filters leave nothing.
pub fn fallback_mode(distance_km: f64) -> ModeKind {
    if distance_km < FALLBACK_ROAD_LIMIT_KM {
        ModeKind::Road
    } else {
        ModeKind::AirCargo
    }
}

/// Resolve the mode and carrier for a shipment.
pub fn resolve<'r, R: Rng + ?Sized>(
    registry: &'r Registry,
    query: &ModeQuery<'_>,
    rng: &mut R,
) -> Result<Resolution<'r>> {
    let mut candidates = candidate_modes(registry, query);
    let mut path = ResolutionPath::Filtered;

    if candidates.is_empty() {
        let mode = fallback_mode(query.distance_km);
        debug!(
            distance_km = query.distance_km,
            category = query.category,
            fallback = mode.name(),
            "mode filters left no candidates"
        );
        candidates.push(mode);
        path = ResolutionPath::ModeFallback;
    }

    let eligible: Vec<&Transporter> = registry
        .carriers()
        .iter()
        .filter(|c| candidates.iter().any(|m| c.supports(*m)))
        .filter(|c| c.serves(query.class))
        .collect();

    if eligible.is_empty() {
        let carrier = choose(rng, registry.carriers(), "carrier (unconstrained)")?;
        let mode = *choose(rng, carrier.modes, "carrier mode (unconstrained)")?;
        debug!(carrier = carrier.name, mode = mode.name(), "no carrier serves route class");
        return Ok(Resolution {
            mode,
            carrier,
            path: ResolutionPath::Unconstrained,
        });
    }

    let carrier = *pick_carrier(&eligible, candidates[0], query.category)?.sample(rng);

    let supported: Vec<ModeKind> = candidates.iter().copied().filter(|m| carrier.supports(*m)).collect();
    let mode = if supported.is_empty() {
        path = ResolutionPath::CarrierModeFallback;
        *choose(rng, carrier.modes, "carrier mode")?
    } else {
        *choose(rng, &supported, "candidate mode")?
    };

    Ok(Resolution { mode, carrier, path })
}

/// Mode-fit bonus (carrier runs the primary candidate) times specialization / 5.
fn carrier_weight(carrier: &Transporter, primary: ModeKind, category: &str) -> f64 {
    let fit = if carrier.supports(primary) { MODE_FIT_BONUS } else { 1.0 };
    fit * f64::from(carrier.specialization_for(category)) / 5.0
}

fn pick_carrier<'r>(
    eligible: &[&'r Transporter],
    primary: ModeKind,
    category: &str,
) -> Result<WeightedTable<&'r Transporter>> {
    WeightedTable::new(
        eligible.iter().map(|c| (*c, carrier_weight(c, primary, category))),
        "carrier",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn query(distance_km: f64, content_type: ContentType, class: RouteClass) -> ModeQuery<'static> {
        ModeQuery {
            distance_km,
            content_type,
            service_level: ServiceLevel::Standard,
            class,
            weight_kg: 100.0,
            volume_m3: 1.0,
            category: "Consumer Goods",
        }
    }

    #[test]
    fn test_hazardous_restriction() {
        let registry = Registry::standard();
        let q = query(1400.0, ContentType::Hazardous, RouteClass::Domestic);

        let modes = candidate_modes(&registry, &q);
        assert!(!modes.is_empty());
        for m in modes {
            assert!(matches!(m, ModeKind::Road | ModeKind::Sea | ModeKind::AirCargo));
        }
    }

    #[test]
    fn test_temperature_controlled_restriction() {
        let registry = Registry::standard();
        let q = query(6500.0, ContentType::TemperatureControlled, RouteClass::International);

        assert_eq!(
            candidate_modes(&registry, &q),
            vec![ModeKind::AirCargo, ModeKind::ExpressAir]
        );
    }

    #[test]
    fn test_domestic_excludes_sea() {
        let registry = Registry::standard();
        let q = query(2200.0, ContentType::GeneralGoods, RouteClass::Domestic);

        assert!(!candidate_modes(&registry, &q).contains(&ModeKind::Sea));
    }

    #[test]
    fn test_international_only_air_and_sea() {
        let registry = Registry::standard();
        let q = query(2200.0, ContentType::GeneralGoods, RouteClass::International);

        assert_eq!(
            candidate_modes(&registry, &q),
            vec![ModeKind::AirCargo, ModeKind::Sea, ModeKind::ExpressAir]
        );
    }

    #[test]
    fn test_urgent_short_haul_keeps_road() {
        let registry = Registry::standard();
        let mut q = query(300.0, ContentType::GeneralGoods, RouteClass::Domestic);
        q.service_level = ServiceLevel::Critical;

        let modes = candidate_modes(&registry, &q);
        assert!(modes.contains(&ModeKind::Road));
        assert!(!modes.contains(&ModeKind::Rail));
    }

    #[test]
    fn test_bulky_prefers_surface() {
        let registry = Registry::standard();
        let mut q = query(1400.0, ContentType::HeavyBulky, RouteClass::Domestic);
        q.weight_kg = 4000.0;

        assert_eq!(candidate_modes(&registry, &q), vec![ModeKind::Road, ModeKind::Rail]);
    }

    #[test]
    fn test_light_prefers_air() {
        let registry = Registry::standard();
        let mut q = query(2200.0, ContentType::GeneralGoods, RouteClass::International);
        q.weight_kg = 4.0;
        q.volume_m3 = 0.02;

        assert_eq!(
            candidate_modes(&registry, &q),
            vec![ModeKind::AirCargo, ModeKind::ExpressAir]
        );
    }

    #[test]
    fn test_fallback_rule() {
        assert_eq!(fallback_mode(800.0), ModeKind::Road);
        assert_eq!(fallback_mode(1499.0), ModeKind::Road);
        assert_eq!(fallback_mode(1500.0), ModeKind::AirCargo);
        assert_eq!(fallback_mode(12000.0), ModeKind::AirCargo);
    }

    #[test]
    fn test_bulky_urgent_international_falls_back_to_air() {
        let registry = Registry::standard();
        let mut q = query(12000.0, ContentType::TemperatureControlled, RouteClass::International);
        q.service_level = ServiceLevel::Express;
        q.weight_kg = 900.0;

        assert!(candidate_modes(&registry, &q).is_empty());

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let resolution = resolve(&registry, &q, &mut rng).unwrap();
        assert_eq!(resolution.mode, ModeKind::AirCargo);
        assert_eq!(resolution.path, ResolutionPath::ModeFallback);
        assert!(resolution.carrier.serves(RouteClass::International));
    }

    #[test]
    fn test_resolved_carrier_supports_mode() {
        let registry = Registry::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let cases = [
            query(300.0, ContentType::Fragile, RouteClass::Domestic),
            query(2350.0, ContentType::Hazardous, RouteClass::Domestic),
            query(13500.0, ContentType::GeneralGoods, RouteClass::International),
            query(4000.0, ContentType::Hazardous, RouteClass::International),
        ];

        for q in &cases {
            for _ in 0..200 {
                let r = resolve(&registry, q, &mut rng).unwrap();
                assert!(r.carrier.supports(r.mode), "{} does not run {}", r.carrier.name, r.mode);
                assert!(r.carrier.serves(q.class));
                assert_ne!(r.path, ResolutionPath::Unconstrained);
            }
        }
    }

    #[test]
    fn test_international_sea_goes_to_ocean_carriers() {
        let registry = Registry::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut q = query(6500.0, ContentType::HeavyBulky, RouteClass::International);
        q.weight_kg = 3000.0;

        for _ in 0..100 {
            let r = resolve(&registry, &q, &mut rng).unwrap();
            assert_eq!(r.mode, ModeKind::Sea);
            assert!(r.carrier.name == "Maersk" || r.carrier.name == "MSC");
        }
    }

    #[test]
    fn test_specialization_biases_carrier() {
        let registry = Registry::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let mut q = query(6500.0, ContentType::Fragile, RouteClass::International);
        q.category = "Electronics";
        q.weight_kg = 4.0;
        q.volume_m3 = 0.01;

        let mut dhl = 0;
        let mut fedex = 0;
        for _ in 0..5000 {
            match resolve(&registry, &q, &mut rng).unwrap().carrier.name {
                "DHL" => dhl += 1,
                "FedEx" => fedex += 1,
                other => panic!("unexpected carrier {}", other),
            }
        }

        // DHL scores 10 vs FedEx 9 for electronics
        assert!(dhl > fedex);
    }

    #[test]
    fn test_carrier_weight_bonus_needs_primary_mode() {
        let registry = Registry::standard();
        let dhl = registry.carrier("DHL").unwrap();
        let maersk = registry.carrier("Maersk").unwrap();

        // Textiles: DHL 7, Maersk 10; only DHL runs Air Cargo
        assert!((carrier_weight(dhl, ModeKind::AirCargo, "Textiles") - 2.1).abs() < 1e-12);
        assert!((carrier_weight(maersk, ModeKind::AirCargo, "Textiles") - 2.0).abs() < 1e-12);

        // With Sea as primary the bonus moves to Maersk
        assert!((carrier_weight(dhl, ModeKind::Sea, "Textiles") - 1.4).abs() < 1e-12);
        assert!((carrier_weight(maersk, ModeKind::Sea, "Textiles") - 3.0).abs() < 1e-12);

        // Unrated category scores 5
        assert!((carrier_weight(dhl, ModeKind::AirCargo, "Unrated Widgets") - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_pick_carrier_frequencies_follow_weights() {
        let registry = Registry::standard();
        let gati = registry.carrier("Gati").unwrap();
        let safeexpress = registry.carrier("Safeexpress").unwrap();

        // Gati 1.5 * 8 / 5 = 2.4, Safeexpress (no Air Cargo) 9 / 5 = 1.8
        let table = pick_carrier(&[gati, safeexpress], ModeKind::AirCargo, "Textiles").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let gati_draws = (0..10_000).filter(|_| table.sample(&mut rng).name == "Gati").count();

        // Expected 2.4 / 4.2 = 57.1%
        assert!(gati_draws > 5450 && gati_draws < 5980, "gati drawn {}", gati_draws);
    }
}
