//! Delivery time: the carrier's promise and the simulated journey.
//!
//! The expected time comes from the route's baseline hours adjusted for
//! carrier and service speed. The actual time is built bottom-up from a
//! simulated average speed, route deviation, halts, customs, and handling,
//! then scaled by the month's seasonal delay factor.

use crate::registry::{RouteClass, ServiceLevel, ShipmentMode, Weather};
use crate::sampling::{chance, round_to, uniform};
use rand::Rng;

/// Floor for both expected and actual delivery time.
pub const MIN_DELIVERY_DAYS: f64 = 1.0;

/// Travel hours assumed when the simulated speed is not positive.
const STALLED_TRAVEL_HOURS: f64 = 9999.0;

/// Customs delay chance never exceeds this.
const MAX_CUSTOMS_CHANCE: f64 = 0.8;

/// Base chance of an extra multi-day operational delay.
const OPERATIONAL_DELAY_CHANCE: f64 = 0.05;

/// Days the carrier commits to.
///
/// `base_hours / (carrier speed x service speed) + 12..36h handling`, scaled
/// by route complexity, rounded to 0.1 day, at least one day.
pub fn expected_delivery_days<R: Rng + ?Sized>(
    base_hours: f64,
    carrier_speed_modifier: f64,
    service_level: ServiceLevel,
    complexity: f64,
    rng: &mut R,
) -> f64 {
    let mut hours = base_hours / (carrier_speed_modifier * service_level.speed_modifier());
    hours += uniform(rng, 12.0, 36.0);
    hours *= complexity;

    round_to(hours / 24.0, 1).max(MIN_DELIVERY_DAYS)
}

/// Route and calendar conditions for one journey.
#[derive(Debug, Clone, Copy)]
pub struct JourneyConditions {
    pub distance_km: f64,
    pub complexity: f64,

    /// Monthly congestion multiplier for the route
    pub congestion: f64,

    /// Seasonal delay multiplier for the shipment month
    pub seasonal_delay: f64,

    pub class: RouteClass,
    pub weather: Weather,
}

impl JourneyConditions {
    fn strain(&self) -> f64 {
        self.complexity * self.congestion
    }
}

/// Outcome of a simulated journey.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Journey {
    pub avg_speed_kph: f64,

    /// Multiplier on distance actually driven/flown/sailed
    pub route_deviation: f64,

    pub halt_hours: f64,
    pub customs_hours: f64,
    pub handling_hours: f64,

    /// Door-to-door days, at least one
    pub actual_days: f64,
}

/// Simulate the journey for a mode under the given conditions.
pub fn simulate_journey<R: Rng + ?Sized>(
    mode: &ShipmentMode,
    conditions: &JourneyConditions,
    rng: &mut R,
) -> Journey {
    let strain = conditions.strain();

    let mut avg_speed_kph = mode.speed_kph * uniform(rng, 0.8, 1.2);
    avg_speed_kph *= conditions.weather.speed_modifier();
    avg_speed_kph /= strain;

    let route_deviation = uniform(rng, 1.0, 1.1) * strain;

    let mut halt_hours = (conditions.distance_km / 100.0) * uniform(rng, 0.1, 0.5);
    if mode.kind.is_line_haul() {
        halt_hours *= 0.5;
    }
    halt_hours *= strain;
    if conditions.weather.is_disruptive() {
        halt_hours += uniform(rng, 1.0, 10.0);
    }
    let halt_hours = round_to(halt_hours.max(0.0), 1);

    let customs_hours = round_to(customs_delay(conditions, rng), 1);
    let handling_hours = uniform(rng, 10.0, 40.0);

    let travel_hours = if avg_speed_kph > 0.0 {
        conditions.distance_km * route_deviation / avg_speed_kph
    } else {
        STALLED_TRAVEL_HOURS
    };

    let total_hours = (travel_hours + halt_hours + customs_hours + handling_hours) * conditions.seasonal_delay;
    let mut actual_days = round_to(total_hours / 24.0, 1).max(MIN_DELIVERY_DAYS);

    if chance(rng, OPERATIONAL_DELAY_CHANCE * conditions.seasonal_delay) {
        actual_days = round_to(actual_days + uniform(rng, 1.0, 5.0), 1);
    }

    Journey {
        avg_speed_kph,
        route_deviation,
        halt_hours,
        customs_hours,
        handling_hours,
        actual_days,
    }
}

/// Border hold-up for international legs; zero for domestic.
fn customs_delay<R: Rng + ?Sized>(conditions: &JourneyConditions, rng: &mut R) -> f64 {
    if conditions.class == RouteClass::Domestic {
        return 0.0;
    }

    let congestion_excess = conditions.congestion - conditions.complexity;
    let p = 0.3 + (conditions.complexity - 1.0) * 0.5 + congestion_excess * 0.3;

    if chance(rng, p.min(MAX_CUSTOMS_CHANCE)) {
        uniform(rng, 1.0, 72.0) * conditions.complexity * (1.0 + congestion_excess * 0.5)
    } else {
        0.0
    }
}

/// Signed lateness in days, rounded to 0.1.
pub fn delay_days(actual_days: f64, expected_days: f64) -> f64 {
    round_to(actual_days - expected_days, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ModeKind, Registry};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn conditions(class: RouteClass, weather: Weather) -> JourneyConditions {
        JourneyConditions {
            distance_km: 1400.0,
            complexity: 1.1,
            congestion: 1.1,
            seasonal_delay: 1.0,
            class,
            weather,
        }
    }

    #[test]
    fn test_expected_days_floor() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..200 {
            // Short, fast, simple route still takes at least a day
            let days = expected_delivery_days(5.0, 1.3, ServiceLevel::Critical, 1.0, &mut rng);
            assert!(days >= MIN_DELIVERY_DAYS);
        }
    }

    #[test]
    fn test_expected_days_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        // 720h sea leg, speed 0.8, standard, complexity 1.3: (900 + 12..36) * 1.3 / 24
        for _ in 0..100 {
            let days = expected_delivery_days(720.0, 0.8, ServiceLevel::Standard, 1.3, &mut rng);
            assert!((49.3..=50.7).contains(&days), "days {}", days);
        }
    }

    #[test]
    fn test_actual_days_floor() {
        let registry = Registry::standard();
        let air = registry.mode(ModeKind::ExpressAir);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let mut c = conditions(RouteClass::Domestic, Weather::Clear);
        c.distance_km = 300.0;
        c.complexity = 1.0;
        c.congestion = 1.0;
        c.seasonal_delay = 0.95;

        for _ in 0..500 {
            let journey = simulate_journey(air, &c, &mut rng);
            assert!(journey.actual_days >= MIN_DELIVERY_DAYS);
        }
    }

    #[test]
    fn test_domestic_has_no_customs() {
        let registry = Registry::standard();
        let road = registry.mode(ModeKind::Road);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let c = conditions(RouteClass::Domestic, Weather::Severe);

        for _ in 0..500 {
            assert_eq!(simulate_journey(road, &c, &mut rng).customs_hours, 0.0);
        }
    }

    #[test]
    fn test_international_customs_sometimes() {
        let registry = Registry::standard();
        let sea = registry.mode(ModeKind::Sea);
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut c = conditions(RouteClass::International, Weather::Clear);
        c.distance_km = 12000.0;
        c.complexity = 1.3;
        c.congestion = 1.3;

        let held = (0..2000)
            .filter(|_| simulate_journey(sea, &c, &mut rng).customs_hours > 0.0)
            .count();

        // p = 0.3 + 0.15 = 0.45
        assert!(held > 780 && held < 1020, "held {}", held);
    }

    #[test]
    fn test_deviation_scales_with_strain() {
        let registry = Registry::standard();
        let road = registry.mode(ModeKind::Road);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut c = conditions(RouteClass::Domestic, Weather::Clear);
        c.complexity = 1.2;
        c.congestion = 1.56;

        for _ in 0..200 {
            let j = simulate_journey(road, &c, &mut rng);
            let strain = 1.2 * 1.56;
            assert!(j.route_deviation >= strain && j.route_deviation < 1.1 * strain + 1e-9);
            assert!(j.handling_hours >= 10.0 && j.handling_hours < 40.0);
        }
    }

    #[test]
    fn test_severe_weather_slows_and_halts() {
        let registry = Registry::standard();
        let road = registry.mode(ModeKind::Road);

        let clear = conditions(RouteClass::Domestic, Weather::Clear);
        let severe = conditions(RouteClass::Domestic, Weather::Severe);

        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let clear_speed: f64 = (0..500).map(|_| simulate_journey(road, &clear, &mut rng).avg_speed_kph).sum();
        let severe_speed: f64 = (0..500).map(|_| simulate_journey(road, &severe, &mut rng).avg_speed_kph).sum();

        assert!(severe_speed < clear_speed);
    }

    #[test]
    fn test_delay_days() {
        assert_eq!(delay_days(5.3, 4.0), 1.3);
        assert_eq!(delay_days(3.0, 4.25), -1.3);
        assert_eq!(delay_days(2.0, 2.0), 0.0);
    }
}
