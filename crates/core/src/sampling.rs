//! Random selection primitives shared by every sampling site.
//!
//! All categorical draws in the generator (destination, service level,
//! product category, packaging, weather, carrier) go through
//! [`WeightedTable`], so the probability semantics are the same everywhere:
//! an item is drawn with probability `weight / sum(weights)`.
//!
//! # Determinism
//!
//! Nothing here owns an RNG. Callers pass the single seeded generator of the
//! run, so the sequence of draws is fully determined by the seed and the
//! order of calls.

use crate::error::{Result, SamplingError};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

/// A categorical distribution over `(item, weight)` pairs.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    items: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T> WeightedTable<T> {
    /// Build a table from `(item, weight)` pairs.
    ///
    /// `site` names the draw in error messages. Fails on an empty list and on
    /// weights that are negative, non-finite, or sum to zero.
    pub fn new<I>(pairs: I, site: &'static str) -> Result<Self>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let (items, weights): (Vec<T>, Vec<f64>) = pairs.into_iter().unzip();

        if items.is_empty() {
            return Err(SamplingError::EmptyChoice { site }.into());
        }

        let index = WeightedIndex::new(&weights).map_err(|e| SamplingError::InvalidWeights {
            site,
            reason: e.to_string(),
        })?;

        Ok(Self { items, index })
    }

    /// Draw one item.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        &self.items[self.index.sample(rng)]
    }
}

/// Pick one element uniformly.
pub fn choose<'a, T, R: Rng + ?Sized>(
    rng: &mut R,
    items: &'a [T],
    site: &'static str,
) -> Result<&'a T> {
    items
        .choose(rng)
        .ok_or_else(|| SamplingError::EmptyChoice { site }.into())
}

/// Uniform float in `[low, high)`.
///
/// A degenerate range (`high <= low`) returns `low` instead of panicking.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

/// Bernoulli trial with success probability `p`.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < p
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
