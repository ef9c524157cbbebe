//! Weighted random selection shared by rarity rolls, slot rolls, affix rolls
//! and passive offers.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Picks an index with probability proportional to its weight.
///
/// Non-positive and non-finite weights are treated as zero and never chosen.
/// Returns `None` when no weight is positive.
pub fn weighted_index(weights: &[f64], rng: &mut impl Rng) -> Option<usize> {
    let cleaned: Vec<f64> = weights
        .iter()
        .map(|&w| if w.is_finite() && w > 0.0 { w } else { 0.0 })
        .collect();
    let dist = WeightedIndex::new(&cleaned).ok()?;
    Some(dist.sample(rng))
}

/// Picks one item, weighting each by `weight`.
pub fn weighted_choice<'a, T>(
    items: &'a [T],
    weight: impl Fn(&T) -> f64,
    rng: &mut impl Rng,
) -> Option<&'a T> {
    let weights: Vec<f64> = items.iter().map(&weight).collect();
    weighted_index(&weights, rng).map(|i| &items[i])
}

/// Picks up to `count` items.
///
/// With `without_replacement` each item can be picked at most once and the
/// result is shorter than `count` when the pool runs out of positive weights.
pub fn weighted_sample<'a, T>(
    items: &'a [T],
    count: usize,
    weight: impl Fn(&T) -> f64,
    without_replacement: bool,
    rng: &mut impl Rng,
) -> Vec<&'a T> {
    let mut weights: Vec<f64> = items.iter().map(&weight).collect();
    let mut picked = Vec::with_capacity(count);

    for _ in 0..count {
        let Some(index) = weighted_index(&weights, rng) else {
            break;
        };
        picked.push(&items[index]);
        if without_replacement {
            weights[index] = 0.0;
        }
    }

    picked
}
