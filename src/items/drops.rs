//! Loot rolls: item drops and currency drops after a fight.

use super::crafting::Currency;
use super::generation::{GenerateOptions, ItemGenerator};
use super::types::ItemInstance;
use crate::core::constants::{CHAOS_ORB_DROP_CHANCE, EXALTED_ORB_DROP_CHANCE, PERCENT_DIVISOR};
use crate::core::error::EngineError;
use rand::Rng;

/// Rolls `rolls` independent drop checks, generating an item for each hit.
pub fn roll_item_drops(
    generator: &ItemGenerator<'_>,
    options: &GenerateOptions,
    rolls: u32,
    drop_chance: f64,
    rng: &mut impl Rng,
) -> Result<Vec<ItemInstance>, EngineError> {
    let mut items = Vec::new();
    for _ in 0..rolls {
        if rng.gen::<f64>() < drop_chance {
            items.push(generator.generate(options, rng)?);
        }
    }
    Ok(items)
}

/// Crafting orbs found after a victorious mission.
pub fn roll_orb_drops(rng: &mut impl Rng) -> Currency {
    let mut found = Currency::default();
    if rng.gen::<f64>() < CHAOS_ORB_DROP_CHANCE {
        found.chaos_orbs += 1;
    }
    if rng.gen::<f64>() < EXALTED_ORB_DROP_CHANCE {
        found.exalted_orbs += 1;
    }
    found
}

/// Applies a gold-find percentage to a gold reward. Negative gold find can
/// reduce the reward to zero but never below.
pub fn apply_gold_find(gold: u64, gold_find: i32) -> u64 {
    let multiplier = (1.0 + gold_find as f64 / PERCENT_DIVISOR).max(0.0);
    (gold as f64 * multiplier).floor() as u64
}
