//! Currency items that modify an existing item's affixes.
//!
//! Every check runs before anything is touched: a failed craft leaves both
//! the item and the currency exactly as they were.

use super::generation::ItemGenerator;
use super::types::ItemInstance;
use crate::core::constants::{CHAOS_ORB_COST, EXALTED_ORB_COST};
use crate::core::error::{EngineError, EntityKind};
use crate::core::stats::StatKey;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub gold: u64,
    #[serde(default)]
    pub chaos_orbs: u32,
    #[serde(default)]
    pub exalted_orbs: u32,
}

impl Currency {
    fn require(resource: &'static str, have: u32, cost: u32) -> Result<(), EngineError> {
        if have < cost {
            debug!(resource, have, cost, "not enough currency");
            return Err(EngineError::InsufficientResource {
                resource,
                required: cost,
                available: have,
            });
        }
        Ok(())
    }
}

/// What a craft changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftOutcome {
    pub removed: Option<(StatKey, i32)>,
    pub added: (StatKey, i32),
}

/// Replaces one rolled affix, chosen uniformly, with a fresh eligible stat.
///
/// The replaced stat is only rolled again when nothing else is eligible.
pub fn chaos_reroll(
    item: &mut ItemInstance,
    generator: &ItemGenerator<'_>,
    currency: &mut Currency,
    rng: &mut impl Rng,
) -> Result<CraftOutcome, EngineError> {
    Currency::require("chaos orbs", currency.chaos_orbs, CHAOS_ORB_COST)?;

    let core = item.core();
    if core.affixes.is_empty() {
        debug!(item = %core.name, "chaos reroll on an item without affixes");
        return Err(EngineError::ExhaustedPool { pool: "affix" });
    }

    let rolled: Vec<(StatKey, i32)> = core.affixes.iter().map(|(k, v)| (*k, *v)).collect();
    let (old_key, old_value) = rolled[rng.gen_range(0..rolled.len())];

    // Every other current stat stays excluded; the outgoing one is freed.
    // Zero-weight stats can never be drawn, so they don't count as options.
    let taken = |k: &StatKey| *k != old_key && core.has_stat(k);
    let mut pool: Vec<StatKey> = generator
        .stats()
        .eligible(core.slot, &core.themes, taken)
        .into_iter()
        .filter(|k| generator.affix_weight(core, k) > 0.0)
        .collect();
    if pool.iter().any(|k| *k != old_key) {
        pool.retain(|k| *k != old_key);
    }

    let Some((new_key, new_value)) = generator.pick_affix(core, &pool, rng) else {
        debug!(item = %core.name, "no eligible affix to reroll into");
        return Err(EngineError::ExhaustedPool { pool: "affix" });
    };

    let affixes = &mut item.core_mut().affixes;
    affixes.remove(&old_key);
    affixes.insert(new_key, new_value);
    currency.chaos_orbs -= CHAOS_ORB_COST;

    Ok(CraftOutcome {
        removed: Some((old_key, old_value)),
        added: (new_key, new_value),
    })
}

/// Adds one affix when the item is below its rarity's affix cap.
pub fn exalted_add(
    item: &mut ItemInstance,
    generator: &ItemGenerator<'_>,
    currency: &mut Currency,
    rng: &mut impl Rng,
) -> Result<CraftOutcome, EngineError> {
    Currency::require("exalted orbs", currency.exalted_orbs, EXALTED_ORB_COST)?;

    let core = item.core();
    let tier = generator.rarities().get(&core.rarity).ok_or_else(|| {
        debug!(rarity = %core.rarity, "item has a rarity missing from the table");
        EngineError::unknown(EntityKind::Rarity, core.rarity.clone())
    })?;
    if core.affixes.len() as u32 >= tier.max_affixes {
        debug!(item = %core.name, cap = tier.max_affixes, "item is at its affix cap");
        return Err(EngineError::AffixCapReached {
            rarity: tier.name.clone(),
            cap: tier.max_affixes,
        });
    }

    let pool = generator.affix_pool(core, |_| false);
    let Some((key, value)) = generator.pick_affix(core, &pool, rng) else {
        debug!(item = %core.name, "no eligible affix to add");
        return Err(EngineError::ExhaustedPool { pool: "affix" });
    };

    item.core_mut().affixes.insert(key, value);
    currency.exalted_orbs -= EXALTED_ORB_COST;

    Ok(CraftOutcome {
        removed: None,
        added: (key, value),
    })
}
