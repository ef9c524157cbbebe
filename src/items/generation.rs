//! Procedural item generation.
//!
//! An item is rolled in a fixed order: slot category, base, rarity tier,
//! affix count, then one affix at a time from the remaining eligible pool.
//! Values are rolled from the stat table at the item level and stored raw;
//! weapon damage multipliers are only applied during stat aggregation.

use super::bases::ItemBase;
use super::rarity::{RarityTable, RarityTier};
use super::stat_table::StatTable;
use super::types::{Armor, ItemCore, ItemInstance, Jewelry, SlotCategory, Weapon};
use crate::core::constants::DEFAULT_SLOT_WEIGHTS;
use crate::core::error::{EngineError, EntityKind};
use crate::core::sampling::{weighted_choice, weighted_sample};
use crate::core::stats::StatKey;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Relative chance of each slot category being rolled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotWeights {
    pub weapon: f64,
    pub armor: f64,
    pub jewelry: f64,
}

impl Default for SlotWeights {
    fn default() -> Self {
        let (weapon, armor, jewelry) = DEFAULT_SLOT_WEIGHTS;
        Self {
            weapon,
            armor,
            jewelry,
        }
    }
}

impl SlotWeights {
    pub fn weight(&self, category: SlotCategory) -> f64 {
        match category {
            SlotCategory::Weapon => self.weapon,
            SlotCategory::Armor => self.armor,
            SlotCategory::Jewelry => self.jewelry,
        }
    }

    /// Forces every roll into one category.
    pub fn only(category: SlotCategory) -> Self {
        let mut weights = Self {
            weapon: 0.0,
            armor: 0.0,
            jewelry: 0.0,
        };
        match category {
            SlotCategory::Weapon => weights.weapon = 1.0,
            SlotCategory::Armor => weights.armor = 1.0,
            SlotCategory::Jewelry => weights.jewelry = 1.0,
        }
        weights
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    pub item_level: u32,
    /// Themes that unlock theme-gated stats.
    pub themes: BTreeSet<String>,
    pub slot_weights: Option<SlotWeights>,
    /// Skews the rarity roll toward rarer tiers (0 = table weights).
    pub difficulty_bonus: f64,
    /// Skips the rarity roll.
    pub forced_rarity: Option<String>,
}

impl GenerateOptions {
    pub fn at_level(item_level: u32) -> Self {
        Self {
            item_level,
            ..Default::default()
        }
    }

    pub fn with_themes<I, S>(mut self, themes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.themes = themes.into_iter().map(Into::into).collect();
        self
    }
}

/// Rolls item instances from a set of bases and the shared stat and rarity
/// tables.
#[derive(Debug, Clone)]
pub struct ItemGenerator<'a> {
    bases: Vec<&'a ItemBase>,
    stats: &'a StatTable,
    rarities: &'a RarityTable,
}

impl<'a> ItemGenerator<'a> {
    pub fn new(
        bases: impl IntoIterator<Item = &'a ItemBase>,
        stats: &'a StatTable,
        rarities: &'a RarityTable,
    ) -> Self {
        Self {
            bases: bases.into_iter().collect(),
            stats,
            rarities,
        }
    }

    pub fn stats(&self) -> &'a StatTable {
        self.stats
    }

    pub fn rarities(&self) -> &'a RarityTable {
        self.rarities
    }

    pub fn base(&self, id: &str) -> Option<&'a ItemBase> {
        self.bases.iter().copied().find(|b| b.id == id)
    }

    pub fn generate(
        &self,
        options: &GenerateOptions,
        rng: &mut impl Rng,
    ) -> Result<ItemInstance, EngineError> {
        let base = self.roll_base(options.slot_weights.unwrap_or_default(), rng)?;

        let tier = match options.forced_rarity.as_deref() {
            Some(name) => self.rarities.get(name).ok_or_else(|| {
                debug!(rarity = name, "forced rarity is not in the rarity table");
                EngineError::unknown(EntityKind::Rarity, name)
            })?,
            None => self.rarities.roll(options.difficulty_bonus, rng),
        };

        let mut core = ItemCore {
            base_id: base.id.clone(),
            name: base.name.clone(),
            slot: base.slot,
            rarity: tier.name.clone(),
            item_level: options.item_level,
            themes: options.themes.clone(),
            implicits: base.implicits.clone(),
            affixes: BTreeMap::new(),
        };
        self.roll_affixes(&mut core, tier, base, rng);

        Ok(Self::assemble(base, core))
    }

    /// Slot category by weighted roll, then a base uniformly within it.
    /// Falls back to every base when the category has none.
    fn roll_base(
        &self,
        slot_weights: SlotWeights,
        rng: &mut impl Rng,
    ) -> Result<&'a ItemBase, EngineError> {
        if self.bases.is_empty() {
            return Err(EngineError::corrupt(
                "item base",
                "no item bases registered",
            ));
        }

        let category = weighted_choice(&SlotCategory::ALL, |c| slot_weights.weight(*c), rng);
        let mut candidates: Vec<&'a ItemBase> = match category {
            Some(category) => self
                .bases
                .iter()
                .copied()
                .filter(|b| b.category() == *category)
                .collect(),
            None => Vec::new(),
        };
        if candidates.is_empty() {
            debug!(?category, "no bases for slot category, using any base");
            candidates = self.bases.clone();
        }

        Ok(candidates[rng.gen_range(0..candidates.len())])
    }

    fn roll_affixes(
        &self,
        core: &mut ItemCore,
        tier: &RarityTier,
        base: &ItemBase,
        rng: &mut impl Rng,
    ) {
        let wanted = tier.affix_count(rng) as usize;
        if wanted == 0 {
            return;
        }

        let pool = self.affix_pool(core, |_| false);
        let picked = weighted_sample(&pool, wanted, |k| base.stat_weight(k), true, rng);
        if picked.len() < wanted {
            debug!(
                base = %base.id,
                wanted,
                rolled = picked.len(),
                "affix pool exhausted"
            );
        }

        for key in picked {
            if let Some(value) = self
                .stats
                .roll_value(key, core.item_level, core.slot, rng)
            {
                core.affixes.insert(*key, value);
            }
        }
    }

    /// Stats that may still roll on `core`: valid for its slot, allowed by
    /// its themes, not already present, and not rejected by `skip`.
    pub fn affix_pool(&self, core: &ItemCore, skip: impl Fn(&StatKey) -> bool) -> Vec<StatKey> {
        self.stats
            .eligible(core.slot, &core.themes, |k| core.has_stat(k) || skip(k))
    }

    /// Sampling weight of `key` on `core`'s base; unknown bases weigh 1.
    pub fn affix_weight(&self, core: &ItemCore, key: &StatKey) -> f64 {
        self.base(&core.base_id).map_or(1.0, |b| b.stat_weight(key))
    }

    /// Weighted pick from `pool` using the item's base weights, with a value
    /// rolled at the item's level.
    pub fn pick_affix(
        &self,
        core: &ItemCore,
        pool: &[StatKey],
        rng: &mut impl Rng,
    ) -> Option<(StatKey, i32)> {
        let key = *weighted_choice(pool, |k| self.affix_weight(core, k), rng)?;
        let value = self.stats.roll_value(&key, core.item_level, core.slot, rng)?;
        Some((key, value))
    }

    fn assemble(base: &ItemBase, core: ItemCore) -> ItemInstance {
        match base.category() {
            SlotCategory::Weapon => {
                let profile = base.weapon_profile();
                ItemInstance::Weapon(Weapon {
                    core,
                    attack_speed: profile.attack_speed,
                    damage_multiplier: profile.damage_multiplier,
                    damage_types: profile.damage_types,
                })
            }
            SlotCategory::Armor => ItemInstance::Armor(Armor { core }),
            SlotCategory::Jewelry => ItemInstance::Jewelry(Jewelry { core }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stats::Stat;
    use crate::items::bases::WeaponProfile;
    use crate::items::stat_table::{Breakpoint, StatDefinition};
    use crate::items::types::EquipmentSlot;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn flat(stat: Stat, min: i32, max: i32) -> StatDefinition {
        StatDefinition::new(
            StatKey::flat(stat),
            vec![
                Breakpoint {
                    item_level: 1,
                    min,
                    max,
                },
                Breakpoint {
                    item_level: 40,
                    min: min * 3,
                    max: max * 3,
                },
            ],
        )
    }

    fn stat_table() -> StatTable {
        StatTable::new(vec![
            flat(Stat::Life, 5, 15),
            flat(Stat::Damage, 2, 6).for_slots(&[SlotCategory::Weapon, SlotCategory::Jewelry]),
            flat(Stat::Defense, 4, 10).for_slots(&[SlotCategory::Armor]),
            flat(Stat::FireResist, 6, 12),
            flat(Stat::ColdResist, 6, 12),
            flat(Stat::GoldFind, 3, 8).for_slots(&[SlotCategory::Jewelry]),
            flat(Stat::LifeLeech, 1, 2).requiring_themes(&["vampiric"]),
        ])
        .unwrap()
    }

    fn bases() -> Vec<ItemBase> {
        vec![
            ItemBase::new("short_sword", "Short Sword", EquipmentSlot::Weapon).with_weapon(
                WeaponProfile {
                    attack_speed: 1.4,
                    damage_multiplier: 1.2,
                    ..Default::default()
                },
            ),
            ItemBase::new("chain_mail", "Chain Mail", EquipmentSlot::BodyArmor)
                .with_implicit(StatKey::flat(Stat::Defense), 20),
            ItemBase::new("coral_ring", "Coral Ring", EquipmentSlot::Ring)
                .with_implicit(StatKey::flat(Stat::Life), 8),
        ]
    }

    fn rare_only() -> RarityTable {
        RarityTable::new(vec![RarityTier::new("rare", 1.0, 3, 4)]).unwrap()
    }

    #[test]
    fn test_empty_base_table_is_an_error() {
        let stats = stat_table();
        let rarities = RarityTable::standard();
        let generator = ItemGenerator::new(std::iter::empty(), &stats, &rarities);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = generator
            .generate(&GenerateOptions::at_level(10), &mut rng)
            .unwrap_err();
        assert_eq!(err.code(), "corrupt_table");
    }

    #[test]
    fn test_rare_items_roll_three_or_four_affixes() {
        let stats = stat_table();
        let rarities = rare_only();
        let bases = bases();
        let generator = ItemGenerator::new(&bases, &stats, &rarities);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..1000 {
            let item = generator
                .generate(&GenerateOptions::at_level(20), &mut rng)
                .unwrap();
            let core = item.core();
            let count = item.affix_count();
            let pool_size = generator.affix_pool(core, |_| false).len() + count;
            assert!(count <= 4, "{} rolled {count} affixes", core.name);
            assert!(count >= 3 || pool_size < 3, "{} rolled {count}", core.name);
            for key in core.affixes.keys() {
                assert!(!core.implicits.contains_key(key), "{key} duplicated");
            }
        }
    }

    #[test]
    fn test_rolled_values_within_item_level_range() {
        let stats = stat_table();
        let rarities = rare_only();
        let bases = bases();
        let generator = ItemGenerator::new(&bases, &stats, &rarities);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for ilvl in [1, 39, 40, 80] {
            for _ in 0..200 {
                let item = generator
                    .generate(&GenerateOptions::at_level(ilvl), &mut rng)
                    .unwrap();
                for (key, value) in &item.core().affixes {
                    let (min, max) = stats.range_for(key, ilvl, item.slot()).unwrap();
                    assert!(
                        *value >= min && *value <= max,
                        "{key}={value} outside {min}..={max} at ilvl {ilvl}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_exhausted_pool_stops_early() {
        // Jewelry pool: life (implicit), damage, fire, cold, gold find = 4 eligible
        let stats = stat_table();
        let rarities = RarityTable::new(vec![RarityTier::new("legendary", 1.0, 6, 6)]).unwrap();
        let bases = bases();
        let generator = ItemGenerator::new(&bases, &stats, &rarities);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let options = GenerateOptions {
            slot_weights: Some(SlotWeights::only(SlotCategory::Jewelry)),
            ..GenerateOptions::at_level(10)
        };

        let item = generator.generate(&options, &mut rng).unwrap();
        assert_eq!(item.affix_count(), 4);
        let life = StatKey::flat(Stat::Life);
        assert!(!item.core().affixes.contains_key(&life));
    }

    #[test]
    fn test_theme_gated_stats_need_theme() {
        let stats = stat_table();
        let rarities = RarityTable::new(vec![RarityTier::new("legendary", 1.0, 6, 6)]).unwrap();
        let bases = bases();
        let generator = ItemGenerator::new(&bases, &stats, &rarities);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let leech = StatKey::flat(Stat::LifeLeech);

        let plain = GenerateOptions {
            slot_weights: Some(SlotWeights::only(SlotCategory::Weapon)),
            ..GenerateOptions::at_level(10)
        };
        for _ in 0..50 {
            let item = generator.generate(&plain, &mut rng).unwrap();
            assert!(!item.core().affixes.contains_key(&leech));
        }

        let themed = plain.clone().with_themes(["vampiric"]);
        let item = generator.generate(&themed, &mut rng).unwrap();
        // Weapon pool with the theme: life, damage, fire, cold, leech = 5 <= 6
        assert!(item.core().affixes.contains_key(&leech));
    }

    #[test]
    fn test_zero_base_weight_excludes_stat() {
        let stats = stat_table();
        let rarities = rare_only();
        let bases = vec![ItemBase::new("ash_bow", "Ash Bow", EquipmentSlot::Weapon)
            .with_weight(StatKey::flat(Stat::FireResist), 0.0)];
        let generator = ItemGenerator::new(&bases, &stats, &rarities);
        let mut rng = ChaCha8Rng::seed_from_u64(19);

        for _ in 0..200 {
            let item = generator
                .generate(&GenerateOptions::at_level(10), &mut rng)
                .unwrap();
            let fire = StatKey::flat(Stat::FireResist);
            assert!(!item.core().affixes.contains_key(&fire));
        }
    }

    #[test]
    fn test_weapon_keeps_profile_and_raw_damage() {
        let stats = stat_table();
        let rarities = rare_only();
        let bases = bases();
        let generator = ItemGenerator::new(&bases, &stats, &rarities);
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let options = GenerateOptions {
            slot_weights: Some(SlotWeights::only(SlotCategory::Weapon)),
            ..GenerateOptions::at_level(10)
        };

        for _ in 0..100 {
            let item = generator.generate(&options, &mut rng).unwrap();
            let weapon = item.as_weapon().unwrap();
            assert_eq!(weapon.attack_speed, 1.4);
            assert_eq!(weapon.damage_multiplier, 1.2);
            if let Some(damage) = weapon.core.affixes.get(&StatKey::flat(Stat::Damage)) {
                assert!((2..=6).contains(damage), "damage stored scaled: {damage}");
            }
        }
    }

    #[test]
    fn test_missing_category_falls_back_to_any_base() {
        let stats = stat_table();
        let rarities = RarityTable::standard();
        let bases = vec![ItemBase::new("coral_ring", "Coral Ring", EquipmentSlot::Ring)];
        let generator = ItemGenerator::new(&bases, &stats, &rarities);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let options = GenerateOptions {
            slot_weights: Some(SlotWeights::only(SlotCategory::Weapon)),
            ..GenerateOptions::at_level(5)
        };
        let item = generator.generate(&options, &mut rng).unwrap();
        assert_eq!(item.core().base_id, "coral_ring");
    }

    #[test]
    fn test_same_seed_same_item() {
        let stats = stat_table();
        let rarities = RarityTable::standard();
        let bases = bases();
        let generator = ItemGenerator::new(&bases, &stats, &rarities);
        let options = GenerateOptions::at_level(33);

        let a = generator
            .generate(&options, &mut ChaCha8Rng::seed_from_u64(77))
            .unwrap();
        let b = generator
            .generate(&options, &mut ChaCha8Rng::seed_from_u64(77))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_forced_rarity() {
        let stats = stat_table();
        let rarities = RarityTable::standard();
        let bases = bases();
        let generator = ItemGenerator::new(&bases, &stats, &rarities);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let options = GenerateOptions {
            forced_rarity: Some("magic".to_string()),
            ..GenerateOptions::at_level(10)
        };
        let item = generator.generate(&options, &mut rng).unwrap();
        assert_eq!(item.core().rarity, "magic");

        let options = GenerateOptions {
            forced_rarity: Some("mythic".to_string()),
            ..GenerateOptions::at_level(10)
        };
        assert!(generator.generate(&options, &mut rng).is_err());
    }
}
