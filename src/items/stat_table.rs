//! Per-stat value ranges keyed by item level.

use super::types::{EquipmentSlot, SlotCategory};
use crate::core::constants::{BODY_ARMOR_DEFENSE_MULTIPLIER, BODY_ARMOR_LIFE_MULTIPLIER};
use crate::core::error::EngineError;
use crate::core::stats::{ModifierKind, Stat, StatKey};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Value range available from `item_level` upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub item_level: u32,
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatDefinition {
    pub key: StatKey,
    /// Sorted ascending by item level.
    pub breakpoints: Vec<Breakpoint>,
    /// Slot categories that may roll this stat (`None` = all).
    #[serde(default)]
    pub slots: Option<BTreeSet<SlotCategory>>,
    /// At least one of these themes must be allowed for the stat to roll.
    #[serde(default)]
    pub required_themes: Option<BTreeSet<String>>,
}

impl StatDefinition {
    pub fn new(key: StatKey, breakpoints: Vec<Breakpoint>) -> Self {
        Self {
            key,
            breakpoints,
            slots: None,
            required_themes: None,
        }
    }

    pub fn for_slots(mut self, slots: &[SlotCategory]) -> Self {
        self.slots = Some(slots.iter().copied().collect());
        self
    }

    pub fn requiring_themes(mut self, themes: &[&str]) -> Self {
        self.required_themes = Some(themes.iter().map(|t| t.to_string()).collect());
        self
    }

    /// Range of the highest breakpoint at or below `item_level`.
    /// Levels below the first breakpoint use the first breakpoint.
    pub fn range_at(&self, item_level: u32) -> Option<(i32, i32)> {
        self.breakpoints
            .iter()
            .rev()
            .find(|b| b.item_level <= item_level)
            .or_else(|| self.breakpoints.first())
            .map(|b| (b.min, b.max))
    }

    pub fn allows_slot(&self, slot: EquipmentSlot) -> bool {
        self.slots
            .as_ref()
            .map_or(true, |slots| slots.contains(&slot.category()))
    }

    pub fn allows_themes(&self, themes: &BTreeSet<String>) -> bool {
        match &self.required_themes {
            Some(required) if !required.is_empty() => {
                required.iter().any(|theme| themes.contains(theme))
            }
            _ => true,
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.breakpoints.is_empty() {
            return Err(EngineError::corrupt(
                "stat",
                format!("{} has no breakpoints", self.key),
            ));
        }
        for pair in self.breakpoints.windows(2) {
            if pair[0].item_level >= pair[1].item_level {
                return Err(EngineError::corrupt(
                    "stat",
                    format!("{} breakpoints are not sorted by item level", self.key),
                ));
            }
        }
        if let Some(b) = self.breakpoints.iter().find(|b| b.min > b.max) {
            return Err(EngineError::corrupt(
                "stat",
                format!(
                    "{} breakpoint at ilvl {} has min {} > max {}",
                    self.key, b.item_level, b.min, b.max
                ),
            ));
        }
        Ok(())
    }
}

/// Multiplier applied to rolled values of `key` on `slot`.
pub fn slot_value_multiplier(slot: EquipmentSlot, key: StatKey) -> f64 {
    match (slot, key.kind, key.stat) {
        (EquipmentSlot::BodyArmor, ModifierKind::Flat, Stat::Defense) => {
            BODY_ARMOR_DEFENSE_MULTIPLIER
        }
        (EquipmentSlot::BodyArmor, ModifierKind::Flat, Stat::Life) => BODY_ARMOR_LIFE_MULTIPLIER,
        _ => 1.0,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatTable {
    definitions: BTreeMap<StatKey, StatDefinition>,
}

impl StatTable {
    pub fn new(definitions: Vec<StatDefinition>) -> Result<Self, EngineError> {
        let mut table = BTreeMap::new();
        for def in definitions {
            def.validate()?;
            let key = def.key;
            if table.insert(key, def).is_some() {
                return Err(EngineError::corrupt(
                    "stat",
                    format!("{key} is defined twice"),
                ));
            }
        }
        Ok(Self { definitions: table })
    }

    pub fn get(&self, key: &StatKey) -> Option<&StatDefinition> {
        self.definitions.get(key)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatDefinition> {
        self.definitions.values()
    }

    /// Slot-scaled value range of `key` at `item_level`.
    pub fn range_for(
        &self,
        key: &StatKey,
        item_level: u32,
        slot: EquipmentSlot,
    ) -> Option<(i32, i32)> {
        let (min, max) = self.get(key)?.range_at(item_level)?;
        let mult = slot_value_multiplier(slot, *key);
        Some((
            (min as f64 * mult).floor() as i32,
            (max as f64 * mult).floor() as i32,
        ))
    }

    /// Rolls a value uniformly within the stat's item-level range, then
    /// applies the slot multiplier.
    pub fn roll_value(
        &self,
        key: &StatKey,
        item_level: u32,
        slot: EquipmentSlot,
        rng: &mut impl Rng,
    ) -> Option<i32> {
        let (min, max) = self.get(key)?.range_at(item_level)?;
        let rolled = rng.gen_range(min..=max);
        let mult = slot_value_multiplier(slot, *key);
        Some((rolled as f64 * mult).floor() as i32)
    }

    /// Stats that may roll on `slot` given the allowed `themes`, skipping any
    /// key for which `taken` returns true (implicits, existing affixes).
    pub fn eligible(
        &self,
        slot: EquipmentSlot,
        themes: &BTreeSet<String>,
        taken: impl Fn(&StatKey) -> bool,
    ) -> Vec<StatKey> {
        self.definitions
            .values()
            .filter(|def| def.allows_slot(slot))
            .filter(|def| def.allows_themes(themes))
            .filter(|def| !taken(&def.key))
            .map(|def| def.key)
            .collect()
    }
}
