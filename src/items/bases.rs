//! Item base types: the fixed template an item instance is rolled from.

use super::types::{EquipmentSlot, SlotCategory};
use crate::content::table::Identified;
use crate::core::constants::UNARMED_ATTACK_SPEED;
use crate::core::error::EntityKind;
use crate::core::stats::{DamageDistribution, StatKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weapon-only base properties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub attack_speed: f64,
    /// Multiplies flat damage from this weapon's stats during aggregation.
    #[serde(default = "default_damage_multiplier")]
    pub damage_multiplier: f64,
    #[serde(default)]
    pub damage_types: DamageDistribution,
}

fn default_damage_multiplier() -> f64 {
    1.0
}

impl Default for WeaponProfile {
    fn default() -> Self {
        Self {
            attack_speed: UNARMED_ATTACK_SPEED,
            damage_multiplier: default_damage_multiplier(),
            damage_types: DamageDistribution::physical(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBase {
    pub id: String,
    pub name: String,
    pub slot: EquipmentSlot,
    #[serde(default)]
    pub implicits: BTreeMap<StatKey, i32>,
    /// Affix sampling weights; stats not listed weigh 1.
    #[serde(default)]
    pub stat_weights: BTreeMap<StatKey, f64>,
    /// Only meaningful for weapon bases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<WeaponProfile>,
}

impl ItemBase {
    pub fn new(id: &str, name: &str, slot: EquipmentSlot) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            slot,
            implicits: BTreeMap::new(),
            stat_weights: BTreeMap::new(),
            weapon: None,
        }
    }

    pub fn with_implicit(mut self, key: StatKey, value: i32) -> Self {
        self.implicits.insert(key, value);
        self
    }

    pub fn with_weight(mut self, key: StatKey, weight: f64) -> Self {
        self.stat_weights.insert(key, weight);
        self
    }

    pub fn with_weapon(mut self, profile: WeaponProfile) -> Self {
        self.weapon = Some(profile);
        self
    }

    pub fn category(&self) -> SlotCategory {
        self.slot.category()
    }

    pub fn stat_weight(&self, key: &StatKey) -> f64 {
        self.stat_weights.get(key).copied().unwrap_or(1.0)
    }

    /// Weapon profile, defaulted for weapon bases that omit one.
    pub fn weapon_profile(&self) -> WeaponProfile {
        self.weapon.unwrap_or_default()
    }
}

impl Identified for ItemBase {
    const KIND: EntityKind = EntityKind::ItemBase;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stats::Stat;

    #[test]
    fn test_unlisted_stats_weigh_one() {
        let base = ItemBase::new("leather_cap", "Leather Cap", EquipmentSlot::Helmet)
            .with_weight(StatKey::flat(Stat::Defense), 3.0);
        assert_eq!(base.stat_weight(&StatKey::flat(Stat::Defense)), 3.0);
        assert_eq!(base.stat_weight(&StatKey::flat(Stat::Life)), 1.0);
        assert_eq!(base.category(), SlotCategory::Armor);
    }

    #[test]
    fn test_weapon_profile_defaults() {
        let base = ItemBase::new("club", "Club", EquipmentSlot::Weapon);
        let profile = base.weapon_profile();
        assert_eq!(profile.attack_speed, UNARMED_ATTACK_SPEED);
        assert_eq!(profile.damage_multiplier, 1.0);
    }

    #[test]
    fn test_base_json_accepts_loose_stat_keys() {
        let json = r#"{
            "id": "ruby_ring",
            "name": "Ruby Ring",
            "slot": "ring",
            "implicits": { "fireResistance": 10 },
            "stat_weights": { "FIRE_RESIST": 0.0 }
        }"#;
        let base: ItemBase = serde_json::from_str(json).unwrap();
        let key = StatKey::flat(Stat::FireResist);
        assert_eq!(base.implicits.get(&key), Some(&10));
        assert_eq!(base.stat_weight(&key), 0.0);
        assert!(base.weapon.is_none());
    }
}
