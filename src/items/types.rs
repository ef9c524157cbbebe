//! Item slots, bases, instances and rolled stats.

use crate::core::stats::{DamageDistribution, StatKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Broad slot grouping used for slot rolls and stat restrictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotCategory {
    Weapon,
    Armor,
    Jewelry,
}

impl SlotCategory {
    pub const ALL: [SlotCategory; 3] = [
        SlotCategory::Weapon,
        SlotCategory::Armor,
        SlotCategory::Jewelry,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    BodyArmor,
    Helmet,
    Gloves,
    Boots,
    Amulet,
    Ring,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 7] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::BodyArmor,
        EquipmentSlot::Helmet,
        EquipmentSlot::Gloves,
        EquipmentSlot::Boots,
        EquipmentSlot::Amulet,
        EquipmentSlot::Ring,
    ];

    pub fn category(&self) -> SlotCategory {
        match self {
            EquipmentSlot::Weapon => SlotCategory::Weapon,
            EquipmentSlot::BodyArmor
            | EquipmentSlot::Helmet
            | EquipmentSlot::Gloves
            | EquipmentSlot::Boots => SlotCategory::Armor,
            EquipmentSlot::Amulet | EquipmentSlot::Ring => SlotCategory::Jewelry,
        }
    }

    /// Returns the display name for this slot.
    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::BodyArmor => "body armor",
            EquipmentSlot::Helmet => "helmet",
            EquipmentSlot::Gloves => "gloves",
            EquipmentSlot::Boots => "boots",
            EquipmentSlot::Amulet => "amulet",
            EquipmentSlot::Ring => "ring",
        }
    }
}

/// Fields shared by every item category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCore {
    pub base_id: String,
    pub name: String,
    pub slot: EquipmentSlot,
    pub rarity: String,
    pub item_level: u32,
    /// Themes that were allowed when the item dropped; crafting reuses them.
    #[serde(default)]
    pub themes: BTreeSet<String>,
    #[serde(default)]
    pub implicits: BTreeMap<StatKey, i32>,
    #[serde(default)]
    pub affixes: BTreeMap<StatKey, i32>,
}

impl ItemCore {
    pub fn has_stat(&self, key: &StatKey) -> bool {
        self.implicits.contains_key(key) || self.affixes.contains_key(key)
    }

    /// Implicit stats followed by rolled affixes.
    pub fn stats(&self) -> impl Iterator<Item = (&StatKey, &i32)> {
        self.implicits.iter().chain(self.affixes.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub core: ItemCore,
    pub attack_speed: f64,
    /// Applied to flat damage at aggregation time; stored affixes stay raw.
    pub damage_multiplier: f64,
    #[serde(default)]
    pub damage_types: DamageDistribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub core: ItemCore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jewelry {
    pub core: ItemCore,
}

/// A concrete generated item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ItemInstance {
    Weapon(Weapon),
    Armor(Armor),
    Jewelry(Jewelry),
}

impl ItemInstance {
    pub fn core(&self) -> &ItemCore {
        match self {
            ItemInstance::Weapon(w) => &w.core,
            ItemInstance::Armor(a) => &a.core,
            ItemInstance::Jewelry(j) => &j.core,
        }
    }

    pub fn core_mut(&mut self) -> &mut ItemCore {
        match self {
            ItemInstance::Weapon(w) => &mut w.core,
            ItemInstance::Armor(a) => &mut a.core,
            ItemInstance::Jewelry(j) => &mut j.core,
        }
    }

    pub fn slot(&self) -> EquipmentSlot {
        self.core().slot
    }

    pub fn category(&self) -> SlotCategory {
        match self {
            ItemInstance::Weapon(_) => SlotCategory::Weapon,
            ItemInstance::Armor(_) => SlotCategory::Armor,
            ItemInstance::Jewelry(_) => SlotCategory::Jewelry,
        }
    }

    pub fn as_weapon(&self) -> Option<&Weapon> {
        match self {
            ItemInstance::Weapon(w) => Some(w),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.core().name
    }

    pub fn affix_count(&self) -> usize {
        self.core().affixes.len()
    }
}
