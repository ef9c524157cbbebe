//! The exile's equipped items, one per slot.

use super::types::{EquipmentSlot, ItemInstance, Weapon};
use crate::core::error::EngineError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Exile equipment slots, one item each.
///
/// New slots must be `#[serde(default)]` so older saves still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub weapon: Option<ItemInstance>,
    #[serde(default)]
    pub body_armor: Option<ItemInstance>,
    #[serde(default)]
    pub helmet: Option<ItemInstance>,
    #[serde(default)]
    pub gloves: Option<ItemInstance>,
    #[serde(default)]
    pub boots: Option<ItemInstance>,
    #[serde(default)]
    pub amulet: Option<ItemInstance>,
    #[serde(default)]
    pub ring: Option<ItemInstance>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&ItemInstance> {
        self.slot_ref(slot).as_ref()
    }

    fn slot_ref(&self, slot: EquipmentSlot) -> &Option<ItemInstance> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::BodyArmor => &self.body_armor,
            EquipmentSlot::Helmet => &self.helmet,
            EquipmentSlot::Gloves => &self.gloves,
            EquipmentSlot::Boots => &self.boots,
            EquipmentSlot::Amulet => &self.amulet,
            EquipmentSlot::Ring => &self.ring,
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<ItemInstance> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::BodyArmor => &mut self.body_armor,
            EquipmentSlot::Helmet => &mut self.helmet,
            EquipmentSlot::Gloves => &mut self.gloves,
            EquipmentSlot::Boots => &mut self.boots,
            EquipmentSlot::Amulet => &mut self.amulet,
            EquipmentSlot::Ring => &mut self.ring,
        }
    }

    /// Rejects an item whose own slot differs from `slot`.
    pub fn check_slot(slot: EquipmentSlot, item: &ItemInstance) -> Result<(), EngineError> {
        if item.slot() != slot {
            warn!(
                item = item.name(),
                slot = slot.name(),
                "item does not fit slot"
            );
            return Err(EngineError::InvalidSlot {
                item: item.name().to_string(),
                slot: slot.name().to_string(),
            });
        }
        Ok(())
    }

    /// Places `item` in `slot`, returning whatever was there before.
    pub fn equip(
        &mut self,
        slot: EquipmentSlot,
        item: ItemInstance,
    ) -> Result<Option<ItemInstance>, EngineError> {
        Self::check_slot(slot, &item)?;
        Ok(self.slot_mut(slot).replace(item))
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<ItemInstance> {
        self.slot_mut(slot).take()
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref().and_then(ItemInstance::as_weapon)
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &ItemInstance> {
        EquipmentSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::{Armor, ItemCore, Jewelry};
    use std::collections::{BTreeMap, BTreeSet};

    fn core(slot: EquipmentSlot, name: &str) -> ItemCore {
        ItemCore {
            base_id: name.to_lowercase().replace(' ', "_"),
            name: name.to_string(),
            slot,
            rarity: "normal".to_string(),
            item_level: 10,
            themes: BTreeSet::new(),
            implicits: BTreeMap::new(),
            affixes: BTreeMap::new(),
        }
    }

    fn armor(slot: EquipmentSlot, name: &str) -> ItemInstance {
        ItemInstance::Armor(Armor {
            core: core(slot, name),
        })
    }

    #[test]
    fn test_equipment_starts_empty() {
        let eq = Equipment::new();
        assert!(eq.weapon.is_none());
        assert_eq!(eq.iter_equipped().count(), 0);
    }

    #[test]
    fn test_equip_returns_previous_item() {
        let mut eq = Equipment::new();
        let first = armor(EquipmentSlot::Helmet, "Old Cap");
        let second = armor(EquipmentSlot::Helmet, "New Cap");

        assert_eq!(
            eq.equip(EquipmentSlot::Helmet, first.clone()).unwrap(),
            None
        );
        assert_eq!(
            eq.equip(EquipmentSlot::Helmet, second.clone()).unwrap(),
            Some(first)
        );
        assert_eq!(eq.get(EquipmentSlot::Helmet), Some(&second));
        assert_eq!(eq.iter_equipped().count(), 1);
    }

    #[test]
    fn test_equip_wrong_slot_rejected() {
        let mut eq = Equipment::new();
        let boots = armor(EquipmentSlot::Boots, "Sandals");
        let err = eq.equip(EquipmentSlot::Helmet, boots).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidSlot {
                item: "Sandals".to_string(),
                slot: "helmet".to_string()
            }
        );
        assert_eq!(eq, Equipment::new());
    }

    #[test]
    fn test_unequip_slot() {
        let mut eq = Equipment::new();
        let ring = ItemInstance::Jewelry(Jewelry {
            core: core(EquipmentSlot::Ring, "Band"),
        });
        eq.equip(EquipmentSlot::Ring, ring.clone()).unwrap();
        assert_eq!(eq.unequip(EquipmentSlot::Ring), Some(ring));
        assert_eq!(eq.unequip(EquipmentSlot::Ring), None);
        assert_eq!(eq.iter_equipped().count(), 0);
    }

    #[test]
    fn test_old_save_without_slots_loads() {
        let eq: Equipment = serde_json::from_str(r#"{ "helmet": null }"#).unwrap();
        assert_eq!(eq, Equipment::new());
    }
}
