//! Persistent game state: the exile, inventory and currency.

use super::context::EngineContext;
use super::error::EngineError;
use crate::character::Exile;
use crate::items::{chaos_reroll, exalted_add, CraftOutcome, Currency, EquipmentSlot, ItemInstance};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Everything that belongs to one player: the exile, unequipped items and
/// currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub exile: Exile,
    #[serde(default)]
    pub inventory: Vec<ItemInstance>,
    #[serde(default)]
    pub currency: Currency,
}

impl GameState {
    pub fn new(exile: Exile) -> Self {
        Self {
            exile,
            inventory: Vec::new(),
            currency: Currency::default(),
        }
    }

    fn inventory_item(&self, index: usize) -> Result<&ItemInstance, EngineError> {
        self.inventory.get(index).ok_or_else(|| {
            warn!(
                index,
                size = self.inventory.len(),
                "inventory index out of range"
            );
            EngineError::InvalidSlot {
                item: format!("inventory item {index}"),
                slot: "inventory".to_string(),
            }
        })
    }

    /// Equips inventory item `index` into `slot`, moving any previously
    /// equipped item back into the inventory. A rejected item stays put.
    pub fn equip_from_inventory(
        &mut self,
        index: usize,
        slot: EquipmentSlot,
        ctx: &EngineContext,
    ) -> Result<(), EngineError> {
        let item = self.inventory_item(index)?.clone();
        let previous = self.exile.equip(slot, item, ctx)?;
        self.inventory.remove(index);
        if let Some(previous) = previous {
            self.inventory.push(previous);
        }
        Ok(())
    }

    pub fn unequip_to_inventory(&mut self, slot: EquipmentSlot, ctx: &EngineContext) -> bool {
        match self.exile.unequip(slot, ctx) {
            Some(item) => {
                self.inventory.push(item);
                true
            }
            None => false,
        }
    }

    /// Chaos-rerolls inventory item `index`.
    pub fn chaos_inventory_item(
        &mut self,
        index: usize,
        ctx: &EngineContext,
        rng: &mut impl Rng,
    ) -> Result<CraftOutcome, EngineError> {
        self.inventory_item(index)?;
        let generator = ctx.content.item_generator();
        let item = &mut self.inventory[index];
        chaos_reroll(item, &generator, &mut self.currency, rng)
    }

    /// Adds an affix to inventory item `index` with an exalted orb.
    pub fn exalt_inventory_item(
        &mut self,
        index: usize,
        ctx: &EngineContext,
        rng: &mut impl Rng,
    ) -> Result<CraftOutcome, EngineError> {
        self.inventory_item(index)?;
        let generator = ctx.content.item_generator();
        let item = &mut self.inventory[index];
        exalted_add(item, &generator, &mut self.currency, rng)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Loads a saved state and rebuilds the exile's derived stats.
    pub fn from_json(json: &str, ctx: &EngineContext) -> Result<Self, serde_json::Error> {
        let mut state: GameState = serde_json::from_str(json)?;
        state.exile.recompute(ctx);
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::GenerateOptions;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (EngineContext, GameState) {
        let ctx = EngineContext::standard().unwrap();
        let exile = Exile::new("Vessa", "ranger", &ctx).unwrap();
        (ctx, GameState::new(exile))
    }

    fn rare_item(ctx: &EngineContext, slot_seed: u64) -> ItemInstance {
        let mut rng = ChaCha8Rng::seed_from_u64(slot_seed);
        let options = GenerateOptions {
            forced_rarity: Some("rare".to_string()),
            ..GenerateOptions::at_level(20)
        };
        ctx.content.item_generator().generate(&options, &mut rng).unwrap()
    }

    #[test]
    fn test_equip_swaps_with_inventory() {
        let (ctx, mut state) = setup();
        let first = rare_item(&ctx, 1);
        let slot = first.slot();
        let mut second = first.clone();
        second.core_mut().item_level += 1;

        state.inventory.push(first.clone());
        state.inventory.push(second.clone());
        state.equip_from_inventory(0, slot, &ctx).unwrap();
        assert_eq!(state.inventory, vec![second.clone()]);
        assert_eq!(state.exile.equipment.get(slot), Some(&first));

        state.equip_from_inventory(0, slot, &ctx).unwrap();
        assert_eq!(state.inventory, vec![first]);
        assert_eq!(state.exile.equipment.get(slot), Some(&second));
    }

    #[test]
    fn test_rejected_equip_keeps_inventory() {
        let (ctx, mut state) = setup();
        let item = rare_item(&ctx, 2);
        let wrong = EquipmentSlot::ALL
            .into_iter()
            .find(|slot| *slot != item.slot())
            .unwrap();
        state.inventory.push(item.clone());

        let err = state.equip_from_inventory(0, wrong, &ctx).unwrap_err();
        assert_eq!(err.code(), "invalid_slot");
        assert_eq!(state.inventory, vec![item]);
        assert!(state.equip_from_inventory(5, wrong, &ctx).is_err());
    }

    #[test]
    fn test_crafting_without_orbs_changes_nothing() {
        let (ctx, mut state) = setup();
        state.inventory.push(rare_item(&ctx, 3));
        let before = state.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let err = state.chaos_inventory_item(0, &ctx, &mut rng).unwrap_err();
        assert_eq!(err.code(), "insufficient_resource");
        assert_eq!(state, before);
    }

    #[test]
    fn test_chaos_spends_one_orb() {
        let (ctx, mut state) = setup();
        state.inventory.push(rare_item(&ctx, 4));
        state.currency.chaos_orbs = 2;
        let mut rng = ChaCha8Rng::seed_from_u64(10);

        let outcome = state.chaos_inventory_item(0, &ctx, &mut rng).unwrap();
        assert!(outcome.removed.is_some());
        assert_eq!(state.currency.chaos_orbs, 1);
        let added = outcome.added.0;
        assert!(state.inventory[0].core().affixes.contains_key(&added));
    }

    #[test]
    fn test_json_round_trip() {
        let (ctx, mut state) = setup();
        let item = rare_item(&ctx, 5);
        let slot = item.slot();
        state.inventory.push(item);
        state.equip_from_inventory(0, slot, &ctx).unwrap();
        state.inventory.push(rare_item(&ctx, 6));
        state.currency.gold = 250;

        let json = state.to_json().unwrap();
        let loaded = GameState::from_json(&json, &ctx).unwrap();
        assert_eq!(loaded, state);
        assert_eq!(loaded.exile.derived(), state.exile.derived());
    }
}
