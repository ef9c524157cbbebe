//! The player character and its lifecycle.

use super::aggregate::{aggregate, with_morale, BaseStats, DerivedStats};
use super::passives::resolve;
use crate::core::constants::{
    MAX_LEVEL, MORALE_MAX, MORALE_MIN, STARTING_MORALE, XP_CURVE_BASE, XP_CURVE_EXPONENT,
};
use crate::core::context::EngineContext;
use crate::core::error::EngineError;
use crate::items::{Equipment, EquipmentSlot, ItemInstance};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// Experience needed to advance from `level` to `level + 1`.
pub fn xp_for_next_level(level: u32) -> u64 {
    (XP_CURVE_BASE * (level.max(1) as f64).powf(XP_CURVE_EXPONENT)) as u64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exile {
    pub id: Uuid,
    pub name: String,
    pub class_id: String,
    pub level: u32,
    pub experience: u64,
    pub experience_to_next: u64,
    pub morale: i32,
    pub base: BaseStats,
    #[serde(default)]
    pub equipment: Equipment,
    /// Passive ids in allocation order; normal nodes may repeat.
    #[serde(default)]
    pub allocated: Vec<String>,
    /// Cache of `aggregate`; rebuilt by `recompute` and never saved.
    #[serde(skip)]
    derived: DerivedStats,
}

impl Exile {
    pub fn new(name: &str, class_id: &str, ctx: &EngineContext) -> Result<Self, EngineError> {
        let class = ctx.content.classes.require(class_id)?;
        let mut exile = Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            class_id: class.id.clone(),
            level: 1,
            experience: 0,
            experience_to_next: xp_for_next_level(1),
            morale: STARTING_MORALE,
            base: class.stats_at(1),
            equipment: Equipment::new(),
            allocated: Vec::new(),
            derived: DerivedStats::default(),
        };
        exile.recompute(ctx);
        Ok(exile)
    }

    /// Rebuilds derived stats from base stats, equipment and passives.
    pub fn recompute(&mut self, ctx: &EngineContext) {
        let bundle = resolve(&self.allocated, &ctx.content.passives);
        self.derived = aggregate(&self.base, &self.equipment, &bundle);
    }

    /// Aggregated stats without morale.
    pub fn derived(&self) -> &DerivedStats {
        &self.derived
    }

    /// Stats as they apply in combat and on display, morale included.
    pub fn effective_stats(&self) -> DerivedStats {
        with_morale(&self.derived, self.morale)
    }

    pub fn equip(
        &mut self,
        slot: EquipmentSlot,
        item: ItemInstance,
        ctx: &EngineContext,
    ) -> Result<Option<ItemInstance>, EngineError> {
        let previous = self.equipment.equip(slot, item)?;
        self.recompute(ctx);
        Ok(previous)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot, ctx: &EngineContext) -> Option<ItemInstance> {
        let item = self.equipment.unequip(slot)?;
        self.recompute(ctx);
        Some(item)
    }

    /// Allocates a passive. Returns false for a notable or keystone that is
    /// already allocated.
    pub fn allocate_passive(&mut self, id: &str, ctx: &EngineContext) -> Result<bool, EngineError> {
        let node = ctx.content.passives.require(id)?;
        if !node.tier.repeatable() && self.allocated.iter().any(|a| a == id) {
            debug!(passive = id, "passive already allocated");
            return Ok(false);
        }
        self.allocated.push(node.id.clone());
        self.recompute(ctx);
        Ok(true)
    }

    /// Adds experience and applies any level-ups. Returns levels gained.
    pub fn gain_experience(&mut self, amount: u64, ctx: &EngineContext) -> u32 {
        if self.level >= MAX_LEVEL {
            return 0;
        }
        self.experience += amount;

        let growth = ctx.content.classes.get(&self.class_id).map(|c| c.growth);
        let mut gained = 0;
        while self.level < MAX_LEVEL && self.experience >= self.experience_to_next {
            self.experience -= self.experience_to_next;
            self.level += 1;
            gained += 1;
            if let Some(growth) = growth {
                self.base.life += growth.life;
                self.base.damage += growth.damage;
                self.base.defense += growth.defense;
            }
            self.experience_to_next = xp_for_next_level(self.level);
        }
        if self.level >= MAX_LEVEL {
            self.experience = 0;
        }

        if gained > 0 {
            info!(exile = %self.name, level = self.level, "level up");
            self.recompute(ctx);
        }
        gained
    }

    /// Applies a morale delta, clamped to the morale range. Returns the new morale.
    pub fn apply_morale_delta(&mut self, delta: i32) -> i32 {
        self.morale = (self.morale + delta).clamp(MORALE_MIN, MORALE_MAX);
        self.morale
    }
}
