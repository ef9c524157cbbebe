//! Mission definitions and mission reports.

use crate::character::MoraleChange;
use crate::combat::{CombatResult, EliteOdds};
use crate::content::table::Identified;
use crate::core::error::{EngineError, EntityKind};
use crate::items::{Currency, ItemInstance};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatMode {
    /// Each encounter resolved independently at full life.
    #[default]
    Instant,
    /// Encounters resolved in turns, with life carried between them.
    TurnBased,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rewards {
    pub gold_min: u64,
    pub gold_max: u64,
    pub experience: u64,
    /// Independent item drop checks on success.
    pub item_drops: u32,
    pub drop_chance: f64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            gold_min: 0,
            gold_max: 0,
            experience: 0,
            item_drops: 1,
            drop_chance: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionDefinition {
    pub id: String,
    pub name: String,
    pub difficulty: f64,
    pub monster_level: u32,
    /// Monster ids fought in order before the boss.
    pub encounters: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boss: Option<String>,
    #[serde(default)]
    pub elite_odds: EliteOdds,
    #[serde(default)]
    pub mode: CombatMode,
    #[serde(default)]
    pub themes: BTreeSet<String>,
    #[serde(default)]
    pub rewards: Rewards,
}

impl MissionDefinition {
    /// All monster ids in fight order, boss last.
    pub fn monster_ids(&self) -> impl Iterator<Item = &str> {
        self.encounters
            .iter()
            .chain(self.boss.iter())
            .map(String::as_str)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.monster_ids().next().is_none() {
            return Err(EngineError::corrupt(
                "mission",
                format!("{} has no encounters", self.id),
            ));
        }
        if !self.difficulty.is_finite() {
            return Err(EngineError::corrupt(
                "mission",
                format!("{} has a non-finite difficulty", self.id),
            ));
        }
        if self.rewards.gold_min > self.rewards.gold_max {
            return Err(EngineError::corrupt(
                "mission",
                format!("{} gold range is inverted", self.id),
            ));
        }
        Ok(())
    }
}

impl Identified for MissionDefinition {
    const KIND: EntityKind = EntityKind::Mission;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Everything a mission run produced, already applied to the game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionReport {
    pub mission_id: String,
    pub success: bool,
    pub combats: Vec<CombatResult>,
    pub monsters_slain: u32,
    pub gold: u64,
    pub experience: u64,
    pub levels_gained: u32,
    pub items: Vec<ItemInstance>,
    /// Crafting orbs found (gold is reported separately).
    pub orbs: Currency,
    pub morale: MoraleChange,
    pub morale_after: i32,
}
