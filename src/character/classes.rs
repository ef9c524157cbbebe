use super::aggregate::BaseStats;
use crate::content::table::Identified;
use crate::core::error::EntityKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A playable class: starting stats, per-level growth and passive affinities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub id: String,
    pub name: String,
    pub base: BaseStats,
    pub growth: BaseStats,
    /// Extra offer weight for passives carrying each tag.
    #[serde(default)]
    pub affinities: BTreeMap<String, f64>,
}

impl ClassDefinition {
    pub fn affinity(&self, tag: &str) -> f64 {
        self.affinities.get(tag).copied().unwrap_or(0.0)
    }

    /// Base stats after `level - 1` level-ups.
    pub fn stats_at(&self, level: u32) -> BaseStats {
        let gained = level.saturating_sub(1) as i32;
        BaseStats {
            life: self.base.life + self.growth.life * gained,
            damage: self.base.damage + self.growth.damage * gained,
            defense: self.base.defense + self.growth.defense * gained,
        }
    }
}

impl Identified for ClassDefinition {
    const KIND: EntityKind = EntityKind::Class;

    fn id(&self) -> &str {
        &self.id
    }
}
