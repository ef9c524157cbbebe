//! Passive nodes: resolution into a modifier bundle, and level-up offers.

use super::classes::ClassDefinition;
use super::modifiers::StatTotals;
use crate::content::table::{Identified, Table};
use crate::core::error::{EngineError, EntityKind};
use crate::core::sampling::weighted_sample;
use crate::core::stats::StatKey;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassiveTier {
    #[default]
    Normal,
    Notable,
    Keystone,
}

impl PassiveTier {
    /// Base weight when offering passives.
    pub fn offer_weight(&self) -> f64 {
        match self {
            PassiveTier::Normal => 1.0,
            PassiveTier::Notable => 0.5,
            PassiveTier::Keystone => 0.15,
        }
    }

    /// Normal nodes stack; notables and keystones are taken once.
    pub fn repeatable(&self) -> bool {
        matches!(self, PassiveTier::Normal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassiveEffect {
    pub stat: StatKey,
    pub magnitude: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tier: PassiveTier,
    pub effects: Vec<PassiveEffect>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Identified for PassiveNode {
    const KIND: EntityKind = EntityKind::Passive;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Allocated passives folded into one set of modifiers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassiveBundle {
    pub totals: StatTotals,
    /// Allocated ids that had no definition.
    pub skipped: Vec<String>,
}

/// Folds allocated passive ids into a bundle. Unknown ids are logged and
/// skipped; duplicates count once per allocation.
pub fn resolve(allocated: &[String], passives: &Table<PassiveNode>) -> PassiveBundle {
    let mut bundle = PassiveBundle::default();

    for id in allocated {
        let Some(node) = passives.get(id) else {
            warn!(id = %id, "skipping unknown allocated passive");
            bundle.skipped.push(id.clone());
            continue;
        };
        for effect in &node.effects {
            bundle.totals.add(effect.stat, effect.magnitude as f64);
        }
    }

    bundle
}

/// Samples up to `count` distinct passives to offer on level-up.
///
/// Weight is the tier weight scaled by the class's affinity for the node's
/// tags. Notables and keystones already allocated are never offered.
pub fn offer_passives<'a>(
    class: &ClassDefinition,
    allocated: &[String],
    passives: &'a Table<PassiveNode>,
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<&'a PassiveNode>, EngineError> {
    let candidates: Vec<&PassiveNode> = passives
        .iter()
        .filter(|node| node.tier.repeatable() || !allocated.contains(&node.id))
        .collect();

    let weight = |node: &&PassiveNode| {
        let affinity: f64 = node.tags.iter().map(|tag| class.affinity(tag)).sum();
        node.tier.offer_weight() * (1.0 + affinity)
    };
    let offered: Vec<&PassiveNode> = weighted_sample(&candidates, count, weight, true, rng)
        .into_iter()
        .copied()
        .collect();

    if offered.is_empty() && count > 0 {
        warn!(class = %class.id, "no passives left to offer");
        return Err(EngineError::ExhaustedPool { pool: "passive" });
    }
    Ok(offered)
}
