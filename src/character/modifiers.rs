//! Per-stat modifier subtotals.
//!
//! Values are applied as: `(base + flat) * (1 + increased/100) * (1 + more/100)`.

use crate::core::constants::PERCENT_DIVISOR;
use crate::core::stats::{ModifierKind, Resistances, Stat, StatKey};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModifierTotals {
    pub flat: f64,
    pub increased: f64,
    pub more: f64,
}

impl ModifierTotals {
    /// Runs `base` through flat, increased and more, unfloored.
    pub fn apply(&self, base: f64) -> f64 {
        let flat = base + self.flat;
        let increased = flat * (1.0 + self.increased / PERCENT_DIVISOR);
        increased * (1.0 + self.more / PERCENT_DIVISOR)
    }

    fn merge(&mut self, other: &ModifierTotals) {
        self.flat += other.flat;
        self.increased += other.increased;
        self.more += other.more;
    }
}

/// Summed modifiers across any number of sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatTotals {
    modifiers: BTreeMap<Stat, ModifierTotals>,
    max_resist: BTreeMap<Stat, f64>,
}

impl StatTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one modifier. `all_resist` counts toward each resistance.
    pub fn add(&mut self, key: StatKey, value: f64) {
        for stat in expand(key.stat) {
            match key.kind {
                ModifierKind::MaxResist => {
                    *self.max_resist.entry(stat).or_insert(0.0) += value;
                }
                kind => {
                    let totals = self.modifiers.entry(stat).or_default();
                    match kind {
                        ModifierKind::Flat => totals.flat += value,
                        ModifierKind::Increased => totals.increased += value,
                        _ => totals.more += value,
                    }
                }
            }
        }
    }

    pub fn merge(&mut self, other: &StatTotals) {
        for (stat, totals) in &other.modifiers {
            self.modifiers.entry(*stat).or_default().merge(totals);
        }
        for (stat, value) in &other.max_resist {
            *self.max_resist.entry(*stat).or_insert(0.0) += value;
        }
    }

    pub fn get(&self, stat: Stat) -> ModifierTotals {
        self.modifiers.get(&stat).copied().unwrap_or_default()
    }

    pub fn max_resist(&self, stat: Stat) -> f64 {
        self.max_resist.get(&stat).copied().unwrap_or(0.0)
    }

    /// Flat resistances, truncated to whole percent.
    pub fn resistances(&self) -> Resistances {
        let [fire, cold, lightning, chaos] = Stat::RESISTANCES.map(|s| self.get(s).flat as i32);
        Resistances {
            fire,
            cold,
            lightning,
            chaos,
        }
    }

    /// Max-resist adjustments, truncated to whole percent.
    pub fn max_resistances(&self) -> Resistances {
        let [fire, cold, lightning, chaos] = Stat::RESISTANCES.map(|s| self.max_resist(s) as i32);
        Resistances {
            fire,
            cold,
            lightning,
            chaos,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty() && self.max_resist.is_empty()
    }
}

fn expand(stat: Stat) -> Vec<Stat> {
    if stat == Stat::AllResist {
        Stat::RESISTANCES.to_vec()
    } else {
        vec![stat]
    }
}
