//! Monster definitions, live monster state and combat results.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::content::table::Identified;
use crate::core::constants::*;
use crate::core::error::{EngineError, EntityKind};
use crate::core::stats::{DamageDistribution, DamageType, Resistances};

fn default_multiplier() -> f64 {
    1.0
}

fn default_attack_speed() -> f64 {
    UNARMED_ATTACK_SPEED
}

/// One boss phase, entered once health falls to `threshold` or below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseDefinition {
    /// Health fraction in `[0, 1]`.
    pub threshold: f64,
    #[serde(default = "default_multiplier")]
    pub damage_multiplier: f64,
    /// Replaces the monster's attack speed while active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_speed: Option<f64>,
    #[serde(default)]
    pub abilities: Vec<String>,
}

impl PhaseDefinition {
    pub fn at(threshold: f64) -> Self {
        Self {
            threshold,
            damage_multiplier: 1.0,
            attack_speed: None,
            abilities: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterDefinition {
    pub id: String,
    pub name: String,
    pub life: i32,
    pub damage: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default = "default_attack_speed")]
    pub attack_speed: f64,
    #[serde(default)]
    pub damage_types: DamageDistribution,
    #[serde(default)]
    pub resistances: Resistances,
    /// Ordered by descending threshold.
    #[serde(default)]
    pub phases: Vec<PhaseDefinition>,
    #[serde(default)]
    pub boss: bool,
    #[serde(default)]
    pub experience: u64,
    #[serde(default)]
    pub gold: u64,
}

impl MonsterDefinition {
    /// Bosses are tagged explicitly or carry more than one phase.
    pub fn is_boss(&self) -> bool {
        self.boss || self.phases.len() > 1
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.life <= 0 {
            return Err(EngineError::corrupt(
                "monster",
                format!("{} has non-positive life", self.id),
            ));
        }
        if !self.attack_speed.is_finite() || self.attack_speed < 0.0 {
            return Err(EngineError::corrupt(
                "monster",
                format!("{} has invalid attack speed", self.id),
            ));
        }
        for phase in &self.phases {
            if !(0.0..=1.0).contains(&phase.threshold) {
                return Err(EngineError::corrupt(
                    "monster",
                    format!(
                        "{} phase threshold {} outside [0, 1]",
                        self.id, phase.threshold
                    ),
                ));
            }
        }
        if let Some(first) = self.phases.first() {
            if first.threshold < 1.0 {
                return Err(EngineError::corrupt(
                    "monster",
                    format!("{} first phase must start at full health", self.id),
                ));
            }
        }
        if self
            .phases
            .windows(2)
            .any(|pair| pair[1].threshold >= pair[0].threshold)
        {
            return Err(EngineError::corrupt(
                "monster",
                format!("{} phases are not in descending threshold order", self.id),
            ));
        }
        Ok(())
    }
}

impl Identified for MonsterDefinition {
    const KIND: EntityKind = EntityKind::Monster;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EliteTier {
    #[default]
    Normal,
    Magic,
    Rare,
}

impl EliteTier {
    /// Returns (life_mult, damage_mult, reward_mult).
    pub fn multipliers(&self) -> (f64, f64, f64) {
        match self {
            EliteTier::Normal => (1.0, 1.0, 1.0),
            EliteTier::Magic => MAGIC_ELITE_MULTIPLIERS,
            EliteTier::Rare => RARE_ELITE_MULTIPLIERS,
        }
    }
}

/// Per-mission chances that a non-boss spawn is an elite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EliteOdds {
    pub magic: f64,
    pub rare: f64,
}

impl Default for EliteOdds {
    fn default() -> Self {
        Self {
            magic: 0.10,
            rare: 0.02,
        }
    }
}

impl EliteOdds {
    pub fn none() -> Self {
        Self {
            magic: 0.0,
            rare: 0.0,
        }
    }

    /// Single draw: rare is checked first, then magic.
    pub fn roll(&self, rng: &mut impl Rng) -> EliteTier {
        let roll = rng.gen::<f64>();
        if roll < self.rare {
            EliteTier::Rare
        } else if roll < self.rare + self.magic {
            EliteTier::Magic
        } else {
            EliteTier::Normal
        }
    }
}

/// A spawned monster. Created per encounter and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub definition_id: String,
    pub name: String,
    pub level: u32,
    pub elite: EliteTier,
    pub max_life: i32,
    pub life: i32,
    pub damage: i32,
    pub defense: i32,
    pub attack_speed: f64,
    pub damage_types: DamageDistribution,
    pub resistances: Resistances,
    pub phases: Vec<PhaseDefinition>,
    /// Index into `phases`; only ever increases.
    pub phase: usize,
    pub boss: bool,
    pub experience: u64,
    pub gold: u64,
}

impl Monster {
    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    pub fn life_fraction(&self) -> f64 {
        if self.max_life <= 0 {
            return 0.0;
        }
        self.life.max(0) as f64 / self.max_life as f64
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.life = (self.life - amount.max(0)).max(0);
    }

    pub fn current_phase(&self) -> Option<&PhaseDefinition> {
        self.phases.get(self.phase)
    }

    /// Moves to the latest phase whose threshold the current health fraction
    /// has reached. Never moves back. Returns `(from, to)` on a change.
    pub fn update_phase(&mut self) -> Option<(usize, usize)> {
        let fraction = self.life_fraction();
        let reached = self
            .phases
            .iter()
            .rposition(|phase| phase.threshold >= fraction)?;
        if reached <= self.phase {
            return None;
        }
        let from = self.phase;
        self.phase = reached;
        Some((from, reached))
    }

    /// Base damage scaled by the active phase.
    pub fn effective_damage(&self) -> f64 {
        let multiplier = self
            .current_phase()
            .map_or(1.0, |phase| phase.damage_multiplier);
        self.damage as f64 * multiplier
    }

    pub fn effective_attack_speed(&self) -> f64 {
        self.current_phase()
            .and_then(|phase| phase.attack_speed)
            .unwrap_or(self.attack_speed)
    }

    pub fn abilities(&self) -> &[String] {
        self.current_phase()
            .map(|phase| phase.abilities.as_slice())
            .unwrap_or(&[])
    }
}

/// Damage of one type within a single hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamagePart {
    pub damage_type: DamageType,
    pub raw: f64,
    pub mitigated: f64,
}

/// One connecting attack, before and after mitigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitBreakdown {
    pub raw: f64,
    pub parts: Vec<DamagePart>,
    /// Floored sum of the mitigated parts, at least 1.
    pub total: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathKind {
    /// A single hit at least as large as maximum life.
    Oneshot,
    OutclassedBarely,
    OutclassedSignificantly,
    OutclassedCompletely,
    /// Attempted at the win-chance floor.
    Suicide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetreatReason {
    LowLife,
    RoundCap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum CombatOutcome {
    Victory,
    Death(DeathKind),
    Retreat(RetreatReason),
}

impl CombatOutcome {
    pub fn is_victory(&self) -> bool {
        matches!(self, CombatOutcome::Victory)
    }

    pub fn is_death(&self) -> bool {
        matches!(self, CombatOutcome::Death(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    PhaseTransition { round: u32, from: usize, to: usize },
    CullingStrike { round: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatResult {
    pub rounds: u32,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    /// Largest single hit taken, if any connected.
    pub heaviest_hit: Option<HitBreakdown>,
    pub outcome: CombatOutcome,
    pub win_chance: f64,
    pub max_life: i32,
    pub life_remaining: i32,
    pub monster_life_remaining: i32,
    #[serde(default)]
    pub events: Vec<CombatEvent>,
}

impl CombatResult {
    pub fn life_fraction(&self) -> f64 {
        if self.max_life <= 0 {
            return 0.0;
        }
        self.life_remaining.max(0) as f64 / self.max_life as f64
    }

    pub fn heaviest_hit_total(&self) -> i32 {
        self.heaviest_hit.as_ref().map_or(0, |hit| hit.total)
    }
}
