//! Tunable engine policy.

use serde::{Deserialize, Serialize};

/// Top-level engine configuration, passed by reference inside `EngineContext`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub combat: CombatConfig,
    #[serde(default)]
    pub morale: MoraleConfig,
}

/// Combat resolution policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Rounds before an instant-mode encounter defaults to retreat
    pub round_cap: u32,

    /// Rounds batched into one turn in turn-based mode
    pub rounds_per_turn: u32,

    /// Turns before a turn-based encounter defaults to retreat
    pub max_turns: u32,

    /// Life fraction below which the exile may flee
    pub retreat_life_fraction: f64,

    /// Chance to flee once below the retreat threshold
    pub retreat_chance: f64,

    /// Non-boss health fraction at or below which a culling strike lands
    pub cull_threshold: f64,

    /// Raw damage is rolled uniformly in [damage * min, damage * max]
    pub damage_variance_min: f64,
    pub damage_variance_max: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            round_cap: 10,
            rounds_per_turn: 5,
            max_turns: 6,
            retreat_life_fraction: 0.2,
            retreat_chance: 0.5,
            cull_threshold: 0.2,
            damage_variance_min: 0.8,
            damage_variance_max: 1.2,
        }
    }
}

/// Morale delta brackets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoraleConfig {
    /// Victories below this life fraction count as a close call
    pub close_call_life_fraction: f64,
    pub close_call_delta: i32,

    /// Victories above this life fraction against weak opposition are too easy
    pub easy_fight_life_fraction: f64,
    /// Win chance at or above which the opposition counts as weak
    pub easy_fight_win_chance: f64,
    pub easy_fight_delta: i32,

    pub victory_delta: i32,

    /// Retreats after at most this many rounds are an early flee
    pub early_retreat_rounds: u32,
    pub early_retreat_delta: i32,
    /// Retreats after at most this many rounds (but more than early)
    pub mid_retreat_rounds: u32,
    pub mid_retreat_delta: i32,
    pub late_retreat_delta: i32,
}

impl Default for MoraleConfig {
    fn default() -> Self {
        Self {
            close_call_life_fraction: 0.2,
            close_call_delta: 5,
            easy_fight_life_fraction: 0.9,
            easy_fight_win_chance: 0.6,
            easy_fight_delta: -1,
            victory_delta: 2,
            early_retreat_rounds: 2,
            early_retreat_delta: -4,
            mid_retreat_rounds: 5,
            mid_retreat_delta: -2,
            late_retreat_delta: -1,
        }
    }
}
