//! Morale deltas from finished encounters.

use super::aggregate::DerivedStats;
use crate::combat::{CombatOutcome, CombatResult};
use crate::core::config::MoraleConfig;
use crate::core::constants::PERCENT_DIVISOR;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoraleChange {
    pub delta: i32,
    pub message: String,
}

/// Scales a raw delta by `1 + resistance/100`, rounding to nearest.
///
/// A non-zero delta never scales to zero: it snaps to ±1 instead, signed by
/// the scaled value (or the raw value when the factor is zero).
pub fn scale_delta(raw: i32, morale_resistance: i32) -> i32 {
    let scaled = raw as f64 * (1.0 + morale_resistance as f64 / PERCENT_DIVISOR);
    let rounded = scaled.round() as i32;
    if raw == 0 || rounded != 0 {
        return rounded;
    }
    if scaled != 0.0 {
        scaled.signum() as i32
    } else {
        raw.signum()
    }
}

/// Morale delta for a finished encounter. The caller clamps the result.
pub fn compute_delta(
    result: &CombatResult,
    stats: &DerivedStats,
    config: &MoraleConfig,
) -> MoraleChange {
    let (raw, message) = match result.outcome {
        CombatOutcome::Death(_) => {
            return MoraleChange {
                delta: 0,
                message: "Fell in battle.".to_string(),
            };
        }
        CombatOutcome::Victory => {
            let fraction = result.life_fraction();
            if fraction < config.close_call_life_fraction {
                (config.close_call_delta, "A narrow escape hardens their resolve.")
            } else if fraction > config.easy_fight_life_fraction
                && result.win_chance >= config.easy_fight_win_chance
            {
                (config.easy_fight_delta, "An easy victory breeds complacency.")
            } else {
                (config.victory_delta, "Victory lifts their spirits.")
            }
        }
        CombatOutcome::Retreat(_) => {
            if result.rounds <= config.early_retreat_rounds {
                (config.early_retreat_delta, "Fled before the fight began in earnest.")
            } else if result.rounds <= config.mid_retreat_rounds {
                (config.mid_retreat_delta, "Retreated after a brief struggle.")
            } else {
                (config.late_retreat_delta, "Withdrew after a long, hard fight.")
            }
        }
    };

    MoraleChange {
        delta: scale_delta(raw, stats.morale_resistance) + stats.morale_gain,
        message: message.to_string(),
    }
}
