//! Per-round victory chance and death classification.

use super::types::DeathKind;
use crate::core::constants::*;

/// Per-round victory chance for a power-to-difficulty `ratio`.
///
/// - `ratio <= 0`: the floor (5%)
/// - `0 < ratio < 1`: linear from 5% to 15%
/// - `ratio >= 1`: `15% + 0.3 * ln(ratio)`, capped at 90%
pub fn win_chance(ratio: f64) -> f64 {
    if ratio.is_nan() || ratio <= 0.0 {
        return WIN_CHANCE_FLOOR;
    }
    if ratio < 1.0 {
        return WIN_CHANCE_FLOOR + (WIN_CHANCE_AT_PARITY - WIN_CHANCE_FLOOR) * ratio;
    }
    (WIN_CHANCE_AT_PARITY + WIN_CHANCE_LOG_SLOPE * ratio.ln()).min(WIN_CHANCE_CAP)
}

/// Win chance for an exile of `power` against a mission of `difficulty`.
/// A non-positive difficulty poses no threat and yields the cap.
pub fn win_chance_for(power: f64, difficulty: f64) -> f64 {
    if difficulty <= 0.0 {
        return WIN_CHANCE_CAP;
    }
    win_chance(power / difficulty)
}

/// Classifies a death: a hit at or above maximum life is a oneshot,
/// otherwise the bracket comes from the encounter's win chance.
pub fn classify_death(heaviest_hit: i32, max_life: i32, win_chance: f64) -> DeathKind {
    if heaviest_hit >= max_life {
        return DeathKind::Oneshot;
    }
    if win_chance <= WIN_CHANCE_FLOOR + f64::EPSILON {
        DeathKind::Suicide
    } else if win_chance >= OUTCLASSED_BARELY_MIN_CHANCE {
        DeathKind::OutclassedBarely
    } else if win_chance >= OUTCLASSED_SIGNIFICANTLY_MIN_CHANCE {
        DeathKind::OutclassedSignificantly
    } else {
        DeathKind::OutclassedCompletely
    }
}
