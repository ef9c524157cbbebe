//! Turn-based encounter resolution for multi-encounter missions.

use super::simulator::Fight;
use super::types::{CombatEvent, CombatOutcome, CombatResult, Monster, RetreatReason};
use crate::character::aggregate::DerivedStats;
use crate::core::config::CombatConfig;
use crate::core::constants::PERCENT_DIVISOR;
use rand::Rng;
use tracing::debug;

/// Life restored after the exile's attacks in one round.
pub fn healing(stats: &DerivedStats, damage_dealt: u64, hits_landed: u32) -> i32 {
    let leech_fraction = stats.life_leech.max(0) as f64 / PERCENT_DIVISOR;
    let leech = (damage_dealt as f64 * leech_fraction).floor() as i32;
    let on_hit = stats.life_on_hit.max(0) * hits_landed as i32;
    leech + on_hit + stats.life_regen.max(0)
}

/// Resolves one encounter in turns of `config.rounds_per_turn` rounds,
/// starting from `current_life`.
///
/// The fight is won only by killing the monster or by a culling strike at
/// the end of a turn. Healing lands between the exile's and the monster's
/// attacks. After `config.max_turns` turns the exile retreats.
pub fn run_turn_based(
    stats: &DerivedStats,
    current_life: i32,
    monster: &mut Monster,
    difficulty: f64,
    config: &CombatConfig,
    rng: &mut impl Rng,
) -> CombatResult {
    let mut fight = Fight::new(stats, current_life, difficulty, config);

    for _ in 0..config.max_turns {
        for _ in 0..config.rounds_per_turn {
            fight.round += 1;

            let (dealt, landed) = fight.exile_attacks(monster, rng);
            if !monster.is_alive() {
                return fight.finish(CombatOutcome::Victory, monster);
            }
            fight.heal(healing(stats, dealt, landed));

            fight.monster_attacks(monster, rng);
            if fight.life <= 0 {
                let outcome = fight.death();
                return fight.finish(outcome, monster);
            }
        }

        let fraction = monster.life_fraction();
        if !monster.boss && fraction > 0.0 && fraction <= config.cull_threshold {
            debug!(
                monster = %monster.definition_id,
                round = fight.round,
                fraction,
                "culling strike"
            );
            fight.damage_dealt += monster.life as u64;
            monster.take_damage(monster.life);
            fight.events.push(CombatEvent::CullingStrike { round: fight.round });
            return fight.finish(CombatOutcome::Victory, monster);
        }

        if fight.wants_to_flee(rng) {
            return fight.finish(CombatOutcome::Retreat(RetreatReason::LowLife), monster);
        }
    }

    fight.finish(CombatOutcome::Retreat(RetreatReason::RoundCap), monster)
}
