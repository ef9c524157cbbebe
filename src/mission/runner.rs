//! Runs a mission's fights in sequence and rolls its rewards.

use super::types::{CombatMode, MissionReport};
use crate::character::compute_delta;
use crate::combat::{run_turn_based, simulate, spawn, CombatResult};
use crate::core::context::EngineContext;
use crate::core::error::EngineError;
use crate::core::game_state::GameState;
use crate::items::{
    apply_gold_find, difficulty_rarity_bonus, roll_item_drops, roll_orb_drops, Currency,
    GenerateOptions,
};
use rand::Rng;
use tracing::info;

/// Runs a mission for the exile in `state` and applies its results.
///
/// Every monster is spawned before the first fight, so an unknown id aborts
/// the mission without touching the state. Fights stop at the first one not
/// won. Slain monsters always pay their experience and gold; the mission's
/// own rewards, item drops and orbs are granted only when every fight is won.
pub fn run_mission(
    state: &mut GameState,
    ctx: &EngineContext,
    mission_id: &str,
    rng: &mut impl Rng,
) -> Result<MissionReport, EngineError> {
    let mission = ctx.content.missions.require(mission_id)?;
    mission.validate()?;

    let mut monsters = Vec::new();
    for monster_id in mission.monster_ids() {
        monsters.push(spawn(
            &ctx.content.monsters,
            monster_id,
            mission.monster_level,
            &mission.elite_odds,
            rng,
        )?);
    }

    let stats = state.exile.effective_stats();
    let config = &ctx.config.combat;
    let mut life = stats.life;
    let mut combats: Vec<CombatResult> = Vec::new();
    let mut experience = 0;
    let mut gold = 0;
    let mut monsters_slain = 0;

    for monster in &mut monsters {
        let result = match mission.mode {
            CombatMode::Instant => simulate(&stats, monster, mission.difficulty, config, rng),
            CombatMode::TurnBased => {
                run_turn_based(&stats, life, monster, mission.difficulty, config, rng)
            }
        };
        life = result.life_remaining;
        let won = result.outcome.is_victory();
        if won {
            monsters_slain += 1;
            experience += monster.experience;
            gold += monster.gold;
        }
        combats.push(result);
        if !won {
            break;
        }
    }

    let Some(last) = combats.last() else {
        return Err(EngineError::corrupt(
            "mission",
            format!("{mission_id} produced no encounters"),
        ));
    };
    let success = monsters_slain as usize == monsters.len();

    let mut items = Vec::new();
    let mut orbs = Currency::default();
    if success {
        let rewards = &mission.rewards;
        gold += rng.gen_range(rewards.gold_min..=rewards.gold_max);
        experience += rewards.experience;

        let options = GenerateOptions {
            item_level: mission.monster_level,
            themes: mission.themes.clone(),
            difficulty_bonus: difficulty_rarity_bonus(mission.difficulty),
            ..Default::default()
        };
        items = roll_item_drops(
            &ctx.content.item_generator(),
            &options,
            rewards.item_drops,
            rewards.drop_chance,
            rng,
        )?;
        orbs = roll_orb_drops(rng);
    }
    let gold = apply_gold_find(gold, stats.gold_find);

    state.currency.gold += gold;
    state.currency.chaos_orbs += orbs.chaos_orbs;
    state.currency.exalted_orbs += orbs.exalted_orbs;
    state.inventory.extend(items.iter().cloned());

    let morale = compute_delta(last, &stats, &ctx.config.morale);
    let morale_after = state.exile.apply_morale_delta(morale.delta);
    let levels_gained = state.exile.gain_experience(experience, ctx);
    state.exile.recompute(ctx);

    info!(
        mission = mission_id,
        success,
        fights = combats.len(),
        gold,
        experience,
        items = items.len(),
        morale = morale_after,
        "mission complete"
    );

    Ok(MissionReport {
        mission_id: mission.id.clone(),
        success,
        combats,
        monsters_slain,
        gold,
        experience,
        levels_gained,
        items,
        orbs,
        morale,
        morale_after,
    })
}
