//! Simulation runner driving the engine's public operations.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::character::{offer_passives, Exile};
use crate::core::context::EngineContext;
use crate::core::error::EngineError;
use crate::core::game_state::GameState;
use crate::items::auto_equip_if_better;
use crate::mission::run_mission;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Passives offered per level-up; the simulated player takes the first.
const PASSIVE_OFFER_SIZE: usize = 3;

/// Run the full simulation and return a report.
///
/// Each run gets its own RNG seeded from `config.seed` plus the run index,
/// so a seeded simulation is reproducible.
pub fn run_simulation(config: &SimConfig, ctx: &EngineContext) -> Result<SimReport, EngineError> {
    ctx.content.classes.require(&config.class_id)?;
    for mission_id in &config.route {
        ctx.content.missions.require(mission_id)?;
    }

    let mut all_runs = Vec::with_capacity(config.num_runs as usize);
    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run_stats = simulate_single_run(config, ctx, &mut rng)?;
        if config.verbosity >= 2 {
            info!(
                run = run_idx + 1,
                of = config.num_runs,
                level = run_stats.final_level,
                cleared = run_stats.missions_cleared,
                deaths = run_stats.deaths,
                stage = run_stats.furthest_stage,
                "run finished"
            );
        }
        all_runs.push(run_stats);
    }

    Ok(SimReport::from_runs(&config.route, all_runs))
}

/// One exile from level 1 through `config.missions_per_run` mission attempts.
fn simulate_single_run(
    config: &SimConfig,
    ctx: &EngineContext,
    rng: &mut impl Rng,
) -> Result<RunStats, EngineError> {
    let exile = Exile::new("SimExile", &config.class_id, ctx)?;
    let mut state = GameState::new(exile);
    let mut stats = RunStats::new(config.route.len());
    let mut stage = 0;
    let mut clears_here = 0;

    for _ in 0..config.missions_per_run {
        let Some(mission_id) = config.route.get(stage) else {
            break;
        };
        let report = run_mission(&mut state, ctx, mission_id, rng)?;
        stats.record(stage, &report);

        if config.allocate_passives {
            for _ in 0..report.levels_gained {
                if allocate_offered_passive(&mut state, ctx, rng)? {
                    stats.passives_allocated += 1;
                }
            }
        }
        if config.auto_equip {
            stats.upgrades_equipped += equip_upgrades(&mut state, ctx);
        } else {
            state.inventory.clear();
        }

        if report.success {
            clears_here += 1;
            if clears_here >= config.clears_to_advance && stage + 1 < config.route.len() {
                stage += 1;
                clears_here = 0;
                let mission = &config.route[stage];
                debug!(mission = %mission, level = state.exile.level, "advancing");
            }
        }
    }

    stats.final_level = state.exile.level;
    stats.final_morale = state.exile.morale;
    stats.furthest_stage = stage;
    stats.gold = state.currency.gold;
    stats.chaos_orbs = state.currency.chaos_orbs;
    stats.exalted_orbs = state.currency.exalted_orbs;
    Ok(stats)
}

/// Takes the first passive of a level-up offer. An exhausted pool is not an
/// error for the simulation; the level simply grants nothing.
fn allocate_offered_passive(
    state: &mut GameState,
    ctx: &EngineContext,
    rng: &mut impl Rng,
) -> Result<bool, EngineError> {
    let class = ctx.content.classes.require(&state.exile.class_id)?;
    let offer = match offer_passives(
        class,
        &state.exile.allocated,
        &ctx.content.passives,
        PASSIVE_OFFER_SIZE,
        rng,
    ) {
        Ok(offer) => offer,
        Err(EngineError::ExhaustedPool { .. }) => return Ok(false),
        Err(e) => return Err(e),
    };
    match offer.first() {
        Some(node) => state.exile.allocate_passive(&node.id, ctx),
        None => Ok(false),
    }
}

/// Equips every inventory item that outscores its slot; the rest are sold
/// off. Returns the number equipped.
fn equip_upgrades(state: &mut GameState, ctx: &EngineContext) -> u32 {
    let mut equipped = 0;
    for item in state.inventory.drain(..) {
        if auto_equip_if_better(item, &mut state.exile.equipment) {
            equipped += 1;
        }
    }
    if equipped > 0 {
        state.exile.recompute(ctx);
    }
    equipped
}
