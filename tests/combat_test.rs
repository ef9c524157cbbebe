//! Integration test: Spawning -> Combat Resolution -> Morale
//!
//! Exercises the combat pipeline the way a mission drives it: monsters are
//! spawned from the content tables, fights are resolved against aggregated
//! exile stats, and the result feeds the morale system.

use exile::character::{compute_delta, scale_delta, DerivedStats, Exile};
use exile::combat::{
    instantiate, resolve_hit, run_turn_based, simulate, spawn, win_chance, win_chance_for,
    CombatEvent, CombatOutcome, EliteOdds, EliteTier, MonsterDefinition, PhaseDefinition,
};
use exile::core::config::{CombatConfig, MoraleConfig};
use exile::core::constants::{WIN_CHANCE_CAP, WIN_CHANCE_FLOOR};
use exile::core::context::EngineContext;
use exile::core::stats::{DamageDistribution, Resistances};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn ctx() -> EngineContext {
    EngineContext::standard().unwrap()
}

fn brute(life: i32, damage: i32, phases: Vec<PhaseDefinition>) -> MonsterDefinition {
    MonsterDefinition {
        id: "brute".to_string(),
        name: "Brute".to_string(),
        life,
        damage,
        defense: 0,
        attack_speed: 1.0,
        damage_types: DamageDistribution::physical(),
        resistances: Resistances::default(),
        boss: !phases.is_empty(),
        phases,
        experience: 10,
        gold: 5,
    }
}

// =========================================================================
// Mitigation
// =========================================================================

#[test]
fn test_physical_hit_against_fifty_defense() {
    let physical = DamageDistribution::physical();
    let hit = resolve_hit(40.0, &physical, 50, &Resistances::default());
    assert_eq!(hit.total, 17);
}

#[test]
fn test_mixed_hit_respects_resistances() {
    let split = DamageDistribution {
        physical: 0.5,
        fire: 0.5,
        ..DamageDistribution::physical()
    };
    let resist = Resistances {
        fire: 50,
        ..Resistances::default()
    };
    // Physical half: 50 with no defense; fire half: 50 * 0.5 = 25.
    let hit = resolve_hit(100.0, &split, 0, &resist);
    assert_eq!(hit.total, 75);
    assert_eq!(hit.parts.len(), 2);
}

// =========================================================================
// Boss phases
// =========================================================================

#[test]
fn test_boss_phase_sequence() {
    let def = brute(
        100,
        5,
        vec![PhaseDefinition::at(1.0), PhaseDefinition::at(0.5), PhaseDefinition::at(0.25)],
    );
    let mut boss = instantiate(&def, 1, EliteTier::Normal);

    let mut phases = vec![boss.phase];
    for damage in [40, 20, 30] {
        boss.take_damage(damage);
        boss.update_phase();
        phases.push(boss.phase);
    }
    assert_eq!(phases, vec![0, 0, 1, 2]);
}

#[test]
fn test_boss_phase_never_decreases() {
    let ctx = ctx();
    let monsters = &ctx.content.monsters;
    let odds = EliteOdds::default();
    let mut rng = ChaCha8Rng::seed_from_u64(8);

    for _ in 0..200 {
        let mut boss = spawn(monsters, "ember_queen", 10, &odds, &mut rng).unwrap();
        assert_eq!(boss.elite, EliteTier::Normal);

        let mut last = boss.phase;
        while boss.is_alive() {
            boss.take_damage(rng.gen_range(1..=60));
            boss.update_phase();
            assert!(boss.phase >= last);
            last = boss.phase;
        }
    }
}

// =========================================================================
// Win chance
// =========================================================================

#[test]
fn test_win_chance_is_bounded_and_monotonic() {
    let mut previous = 0.0;
    for step in 0..=4000 {
        let ratio = step as f64 * 0.01;
        let chance = win_chance(ratio);
        let bounds = WIN_CHANCE_FLOOR..=WIN_CHANCE_CAP;
        assert!(bounds.contains(&chance), "{ratio} -> {chance}");
        assert!(chance >= previous, "not monotonic at {ratio}");
        previous = chance;
    }
    assert_eq!(win_chance_for(10.0, 0.0), WIN_CHANCE_CAP);
}

// =========================================================================
// Simulation
// =========================================================================

#[test]
fn test_same_seed_same_result() {
    let ctx = ctx();
    let exile = Exile::new("Kaom", "marauder", &ctx).unwrap();
    let stats = exile.effective_stats();
    let config = CombatConfig::default();
    let odds = EliteOdds::default();

    for seed in 0..50 {
        let mut spawn_rng = ChaCha8Rng::seed_from_u64(seed);
        let mut a = spawn(&ctx.content.monsters, "bandit", 4, &odds, &mut spawn_rng).unwrap();
        let mut b = a.clone();
        let mut rng_a = ChaCha8Rng::seed_from_u64(seed);
        let mut rng_b = ChaCha8Rng::seed_from_u64(seed);
        let ra = simulate(&stats, &mut a, 6.0, &config, &mut rng_a);
        let rb = simulate(&stats, &mut b, 6.0, &config, &mut rng_b);
        assert_eq!(ra, rb);
        assert_eq!(a, b);
    }
}

#[test]
fn test_results_are_internally_consistent() {
    let ctx = ctx();
    let exile = Exile::new("Kaom", "ranger", &ctx).unwrap();
    let stats = exile.effective_stats();
    let config = CombatConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(123);

    let odds = EliteOdds::default();

    for _ in 0..300 {
        let mut monster = spawn(&ctx.content.monsters, "frost_wraith", 3, &odds, &mut rng).unwrap();
        let result = simulate(&stats, &mut monster, 5.0, &config, &mut rng);

        assert!(result.rounds >= 1 && result.rounds <= config.round_cap);
        assert!(result.life_remaining <= result.max_life);
        assert_eq!(result.monster_life_remaining, monster.life);
        match result.outcome {
            CombatOutcome::Death(_) => assert_eq!(result.life_remaining, 0),
            _ => assert!(result.life_remaining > 0),
        }
        if let Some(hit) = &result.heaviest_hit {
            assert!(hit.total >= 1);
            assert!(result.damage_taken >= hit.total as u64);
        }
    }
}

#[test]
fn test_turn_based_culls_weakened_monsters() {
    let weakling = DerivedStats {
        life: 500,
        damage: 8,
        defense: 50,
        ..DerivedStats::default()
    };
    let config = CombatConfig {
        damage_variance_min: 1.0,
        damage_variance_max: 1.0,
        ..CombatConfig::default()
    };
    // 8 damage per round against 50 life: after 5 rounds 10 life (20%) remains.
    let mut monster = instantiate(&brute(50, 1, Vec::new()), 1, EliteTier::Normal);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let result = run_turn_based(&weakling, 500, &mut monster, 1.0, &config, &mut rng);
    assert_eq!(result.outcome, CombatOutcome::Victory);
    assert_eq!(result.rounds, 5);
    assert_eq!(result.events, vec![CombatEvent::CullingStrike { round: 5 }]);
    assert_eq!(result.damage_dealt, 50);
    assert!(!monster.is_alive());
}

// =========================================================================
// Morale
// =========================================================================

#[test]
fn test_small_deltas_never_vanish() {
    assert_eq!(scale_delta(1, -50), 1);
    assert_eq!(scale_delta(-1, -90), -1);
    assert_eq!(scale_delta(0, 200), 0);
    assert_eq!(scale_delta(4, 50), 6);
}

#[test]
fn test_death_never_moves_morale() {
    let ctx = ctx();
    let stats = DerivedStats {
        life: 10,
        damage: 1,
        defense: 1,
        ..DerivedStats::default()
    };
    let combat = CombatConfig::default();
    let morale = MoraleConfig::default();
    let odds = EliteOdds::none();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut deaths = 0;

    for _ in 0..100 {
        let mut queen = spawn(&ctx.content.monsters, "ember_queen", 20, &odds, &mut rng).unwrap();
        let result = simulate(&stats, &mut queen, 50.0, &combat, &mut rng);
        if result.outcome.is_death() {
            deaths += 1;
            assert_eq!(compute_delta(&result, &stats, &morale).delta, 0);
        }
    }
    assert!(deaths > 50, "only {deaths} deaths");
}
