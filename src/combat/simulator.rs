//! Instant-mode encounter resolution.

use super::mitigation::{attack_count, resolve_hit, roll_raw_damage};
use super::types::{CombatEvent, CombatOutcome, CombatResult, HitBreakdown, Monster, RetreatReason};
use super::win_chance::{classify_death, win_chance_for};
use crate::character::aggregate::{power_rating, DerivedStats};
use crate::core::config::CombatConfig;
use rand::Rng;
use tracing::debug;

/// Running state of one exile-versus-monster encounter.
pub(super) struct Fight<'a> {
    pub stats: &'a DerivedStats,
    pub config: &'a CombatConfig,
    pub max_life: i32,
    pub life: i32,
    pub round: u32,
    pub win_chance: f64,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub heaviest_hit: Option<HitBreakdown>,
    pub events: Vec<CombatEvent>,
}

impl<'a> Fight<'a> {
    pub fn new(
        stats: &'a DerivedStats,
        life: i32,
        difficulty: f64,
        config: &'a CombatConfig,
    ) -> Self {
        let max_life = stats.life.max(1);
        Self {
            stats,
            config,
            max_life,
            life: life.clamp(1, max_life),
            round: 0,
            win_chance: win_chance_for(power_rating(stats), difficulty),
            damage_dealt: 0,
            damage_taken: 0,
            heaviest_hit: None,
            events: Vec::new(),
        }
    }

    /// The exile's attacks for this round. Returns (damage dealt, hits landed).
    pub fn exile_attacks(&mut self, monster: &mut Monster, rng: &mut impl Rng) -> (u64, u32) {
        let mut dealt = 0;
        let mut landed = 0;
        for _ in 0..attack_count(self.stats.attack_speed, rng) {
            if !monster.is_alive() {
                break;
            }
            let raw = roll_raw_damage(self.stats.damage as f64, self.config, rng);
            let hit = resolve_hit(
                raw,
                &self.stats.damage_types,
                monster.defense,
                &monster.resistances,
            );
            let applied = hit.total.min(monster.life);
            monster.take_damage(hit.total);
            dealt += applied as u64;
            landed += 1;
        }
        self.damage_dealt += dealt;

        if let Some((from, to)) = monster.update_phase() {
            debug!(
                monster = %monster.definition_id,
                round = self.round,
                from,
                to,
                "phase transition"
            );
            self.events.push(CombatEvent::PhaseTransition {
                round: self.round,
                from,
                to,
            });
        }
        (dealt, landed)
    }

    /// The monster's attacks for this round.
    pub fn monster_attacks(&mut self, monster: &Monster, rng: &mut impl Rng) {
        for _ in 0..attack_count(monster.effective_attack_speed(), rng) {
            if self.life <= 0 {
                break;
            }
            let raw = roll_raw_damage(monster.effective_damage(), self.config, rng);
            let hit = resolve_hit(
                raw,
                &monster.damage_types,
                self.stats.defense,
                &self.stats.resistances,
            );
            self.life -= hit.total;
            self.damage_taken += hit.total as u64;
            if hit.total > self.heaviest_total() {
                self.heaviest_hit = Some(hit);
            }
        }
    }

    pub fn heal(&mut self, amount: i32) {
        if amount > 0 && self.life > 0 {
            self.life = (self.life + amount).min(self.max_life);
        }
    }

    pub fn heaviest_total(&self) -> i32 {
        self.heaviest_hit.as_ref().map_or(0, |hit| hit.total)
    }

    pub fn death(&self) -> CombatOutcome {
        CombatOutcome::Death(classify_death(
            self.heaviest_total(),
            self.max_life,
            self.win_chance,
        ))
    }

    /// Low-life flee check: below the threshold, flee with the configured chance.
    pub fn wants_to_flee(&self, rng: &mut impl Rng) -> bool {
        let threshold = self.max_life as f64 * self.config.retreat_life_fraction;
        (self.life as f64) < threshold && rng.gen::<f64>() < self.config.retreat_chance
    }

    pub fn finish(self, outcome: CombatOutcome, monster: &Monster) -> CombatResult {
        CombatResult {
            rounds: self.round,
            damage_dealt: self.damage_dealt,
            damage_taken: self.damage_taken,
            heaviest_hit: self.heaviest_hit,
            outcome,
            win_chance: self.win_chance,
            max_life: self.max_life,
            life_remaining: self.life.max(0),
            monster_life_remaining: monster.life,
            events: self.events,
        }
    }
}

/// Resolves one encounter at full life, capped at `config.round_cap` rounds.
///
/// Each round the exile attacks first; a kill ends the fight. The monster
/// then attacks, after which death, a low-life retreat and a win-chance
/// victory are checked in that order.
pub fn simulate(
    stats: &DerivedStats,
    monster: &mut Monster,
    difficulty: f64,
    config: &CombatConfig,
    rng: &mut impl Rng,
) -> CombatResult {
    let mut fight = Fight::new(stats, stats.life, difficulty, config);

    while fight.round < config.round_cap {
        fight.round += 1;

        fight.exile_attacks(monster, rng);
        if !monster.is_alive() {
            return fight.finish(CombatOutcome::Victory, monster);
        }

        fight.monster_attacks(monster, rng);
        if fight.life <= 0 {
            let outcome = fight.death();
            return fight.finish(outcome, monster);
        }
        if fight.wants_to_flee(rng) {
            return fight.finish(CombatOutcome::Retreat(RetreatReason::LowLife), monster);
        }
        if rng.gen::<f64>() < fight.win_chance {
            return fight.finish(CombatOutcome::Victory, monster);
        }
    }

    fight.finish(CombatOutcome::Retreat(RetreatReason::RoundCap), monster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::spawn::instantiate;
    use crate::combat::types::{DeathKind, EliteTier, MonsterDefinition, PhaseDefinition};
    use crate::core::stats::{DamageDistribution, Resistances};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn exile(life: i32, damage: i32, defense: i32) -> DerivedStats {
        DerivedStats {
            life,
            damage,
            defense,
            ..DerivedStats::default()
        }
    }

    fn monster(life: i32, damage: i32, phases: Vec<PhaseDefinition>) -> Monster {
        let definition = MonsterDefinition {
            id: "brute".to_string(),
            name: "Brute".to_string(),
            life,
            damage,
            defense: 0,
            attack_speed: 1.0,
            damage_types: DamageDistribution::physical(),
            resistances: Resistances::default(),
            phases,
            boss: false,
            experience: 10,
            gold: 5,
        };
        instantiate(&definition, 1, EliteTier::Normal)
    }

    #[test]
    fn test_deterministic_with_seed() {
        let stats = exile(120, 15, 20);
        let config = CombatConfig::default();
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut target = monster(150, 12, Vec::new());
            simulate(&stats, &mut target, 30.0, &config, &mut rng)
        };
        for seed in 0..20 {
            assert_eq!(run(seed), run(seed));
        }
    }

    #[test]
    fn test_overwhelming_exile_kills() {
        let stats = exile(500, 400, 100);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut target = monster(50, 5, Vec::new());
        let result = simulate(&stats, &mut target, 1.0, &CombatConfig::default(), &mut rng);
        assert_eq!(result.outcome, CombatOutcome::Victory);
        assert_eq!(result.rounds, 1);
        assert_eq!(result.monster_life_remaining, 0);
        assert_eq!(result.damage_dealt, 50);
        assert!(result.heaviest_hit.is_none());
    }

    #[test]
    fn test_oneshot_death() {
        let stats = exile(20, 1, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut target = monster(10_000, 500, Vec::new());
        let config = CombatConfig::default();
        let result = simulate(&stats, &mut target, 1_000.0, &config, &mut rng);
        assert_eq!(result.outcome, CombatOutcome::Death(DeathKind::Oneshot));
        assert_eq!(result.life_remaining, 0);
        assert!(result.heaviest_hit_total() >= 20);
    }

    #[test]
    fn test_round_cap_retreat() {
        // Neither side can finish the other and the win chance is at the floor
        let stats = exile(10_000, 1, 1_000);
        let config = CombatConfig {
            round_cap: 3,
            ..CombatConfig::default()
        };
        let mut retreats = 0;
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut target = monster(10_000, 1, Vec::new());
            let result = simulate(&stats, &mut target, 1e9, &config, &mut rng);
            assert!(result.rounds <= 3);
            if result.outcome == CombatOutcome::Retreat(RetreatReason::RoundCap) {
                assert_eq!(result.rounds, 3);
                retreats += 1;
            }
        }
        // 0.95^3 of runs reach the cap
        assert!(retreats > 30, "retreats: {retreats}");
    }

    #[test]
    fn test_zero_round_cap() {
        let stats = exile(100, 10, 10);
        let config = CombatConfig {
            round_cap: 0,
            ..CombatConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut target = monster(100, 10, Vec::new());
        let result = simulate(&stats, &mut target, 10.0, &config, &mut rng);
        assert_eq!(result.rounds, 0);
        assert_eq!(
            result.outcome,
            CombatOutcome::Retreat(RetreatReason::RoundCap)
        );
    }

    #[test]
    fn test_boss_phase_events() {
        let stats = exile(100_000, 30, 1_000);
        let config = CombatConfig {
            round_cap: 50,
            ..CombatConfig::default()
        };
        let phases = vec![
            PhaseDefinition::at(1.0),
            PhaseDefinition::at(0.5),
            PhaseDefinition::at(0.25),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut boss = monster(300, 1, phases);
        // Difficulty so high the only way to win is the kill
        let result = simulate(&stats, &mut boss, 1e12, &config, &mut rng);

        let mut last = 0;
        for event in &result.events {
            let CombatEvent::PhaseTransition { from, to, .. } = event else {
                panic!("unexpected event {event:?}");
            };
            assert_eq!(*from, last);
            assert!(to > from);
            last = *to;
        }
        if result.outcome == CombatOutcome::Victory && result.monster_life_remaining == 0 {
            assert_eq!(last, 2);
        }
    }

    #[test]
    fn test_result_accounting() {
        let stats = exile(200, 20, 10);
        for seed in 0..30 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut target = monster(300, 25, Vec::new());
            let config = CombatConfig::default();
            let result = simulate(&stats, &mut target, 20.0, &config, &mut rng);
            let monster_damage = result.monster_life_remaining as u64 + result.damage_dealt;
            assert_eq!(monster_damage, 300);
            assert_eq!(
                result.life_remaining as i64,
                (200 - result.damage_taken as i64).max(0)
            );
            assert!(result.win_chance >= 0.05 && result.win_chance <= 0.9);
        }
    }
}
