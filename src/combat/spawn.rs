//! Monster instantiation from static definitions.

use super::types::{EliteOdds, EliteTier, Monster, MonsterDefinition};
use crate::content::table::Table;
use crate::core::constants::MONSTER_SCALING_PER_LEVEL;
use crate::core::error::EngineError;
use rand::Rng;
use tracing::debug;

/// Stat multiplier for a monster of `level`.
pub fn level_scaling(level: u32) -> f64 {
    1.0 + MONSTER_SCALING_PER_LEVEL * level.saturating_sub(1) as f64
}

fn scale(value: i32, multiplier: f64) -> i32 {
    ((value as f64 * multiplier).floor() as i32).max(1)
}

/// Builds a monster of `level` from its definition with a fixed elite tier.
pub fn instantiate(definition: &MonsterDefinition, level: u32, elite: EliteTier) -> Monster {
    let scaling = level_scaling(level);
    let (life_mult, damage_mult, reward_mult) = elite.multipliers();
    let max_life = scale(definition.life, scaling * life_mult);

    Monster {
        definition_id: definition.id.clone(),
        name: definition.name.clone(),
        level,
        elite,
        max_life,
        life: max_life,
        damage: scale(definition.damage, scaling * damage_mult),
        defense: (definition.defense.max(0) as f64 * scaling).floor() as i32,
        attack_speed: definition.attack_speed,
        damage_types: definition.damage_types.normalized(),
        resistances: definition.resistances,
        phases: definition.phases.clone(),
        phase: 0,
        boss: definition.is_boss(),
        experience: (definition.experience as f64 * scaling * reward_mult).floor() as u64,
        gold: (definition.gold as f64 * scaling * reward_mult).floor() as u64,
    }
}

/// Spawns `monster_id` at `level`. Bosses never roll an elite tier.
pub fn spawn(
    monsters: &Table<MonsterDefinition>,
    monster_id: &str,
    level: u32,
    odds: &EliteOdds,
    rng: &mut impl Rng,
) -> Result<Monster, EngineError> {
    let definition = monsters.require(monster_id)?;
    let elite = if definition.is_boss() {
        EliteTier::Normal
    } else {
        odds.roll(rng)
    };
    let monster = instantiate(definition, level, elite);
    debug!(
        monster = %monster.definition_id,
        level,
        elite = ?monster.elite,
        life = monster.max_life,
        "spawned monster"
    );
    Ok(monster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::PhaseDefinition;
    use crate::core::stats::{DamageDistribution, Resistances};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn definition(id: &str, phases: Vec<PhaseDefinition>) -> MonsterDefinition {
        MonsterDefinition {
            id: id.to_string(),
            name: id.to_string(),
            life: 100,
            damage: 10,
            defense: 20,
            attack_speed: 1.2,
            damage_types: DamageDistribution::physical(),
            resistances: Resistances::uniform(10),
            phases,
            boss: false,
            experience: 50,
            gold: 20,
        }
    }

    fn table() -> Table<MonsterDefinition> {
        Table::new(vec![
            definition("ghoul", Vec::new()),
            definition(
                "warden",
                vec![PhaseDefinition::at(1.0), PhaseDefinition::at(0.5)],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_level_one_is_unscaled() {
        let monster = instantiate(&definition("ghoul", Vec::new()), 1, EliteTier::Normal);
        assert_eq!(monster.max_life, 100);
        assert_eq!(monster.life, 100);
        assert_eq!(monster.damage, 10);
        assert_eq!(monster.defense, 20);
        assert_eq!(monster.experience, 50);
    }

    #[test]
    fn test_level_scaling() {
        // 1 + 0.12 * 9
        let monster = instantiate(&definition("ghoul", Vec::new()), 10, EliteTier::Normal);
        assert!((207..=208).contains(&monster.max_life));
        assert_eq!(monster.damage, 20);
        assert_eq!(monster.gold, 41);
    }

    #[test]
    fn test_elite_multiplies_life_damage_rewards() {
        let monster = instantiate(&definition("ghoul", Vec::new()), 1, EliteTier::Rare);
        assert_eq!(monster.max_life, 250);
        assert_eq!(monster.damage, 15);
        assert_eq!(monster.experience, 125);
        assert_eq!(monster.defense, 20);
    }

    #[test]
    fn test_unknown_monster() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = spawn(&table(), "dragon", 1, &EliteOdds::default(), &mut rng).unwrap_err();
        assert_eq!(err.code(), "unknown_entity");
    }

    #[test]
    fn test_bosses_are_never_elite() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let odds = EliteOdds {
            magic: 0.0,
            rare: 1.0,
        };
        let boss = spawn(&table(), "warden", 5, &odds, &mut rng).unwrap();
        assert!(boss.boss);
        assert_eq!(boss.elite, EliteTier::Normal);

        let ghoul = spawn(&table(), "ghoul", 5, &odds, &mut rng).unwrap();
        assert_eq!(ghoul.elite, EliteTier::Rare);
    }
}
