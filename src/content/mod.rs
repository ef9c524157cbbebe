//! Static content tables: classes, passives, monsters, item bases, missions,
//! affix ranges and rarity tiers.

pub mod data;
pub mod table;

pub use table::*;

use crate::character::{ClassDefinition, PassiveNode};
use crate::combat::MonsterDefinition;
use crate::core::error::EngineError;
use crate::items::{
    ItemBase, ItemGenerator, RarityTable, RarityTier, SlotCategory, StatDefinition, StatTable,
};
use crate::mission::MissionDefinition;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// All read-only definitions the engine looks things up in.
#[derive(Debug, Clone, Default)]
pub struct ContentTables {
    pub classes: Table<ClassDefinition>,
    pub passives: Table<PassiveNode>,
    pub monsters: Table<MonsterDefinition>,
    pub item_bases: Table<ItemBase>,
    pub missions: Table<MissionDefinition>,
    pub stats: StatTable,
    pub rarities: RarityTable,
}

/// On-disk shape of a content file. Every section is optional; rarities
/// default to the standard tiers.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentFile {
    pub classes: Vec<ClassDefinition>,
    pub passives: Vec<PassiveNode>,
    pub monsters: Vec<MonsterDefinition>,
    pub item_bases: Vec<ItemBase>,
    pub missions: Vec<MissionDefinition>,
    pub stats: Vec<StatDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarities: Option<Vec<RarityTier>>,
}

impl ContentTables {
    /// Builds and cross-checks the tables. Any inconsistency is a
    /// `CorruptTable` error.
    pub fn new(file: ContentFile) -> Result<Self, EngineError> {
        let rarities = match file.rarities {
            Some(tiers) => RarityTable::new(tiers)?,
            None => RarityTable::standard(),
        };
        let tables = Self {
            classes: Table::new(file.classes)?,
            passives: Table::new(file.passives)?,
            monsters: Table::new(file.monsters)?,
            item_bases: Table::new(file.item_bases)?,
            missions: Table::new(file.missions)?,
            stats: StatTable::new(file.stats)?,
            rarities,
        };
        tables.validate()?;
        debug!(
            classes = tables.classes.len(),
            passives = tables.passives.len(),
            monsters = tables.monsters.len(),
            item_bases = tables.item_bases.len(),
            missions = tables.missions.len(),
            stats = tables.stats.len(),
            "content loaded"
        );
        Ok(tables)
    }

    /// Parses a JSON content file. Stat keys are normalized while parsing.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let file: ContentFile = serde_json::from_str(json)
            .map_err(|e| EngineError::corrupt("content", e.to_string()))?;
        Self::new(file)
    }

    /// The built-in content set.
    pub fn standard() -> Result<Self, EngineError> {
        Self::new(ContentFile {
            classes: data::classes(),
            passives: data::passives(),
            monsters: data::monsters(),
            item_bases: data::item_bases(),
            missions: data::missions(),
            stats: data::stat_definitions(),
            rarities: None,
        })
    }

    /// Item generator over every base in these tables.
    pub fn item_generator(&self) -> ItemGenerator<'_> {
        ItemGenerator::new(self.item_bases.iter(), &self.stats, &self.rarities)
    }

    fn validate(&self) -> Result<(), EngineError> {
        for monster in &self.monsters {
            monster.validate()?;
        }
        for base in &self.item_bases {
            let is_weapon = base.category() == SlotCategory::Weapon;
            if base.weapon.is_some() && !is_weapon {
                return Err(EngineError::corrupt(
                    "item base",
                    format!("{} has a weapon profile but is not a weapon", base.id),
                ));
            }
            if base.weapon_profile().attack_speed <= 0.0 {
                return Err(EngineError::corrupt(
                    "item base",
                    format!("{} has a non-positive attack speed", base.id),
                ));
            }
        }
        for mission in &self.missions {
            mission.validate()?;
            if let Some(missing) = mission
                .monster_ids()
                .find(|id| !self.monsters.contains(id))
            {
                return Err(EngineError::corrupt(
                    "mission",
                    format!("{} references unknown monster '{missing}'", mission.id),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stats::{Stat, StatKey};

    #[test]
    fn test_standard_content_is_consistent() {
        let content = ContentTables::standard().unwrap();
        assert!(content.classes.contains("marauder"));
        assert!(content.missions.len() >= 3);
        assert!(!content.stats.is_empty());
        for mission in &content.missions {
            for id in mission.monster_ids() {
                assert!(content.monsters.contains(id));
            }
        }
    }

    #[test]
    fn test_from_json_normalizes_stat_keys() {
        let json = r#"{
            "passives": [
                { "id": "tough", "name": "Tough",
                  "effects": [ { "stat": "FIRE_RESIST", "magnitude": 5 },
                               { "stat": "increasedLife", "magnitude": 8 } ] }
            ],
            "item_bases": [
                { "id": "cap", "name": "Cap", "slot": "helmet",
                  "implicits": { "fire-resistance": 4 } }
            ],
            "stats": [
                { "key": "Cold Resist", "breakpoints": [ { "item_level": 1, "min": 1, "max": 3 } ] }
            ]
        }"#;
        let content = ContentTables::from_json(json).unwrap();

        let node = content.passives.get("tough").unwrap();
        assert_eq!(node.effects[0].stat, StatKey::flat(Stat::FireResist));
        assert_eq!(node.effects[1].stat, StatKey::increased(Stat::Life));

        let cap = content.item_bases.get("cap").unwrap();
        let fire = StatKey::flat(Stat::FireResist);
        assert_eq!(cap.implicits.get(&fire), Some(&4));
        let cold = StatKey::flat(Stat::ColdResist);
        assert!(content.stats.get(&cold).is_some());
        assert_eq!(content.rarities, RarityTable::standard());
    }

    #[test]
    fn test_unknown_stat_key_is_corrupt() {
        let json = r#"{ "passives": [ { "id": "x", "name": "X",
            "effects": [ { "stat": "luck", "magnitude": 1 } ] } ] }"#;
        let err = ContentTables::from_json(json).unwrap_err();
        assert_eq!(err.code(), "corrupt_table");
    }

    #[test]
    fn test_mission_with_unknown_monster_is_corrupt() {
        let json = r#"{ "missions": [ { "id": "m", "name": "M", "difficulty": 1.0,
            "monster_level": 1, "encounters": ["ghost"] } ] }"#;
        let err = ContentTables::from_json(json).unwrap_err();
        assert!(err.to_string().contains("ghost"), "{err}");
    }

    #[test]
    fn test_duplicate_ids_are_corrupt() {
        let json = r#"{ "classes": [
            { "id": "a", "name": "A", "base": { "life": 1, "damage": 1, "defense": 1 },
              "growth": { "life": 0, "damage": 0, "defense": 0 } },
            { "id": "a", "name": "B", "base": { "life": 1, "damage": 1, "defense": 1 },
              "growth": { "life": 0, "damage": 0, "defense": 0 } }
        ] }"#;
        let err = ContentTables::from_json(json).unwrap_err();
        assert_eq!(err.code(), "corrupt_table");
    }
}
