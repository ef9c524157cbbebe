//! Stat keys shared by items, passives, and the aggregator.
//!
//! A `StatKey` pairs the stat being modified with the modifier class applied
//! to it. Keys serialize as plain strings (`life`, `increased_damage`,
//! `max_fire_resist`) and parsing normalizes the spellings found in content
//! files, so `fireResist`, `FIRE_RESIST` and `fire-resistance` are one key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Life,
    Damage,
    Defense,
    AttackSpeed,
    FireResist,
    ColdResist,
    LightningResist,
    ChaosResist,
    AllResist,
    GoldFind,
    MoraleGain,
    MoraleResistance,
    LightRadius,
    MoveSpeed,
    LifeRegen,
    LifeLeech,
    LifeOnHit,
}

impl Stat {
    /// The four individual resistances, in `DamageType` order.
    pub const RESISTANCES: [Stat; 4] = [
        Stat::FireResist,
        Stat::ColdResist,
        Stat::LightningResist,
        Stat::ChaosResist,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stat::Life => "life",
            Stat::Damage => "damage",
            Stat::Defense => "defense",
            Stat::AttackSpeed => "attack_speed",
            Stat::FireResist => "fire_resist",
            Stat::ColdResist => "cold_resist",
            Stat::LightningResist => "lightning_resist",
            Stat::ChaosResist => "chaos_resist",
            Stat::AllResist => "all_resist",
            Stat::GoldFind => "gold_find",
            Stat::MoraleGain => "morale_gain",
            Stat::MoraleResistance => "morale_resistance",
            Stat::LightRadius => "light_radius",
            Stat::MoveSpeed => "move_speed",
            Stat::LifeRegen => "life_regen",
            Stat::LifeLeech => "life_leech",
            Stat::LifeOnHit => "life_on_hit",
        }
    }

    pub fn is_resist(&self) -> bool {
        matches!(
            self,
            Stat::FireResist
                | Stat::ColdResist
                | Stat::LightningResist
                | Stat::ChaosResist
                | Stat::AllResist
        )
    }

    fn from_compact(compact: &str) -> Option<Stat> {
        let stat = match compact {
            "life" | "hp" | "health" => Stat::Life,
            "damage" => Stat::Damage,
            "defense" | "defence" | "armor" | "armour" => Stat::Defense,
            "attackspeed" => Stat::AttackSpeed,
            "fireresist" | "fireresistance" => Stat::FireResist,
            "coldresist" | "coldresistance" => Stat::ColdResist,
            "lightningresist" | "lightningresistance" => Stat::LightningResist,
            "chaosresist" | "chaosresistance" => Stat::ChaosResist,
            "allresist" | "allresistance" | "allresistances" => Stat::AllResist,
            "goldfind" => Stat::GoldFind,
            "moralegain" => Stat::MoraleGain,
            "moraleresistance" | "moraleresist" => Stat::MoraleResistance,
            "lightradius" => Stat::LightRadius,
            "movespeed" | "movementspeed" => Stat::MoveSpeed,
            "liferegen" | "liferegeneration" => Stat::LifeRegen,
            "lifeleech" => Stat::LifeLeech,
            "lifeonhit" | "lifegainonhit" => Stat::LifeOnHit,
            _ => return None,
        };
        Some(stat)
    }
}

/// How a modifier combines with the others on the same stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    /// Added to the base before any percentage.
    Flat,
    /// Additive percentage, summed then applied once.
    Increased,
    /// Multiplicative percentage applied after increased.
    More,
    /// Raises (or lowers) a resistance cap.
    MaxResist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct StatKey {
    pub kind: ModifierKind,
    pub stat: Stat,
}

impl StatKey {
    pub const fn flat(stat: Stat) -> Self {
        Self {
            kind: ModifierKind::Flat,
            stat,
        }
    }

    pub const fn increased(stat: Stat) -> Self {
        Self {
            kind: ModifierKind::Increased,
            stat,
        }
    }

    pub const fn more(stat: Stat) -> Self {
        Self {
            kind: ModifierKind::More,
            stat,
        }
    }

    pub const fn max_resist(stat: Stat) -> Self {
        Self {
            kind: ModifierKind::MaxResist,
            stat,
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ModifierKind::Flat => write!(f, "{}", self.stat.name()),
            ModifierKind::Increased => write!(f, "increased_{}", self.stat.name()),
            ModifierKind::More => write!(f, "more_{}", self.stat.name()),
            ModifierKind::MaxResist => write!(f, "max_{}", self.stat.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized stat key '{0}'")]
pub struct ParseStatKeyError(pub String);

impl FromStr for StatKey {
    type Err = ParseStatKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let (kind, rest) = if let Some(rest) = compact.strip_prefix("increased") {
            (ModifierKind::Increased, rest)
        } else if let Some(rest) = compact.strip_prefix("more") {
            (ModifierKind::More, rest)
        } else if let Some(rest) = compact.strip_prefix("max") {
            (ModifierKind::MaxResist, rest)
        } else {
            (ModifierKind::Flat, compact.as_str())
        };

        let stat = Stat::from_compact(rest).ok_or_else(|| ParseStatKeyError(s.to_string()))?;
        if kind == ModifierKind::MaxResist && !stat.is_resist() {
            return Err(ParseStatKeyError(s.to_string()));
        }

        Ok(StatKey { kind, stat })
    }
}

impl From<StatKey> for String {
    fn from(key: StatKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for StatKey {
    type Error = ParseStatKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Damage types an attack can be split across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Physical,
    Fire,
    Cold,
    Lightning,
    Chaos,
}

impl DamageType {
    pub const ALL: [DamageType; 5] = [
        DamageType::Physical,
        DamageType::Fire,
        DamageType::Cold,
        DamageType::Lightning,
        DamageType::Chaos,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DamageType::Physical => "physical",
            DamageType::Fire => "fire",
            DamageType::Cold => "cold",
            DamageType::Lightning => "lightning",
            DamageType::Chaos => "chaos",
        }
    }
}

/// Elemental and chaos resistances in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resistances {
    #[serde(default)]
    pub fire: i32,
    #[serde(default)]
    pub cold: i32,
    #[serde(default)]
    pub lightning: i32,
    #[serde(default)]
    pub chaos: i32,
}

impl Resistances {
    pub fn uniform(value: i32) -> Self {
        Self {
            fire: value,
            cold: value,
            lightning: value,
            chaos: value,
        }
    }

    /// Resistance against `damage_type`; physical damage has none.
    pub fn against(&self, damage_type: DamageType) -> i32 {
        match damage_type {
            DamageType::Physical => 0,
            DamageType::Fire => self.fire,
            DamageType::Cold => self.cold,
            DamageType::Lightning => self.lightning,
            DamageType::Chaos => self.chaos,
        }
    }

    pub fn average(&self) -> f64 {
        (self.fire + self.cold + self.lightning + self.chaos) as f64 / 4.0
    }
}

/// Fractions of an attack dealt as each damage type.
///
/// Shares need not sum to one in content files; `normalized` rescales them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageDistribution {
    #[serde(default)]
    pub physical: f64,
    #[serde(default)]
    pub fire: f64,
    #[serde(default)]
    pub cold: f64,
    #[serde(default)]
    pub lightning: f64,
    #[serde(default)]
    pub chaos: f64,
}

impl Default for DamageDistribution {
    fn default() -> Self {
        Self::physical()
    }
}

impl DamageDistribution {
    pub fn physical() -> Self {
        Self::single(DamageType::Physical)
    }

    pub fn single(damage_type: DamageType) -> Self {
        let mut dist = Self {
            physical: 0.0,
            fire: 0.0,
            cold: 0.0,
            lightning: 0.0,
            chaos: 0.0,
        };
        *dist.share_mut(damage_type) = 1.0;
        dist
    }

    pub fn share(&self, damage_type: DamageType) -> f64 {
        match damage_type {
            DamageType::Physical => self.physical,
            DamageType::Fire => self.fire,
            DamageType::Cold => self.cold,
            DamageType::Lightning => self.lightning,
            DamageType::Chaos => self.chaos,
        }
    }

    fn share_mut(&mut self, damage_type: DamageType) -> &mut f64 {
        match damage_type {
            DamageType::Physical => &mut self.physical,
            DamageType::Fire => &mut self.fire,
            DamageType::Cold => &mut self.cold,
            DamageType::Lightning => &mut self.lightning,
            DamageType::Chaos => &mut self.chaos,
        }
    }

    /// Shares rescaled to sum to one. Negative shares count as zero and an
    /// empty distribution falls back to pure physical.
    pub fn normalized(&self) -> Self {
        let mut dist = *self;
        let mut total = 0.0;
        for damage_type in DamageType::ALL {
            let share = dist.share_mut(damage_type);
            if !share.is_finite() || *share < 0.0 {
                *share = 0.0;
            }
            total += *share;
        }
        if total <= 0.0 {
            return Self::physical();
        }
        for damage_type in DamageType::ALL {
            *dist.share_mut(damage_type) /= total;
        }
        dist
    }

    /// Positive normalized shares in `DamageType` order.
    pub fn shares(&self) -> Vec<(DamageType, f64)> {
        let dist = self.normalized();
        DamageType::ALL
            .into_iter()
            .map(|t| (t, dist.share(t)))
            .filter(|(_, share)| *share > 0.0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATS: [Stat; 17] = [
        Stat::Life,
        Stat::Damage,
        Stat::Defense,
        Stat::AttackSpeed,
        Stat::FireResist,
        Stat::ColdResist,
        Stat::LightningResist,
        Stat::ChaosResist,
        Stat::AllResist,
        Stat::GoldFind,
        Stat::MoraleGain,
        Stat::MoraleResistance,
        Stat::LightRadius,
        Stat::MoveSpeed,
        Stat::LifeRegen,
        Stat::LifeLeech,
        Stat::LifeOnHit,
    ];

    #[test]
    fn test_damage_distribution_normalizes() {
        let dist = DamageDistribution {
            physical: 2.0,
            fire: 2.0,
            cold: 0.0,
            lightning: -1.0,
            chaos: 0.0,
        };
        let shares = dist.shares();
        assert_eq!(shares.len(), 2);
        assert!((shares[0].1 - 0.5).abs() < 1e-9);
        assert_eq!(shares[1].0, DamageType::Fire);
    }

    #[test]
    fn test_empty_distribution_is_physical() {
        let dist = DamageDistribution {
            physical: 0.0,
            fire: 0.0,
            cold: 0.0,
            lightning: 0.0,
            chaos: 0.0,
        };
        assert_eq!(dist.shares(), vec![(DamageType::Physical, 1.0)]);
    }

    #[test]
    fn test_display_canonical_forms() {
        assert_eq!(StatKey::flat(Stat::Life).to_string(), "life");
        assert_eq!(
            StatKey::increased(Stat::AttackSpeed).to_string(),
            "increased_attack_speed"
        );
        assert_eq!(StatKey::more(Stat::Damage).to_string(), "more_damage");
        assert_eq!(
            StatKey::max_resist(Stat::FireResist).to_string(),
            "max_fire_resist"
        );
    }

    #[test]
    fn test_parse_normalizes_spellings() {
        let expected = StatKey::flat(Stat::FireResist);
        for raw in ["fire_resist", "fireResist", "FIRE_RESIST", "fire-resistance", "Fire Resist"] {
            assert_eq!(raw.parse::<StatKey>().unwrap(), expected, "{raw}");
        }
        assert_eq!(
            "IncreasedLife".parse::<StatKey>().unwrap(),
            StatKey::increased(Stat::Life)
        );
        assert_eq!(
            "maxColdResistance".parse::<StatKey>().unwrap(),
            StatKey::max_resist(Stat::ColdResist)
        );
    }

    #[test]
    fn test_morale_keys_not_mistaken_for_more() {
        assert_eq!(
            "moraleGain".parse::<StatKey>().unwrap(),
            StatKey::flat(Stat::MoraleGain)
        );
        assert_eq!(
            "morale_resistance".parse::<StatKey>().unwrap(),
            StatKey::flat(Stat::MoraleResistance)
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_invalid() {
        assert!("mana".parse::<StatKey>().is_err());
        assert!("max_life".parse::<StatKey>().is_err());
        assert!("".parse::<StatKey>().is_err());
    }

    #[test]
    fn test_display_parse_agree_for_all_stats() {
        for stat in ALL_STATS {
            for key in [StatKey::flat(stat), StatKey::increased(stat), StatKey::more(stat)] {
                assert_eq!(key.to_string().parse::<StatKey>().unwrap(), key);
            }
        }
    }

    #[test]
    fn test_stat_key_serializes_as_string() {
        let json = serde_json::to_string(&StatKey::increased(Stat::Defense)).unwrap();
        assert_eq!(json, "\"increased_defense\"");
        let key: StatKey = serde_json::from_str("\"lightningResist\"").unwrap();
        assert_eq!(key, StatKey::flat(Stat::LightningResist));
    }

    #[test]
    fn test_resistances_against() {
        let res = Resistances {
            fire: 30,
            cold: 20,
            lightning: 10,
            chaos: -5,
        };
        assert_eq!(res.against(DamageType::Physical), 0);
        assert_eq!(res.against(DamageType::Fire), 30);
        assert_eq!(res.against(DamageType::Chaos), -5);
        assert!((res.average() - 13.75).abs() < f64::EPSILON);
    }
}
