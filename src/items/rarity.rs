//! Rarity tiers and weighted rarity rolls.

use crate::core::constants::{DIFFICULTY_RARITY_BONUS_CAP, DIFFICULTY_RARITY_BONUS_PER_POINT};
use crate::core::error::EngineError;
use crate::core::sampling::weighted_index;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityTier {
    pub name: String,
    /// Relative drop weight.
    pub weight: f64,
    pub min_affixes: u32,
    pub max_affixes: u32,
}

impl RarityTier {
    pub fn new(name: &str, weight: f64, min_affixes: u32, max_affixes: u32) -> Self {
        Self {
            name: name.to_string(),
            weight,
            min_affixes,
            max_affixes,
        }
    }

    /// Uniform affix count in `[min_affixes, max_affixes]`.
    pub fn affix_count(&self, rng: &mut impl Rng) -> u32 {
        rng.gen_range(self.min_affixes..=self.max_affixes)
    }
}

/// Ordered from most common to rarest.
#[derive(Debug, Clone, PartialEq)]
pub struct RarityTable {
    tiers: Vec<RarityTier>,
}

impl RarityTable {
    pub fn new(tiers: Vec<RarityTier>) -> Result<Self, EngineError> {
        if tiers.is_empty() {
            return Err(EngineError::corrupt("rarity", "no tiers defined"));
        }
        for (i, tier) in tiers.iter().enumerate() {
            if tier.min_affixes > tier.max_affixes {
                return Err(EngineError::corrupt(
                    "rarity",
                    format!(
                        "{} has min affixes {} > max {}",
                        tier.name, tier.min_affixes, tier.max_affixes
                    ),
                ));
            }
            if !tier.weight.is_finite() || tier.weight < 0.0 {
                return Err(EngineError::corrupt(
                    "rarity",
                    format!("{} has invalid weight {}", tier.name, tier.weight),
                ));
            }
            if tiers[..i].iter().any(|t| t.name == tier.name) {
                return Err(EngineError::corrupt(
                    "rarity",
                    format!("{} is defined twice", tier.name),
                ));
            }
        }
        if tiers.iter().map(|t| t.weight).sum::<f64>() <= 0.0 {
            return Err(EngineError::corrupt("rarity", "tier weights sum to zero"));
        }
        Ok(Self { tiers })
    }

    /// Normal (no affixes), magic 1-2, rare 3-4, legendary 5-6.
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                RarityTier::new("normal", 60.0, 0, 0),
                RarityTier::new("magic", 30.0, 1, 2),
                RarityTier::new("rare", 9.0, 3, 4),
                RarityTier::new("legendary", 1.0, 5, 6),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&RarityTier> {
        self.tiers.iter().find(|t| t.name == name)
    }

    pub fn tiers(&self) -> &[RarityTier] {
        &self.tiers
    }

    /// Rolls a tier. `difficulty_bonus` multiplies the weight of tier `i` by
    /// `1 + bonus * i`, shifting drops toward rarer tiers.
    pub fn roll(&self, difficulty_bonus: f64, rng: &mut impl Rng) -> &RarityTier {
        let bonus = difficulty_bonus.max(0.0);
        let weights: Vec<f64> = self
            .tiers
            .iter()
            .enumerate()
            .map(|(i, tier)| tier.weight * (1.0 + bonus * i as f64))
            .collect();
        let index = weighted_index(&weights, rng).unwrap_or(0);
        &self.tiers[index]
    }
}

impl Default for RarityTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Rarity bonus earned by clearing content of the given difficulty.
pub fn difficulty_rarity_bonus(difficulty: f64) -> f64 {
    (difficulty.max(0.0) * DIFFICULTY_RARITY_BONUS_PER_POINT).min(DIFFICULTY_RARITY_BONUS_CAP)
}
