//! Shared balance constants used by the engine and the simulator.
//!
//! All core balance numbers are defined here.
//! Change once, test everywhere.

// =============================================================================
// STAT AGGREGATION
// =============================================================================

/// Resistance cap before any max-resist modifiers.
pub const DEFAULT_RESIST_CAP: i32 = 75;

/// Attack speed used when no weapon is equipped.
pub const UNARMED_ATTACK_SPEED: f64 = 1.0;

/// Divisor converting percentage modifiers into fractions.
pub const PERCENT_DIVISOR: f64 = 100.0;

/// Morale at which no morale multiplier applies.
pub const MORALE_NEUTRAL: i32 = 50;
pub const MORALE_MIN: i32 = 0;
pub const MORALE_MAX: i32 = 100;
pub const STARTING_MORALE: i32 = 50;

/// Damage multiplier change per morale point away from neutral (±20% at the extremes).
pub const MORALE_DAMAGE_PER_POINT: f64 = 0.004;

/// Defense multiplier change per morale point away from neutral (±10% at the extremes).
pub const MORALE_DEFENSE_PER_POINT: f64 = 0.002;

// =============================================================================
// LEVELING
// =============================================================================

/// XP for level N = XP_CURVE_BASE * N^XP_CURVE_EXPONENT
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;
pub const MAX_LEVEL: u32 = 100;

// =============================================================================
// MITIGATION
// =============================================================================

/// Physical: raw * (1 - defense / DIVISOR) - defense / FLAT_DIVISOR
pub const PHYSICAL_MITIGATION_DIVISOR: f64 = 200.0;
pub const PHYSICAL_FLAT_REDUCTION_DIVISOR: f64 = 4.0;

// =============================================================================
// WIN CHANCE
// =============================================================================

pub const WIN_CHANCE_FLOOR: f64 = 0.05;
pub const WIN_CHANCE_AT_PARITY: f64 = 0.15;
pub const WIN_CHANCE_CAP: f64 = 0.90;

/// Slope of the logarithmic ramp above parity (reaches the cap near ratio 12).
pub const WIN_CHANCE_LOG_SLOPE: f64 = 0.30;

/// Death classification brackets (win chance at the start of the fight).
pub const OUTCLASSED_BARELY_MIN_CHANCE: f64 = 0.15;
pub const OUTCLASSED_SIGNIFICANTLY_MIN_CHANCE: f64 = 0.10;

// =============================================================================
// POWER RATING
// =============================================================================

pub const POWER_RATING_SCALE: f64 = 10.0;
pub const POWER_DEFENSE_DIVISOR: f64 = 100.0;

// =============================================================================
// MONSTERS
// =============================================================================

/// Monster stats grow by this fraction per level above 1.
pub const MONSTER_SCALING_PER_LEVEL: f64 = 0.12;

/// Elite multipliers: (life_mult, damage_mult, reward_mult)
pub const MAGIC_ELITE_MULTIPLIERS: (f64, f64, f64) = (1.5, 1.2, 1.5);
pub const RARE_ELITE_MULTIPLIERS: (f64, f64, f64) = (2.5, 1.5, 2.5);

// =============================================================================
// ITEMS
// =============================================================================

/// Default slot category weights: (weapon, armor, jewelry)
pub const DEFAULT_SLOT_WEIGHTS: (f64, f64, f64) = (3.0, 5.0, 2.0);

/// Rarity bonus granted per point of mission difficulty.
pub const DIFFICULTY_RARITY_BONUS_PER_POINT: f64 = 0.02;
pub const DIFFICULTY_RARITY_BONUS_CAP: f64 = 1.0;

/// Slot-specific multipliers for rolled flat stats.
pub const BODY_ARMOR_DEFENSE_MULTIPLIER: f64 = 2.0;
pub const BODY_ARMOR_LIFE_MULTIPLIER: f64 = 1.5;

pub const CHAOS_ORB_COST: u32 = 1;
pub const EXALTED_ORB_COST: u32 = 1;

/// Orb drop chances per victorious mission.
pub const CHAOS_ORB_DROP_CHANCE: f64 = 0.10;
pub const EXALTED_ORB_DROP_CHANCE: f64 = 0.02;
