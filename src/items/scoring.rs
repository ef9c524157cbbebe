use super::equipment::Equipment;
use super::types::ItemInstance;
use crate::core::stats::{ModifierKind, Stat, StatKey};

/// Score bonus per point of weapon attack speed above unarmed.
const ATTACK_SPEED_SCORE: f64 = 20.0;

/// Rough value of one point of a stat, used to compare drops.
fn stat_weight(key: &StatKey) -> f64 {
    match (key.kind, key.stat) {
        (ModifierKind::More, _) => 3.0,
        (ModifierKind::MaxResist, _) => 2.0,
        (ModifierKind::Flat, Stat::Damage) => 2.0,
        (ModifierKind::Flat, Stat::Life) => 0.5, // Flat life is plentiful
        (ModifierKind::Flat, Stat::Defense) => 0.8,
        (ModifierKind::Increased, Stat::Damage) => 1.5,
        (ModifierKind::Increased, Stat::AttackSpeed) => 1.2,
        (_, Stat::AllResist) => 1.5,
        (_, Stat::LifeLeech) => 1.5,
        (_, s) if s.is_resist() => 0.6,
        (_, Stat::LifeOnHit) => 0.8,
        (_, Stat::MoraleGain) => 0.5,
        (_, Stat::GoldFind) | (_, Stat::MoraleResistance) => 0.3,
        (_, Stat::LightRadius) | (_, Stat::MoveSpeed) => 0.1,
        _ => 1.0,
    }
}

pub fn score_item(item: &ItemInstance) -> f64 {
    let weapon = item.as_weapon();
    let mut score = 0.0;

    for (key, value) in item.core().stats() {
        let mut value = *value as f64;
        if let Some(weapon) = weapon {
            if *key == StatKey::flat(Stat::Damage) {
                value *= weapon.damage_multiplier;
            }
        }
        score += value * stat_weight(key);
    }

    if let Some(weapon) = weapon {
        score += (weapon.attack_speed - 1.0) * ATTACK_SPEED_SCORE;
    }

    score
}

/// Equips `item` when it outscores whatever is in its slot.
/// The caller recomputes derived stats when this returns true.
pub fn auto_equip_if_better(item: ItemInstance, equipment: &mut Equipment) -> bool {
    let slot = item.slot();
    let new_score = score_item(&item);
    let current_score = equipment.get(slot).map(score_item).unwrap_or(0.0);

    if new_score > current_score {
        equipment.equip(slot, item).is_ok()
    } else {
        false
    }
}
