use crate::model::{BattlePokemon, Move};
use crate::types::{type_effectiveness, Effectiveness};
use rand::Rng;

pub const CRIT_CHANCE: f64 = 0.0625;
pub const CRIT_MULTIPLIER: f32 = 1.5;
pub const FALLBACK_POWER: u32 = 40;
pub const FALLBACK_LEVEL: u32 = 50;

/// Result of one attack before it is applied to the defender.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackRoll {
    pub damage: u32,
    pub multiplier: f32,
    pub effectiveness: Effectiveness,
    pub critical: bool,
}

/// Damage before type and crit modifiers, with `spread` in `[0.85, 1.0)`.
pub fn base_damage(level: u32, attack: u32, defense: u32, power: u32, spread: f32) -> u32 {
    let level_multiplier = (2.0 * level as f32 + 10.0) / 250.0;
    let ratio = attack as f32 / defense.max(1) as f32;
    ((level_multiplier * ratio * power as f32 + 2.0) * spread).floor() as u32
}

/// Applies type effectiveness and the crit bonus, flooring after each step,
/// then enforces the 1 damage minimum.
pub fn finish_damage(base: u32, multiplier: f32, critical: bool) -> u32 {
    let typed = (base as f32 * multiplier).floor();
    let total = if critical {
        (typed * CRIT_MULTIPLIER).floor()
    } else {
        typed
    };
    (total as u32).max(1)
}

pub fn roll_attack<R: Rng>(
    attacker: &BattlePokemon,
    defender: &BattlePokemon,
    move_def: &Move,
    rng: &mut R,
) -> AttackRoll {
    let level = if attacker.level == 0 {
        FALLBACK_LEVEL
    } else {
        attacker.level
    };
    let power = if move_def.power == 0 {
        FALLBACK_POWER
    } else {
        move_def.power
    };
    let spread = rng.gen_range(0.85f32..1.0);
    let base = base_damage(level, attacker.attack, defender.defense, power, spread);
    let multiplier = type_effectiveness(&move_def.move_type, &defender.types);
    let critical = rng.gen_bool(CRIT_CHANCE);
    AttackRoll {
        damage: finish_damage(base, multiplier, critical),
        multiplier,
        effectiveness: Effectiveness::classify(multiplier),
        critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_formula_matches_hand_calculation() {
        // (2*50+10)/250 = 0.44; 0.44 * 2 * 90 + 2 = 81.2
        assert_eq!(base_damage(50, 100, 50, 90, 1.0), 81);
        assert_eq!(base_damage(50, 100, 50, 90, 0.85), 69);
    }

    #[test]
    fn zero_defense_does_not_divide_by_zero() {
        assert_eq!(base_damage(5, 10, 0, 40, 1.0), base_damage(5, 10, 1, 40, 1.0));
    }

    #[test]
    fn modifiers_floor_in_order() {
        assert_eq!(finish_damage(81, 2.0, false), 162);
        assert_eq!(finish_damage(81, 0.5, true), 60);
        assert_eq!(finish_damage(81, 0.0, true), 1);
        assert_eq!(finish_damage(0, 1.0, false), 1);
    }
}
