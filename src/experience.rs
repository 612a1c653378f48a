pub const LEVEL_CAP: u32 = 100;
pub const BASE_EXPERIENCE: f64 = 50.0;
/// Experience needed to leave a level is `level * EXPERIENCE_PER_LEVEL`.
pub const EXPERIENCE_PER_LEVEL: u32 = 100;

/// Experience earned from one battle. Beating a stronger opponent pays more;
/// a weaker one never drops the multiplier below 0.5.
pub fn calculate_experience(player_level: u32, opponent_level: u32, is_winner: bool) -> u32 {
    let level_multiplier = (opponent_level as f64 / player_level.max(1) as f64).max(0.5);
    let win_multiplier = if is_winner { 1.5 } else { 0.5 };
    (BASE_EXPERIENCE * level_multiplier * win_multiplier).floor() as u32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelCheck {
    pub level_up: bool,
    pub new_level: u32,
}

pub fn check_level_up(current_level: u32, experience: u32) -> LevelCheck {
    let needed = current_level.max(1).saturating_mul(EXPERIENCE_PER_LEVEL);
    if experience >= needed && current_level < LEVEL_CAP {
        LevelCheck {
            level_up: true,
            new_level: current_level + 1,
        }
    } else {
        LevelCheck {
            level_up: false,
            new_level: current_level,
        }
    }
}
