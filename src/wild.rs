//! Wild opponents and training battles against them.

use crate::battle::{simulate_battle, BattleOptions, BattleOutcome, Side, VictoryCondition};
use crate::experience::{calculate_experience, check_level_up, LevelCheck, LEVEL_CAP};
use crate::model::{sprite_url, BattlePokemon, Combatant, Player};
use crate::moves::moves_for_types;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Clone, Copy, Debug)]
pub struct WildTemplate {
    pub pokemon_id: u32,
    pub name: &'static str,
    pub types: &'static [&'static str],
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

pub static WILD_TEMPLATES: &[WildTemplate] = &[
    WildTemplate { pokemon_id: 25, name: "Wild Pikachu", types: &["electric"], hp: 35, attack: 55, defense: 40, speed: 90 },
    WildTemplate { pokemon_id: 4, name: "Wild Charmander", types: &["fire"], hp: 39, attack: 52, defense: 43, speed: 65 },
    WildTemplate { pokemon_id: 1, name: "Wild Bulbasaur", types: &["grass", "poison"], hp: 45, attack: 49, defense: 49, speed: 45 },
    WildTemplate { pokemon_id: 7, name: "Wild Squirtle", types: &["water"], hp: 44, attack: 48, defense: 65, speed: 43 },
    WildTemplate { pokemon_id: 19, name: "Wild Rattata", types: &["normal"], hp: 30, attack: 56, defense: 35, speed: 72 },
    WildTemplate { pokemon_id: 16, name: "Wild Pidgey", types: &["normal", "flying"], hp: 40, attack: 45, defense: 40, speed: 56 },
];

impl WildTemplate {
    pub fn at_level(&self, level: u32) -> BattlePokemon {
        let lvl = level as f32;
        let hp = self.hp.saturating_add(level.saturating_mul(2));
        let types: Vec<String> = self.types.iter().map(|t| t.to_string()).collect();
        BattlePokemon {
            id: self.pokemon_id.to_string(),
            pokemon_id: self.pokemon_id,
            name: self.name.to_string(),
            level,
            hp,
            max_hp: hp,
            attack: self.attack.saturating_add((lvl * 1.5).floor() as u32),
            defense: self.defense.saturating_add((lvl * 1.2).floor() as u32),
            speed: self.speed.saturating_add((lvl * 1.3).floor() as u32),
            moves: moves_for_types(&types),
            types,
            sprite_url: sprite_url(self.pokemon_id),
            trainer: None,
        }
    }
}

/// A random wild Pokemon within one level of `player_level`, kept inside
/// `1..=LEVEL_CAP`.
pub fn generate_wild_pokemon<R: Rng>(player_level: u32, rng: &mut R) -> BattlePokemon {
    let template = &WILD_TEMPLATES[rng.gen_range(0..WILD_TEMPLATES.len())];
    let level = (i64::from(player_level) + rng.gen_range(-1..=1)).clamp(1, i64::from(LEVEL_CAP));
    template.at_level(level as u32)
}

pub fn wild_player() -> Player {
    Player {
        id: "wild".to_string(),
        name: "Wild".to_string(),
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingWinner {
    Player,
    Opponent,
    Draw,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrainingResult {
    pub opponent: BattlePokemon,
    pub winner: TrainingWinner,
    pub experience: u32,
    pub level: LevelCheck,
    pub outcome: BattleOutcome,
}

/// Fights `trainee` against a freshly generated wild Pokemon.
///
/// A battle that runs out of turns counts as a draw regardless of the
/// tie-break the engine applied. `accumulated_experience` is the trainee's
/// experience before this battle; the level check runs on the new total.
pub fn simulate_training_battle(
    trainee: &Combatant,
    accumulated_experience: u32,
    options: &BattleOptions,
    seed: u64,
) -> TrainingResult {
    let mut rng = SmallRng::seed_from_u64(seed);
    let opponent = generate_wild_pokemon(trainee.pokemon.level, &mut rng);
    let wild = Combatant {
        player: wild_player(),
        pokemon: opponent.clone(),
    };
    let outcome = simulate_battle(trainee, &wild, options, rng.gen());

    let winner = match (outcome.victory, outcome.winner) {
        (VictoryCondition::Timeout, _) => TrainingWinner::Draw,
        (_, Side::Player1) => TrainingWinner::Player,
        (_, Side::Player2) => TrainingWinner::Opponent,
    };
    let experience = calculate_experience(
        trainee.pokemon.level,
        opponent.level,
        winner == TrainingWinner::Player,
    );
    let level = check_level_up(
        trainee.pokemon.level,
        accumulated_experience.saturating_add(experience),
    );
    info!(
        trainee = %trainee.pokemon.name,
        opponent = %opponent.name,
        winner = ?winner,
        experience,
        "training battle finished"
    );
    TrainingResult {
        opponent,
        winner,
        experience,
        level,
        outcome,
    }
}
