//! The JSON document stored on a `pokemon_battles` row and read back by the
//! replay viewer.

use crate::battle::{ActionRecord, BattleOutcome, Side, TurnRecord, VictoryCondition};
use crate::logger::{describe_action, narrate, turn_summary};
use crate::model::BattlePokemon;
use crate::types::Effectiveness;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const REPLAY_VERSION: &str = "1.0";
/// Replay animation length per turn, in milliseconds.
pub const TURN_ANIMATION_MS: u32 = 1500;
const BATTLE_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BattleType {
    Ranked,
    #[default]
    Casual,
    Training,
    Tournament,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRules {
    pub level_cap: u32,
    pub timer_per_turn: u32,
    pub items_allowed: bool,
    pub switching_allowed: bool,
}

impl Default for BattleRules {
    fn default() -> Self {
        BattleRules {
            level_cap: crate::experience::LEVEL_CAP,
            timer_per_turn: 30,
            items_allowed: false,
            switching_allowed: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleMetadata {
    pub battle_id: String,
    pub player1_id: String,
    pub player1_name: String,
    pub player2_id: String,
    pub player2_name: String,
    pub battle_type: BattleType,
    pub battle_format: String,
    pub battle_rules: BattleRules,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_seconds: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    #[serde(flatten)]
    pub pokemon: BattlePokemon,
    pub final_hp: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonTeams {
    pub player1_team: Vec<TeamEntry>,
    pub player2_team: Vec<TeamEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionEntry {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub move_used: Option<String>,
    #[serde(default)]
    pub move_type: Option<String>,
    pub target: String,
    pub damage_dealt: u32,
    pub effectiveness: Effectiveness,
    pub effectiveness_multiplier: f32,
    pub critical_hit: bool,
    pub action_success: bool,
    pub action_description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnResultEntry {
    pub player1_pokemon_hp: u32,
    pub player2_pokemon_hp: u32,
    pub player1_pokemon_fainted: bool,
    pub player2_pokemon_fainted: bool,
    #[serde(default)]
    pub weather_effect: Option<String>,
    #[serde(default)]
    pub special_events: Vec<String>,
    pub turn_summary: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattlefieldState {
    #[serde(default)]
    pub weather: Option<String>,
    pub terrain: String,
    #[serde(default)]
    pub field_effects: Vec<String>,
    pub player1_active_pokemon: BattlePokemon,
    pub player2_active_pokemon: BattlePokemon,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnEntry {
    pub turn_number: u32,
    pub timestamp: DateTime<Utc>,
    pub player1_action: ActionEntry,
    pub player2_action: ActionEntry,
    pub turn_result: TurnResultEntry,
    pub battlefield_state: BattlefieldState,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScores {
    pub player1_pokemon_remaining: u32,
    pub player2_pokemon_remaining: u32,
    pub player1_total_damage_dealt: u32,
    pub player2_total_damage_dealt: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub experience_gained: u32,
    #[serde(default)]
    pub items_earned: Vec<String>,
    #[serde(default)]
    pub achievements_unlocked: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinalResult {
    pub winner: Side,
    pub winner_name: String,
    pub loser_name: String,
    pub victory_condition: VictoryCondition,
    pub final_scores: FinalScores,
    pub battle_summary: String,
    pub player1_starting_hp: u32,
    pub player2_starting_hp: u32,
    pub player1_final_hp: u32,
    pub player2_final_hp: u32,
    pub player1_pokemon_pokedexid: String,
    pub player2_pokemon_pokedexid: String,
    pub player1_max_hp: u32,
    pub player2_max_hp: u32,
    pub rewards: Rewards,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayData {
    pub version: String,
    pub compressed: bool,
    pub animation_timings: Vec<u32>,
    #[serde(default)]
    pub special_effects: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleRecord {
    pub metadata: BattleMetadata,
    pub pokemon_teams: PokemonTeams,
    pub battle_turns: Vec<TurnEntry>,
    pub final_result: FinalResult,
    pub battle_log: Vec<String>,
    pub replay_data: ReplayData,
}

/// `battle_<epoch millis>_<9 base-36 chars>`, the suffix drawn from the seed.
pub fn battle_id(started_at: DateTime<Utc>, seed: u64) -> String {
    let mut rng = SmallRng::seed_from_u64(seed);
    let suffix: String = (0..9)
        .map(|_| BATTLE_ID_ALPHABET[rng.gen_range(0..BATTLE_ID_ALPHABET.len())] as char)
        .collect();
    format!("battle_{}_{suffix}", started_at.timestamp_millis())
}

fn action_entry(outcome: &BattleOutcome, action: &ActionRecord) -> ActionEntry {
    ActionEntry {
        action_type: "attack".to_string(),
        move_used: action.move_name.clone(),
        move_type: action.move_type.clone(),
        target: "opponent".to_string(),
        damage_dealt: action.damage,
        effectiveness: action.effectiveness,
        effectiveness_multiplier: action.multiplier,
        critical_hit: action.critical,
        action_success: action.landed(),
        action_description: describe_action(outcome, action),
    }
}

fn with_hp(pokemon: &BattlePokemon, hp: u32) -> BattlePokemon {
    BattlePokemon {
        hp,
        ..pokemon.clone()
    }
}

fn turn_entry(outcome: &BattleOutcome, turn: &TurnRecord, started_at: DateTime<Utc>) -> TurnEntry {
    let offset = Duration::milliseconds(i64::from(TURN_ANIMATION_MS) * i64::from(turn.turn_number - 1));
    TurnEntry {
        turn_number: turn.turn_number,
        timestamp: started_at + offset,
        player1_action: action_entry(outcome, &turn.player1_action),
        player2_action: action_entry(outcome, &turn.player2_action),
        turn_result: TurnResultEntry {
            player1_pokemon_hp: turn.player1_hp,
            player2_pokemon_hp: turn.player2_hp,
            player1_pokemon_fainted: turn.player1_hp == 0,
            player2_pokemon_fainted: turn.player2_hp == 0,
            weather_effect: None,
            special_events: Vec::new(),
            turn_summary: turn_summary(outcome, turn),
        },
        battlefield_state: BattlefieldState {
            weather: None,
            terrain: "normal".to_string(),
            field_effects: Vec::new(),
            player1_active_pokemon: with_hp(&outcome.player1.pokemon, turn.player1_hp),
            player2_active_pokemon: with_hp(&outcome.player2.pokemon, turn.player2_hp),
        },
    }
}

fn final_result(outcome: &BattleOutcome) -> FinalResult {
    let winner_name = outcome.combatant(outcome.winner).player.name.clone();
    let loser_name = outcome.combatant(outcome.loser()).player.name.clone();
    let p1 = &outcome.player1.pokemon;
    let p2 = &outcome.player2.pokemon;
    FinalResult {
        winner: outcome.winner,
        battle_summary: format!(
            "{winner_name} emerged victorious after {} intense turns!",
            outcome.turns_played()
        ),
        winner_name,
        loser_name,
        victory_condition: outcome.victory,
        final_scores: FinalScores {
            player1_pokemon_remaining: u32::from(outcome.player1_final_hp > 0),
            player2_pokemon_remaining: u32::from(outcome.player2_final_hp > 0),
            player1_total_damage_dealt: outcome.total_damage(Side::Player1),
            player2_total_damage_dealt: outcome.total_damage(Side::Player2),
        },
        player1_starting_hp: p1.hp,
        player2_starting_hp: p2.hp,
        player1_final_hp: outcome.player1_final_hp,
        player2_final_hp: outcome.player2_final_hp,
        player1_pokemon_pokedexid: p1.id.clone(),
        player2_pokemon_pokedexid: p2.id.clone(),
        player1_max_hp: p1.max_hp,
        player2_max_hp: p2.max_hp,
        rewards: Rewards {
            experience_gained: outcome.experience_reward,
            ..Rewards::default()
        },
    }
}

impl BattleRecord {
    pub fn from_outcome(
        outcome: &BattleOutcome,
        battle_type: BattleType,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let p1 = &outcome.player1;
        let p2 = &outcome.player2;
        let metadata = BattleMetadata {
            battle_id: battle_id(started_at, outcome.seed),
            player1_id: p1.player.id.clone(),
            player1_name: p1.player.name.clone(),
            player2_id: p2.player.id.clone(),
            player2_name: p2.player.name.clone(),
            battle_type,
            battle_format: "single".to_string(),
            battle_rules: BattleRules::default(),
            started_at,
            completed_at: Some(completed_at),
            duration_seconds: Some((completed_at - started_at).num_seconds()),
        };
        let battle_turns: Vec<TurnEntry> = outcome
            .turns
            .iter()
            .map(|turn| turn_entry(outcome, turn, started_at))
            .collect();
        BattleRecord {
            metadata,
            pokemon_teams: PokemonTeams {
                player1_team: vec![TeamEntry {
                    pokemon: p1.pokemon.clone(),
                    final_hp: outcome.player1_final_hp,
                }],
                player2_team: vec![TeamEntry {
                    pokemon: p2.pokemon.clone(),
                    final_hp: outcome.player2_final_hp,
                }],
            },
            replay_data: ReplayData {
                version: REPLAY_VERSION.to_string(),
                compressed: false,
                animation_timings: vec![TURN_ANIMATION_MS; battle_turns.len()],
                special_effects: Vec::new(),
            },
            battle_turns,
            final_result: final_result(outcome),
            battle_log: narrate(outcome),
        }
    }
}
