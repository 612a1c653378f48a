use serde::{Deserialize, Serialize};

pub const SPRITE_URL_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

pub fn sprite_url(pokemon_id: u32) -> String {
    format!("{SPRITE_URL_BASE}/{pokemon_id}.png")
}

fn default_accuracy() -> u32 {
    100
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    #[serde(default)]
    pub power: u32,
    #[serde(default = "default_accuracy")]
    pub accuracy: u32,
    #[serde(default)]
    pub pp: u32,
    #[serde(default)]
    pub description: String,
}

/// A Pokemon as it enters a battle. HP is the only field that changes while
/// the battle runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattlePokemon {
    pub id: String,
    pub pokemon_id: u32,
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub sprite_url: String,
    #[serde(default)]
    pub moves: Vec<Move>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer: Option<String>,
}

impl BattlePokemon {
    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

/// A player paired with the Pokemon they send out.
#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    pub player: Player,
    pub pokemon: BattlePokemon,
}

/// Master data expanded onto a pokedex row through `pokemon_Pokemon`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeciesRecord {
    #[serde(default)]
    pub pokemon_id: Option<u32>,
    #[serde(default)]
    pub pokemon_name: Option<String>,
    #[serde(default)]
    pub pokemon_type1: Option<String>,
    #[serde(default)]
    pub pokemon_type2: Option<String>,
    #[serde(default)]
    pub pokemon_sprite_url: Option<String>,
}

/// One row of the `pokemon_pokedexes` table: a Pokemon owned by a trainer.
///
/// The schema has drifted over time, so several columns exist under more than
/// one name (`pokemon_hp` / `pokemon_current_hp`, `pokemon_defense` /
/// `pokemon_defence`). Everything is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PokedexRecord {
    #[serde(default)]
    pub pokemon_pokedexid: Option<String>,
    #[serde(default)]
    pub pokemon_id: Option<u32>,
    #[serde(default)]
    pub pokemon_name: Option<String>,
    #[serde(default)]
    pub pokemon_nickname: Option<String>,
    #[serde(default)]
    pub pokemon_level: Option<u32>,
    #[serde(default)]
    pub pokemon_hp: Option<u32>,
    #[serde(default)]
    pub pokemon_hpmax: Option<u32>,
    #[serde(default)]
    pub pokemon_current_hp: Option<u32>,
    #[serde(default)]
    pub pokemon_max_hp: Option<u32>,
    #[serde(default)]
    pub pokemon_attack: Option<u32>,
    #[serde(default)]
    pub pokemon_defense: Option<u32>,
    #[serde(default)]
    pub pokemon_defence: Option<u32>,
    #[serde(default)]
    pub pokemon_speed: Option<u32>,
    #[serde(default, rename = "pokemon_Pokemon")]
    pub species: Option<SpeciesRecord>,
}

/// OData collection envelope: `{ "value": [ ... ] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ODataCollection<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}
