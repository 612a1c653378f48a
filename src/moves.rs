use crate::model::Move;
use phf::phf_map;

#[derive(Clone, Copy, Debug)]
pub struct MoveTemplate {
    pub name: &'static str,
    pub move_type: &'static str,
    pub power: u32,
    pub accuracy: u32,
    pub pp: u32,
    pub description: &'static str,
}

impl MoveTemplate {
    pub fn to_move(&self) -> Move {
        Move {
            name: self.name.to_string(),
            move_type: self.move_type.to_string(),
            power: self.power,
            accuracy: self.accuracy,
            pp: self.pp,
            description: self.description.to_string(),
        }
    }
}

const fn tmpl(
    name: &'static str,
    move_type: &'static str,
    power: u32,
    accuracy: u32,
    pp: u32,
    description: &'static str,
) -> MoveTemplate {
    MoveTemplate {
        name,
        move_type,
        power,
        accuracy,
        pp,
        description,
    }
}

const TACKLE: MoveTemplate = tmpl(
    "Tackle",
    "normal",
    40,
    100,
    35,
    "A physical attack in which the user charges and slams into the target.",
);
const SCRATCH: MoveTemplate = tmpl(
    "Scratch",
    "normal",
    40,
    100,
    35,
    "Hard, pointed, sharp claws rake the target to inflict damage.",
);
const QUICK_ATTACK: MoveTemplate = tmpl(
    "Quick Attack",
    "normal",
    40,
    100,
    30,
    "The user lunges at the target at a speed that makes it almost invisible.",
);
const EMBER: MoveTemplate = tmpl(
    "Ember",
    "fire",
    40,
    100,
    25,
    "The target is attacked with small flames.",
);
const WATER_GUN: MoveTemplate = tmpl(
    "Water Gun",
    "water",
    40,
    100,
    25,
    "The target is blasted with a forceful shot of water.",
);
const THUNDER_SHOCK: MoveTemplate = tmpl(
    "Thunder Shock",
    "electric",
    40,
    100,
    30,
    "A jolt of electricity crashes down on the target.",
);
const VINE_WHIP: MoveTemplate = tmpl(
    "Vine Whip",
    "grass",
    45,
    100,
    25,
    "The target is struck with slender, whiplike vines.",
);
const GUST: MoveTemplate = tmpl(
    "Gust",
    "flying",
    40,
    100,
    35,
    "A gust of wind is whipped up by wings and launched at the target.",
);

static DEFAULT_MOVES: &[MoveTemplate] = &[
    TACKLE,
    SCRATCH,
    QUICK_ATTACK,
    EMBER,
    WATER_GUN,
    THUNDER_SHOCK,
    VINE_WHIP,
    GUST,
];

// Four-move sets keyed by primary type. Types without an entry use "normal".
static MOVESETS: phf::Map<&'static str, &'static [MoveTemplate]> = phf_map! {
    "fire" => &[
        tmpl("Flamethrower", "fire", 90, 100, 15, "The target is scorched with an intense blast of fire."),
        tmpl("Fire Blast", "fire", 110, 85, 5, "The target is attacked with an intense blast of all-consuming fire."),
        EMBER,
        TACKLE,
    ],
    "water" => &[
        tmpl("Surf", "water", 90, 100, 15, "The user attacks everything around it by swamping its surroundings with a giant wave."),
        tmpl("Hydro Pump", "water", 110, 80, 5, "The target is blasted by a huge volume of water launched under great pressure."),
        WATER_GUN,
        TACKLE,
    ],
    "electric" => &[
        tmpl("Thunderbolt", "electric", 90, 100, 15, "A strong electric blast crashes down on the target."),
        tmpl("Thunder", "electric", 110, 70, 10, "A wicked thunderbolt is dropped on the target."),
        THUNDER_SHOCK,
        QUICK_ATTACK,
    ],
    "grass" => &[
        tmpl("Solar Beam", "grass", 120, 100, 10, "A two-turn attack where energy is absorbed on the first turn."),
        tmpl("Petal Dance", "grass", 90, 100, 10, "The user attacks the target by scattering petals for two to three turns."),
        VINE_WHIP,
        TACKLE,
    ],
    "psychic" => &[
        tmpl("Psychic", "psychic", 90, 100, 10, "The target is hit by a strong telekinetic force."),
        tmpl("Psybeam", "psychic", 65, 100, 20, "The target is attacked with a peculiar ray."),
        tmpl("Confusion", "psychic", 50, 100, 25, "The target is hit by a weak telekinetic force."),
        tmpl("Swift", "normal", 60, 100, 20, "Star-shaped rays are shot at the opposing team."),
    ],
    "normal" => &[
        tmpl("Body Slam", "normal", 85, 100, 15, "The user drops onto the target with its full body weight."),
        tmpl("Hyper Beam", "normal", 150, 90, 5, "The target is attacked with a powerful beam."),
        TACKLE,
        SCRATCH,
    ],
};

static SPECIES_TYPES: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "pikachu" => &["electric"],
    "charizard" => &["fire", "flying"],
    "blastoise" => &["water"],
    "venusaur" => &["grass", "poison"],
    "alakazam" => &["psychic"],
    "machamp" => &["fighting"],
    "golem" => &["rock", "ground"],
    "gengar" => &["ghost", "poison"],
    "lapras" => &["water", "ice"],
    "snorlax" => &["normal"],
    "articuno" => &["ice", "flying"],
    "zapdos" => &["electric", "flying"],
    "moltres" => &["fire", "flying"],
    "dragonite" => &["dragon", "flying"],
    "mewtwo" => &["psychic"],
    "mew" => &["psychic"],
};

/// Moveset for a Pokemon, chosen by its primary type. A Pokemon with no
/// types at all gets the generic default list.
pub fn moves_for_types(types: &[String]) -> Vec<Move> {
    let Some(primary) = types.first().map(|t| t.to_ascii_lowercase()) else {
        return default_moves();
    };
    MOVESETS
        .get(primary.as_str())
        .or_else(|| MOVESETS.get("normal"))
        .map(|set| set.iter().map(MoveTemplate::to_move).collect())
        .unwrap_or_default()
}

pub fn default_moves() -> Vec<Move> {
    DEFAULT_MOVES.iter().map(MoveTemplate::to_move).collect()
}

/// Types for the handful of species the legacy roster knows by name.
/// Anything else is treated as a pure normal type.
pub fn species_types(name: &str) -> Vec<String> {
    let key = name.trim().to_ascii_lowercase();
    SPECIES_TYPES
        .get(key.as_str())
        .copied()
        .unwrap_or(&["normal"])
        .iter()
        .map(|t| t.to_string())
        .collect()
}
