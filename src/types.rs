use phf::phf_map;
use serde::{Deserialize, Serialize};

// Attacking type -> defending types that take something other than 1x.
static TYPE_CHART: phf::Map<&'static str, &'static [(&'static str, f32)]> = phf_map! {
    "normal" => &[("rock", 0.5), ("ghost", 0.0), ("steel", 0.5)],
    "fire" => &[
        ("fire", 0.5), ("water", 0.5), ("grass", 2.0), ("ice", 2.0),
        ("bug", 2.0), ("rock", 0.5), ("dragon", 0.5), ("steel", 2.0),
    ],
    "water" => &[
        ("fire", 2.0), ("water", 0.5), ("grass", 0.5), ("ground", 2.0),
        ("rock", 2.0), ("dragon", 0.5),
    ],
    "electric" => &[
        ("water", 2.0), ("electric", 0.5), ("grass", 0.5), ("ground", 0.0),
        ("flying", 2.0), ("dragon", 0.5),
    ],
    "grass" => &[
        ("fire", 0.5), ("water", 2.0), ("grass", 0.5), ("poison", 0.5),
        ("ground", 2.0), ("flying", 0.5), ("bug", 0.5), ("rock", 2.0),
        ("dragon", 0.5), ("steel", 0.5),
    ],
    "ice" => &[
        ("fire", 0.5), ("water", 0.5), ("grass", 2.0), ("ice", 0.5),
        ("ground", 2.0), ("flying", 2.0), ("dragon", 2.0), ("steel", 0.5),
    ],
    "fighting" => &[
        ("normal", 2.0), ("ice", 2.0), ("poison", 0.5), ("flying", 0.5),
        ("psychic", 0.5), ("bug", 0.5), ("rock", 2.0), ("ghost", 0.0),
        ("dark", 2.0), ("steel", 2.0), ("fairy", 0.5),
    ],
    "poison" => &[
        ("grass", 2.0), ("poison", 0.5), ("ground", 0.5), ("rock", 0.5),
        ("ghost", 0.5), ("steel", 0.0), ("fairy", 2.0),
    ],
    "ground" => &[
        ("fire", 2.0), ("electric", 2.0), ("grass", 0.5), ("poison", 2.0),
        ("flying", 0.0), ("bug", 0.5), ("rock", 2.0), ("steel", 2.0),
    ],
    "flying" => &[
        ("electric", 0.5), ("grass", 2.0), ("fighting", 2.0), ("bug", 2.0),
        ("rock", 0.5), ("steel", 0.5),
    ],
    "psychic" => &[
        ("fighting", 2.0), ("poison", 2.0), ("psychic", 0.5), ("dark", 0.0),
        ("steel", 0.5),
    ],
    "bug" => &[
        ("fire", 0.5), ("grass", 2.0), ("fighting", 0.5), ("poison", 0.5),
        ("flying", 0.5), ("psychic", 2.0), ("ghost", 0.5), ("dark", 2.0),
        ("steel", 0.5), ("fairy", 0.5),
    ],
    "rock" => &[
        ("fire", 2.0), ("ice", 2.0), ("fighting", 0.5), ("ground", 0.5),
        ("flying", 2.0), ("bug", 2.0), ("steel", 0.5),
    ],
    "ghost" => &[("normal", 0.0), ("psychic", 2.0), ("ghost", 2.0), ("dark", 0.5)],
    "dragon" => &[("dragon", 2.0), ("steel", 0.5), ("fairy", 0.0)],
    "dark" => &[
        ("fighting", 0.5), ("psychic", 2.0), ("ghost", 2.0), ("dark", 0.5),
        ("fairy", 0.5),
    ],
    "steel" => &[
        ("fire", 0.5), ("water", 0.5), ("electric", 0.5), ("ice", 2.0),
        ("rock", 2.0), ("steel", 0.5), ("fairy", 2.0),
    ],
    "fairy" => &[
        ("fire", 0.5), ("fighting", 2.0), ("poison", 0.5), ("dragon", 2.0),
        ("dark", 2.0), ("steel", 0.5),
    ],
};

/// Multiplier for `move_type` hitting a Pokemon with `target_types`.
///
/// Dual types multiply; an empty type list and unknown type names are neutral.
pub fn type_effectiveness(move_type: &str, target_types: &[String]) -> f32 {
    target_types
        .iter()
        .map(|t| single_type_effectiveness(move_type, t))
        .product()
}

fn single_type_effectiveness(attacking: &str, defending: &str) -> f32 {
    let atk = attacking.to_ascii_lowercase();
    let def = defending.to_ascii_lowercase();
    TYPE_CHART
        .get(atk.as_str())
        .and_then(|row| row.iter().find(|(name, _)| *name == def))
        .map(|(_, mult)| *mult)
        .unwrap_or(1.0)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effectiveness {
    NoEffect,
    NotVeryEffective,
    Normal,
    SuperEffective,
}

impl Effectiveness {
    pub fn classify(multiplier: f32) -> Self {
        if multiplier == 0.0 {
            Effectiveness::NoEffect
        } else if multiplier < 1.0 {
            Effectiveness::NotVeryEffective
        } else if multiplier > 1.0 {
            Effectiveness::SuperEffective
        } else {
            Effectiveness::Normal
        }
    }

    /// Suffix appended to an action description, empty for neutral hits.
    pub fn remark(self) -> &'static str {
        match self {
            Effectiveness::NoEffect => " (It had no effect!)",
            Effectiveness::NotVeryEffective => " (Not very effective...)",
            Effectiveness::SuperEffective => " (Super effective!)",
            Effectiveness::Normal => "",
        }
    }
}
