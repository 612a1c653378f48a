//! Turns Dataverse pokedex rows into battle-ready snapshots.

use crate::experience::LEVEL_CAP;
use crate::model::{sprite_url, BattlePokemon, PokedexRecord};
use crate::moves::{moves_for_types, species_types};
use rand::Rng;

pub const DEFAULT_LEVEL: u32 = 5;

/// Level-scaled stat with a small random spread, used when the row does not
/// carry the stat explicitly.
fn scaled_stat<R: Rng>(base: u32, per_level: f32, level: u32, rng: &mut R) -> u32 {
    base.saturating_add((level as f32 * per_level).floor() as u32)
        .saturating_add(rng.gen_range(0..10))
}

pub fn prepare_battle_pokemon<R: Rng>(
    record: &PokedexRecord,
    trainer: Option<&str>,
    rng: &mut R,
) -> BattlePokemon {
    let species = record.species.clone().unwrap_or_default();
    let level = record
        .pokemon_level
        .filter(|l| *l > 0)
        .map_or(DEFAULT_LEVEL, |l| l.min(LEVEL_CAP));

    let explicit_max = record.pokemon_hpmax.or(record.pokemon_max_hp);
    let hp = record
        .pokemon_hp
        .or(record.pokemon_current_hp)
        .or(explicit_max)
        .unwrap_or(30 + level * 2);
    let max_hp = explicit_max.unwrap_or(hp).max(1);
    let hp = hp.min(max_hp);

    let attack = record
        .pokemon_attack
        .unwrap_or_else(|| scaled_stat(30, 1.5, level, rng));
    let defense = record
        .pokemon_defense
        .or(record.pokemon_defence)
        .unwrap_or_else(|| scaled_stat(25, 1.2, level, rng));
    let speed = record
        .pokemon_speed
        .unwrap_or_else(|| scaled_stat(20, 1.8, level, rng));

    let species_name = species.pokemon_name.clone();
    let name = record
        .pokemon_nickname
        .clone()
        .or_else(|| record.pokemon_name.clone())
        .or_else(|| species_name.clone())
        .unwrap_or_else(|| "Unknown Pokemon".to_string());

    let mut types: Vec<String> = [&species.pokemon_type1, &species.pokemon_type2]
        .into_iter()
        .flatten()
        .map(|t| t.trim().to_ascii_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    if types.is_empty() {
        let lookup_name = species_name.as_deref().unwrap_or(name.as_str());
        types = species_types(lookup_name);
    }

    let pokemon_id = species.pokemon_id.or(record.pokemon_id).unwrap_or(1);
    // Rows that were never stored have no pokedex id and get no HP write-back.
    let id = record.pokemon_pokedexid.clone().unwrap_or_default();

    BattlePokemon {
        id,
        pokemon_id,
        name,
        level,
        hp,
        max_hp,
        attack,
        defense,
        speed,
        moves: moves_for_types(&types),
        types,
        sprite_url: species
            .pokemon_sprite_url
            .unwrap_or_else(|| sprite_url(pokemon_id)),
        trainer: trainer.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpeciesRecord;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn explicit_columns_win_over_derived_stats() {
        let record = PokedexRecord {
            pokemon_pokedexid: Some("abc".into()),
            pokemon_name: Some("Sparky".into()),
            pokemon_level: Some(12),
            pokemon_hp: Some(30),
            pokemon_hpmax: Some(40),
            pokemon_attack: Some(55),
            pokemon_defence: Some(44),
            pokemon_speed: Some(90),
            species: Some(SpeciesRecord {
                pokemon_id: Some(25),
                pokemon_name: Some("pikachu".into()),
                pokemon_type1: Some("Electric".into()),
                ..SpeciesRecord::default()
            }),
            ..PokedexRecord::default()
        };
        let mut rng = SmallRng::seed_from_u64(3);
        let mon = prepare_battle_pokemon(&record, Some("Ash"), &mut rng);
        assert_eq!(mon.id, "abc");
        assert_eq!(mon.pokemon_id, 25);
        assert_eq!(mon.name, "Sparky");
        assert_eq!((mon.hp, mon.max_hp), (30, 40));
        assert_eq!((mon.attack, mon.defense, mon.speed), (55, 44, 90));
        assert_eq!(mon.types, vec!["electric"]);
        assert_eq!(mon.moves[0].name, "Thunderbolt");
        assert_eq!(mon.trainer.as_deref(), Some("Ash"));
    }

    #[test]
    fn missing_columns_fall_back_to_level_formulas() {
        let record = PokedexRecord {
            pokemon_name: Some("Charizard".into()),
            pokemon_level: Some(10),
            ..PokedexRecord::default()
        };
        let mut rng = SmallRng::seed_from_u64(9);
        let mon = prepare_battle_pokemon(&record, None, &mut rng);
        assert_eq!(mon.hp, 50);
        assert_eq!(mon.max_hp, 50);
        assert!((45..55).contains(&mon.attack));
        assert!((37..47).contains(&mon.defense));
        assert!((38..48).contains(&mon.speed));
        assert_eq!(mon.types, vec!["fire", "flying"]);
        assert!(mon.sprite_url.ends_with("/1.png"));
    }

    #[test]
    fn current_hp_never_exceeds_max() {
        let record = PokedexRecord {
            pokemon_hp: Some(120),
            pokemon_hpmax: Some(80),
            ..PokedexRecord::default()
        };
        let mut rng = SmallRng::seed_from_u64(1);
        let mon = prepare_battle_pokemon(&record, None, &mut rng);
        assert_eq!(mon.level, DEFAULT_LEVEL);
        assert_eq!((mon.hp, mon.max_hp), (80, 80));
        assert_eq!(mon.name, "Unknown Pokemon");
        assert_eq!(mon.id, "");
    }

    #[test]
    fn oversized_levels_are_capped() {
        let record = PokedexRecord {
            pokemon_level: Some(3_000_000_000),
            ..PokedexRecord::default()
        };
        let mut rng = SmallRng::seed_from_u64(2);
        let mon = prepare_battle_pokemon(&record, None, &mut rng);
        assert_eq!(mon.level, LEVEL_CAP);
        assert_eq!((mon.hp, mon.max_hp), (230, 230));
        assert!((180..190).contains(&mon.attack));
    }
}
