use chrono::Utc;
use pokemon_arena_sim::battle::{simulate_challenge, BattleOptions};
use pokemon_arena_sim::model::Player;
use pokemon_arena_sim::record::{BattleRecord, BattleType};
use pokemon_arena_sim::{load_pokedex, load_record, load_settings, save_record, SimError};
use std::fs;
use tempfile::tempdir;

const POKEDEX: &str = r#"{
  "@odata.context": "https://example.crm.dynamics.com/api/data/v9.2/$metadata#pokemon_pokedexes",
  "value": [
    {
      "pokemon_pokedexid": "11111111-0000-0000-0000-000000000001",
      "pokemon_nickname": "Sparky",
      "pokemon_level": 12,
      "pokemon_hp": 40,
      "pokemon_hpmax": 48,
      "pokemon_Pokemon": { "pokemon_id": 25, "pokemon_name": "Pikachu", "pokemon_type1": "Electric" }
    },
    {
      "pokemon_pokedexid": "11111111-0000-0000-0000-000000000002",
      "pokemon_name": "Geodude",
      "pokemon_level": 9
    }
  ]
}"#;

#[test]
fn pokedex_loads_from_odata_collection() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pokedex.json");
    fs::write(&path, POKEDEX).unwrap();

    let rows = load_pokedex(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].pokemon_nickname.as_deref(), Some("Sparky"));
    assert_eq!(rows[1].pokemon_level, Some(9));

    let ash = Player { id: "1".into(), name: "Ash".into() };
    let brock = Player { id: "2".into(), name: "Brock".into() };
    let outcome = simulate_challenge(&ash, &rows[0], &brock, &rows[1], &BattleOptions::default(), 2);
    assert_eq!(outcome.player1.pokemon.name, "Sparky");
    assert_eq!(outcome.player1.pokemon.hp, 40);
    assert_eq!(outcome.player1.pokemon.max_hp, 48);
    assert_eq!(outcome.player1.pokemon.types, vec!["electric"]);
}

#[test]
fn single_row_and_empty_collections() {
    let dir = tempdir().unwrap();
    let single = dir.path().join("single.json");
    fs::write(&single, r#"{ "pokemon_name": "Eevee", "pokemon_level": 3 }"#).unwrap();
    assert_eq!(load_pokedex(&single).unwrap().len(), 1);

    let empty = dir.path().join("empty.json");
    fs::write(&empty, r#"{ "value": [] }"#).unwrap();
    let err = load_pokedex(&empty).unwrap_err();
    assert!(matches!(err.downcast_ref::<SimError>(), Some(SimError::EmptyPokedex)));

    let missing = dir.path().join("missing.json");
    assert!(load_pokedex(&missing).is_err());
}

#[test]
fn settings_file_drives_turn_limit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{ "value": [
            { "pokemon_settingkey": "battle_turns", "pokemon_settingvalue": "3" },
            { "pokemon_settingkey": "maintenance_mode", "pokemon_settingvalue": "false" }
        ] }"#,
    )
    .unwrap();
    let settings = load_settings(&path).unwrap();
    assert_eq!(settings.len(), 2);
    assert_eq!(BattleOptions::from_settings(&settings).max_turns, 3);

    fs::write(&path, "not json").unwrap();
    assert!(load_settings(&path).is_err());
}

#[test]
fn records_survive_a_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pokedex.json");
    fs::write(&path, POKEDEX).unwrap();
    let rows = load_pokedex(&path).unwrap();
    let ash = Player { id: "1".into(), name: "Ash".into() };
    let brock = Player { id: "2".into(), name: "Brock".into() };
    let outcome = simulate_challenge(&ash, &rows[0], &brock, &rows[1], &BattleOptions::default(), 6);
    let now = Utc::now();
    let record = BattleRecord::from_outcome(&outcome, BattleType::Tournament, now, now);

    let out = dir.path().join("battle.json");
    save_record(&record, &out).unwrap();
    let loaded = load_record(&out).unwrap();
    assert_eq!(loaded, record);
}
