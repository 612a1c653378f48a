use chrono::{Duration, TimeZone, Utc};
use pokemon_arena_sim::battle::{simulate_battle, BattleOptions, Side};
use pokemon_arena_sim::challenge::{ChallengeStatus, CompleteBattle};
use pokemon_arena_sim::model::{BattlePokemon, Combatant, Move, Player};
use pokemon_arena_sim::record::{battle_id, BattleRecord, BattleType, TURN_ANIMATION_MS};

fn make_move(name: &str, move_type: &str, power: u32) -> Move {
    Move {
        name: name.to_string(),
        move_type: move_type.to_string(),
        power,
        accuracy: 100,
        pp: 10,
        description: String::new(),
    }
}

fn make_mon(name: &str, types: &[&str], hp: u32, speed: u32, mv: Move) -> BattlePokemon {
    BattlePokemon {
        id: format!("dex-{}", name.to_lowercase()),
        pokemon_id: 4,
        name: name.to_string(),
        level: 20,
        hp,
        max_hp: hp,
        attack: 55,
        defense: 45,
        speed,
        types: types.iter().map(|t| t.to_string()).collect(),
        sprite_url: String::new(),
        moves: vec![mv],
        trainer: None,
    }
}

fn duel() -> (Combatant, Combatant) {
    let a = Combatant {
        player: Player { id: "p-1".into(), name: "Ash".into() },
        pokemon: make_mon("Charmander", &["fire"], 60, 65, make_move("Ember", "fire", 40)),
    };
    let b = Combatant {
        player: Player { id: "p-2".into(), name: "Misty".into() },
        pokemon: make_mon("Squirtle", &["water"], 60, 43, make_move("Water Gun", "water", 40)),
    };
    (a, b)
}

#[test]
fn record_carries_metadata_and_replay_timings() {
    let (a, b) = duel();
    let outcome = simulate_battle(&a, &b, &BattleOptions::default(), 17);
    let started = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let completed = started + Duration::seconds(12);
    let record = BattleRecord::from_outcome(&outcome, BattleType::Ranked, started, completed);

    assert!(record
        .metadata
        .battle_id
        .starts_with(&format!("battle_{}_", started.timestamp_millis())));
    assert_eq!(record.metadata.battle_id, battle_id(started, 17));
    assert_eq!(record.metadata.duration_seconds, Some(12));
    assert_eq!(record.metadata.battle_format, "single");
    assert_eq!(record.battle_turns.len(), outcome.turns.len());
    assert_eq!(
        record.replay_data.animation_timings,
        vec![TURN_ANIMATION_MS; outcome.turns.len()]
    );
    assert_eq!(record.final_result.rewards.experience_gained, outcome.experience_reward);
    assert_eq!(record.final_result.player1_starting_hp, 60);

    let second = &record.battle_turns[1];
    assert_eq!(second.timestamp, started + Duration::milliseconds(1500));
}

#[test]
fn record_json_matches_stored_shape() {
    let (a, b) = duel();
    let outcome = simulate_battle(&a, &b, &BattleOptions::default(), 3);
    let started = Utc::now();
    let record = BattleRecord::from_outcome(&outcome, BattleType::Casual, started, started);
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["metadata"]["battle_type"], "casual");
    assert_eq!(json["metadata"]["battle_rules"]["level_cap"], 100);
    let winner = json["final_result"]["winner"].as_str().unwrap();
    assert!(winner == "player1" || winner == "player2");
    assert!(matches!(
        json["final_result"]["victory_condition"].as_str().unwrap(),
        "all_pokemon_fainted" | "timeout"
    ));

    let team = &json["pokemon_teams"]["player1_team"][0];
    assert_eq!(team["name"], "Charmander");
    assert_eq!(team["trainer"], "Ash");
    assert_eq!(team["moves"][0]["type"], "fire");

    let action = &json["battle_turns"][0]["player1_action"];
    assert_eq!(action["type"], "attack");
    assert_eq!(action["target"], "opponent");
    assert_eq!(action["move_used"], "Ember");
    assert_eq!(action["effectiveness"], "not_very_effective");
    assert_eq!(action["effectiveness_multiplier"], 0.5);

    let back: BattleRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn log_reads_like_a_battle() {
    let (a, b) = duel();
    let outcome = simulate_battle(&a, &b, &BattleOptions::default(), 8);
    let started = Utc::now();
    let record = BattleRecord::from_outcome(&outcome, BattleType::Casual, started, started);
    let log = &record.battle_log;

    assert_eq!(
        log[0],
        "Battle begins between Ash's Charmander (60/60 HP) and Misty's Squirtle (60/60 HP)!"
    );
    assert_eq!(log[1], "--- Turn 1 ---");
    assert!(log.iter().any(|line| line.contains("used Water Gun (Super effective!)")
        || line.contains("used Water Gun (Critical Hit!) (Super effective!)")));
    let winner = &outcome.combatant(outcome.winner).player.name;
    assert!(log.last().unwrap().contains(winner.as_str()));
}

#[test]
fn fainted_reply_is_recorded_as_a_failed_action() {
    let mut striker = make_mon("Striker", &["normal"], 100, 300, make_move("Mega Punch", "normal", 120));
    striker.attack = 300;
    let a = Combatant {
        player: Player { id: "p-1".into(), name: "Ash".into() },
        pokemon: striker,
    };
    let b = Combatant {
        player: Player { id: "p-2".into(), name: "Brock".into() },
        pokemon: make_mon("Onix", &["normal"], 10, 5, make_move("Tackle", "normal", 40)),
    };
    let outcome = simulate_battle(&a, &b, &BattleOptions::default(), 1);
    assert_eq!(outcome.winner, Side::Player1);
    let record = BattleRecord::from_outcome(&outcome, BattleType::Casual, Utc::now(), Utc::now());

    let turn = &record.battle_turns[0];
    assert!(!turn.player2_action.action_success);
    assert_eq!(turn.player2_action.move_used, None);
    assert_eq!(turn.player2_action.damage_dealt, 0);
    assert!(turn.turn_result.player2_pokemon_fainted);
    assert_eq!(record.final_result.final_scores.player2_pokemon_remaining, 0);
    assert_eq!(record.final_result.final_scores.player1_total_damage_dealt, 10);
    assert_eq!(record.final_result.winner_name, "Ash");
    assert_eq!(record.final_result.loser_name, "Brock");
}

#[test]
fn hp_write_back_targets_both_pokedex_rows() {
    let (a, b) = duel();
    let outcome = simulate_battle(&a, &b, &BattleOptions::default(), 17);
    let now = Utc::now();
    let record = BattleRecord::from_outcome(&outcome, BattleType::Casual, now, now);

    let updates = record.hp_updates(now);
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].pokemon_pokedexid, "dex-charmander");
    assert_eq!(updates[0].path, "pokemon_pokedexes(dex-charmander)");
    assert_eq!(updates[0].body.pokemon_hp, outcome.player1_final_hp);
    assert_eq!(updates[1].body.pokemon_hp, outcome.player2_final_hp);
    let json = serde_json::to_value(&updates[1]).unwrap();
    assert_eq!(json["body"]["pokemon_hp"], outcome.player2_final_hp);
}

#[test]
fn hp_write_back_skips_rows_without_an_id() {
    let (mut a, b) = duel();
    a.pokemon.id.clear();
    let outcome = simulate_battle(&a, &b, &BattleOptions::default(), 4);
    let now = Utc::now();
    let record = BattleRecord::from_outcome(&outcome, BattleType::Casual, now, now);
    let updates = record.hp_updates(now);
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].pokemon_pokedexid, "dex-squirtle");
}

#[test]
fn completion_stores_the_record_as_a_json_string() {
    let (a, b) = duel();
    let outcome = simulate_battle(&a, &b, &BattleOptions::default(), 9);
    let now = Utc::now();
    let record = BattleRecord::from_outcome(&outcome, BattleType::Ranked, now, now);

    let body = CompleteBattle::new(ChallengeStatus::InProgress, &record, now).unwrap();
    assert_eq!(body.statuscode, 895_550_001);
    assert_eq!(body.statecode, 0);
    let stored: BattleRecord = serde_json::from_str(&body.pokemon_battleresultjson).unwrap();
    assert_eq!(stored, record);

    assert!(CompleteBattle::new(ChallengeStatus::Open, &record, now).is_err());
}
