use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use pokemon_arena_sim::balance::{compute_matrix, roster_combatants, write_csv};
use pokemon_arena_sim::battle::{simulate_challenge, BattleOptions};
use pokemon_arena_sim::challenge::{ChallengeStatus, CompleteBattle};
use pokemon_arena_sim::model::{Combatant, Player, PokedexRecord};
use pokemon_arena_sim::prepare::prepare_battle_pokemon;
use pokemon_arena_sim::record::{BattleRecord, BattleType};
use pokemon_arena_sim::settings::PortalSettings;
use pokemon_arena_sim::wild::simulate_training_battle;
use pokemon_arena_sim::{load_pokedex, load_record, load_settings, save_record};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pokemon-arena-sim", version, about = "Pokemon battle simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct TurnArgs {
    /// Portal settings export (`{ "value": [...] }`).
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Overrides the `battle_turns` portal setting.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_turns: Option<u32>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl TurnArgs {
    fn battle_options(&self) -> anyhow::Result<BattleOptions> {
        if let Some(max_turns) = self.max_turns {
            return Ok(BattleOptions { max_turns });
        }
        let settings = match &self.settings {
            Some(path) => load_settings(path)?,
            None => PortalSettings::default(),
        };
        Ok(BattleOptions::from_settings(&settings))
    }
}

#[derive(Subcommand)]
enum Command {
    /// Battle two pokedex entries and write the battle record.
    Simulate {
        #[arg(long, default_value = "player1")]
        player1_id: String,
        #[arg(long)]
        player1_name: String,
        #[arg(long)]
        pokemon1: PathBuf,
        #[arg(long, default_value = "player2")]
        player2_id: String,
        #[arg(long)]
        player2_name: String,
        #[arg(long)]
        pokemon2: PathBuf,
        #[arg(long, value_enum, default_value_t = BattleType::Casual)]
        battle_type: BattleType,
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write the `pokemon_pokedexes` HP PATCH bodies here.
        #[arg(long)]
        hp_updates: Option<PathBuf>,
        /// Write the `pokemon_battles` completion PATCH body here.
        #[arg(long)]
        completion: Option<PathBuf>,
        #[command(flatten)]
        turns: TurnArgs,
    },
    /// Fight a random wild Pokemon and report experience.
    Train {
        #[arg(long)]
        pokemon: PathBuf,
        #[arg(long, default_value = "Trainer")]
        trainer: String,
        /// Experience already banked before this battle.
        #[arg(long, default_value_t = 0)]
        experience: u32,
        #[command(flatten)]
        turns: TurnArgs,
    },
    /// Print the log of a stored battle record.
    Replay { record: PathBuf },
    /// Win-rate matrix for every pair in a roster.
    Matrix {
        #[arg(long)]
        roster: PathBuf,
        #[arg(long, default_value_t = 100)]
        sims_per_cell: usize,
        #[arg(long, default_value = "matrix.csv")]
        output: PathBuf,
        #[command(flatten)]
        turns: TurnArgs,
    },
}

fn first_record(path: &Path) -> anyhow::Result<PokedexRecord> {
    load_pokedex(path)?
        .into_iter()
        .next()
        .with_context(|| format!("No pokedex rows in {}", path.display()))
}

/// Prepares the trainee and draws the training battle seed from the same
/// stream, so the wild opponent does not mirror the stat spread.
fn prepare_trainee(record: &PokedexRecord, trainer: &str, seed: u64) -> (Combatant, u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let trainee = Combatant {
        player: Player {
            id: "trainer".to_string(),
            name: trainer.to_string(),
        },
        pokemon: prepare_battle_pokemon(record, Some(trainer), &mut rng),
    };
    (trainee, rng.gen())
}

fn write_json<T: serde::Serialize>(value: &T, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Simulate {
            player1_id,
            player1_name,
            pokemon1,
            player2_id,
            player2_name,
            pokemon2,
            battle_type,
            output,
            hp_updates,
            completion,
            turns,
        } => {
            let options = turns.battle_options()?;
            let player1 = Player {
                id: player1_id,
                name: player1_name,
            };
            let player2 = Player {
                id: player2_id,
                name: player2_name,
            };
            let record1 = first_record(&pokemon1)?;
            let record2 = first_record(&pokemon2)?;

            let started_at = Utc::now();
            let outcome =
                simulate_challenge(&player1, &record1, &player2, &record2, &options, turns.seed);
            let completed_at = Utc::now();
            let record = BattleRecord::from_outcome(&outcome, battle_type, started_at, completed_at);
            info!(
                battle_id = %record.metadata.battle_id,
                winner = %record.final_result.winner_name,
                turns = outcome.turns_played(),
                "battle simulated"
            );
            if let Some(path) = hp_updates {
                write_json(&record.hp_updates(completed_at), &path)?;
            }
            if let Some(path) = completion {
                // The challenge was joined before the battle ran.
                let body = CompleteBattle::new(ChallengeStatus::InProgress, &record, completed_at)?;
                write_json(&body, &path)?;
            }
            match output {
                Some(path) => save_record(&record, &path)?,
                None => println!("{}", serde_json::to_string_pretty(&record)?),
            }
        }
        Command::Train {
            pokemon,
            trainer,
            experience,
            turns,
        } => {
            let options = turns.battle_options()?;
            let record = first_record(&pokemon)?;
            let (trainee, battle_seed) = prepare_trainee(&record, &trainer, turns.seed);
            let result = simulate_training_battle(&trainee, experience, &options, battle_seed);
            println!(
                "{} (Lv {}) vs {} (Lv {}): {:?}",
                trainee.pokemon.name,
                trainee.pokemon.level,
                result.opponent.name,
                result.opponent.level,
                result.winner
            );
            println!("Gained {} experience.", result.experience);
            if result.level.level_up {
                println!("{} grew to level {}!", trainee.pokemon.name, result.level.new_level);
            }
        }
        Command::Replay { record } => {
            let record = load_record(&record)?;
            for line in &record.battle_log {
                println!("{line}");
            }
        }
        Command::Matrix {
            roster,
            sims_per_cell,
            output,
            turns,
        } => {
            let options = turns.battle_options()?;
            let records = load_pokedex(&roster)?;
            let combatants = roster_combatants(&records, turns.seed);
            let matrix = compute_matrix(&combatants, sims_per_cell, turns.seed, &options)?;
            write_csv(&combatants, &matrix, &output)?;
            println!(
                "Wrote {}x{} matrix to {}",
                matrix.len(),
                matrix.first().map(|r| r.len()).unwrap_or(0),
                output.display()
            );
        }
    }
    Ok(())
}
