//! Round-robin win rates across a roster, for tuning movesets and stats.

use crate::battle::{simulate_battle, BattleOptions, Side};
use crate::error::SimError;
use crate::model::{Combatant, Player, PokedexRecord};
use crate::prepare::prepare_battle_pokemon;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::info;

/// Builds one combatant per roster row. The stat spread is drawn once here so
/// every cell of the matrix fights the same Pokemon.
pub fn roster_combatants(records: &[PokedexRecord], seed: u64) -> Vec<Combatant> {
    let mut rng = SmallRng::seed_from_u64(seed);
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let player = Player {
                id: format!("roster-{idx}"),
                name: format!("Slot {}", idx + 1),
            };
            let pokemon = prepare_battle_pokemon(record, Some(&player.name), &mut rng);
            Combatant { player, pokemon }
        })
        .collect()
}

/// `matrix[i][j]` is the rate at which roster entry `i`, fighting as player 1,
/// beats entry `j`.
pub fn compute_matrix(
    roster: &[Combatant],
    sims_per_cell: usize,
    seed: u64,
    options: &BattleOptions,
) -> Result<Vec<Vec<f64>>, SimError> {
    if roster.len() < 2 {
        return Err(SimError::RosterTooSmall {
            needed: 2,
            got: roster.len(),
        });
    }
    if sims_per_cell == 0 {
        return Err(SimError::NoSimulations);
    }
    let tasks: Vec<(usize, usize)> = (0..roster.len())
        .flat_map(|a| (0..roster.len()).map(move |b| (a, b)))
        .collect();
    let cell_results: Vec<CellResult> = tasks
        .par_iter()
        .map(|&(a_idx, b_idx)| {
            let mut cell_rng =
                SmallRng::seed_from_u64(seed ^ ((a_idx as u64) << 32) ^ (b_idx as u64));
            let mut wins = 0u64;
            for _ in 0..sims_per_cell {
                let battle_seed = cell_rng.gen();
                let outcome = simulate_battle(&roster[a_idx], &roster[b_idx], options, battle_seed);
                if outcome.winner == Side::Player1 {
                    wins += 1;
                }
            }
            CellResult {
                a_idx,
                b_idx,
                win_rate: wins as f64 / sims_per_cell as f64,
            }
        })
        .collect();

    let mut matrix = vec![vec![0.0; roster.len()]; roster.len()];
    for cell in cell_results {
        matrix[cell.a_idx][cell.b_idx] = cell.win_rate;
    }
    info!(
        size = roster.len(),
        sims_per_cell,
        "balance matrix computed"
    );
    Ok(matrix)
}

/// CSV with a header row and a leading name column.
pub fn to_csv(roster: &[Combatant], matrix: &[Vec<f64>]) -> String {
    let mut out = String::from("pokemon");
    for combatant in roster {
        out.push(',');
        out.push_str(&combatant.pokemon.name);
    }
    for (combatant, row) in roster.iter().zip(matrix) {
        out.push('\n');
        out.push_str(&combatant.pokemon.name);
        for value in row {
            out.push_str(&format!(",{value:.4}"));
        }
    }
    out
}

pub fn write_csv(
    roster: &[Combatant],
    matrix: &[Vec<f64>],
    path: &std::path::Path,
) -> anyhow::Result<()> {
    std::fs::write(path, to_csv(roster, matrix))?;
    Ok(())
}

struct CellResult {
    a_idx: usize,
    b_idx: usize,
    win_rate: f64,
}
