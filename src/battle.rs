use crate::damage::roll_attack;
use crate::model::{BattlePokemon, Combatant, Player, PokedexRecord};
use crate::moves::moves_for_types;
use crate::prepare::prepare_battle_pokemon;
use crate::types::Effectiveness;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_MAX_TURNS: u32 = 20;
/// Upper bound of the random bonus added to speed when ordering a turn.
pub const SPEED_JITTER: f64 = 10.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::Player1 => 0,
            Side::Player2 => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictoryCondition {
    AllPokemonFainted,
    Timeout,
}

/// The rule that picked the winner.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Decision {
    Knockout,
    /// The loser entered the battle already fainted.
    Default,
    /// Both entered fainted.
    CoinFlip,
    RemainingHp,
    TotalDamage,
    Level,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActionRecord {
    pub actor: Side,
    /// `None` when the actor fainted before it could move.
    pub move_name: Option<String>,
    pub move_type: Option<String>,
    /// HP actually removed from the defender.
    pub damage: u32,
    pub multiplier: f32,
    pub effectiveness: Effectiveness,
    pub critical: bool,
}

impl ActionRecord {
    fn skipped(actor: Side) -> Self {
        ActionRecord {
            actor,
            move_name: None,
            move_type: None,
            damage: 0,
            multiplier: 1.0,
            effectiveness: Effectiveness::Normal,
            critical: false,
        }
    }

    pub fn executed(&self) -> bool {
        self.move_name.is_some()
    }

    pub fn landed(&self) -> bool {
        self.executed() && self.multiplier > 0.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TurnRecord {
    pub turn_number: u32,
    pub first: Side,
    pub player1_action: ActionRecord,
    pub player2_action: ActionRecord,
    pub player1_hp: u32,
    pub player2_hp: u32,
}

impl TurnRecord {
    pub fn action(&self, side: Side) -> &ActionRecord {
        match side {
            Side::Player1 => &self.player1_action,
            Side::Player2 => &self.player2_action,
        }
    }

    pub fn hp(&self, side: Side) -> u32 {
        match side {
            Side::Player1 => self.player1_hp,
            Side::Player2 => self.player2_hp,
        }
    }

    /// Actions in the order they happened.
    pub fn ordered_actions(&self) -> [&ActionRecord; 2] {
        [self.action(self.first), self.action(self.first.opponent())]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleOptions {
    pub max_turns: u32,
}

impl Default for BattleOptions {
    fn default() -> Self {
        BattleOptions {
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BattleOutcome {
    pub seed: u64,
    /// Combatants as they entered the battle (starting HP, filled movesets).
    pub player1: Combatant,
    pub player2: Combatant,
    pub turns: Vec<TurnRecord>,
    pub player1_final_hp: u32,
    pub player2_final_hp: u32,
    pub winner: Side,
    pub victory: VictoryCondition,
    pub decision: Decision,
    pub experience_reward: u32,
}

impl BattleOutcome {
    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player1 => &self.player1,
            Side::Player2 => &self.player2,
        }
    }

    pub fn final_hp(&self, side: Side) -> u32 {
        match side {
            Side::Player1 => self.player1_final_hp,
            Side::Player2 => self.player2_final_hp,
        }
    }

    pub fn total_damage(&self, side: Side) -> u32 {
        total_damage(&self.turns, side)
    }

    pub fn loser(&self) -> Side {
        self.winner.opponent()
    }

    pub fn turns_played(&self) -> u32 {
        self.turns.len() as u32
    }
}

fn total_damage(turns: &[TurnRecord], side: Side) -> u32 {
    turns.iter().map(|turn| turn.action(side).damage).sum()
}

pub struct Battle {
    combatants: [Combatant; 2],
    starting: [Combatant; 2],
    turns: Vec<TurnRecord>,
    options: BattleOptions,
    seed: u64,
    rng: SmallRng,
}

impl Battle {
    pub fn new(player1: &Combatant, player2: &Combatant, options: &BattleOptions, seed: u64) -> Self {
        Self::with_rng(player1, player2, options, seed, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(
        player1: &Combatant,
        player2: &Combatant,
        options: &BattleOptions,
        seed: u64,
        rng: SmallRng,
    ) -> Self {
        let combatants = [ready(player1), ready(player2)];
        Battle {
            starting: combatants.clone(),
            combatants,
            turns: Vec::new(),
            options: options.clone(),
            seed,
            rng,
        }
    }

    fn pokemon(&self, side: Side) -> &BattlePokemon {
        &self.combatants[side.index()].pokemon
    }

    fn jittered_speed(&mut self, side: Side) -> f64 {
        let speed = self.pokemon(side).speed as f64;
        speed + self.rng.gen_range(0.0..SPEED_JITTER)
    }

    fn attack(&mut self, side: Side) -> ActionRecord {
        let attacker = &self.combatants[side.index()].pokemon;
        let move_idx = self.rng.gen_range(0..attacker.moves.len());
        let move_def = attacker.moves[move_idx].clone();
        let defender = &self.combatants[side.opponent().index()].pokemon;
        let roll = roll_attack(attacker, defender, &move_def, &mut self.rng);

        let defender = &mut self.combatants[side.opponent().index()].pokemon;
        let applied = roll.damage.min(defender.hp);
        defender.hp -= applied;

        ActionRecord {
            actor: side,
            move_name: Some(move_def.name),
            move_type: Some(move_def.move_type),
            damage: applied,
            multiplier: roll.multiplier,
            effectiveness: roll.effectiveness,
            critical: roll.critical,
        }
    }

    fn run_turn(&mut self, turn_number: u32) -> TurnRecord {
        let speed1 = self.jittered_speed(Side::Player1);
        let speed2 = self.jittered_speed(Side::Player2);
        let first = if speed1 >= speed2 {
            Side::Player1
        } else {
            Side::Player2
        };

        let lead = self.attack(first);
        let reply = if self.pokemon(first.opponent()).is_fainted() {
            ActionRecord::skipped(first.opponent())
        } else {
            self.attack(first.opponent())
        };
        let (player1_action, player2_action) = match first {
            Side::Player1 => (lead, reply),
            Side::Player2 => (reply, lead),
        };

        let turn = TurnRecord {
            turn_number,
            first,
            player1_action,
            player2_action,
            player1_hp: self.pokemon(Side::Player1).hp,
            player2_hp: self.pokemon(Side::Player2).hp,
        };
        debug!(
            turn = turn_number,
            first = ?first,
            p1_hp = turn.player1_hp,
            p2_hp = turn.player2_hp,
            "turn resolved"
        );
        turn
    }

    /// Winner when someone entered the battle unable to fight.
    fn pre_battle_result(&mut self) -> Option<(Side, Decision)> {
        let p1_down = self.pokemon(Side::Player1).is_fainted();
        let p2_down = self.pokemon(Side::Player2).is_fainted();
        match (p1_down, p2_down) {
            (true, true) => {
                let winner = if self.rng.gen_bool(0.5) {
                    Side::Player1
                } else {
                    Side::Player2
                };
                Some((winner, Decision::CoinFlip))
            }
            (true, false) => Some((Side::Player2, Decision::Default)),
            (false, true) => Some((Side::Player1, Decision::Default)),
            (false, false) => None,
        }
    }

    fn knockout_result(&self) -> Option<Side> {
        if self.pokemon(Side::Player1).is_fainted() {
            Some(Side::Player2)
        } else if self.pokemon(Side::Player2).is_fainted() {
            Some(Side::Player1)
        } else {
            None
        }
    }

    fn timeout_result(&self) -> (Side, Decision) {
        let hp1 = self.pokemon(Side::Player1).hp;
        let hp2 = self.pokemon(Side::Player2).hp;
        if hp1 != hp2 {
            let winner = if hp1 > hp2 { Side::Player1 } else { Side::Player2 };
            return (winner, Decision::RemainingHp);
        }
        let dmg1 = total_damage(&self.turns, Side::Player1);
        let dmg2 = total_damage(&self.turns, Side::Player2);
        if dmg1 != dmg2 {
            let winner = if dmg1 > dmg2 { Side::Player1 } else { Side::Player2 };
            return (winner, Decision::TotalDamage);
        }
        let winner = if self.pokemon(Side::Player1).level >= self.pokemon(Side::Player2).level {
            Side::Player1
        } else {
            Side::Player2
        };
        (winner, Decision::Level)
    }

    pub fn run(mut self) -> BattleOutcome {
        let (winner, victory, decision) = match self.pre_battle_result() {
            Some((winner, decision)) => (winner, VictoryCondition::AllPokemonFainted, decision),
            None => {
                let mut knockout = None;
                for turn_number in 1..=self.options.max_turns {
                    let turn = self.run_turn(turn_number);
                    self.turns.push(turn);
                    knockout = self.knockout_result();
                    if knockout.is_some() {
                        break;
                    }
                }
                match knockout {
                    Some(winner) => (winner, VictoryCondition::AllPokemonFainted, Decision::Knockout),
                    None => {
                        let (winner, decision) = self.timeout_result();
                        (winner, VictoryCondition::Timeout, decision)
                    }
                }
            }
        };
        let experience_reward = self.rng.gen_range(50..150);

        debug!(
            seed = self.seed,
            turns = self.turns.len(),
            winner = ?winner,
            decision = ?decision,
            "battle finished"
        );

        let [player1, player2] = self.starting;
        BattleOutcome {
            seed: self.seed,
            player1,
            player2,
            player1_final_hp: self.combatants[0].pokemon.hp,
            player2_final_hp: self.combatants[1].pokemon.hp,
            turns: self.turns,
            winner,
            victory,
            decision,
            experience_reward,
        }
    }
}

/// Copies a combatant into the battle, giving it a moveset if it has none.
fn ready(combatant: &Combatant) -> Combatant {
    let mut combatant = combatant.clone();
    if combatant.pokemon.moves.is_empty() {
        combatant.pokemon.moves = moves_for_types(&combatant.pokemon.types);
    }
    if combatant.pokemon.trainer.is_none() {
        combatant.pokemon.trainer = Some(combatant.player.name.clone());
    }
    combatant
}

pub fn simulate_battle(
    player1: &Combatant,
    player2: &Combatant,
    options: &BattleOptions,
    seed: u64,
) -> BattleOutcome {
    Battle::new(player1, player2, options, seed).run()
}

/// Prepares both pokedex rows and runs the battle from a single seeded stream,
/// so the stat spread of the preparation is reproducible too.
pub fn simulate_challenge(
    player1: &Player,
    record1: &PokedexRecord,
    player2: &Player,
    record2: &PokedexRecord,
    options: &BattleOptions,
    seed: u64,
) -> BattleOutcome {
    let mut rng = SmallRng::seed_from_u64(seed);
    let combatant1 = Combatant {
        player: player1.clone(),
        pokemon: prepare_battle_pokemon(record1, Some(&player1.name), &mut rng),
    };
    let combatant2 = Combatant {
        player: player2.clone(),
        pokemon: prepare_battle_pokemon(record2, Some(&player2.name), &mut rng),
    };
    Battle::with_rng(&combatant1, &combatant2, options, seed, rng).run()
}
