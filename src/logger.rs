use crate::battle::{ActionRecord, BattleOutcome, Decision, Side, TurnRecord};

/// Collects the human-readable battle log stored with every battle record.
#[derive(Clone, Debug, Default)]
pub struct BattleLogger {
    log: Vec<String>,
}

impl BattleLogger {
    pub fn new() -> Self {
        Self { log: Vec::new() }
    }

    pub fn log_line(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    pub fn log_turn(&mut self, turn: u32) {
        self.log.push(format!("--- Turn {turn} ---"));
    }

    pub fn into_lines(self) -> Vec<String> {
        self.log
    }
}

/// `Ash's Pikachu`
pub fn ident(outcome: &BattleOutcome, side: Side) -> String {
    let combatant = outcome.combatant(side);
    format!("{}'s {}", combatant.player.name, combatant.pokemon.name)
}

pub fn describe_action(outcome: &BattleOutcome, action: &ActionRecord) -> String {
    let who = ident(outcome, action.actor);
    let Some(move_name) = action.move_name.as_deref() else {
        return format!("{who} fainted before it could move!");
    };
    let crit = if action.critical { " (Critical Hit!)" } else { "" };
    format!(
        "{who} used {move_name}{crit}{} and dealt {} damage!",
        action.effectiveness.remark(),
        action.damage
    )
}

pub fn turn_summary(outcome: &BattleOutcome, turn: &TurnRecord) -> String {
    let p1 = &outcome.player1.player.name;
    let p2 = &outcome.player2.player.name;
    match (turn.player1_hp, turn.player2_hp) {
        (0, _) => format!("{p1}'s Pokemon fainted!"),
        (_, 0) => format!("{p2}'s Pokemon fainted!"),
        (hp1, hp2) => {
            format!("Both Pokemon are still fighting! {p1}: {hp1} HP, {p2}: {hp2} HP")
        }
    }
}

fn opening_line(outcome: &BattleOutcome) -> String {
    let p1 = &outcome.player1.pokemon;
    let p2 = &outcome.player2.pokemon;
    format!(
        "Battle begins between {} ({}/{} HP) and {} ({}/{} HP)!",
        ident(outcome, Side::Player1),
        p1.hp,
        p1.max_hp,
        ident(outcome, Side::Player2),
        p2.hp,
        p2.max_hp
    )
}

fn closing_lines(outcome: &BattleOutcome) -> Vec<String> {
    let winner = &outcome.combatant(outcome.winner).player.name;
    let loser_side = outcome.loser();
    match outcome.decision {
        Decision::Knockout => vec![format!(
            "{} wins the battle!",
            ident(outcome, outcome.winner)
        )],
        Decision::Default => vec![
            format!("{} is already fainted!", ident(outcome, loser_side)),
            format!("{winner} wins by default!"),
        ],
        Decision::CoinFlip => vec![
            "Both Pokemon are already fainted! Battle cannot proceed.".to_string(),
            format!("{winner} wins by default!"),
        ],
        Decision::RemainingHp => vec![
            "Battle reached turn limit!".to_string(),
            format!(
                "{winner} wins by having more HP remaining ({} vs {})!",
                outcome.final_hp(outcome.winner),
                outcome.final_hp(loser_side)
            ),
        ],
        Decision::TotalDamage => vec![
            "Battle reached turn limit!".to_string(),
            format!(
                "Equal HP! {winner} wins by dealing more damage ({} vs {})!",
                outcome.total_damage(outcome.winner),
                outcome.total_damage(loser_side)
            ),
        ],
        Decision::Level => vec![
            "Battle reached turn limit!".to_string(),
            format!("Perfect tie! {winner} wins with the higher or equal level Pokemon!"),
        ],
    }
}

/// Full narration of a finished battle.
pub fn narrate(outcome: &BattleOutcome) -> Vec<String> {
    let mut logger = BattleLogger::new();
    logger.log_line(opening_line(outcome));
    for turn in &outcome.turns {
        logger.log_turn(turn.turn_number);
        for action in turn.ordered_actions() {
            logger.log_line(describe_action(outcome, action));
        }
        logger.log_line(turn_summary(outcome, turn));
    }
    for line in closing_lines(outcome) {
        logger.log_line(line);
    }
    logger.into_lines()
}
