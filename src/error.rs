use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("roster needs at least {needed} Pokemon, got {got}")]
    RosterTooSmall { needed: usize, got: usize },

    #[error("sims per cell must be > 0")]
    NoSimulations,

    #[error("invalid value {value:?} for portal setting {key}")]
    InvalidSetting { key: String, value: String },

    #[error("pokedex file contains no records")]
    EmptyPokedex,

    #[error("challenge cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        from: crate::challenge::ChallengeStatus,
        to: crate::challenge::ChallengeStatus,
    },
}
