//! Dataverse write payloads around a battle: the `pokemon_battles` challenge
//! lifecycle and the post-battle HP write-back on `pokemon_pokedexes`.
//!
//! Nothing here talks to Dataverse. Each builder returns the PATCH/POST body
//! the caller sends.

use crate::error::SimError;
use crate::record::BattleRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Dataverse `statecode` for an active row.
pub const STATE_ACTIVE: u32 = 0;

/// `pokemon_challengetype` option set.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ChallengeType {
    #[default]
    Open,
    Training,
}

impl ChallengeType {
    pub fn code(self) -> u32 {
        match self {
            ChallengeType::Open => 1,
            ChallengeType::Training => 2,
        }
    }
}

/// `statuscode` of a `pokemon_battles` row.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ChallengeStatus {
    Open,
    InProgress,
    Completed,
}

impl ChallengeStatus {
    pub fn code(self) -> u32 {
        match self {
            ChallengeStatus::Open => 1,
            ChallengeStatus::InProgress => 895_550_002,
            ChallengeStatus::Completed => 895_550_001,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(ChallengeStatus::Open),
            895_550_002 => Some(ChallengeStatus::InProgress),
            895_550_001 => Some(ChallengeStatus::Completed),
            _ => None,
        }
    }

    /// Open -> InProgress -> Completed, one step at a time.
    pub fn advance_to(self, next: ChallengeStatus) -> Result<ChallengeStatus, SimError> {
        match (self, next) {
            (ChallengeStatus::Open, ChallengeStatus::InProgress)
            | (ChallengeStatus::InProgress, ChallengeStatus::Completed) => Ok(next),
            _ => Err(SimError::InvalidTransition {
                from: self,
                to: next,
            }),
        }
    }
}

fn contact_bind(id: &str) -> String {
    format!("/contacts({id})")
}

fn pokedex_bind(id: &str) -> String {
    format!("/pokemon_pokedexes({id})")
}

/// POST body creating an open challenge.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateChallenge {
    #[serde(rename = "pokemon_Player1@odata.bind")]
    pub player1: String,
    #[serde(rename = "pokemon_Player1Pokemon@odata.bind")]
    pub player1_pokemon: String,
    pub pokemon_challengetype: u32,
    pub statuscode: u32,
    pub statecode: u32,
    pub createdon: DateTime<Utc>,
}

impl CreateChallenge {
    pub fn new(
        player_id: &str,
        pokedex_id: &str,
        challenge_type: ChallengeType,
        now: DateTime<Utc>,
    ) -> Self {
        CreateChallenge {
            player1: contact_bind(player_id),
            player1_pokemon: pokedex_bind(pokedex_id),
            pokemon_challengetype: challenge_type.code(),
            statuscode: ChallengeStatus::Open.code(),
            statecode: STATE_ACTIVE,
            createdon: now,
        }
    }
}

/// PATCH body for the second player accepting an open challenge.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JoinChallenge {
    #[serde(rename = "pokemon_Player2@odata.bind")]
    pub player2: String,
    #[serde(rename = "pokemon_Player2Pokemon@odata.bind")]
    pub player2_pokemon: String,
    pub statuscode: u32,
}

impl JoinChallenge {
    pub fn new(current: ChallengeStatus, player_id: &str, pokedex_id: &str) -> Result<Self, SimError> {
        let status = current.advance_to(ChallengeStatus::InProgress)?;
        Ok(JoinChallenge {
            player2: contact_bind(player_id),
            player2_pokemon: pokedex_bind(pokedex_id),
            statuscode: status.code(),
        })
    }
}

/// PATCH body closing a battle and storing its record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompleteBattle {
    pub statuscode: u32,
    pub statecode: u32,
    /// The battle record, serialized to a JSON string column.
    pub pokemon_battleresultjson: String,
    pub modifiedon: DateTime<Utc>,
}

impl CompleteBattle {
    pub fn new(
        current: ChallengeStatus,
        record: &BattleRecord,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Self> {
        let status = current.advance_to(ChallengeStatus::Completed)?;
        Ok(CompleteBattle {
            statuscode: status.code(),
            statecode: STATE_ACTIVE,
            pokemon_battleresultjson: serde_json::to_string(record)?,
            modifiedon: now,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HpUpdateBody {
    pub pokemon_hp: u32,
    pub modifiedon: DateTime<Utc>,
}

/// A PATCH against one `pokemon_pokedexes` row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HpUpdate {
    pub pokemon_pokedexid: String,
    pub path: String,
    pub body: HpUpdateBody,
}

impl BattleRecord {
    /// HP write-backs for both Pokemon after the battle. Sides without a
    /// pokedex id are skipped.
    pub fn hp_updates(&self, now: DateTime<Utc>) -> Vec<HpUpdate> {
        let result = &self.final_result;
        [
            (&result.player1_pokemon_pokedexid, result.player1_final_hp),
            (&result.player2_pokemon_pokedexid, result.player2_final_hp),
        ]
        .into_iter()
        .filter(|(id, _)| !id.trim().is_empty())
        .map(|(id, hp)| HpUpdate {
            pokemon_pokedexid: id.clone(),
            path: format!("pokemon_pokedexes({id})"),
            body: HpUpdateBody {
                pokemon_hp: hp,
                modifiedon: now,
            },
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for status in [
            ChallengeStatus::Open,
            ChallengeStatus::InProgress,
            ChallengeStatus::Completed,
        ] {
            assert_eq!(ChallengeStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(ChallengeStatus::from_code(2), None);
        assert_eq!(ChallengeType::Training.code(), 2);
    }

    #[test]
    fn lifecycle_only_moves_forward() {
        assert_eq!(
            ChallengeStatus::Open.advance_to(ChallengeStatus::InProgress).unwrap(),
            ChallengeStatus::InProgress
        );
        assert!(ChallengeStatus::Open
            .advance_to(ChallengeStatus::Completed)
            .is_err());
        assert!(matches!(
            ChallengeStatus::Completed.advance_to(ChallengeStatus::InProgress),
            Err(SimError::InvalidTransition {
                from: ChallengeStatus::Completed,
                to: ChallengeStatus::InProgress,
            })
        ));
    }

    #[test]
    fn create_and_join_bodies_use_lookup_binds() {
        let now = Utc::now();
        let body = serde_json::to_value(CreateChallenge::new("c-1", "p-1", ChallengeType::Open, now))
            .unwrap();
        assert_eq!(body["pokemon_Player1@odata.bind"], "/contacts(c-1)");
        assert_eq!(body["pokemon_Player1Pokemon@odata.bind"], "/pokemon_pokedexes(p-1)");
        assert_eq!(body["pokemon_challengetype"], 1);
        assert_eq!(body["statuscode"], 1);
        assert_eq!(body["statecode"], 0);

        let join = JoinChallenge::new(ChallengeStatus::Open, "c-2", "p-2").unwrap();
        let body = serde_json::to_value(&join).unwrap();
        assert_eq!(body["pokemon_Player2@odata.bind"], "/contacts(c-2)");
        assert_eq!(body["statuscode"], 895_550_002);
        assert!(JoinChallenge::new(ChallengeStatus::InProgress, "c-2", "p-2").is_err());
    }
}
