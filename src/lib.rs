//! Battle rules engine for the Pokemon collection game.
//!
//! The entry points are [`battle::simulate_battle`] for prepared snapshots and
//! [`battle::simulate_challenge`] for raw pokedex rows. Both are pure given a
//! seed; [`record::BattleRecord`] turns the outcome into the stored JSON.

pub mod balance;
pub mod battle;
pub mod challenge;
pub mod damage;
pub mod error;
pub mod experience;
pub mod logger;
pub mod model;
pub mod moves;
pub mod prepare;
pub mod record;
pub mod settings;
pub mod types;
pub mod wild;

pub use crate::error::SimError;

use crate::model::{ODataCollection, PokedexRecord};
use crate::record::BattleRecord;
use crate::settings::PortalSettings;
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))
}

/// Reads pokedex rows from either a single row object or an OData
/// `{ "value": [...] }` collection.
pub fn load_pokedex(path: &Path) -> anyhow::Result<Vec<PokedexRecord>> {
    let value: serde_json::Value = read_json(path)?;
    let records = if value.get("value").is_some_and(serde_json::Value::is_array) {
        serde_json::from_value::<ODataCollection<PokedexRecord>>(value)
            .with_context(|| format!("Invalid pokedex collection in {}", path.display()))?
            .value
    } else if value.is_array() {
        serde_json::from_value::<Vec<PokedexRecord>>(value)
            .with_context(|| format!("Invalid pokedex list in {}", path.display()))?
    } else {
        vec![serde_json::from_value::<PokedexRecord>(value)
            .with_context(|| format!("Invalid pokedex row in {}", path.display()))?]
    };
    if records.is_empty() {
        return Err(SimError::EmptyPokedex).with_context(|| path.display().to_string());
    }
    Ok(records)
}

pub fn load_settings(path: &Path) -> anyhow::Result<PortalSettings> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file at {}", path.display()))?;
    PortalSettings::from_odata_json(&raw)
        .with_context(|| format!("Failed to parse portal settings from {}", path.display()))
}

pub fn load_record(path: &Path) -> anyhow::Result<BattleRecord> {
    read_json(path)
}

pub fn save_record(record: &BattleRecord, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write battle record to {}", path.display()))
}
