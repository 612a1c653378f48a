//! Portal settings: key/value rows from `pokemon_portalsettings` that tune the
//! game without a redeploy.

use crate::battle::{BattleOptions, DEFAULT_MAX_TURNS};
use crate::error::SimError;
use crate::model::ODataCollection;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::warn;

pub const BATTLE_TURNS_KEY: &str = "battle_turns";

#[derive(Clone, Debug, PartialEq)]
pub enum SettingValue {
    Number(f64),
    Bool(bool),
    Json(serde_json::Value),
    Text(String),
}

impl SettingValue {
    /// Number, then boolean, then JSON, then plain text. Empty values are
    /// treated as unset.
    pub fn parse(raw: &str) -> Option<SettingValue> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(number) = trimmed.parse::<f64>() {
            if number.is_finite() {
                return Some(SettingValue::Number(number));
            }
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Some(SettingValue::Bool(true));
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Some(SettingValue::Bool(false));
        }
        match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(json) => Some(SettingValue::Json(json)),
            Err(_) => Some(SettingValue::Text(raw.to_string())),
        }
    }

    pub fn as_positive_int(&self) -> Option<u32> {
        match self {
            SettingValue::Number(n) if *n >= 1.0 => Some(n.trunc().min(u32::MAX as f64) as u32),
            _ => None,
        }
    }
}

/// Raw row as returned by the OData endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PortalSettingRow {
    #[serde(default)]
    pub pokemon_portalsettingid: Option<String>,
    pub pokemon_settingkey: String,
    #[serde(default)]
    pub pokemon_settingvalue: Option<String>,
    #[serde(default)]
    pub pokemon_settingdescription: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PortalSetting {
    pub id: Option<String>,
    pub key: String,
    pub value: Option<SettingValue>,
    pub raw: Option<String>,
    pub description: String,
}

impl From<PortalSettingRow> for PortalSetting {
    fn from(row: PortalSettingRow) -> Self {
        PortalSetting {
            id: row.pokemon_portalsettingid,
            value: row.pokemon_settingvalue.as_deref().and_then(SettingValue::parse),
            raw: row.pokemon_settingvalue,
            key: row.pokemon_settingkey,
            description: row.pokemon_settingdescription.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PortalSettings {
    settings: BTreeMap<String, PortalSetting>,
}

impl PortalSettings {
    pub fn from_rows(rows: impl IntoIterator<Item = PortalSettingRow>) -> Self {
        let settings = rows
            .into_iter()
            .map(PortalSetting::from)
            .map(|setting| (setting.key.clone(), setting))
            .collect();
        PortalSettings { settings }
    }

    /// Parses an OData response body (`{ "value": [ rows ] }`).
    pub fn from_odata_json(body: &str) -> serde_json::Result<Self> {
        let collection: ODataCollection<PortalSettingRow> = serde_json::from_str(body)?;
        Ok(Self::from_rows(collection.value))
    }

    pub fn get(&self, key: &str) -> Option<&PortalSetting> {
        self.settings.get(key)
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Strict lookup of a positive integer setting.
    pub fn positive_int(&self, key: &str) -> Result<Option<u32>, SimError> {
        let Some(setting) = self.get(key) else {
            return Ok(None);
        };
        match setting.value.as_ref() {
            None => Ok(None),
            Some(value) => value.as_positive_int().map(Some).ok_or_else(|| {
                SimError::InvalidSetting {
                    key: key.to_string(),
                    value: setting.raw.clone().unwrap_or_default(),
                }
            }),
        }
    }

    /// Maximum turns per battle; missing or invalid values fall back to 20.
    pub fn battle_turns(&self) -> u32 {
        match self.positive_int(BATTLE_TURNS_KEY) {
            Ok(Some(turns)) => turns,
            Ok(None) => {
                warn!("portal setting {BATTLE_TURNS_KEY} not found, using default {DEFAULT_MAX_TURNS}");
                DEFAULT_MAX_TURNS
            }
            Err(err) => {
                warn!("{err}, using default {DEFAULT_MAX_TURNS}");
                DEFAULT_MAX_TURNS
            }
        }
    }
}

impl BattleOptions {
    pub fn from_settings(settings: &PortalSettings) -> Self {
        BattleOptions {
            max_turns: settings.battle_turns(),
        }
    }
}
