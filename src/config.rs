use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::schemas::Participant;

pub const DEFAULT_STORAGE_KEY: &str = "roommate-expenses";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

fn default_participants() -> Vec<Participant> {
    vec![
        "Althaf".to_string(),
        "Jamzith".to_string(),
        "Rasheed".to_string(),
    ]
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_participants")]
    pub participants: Vec<Participant>,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            participants: default_participants(),
            storage_key: default_storage_key(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.participants.is_empty() {
            return Err(ConfigError::NoParticipants);
        }
        let mut seen = HashSet::new();
        for name in &self.participants {
            if name.trim().is_empty() {
                return Err(ConfigError::BlankParticipant);
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateParticipant(name.clone()));
            }
        }
        Ok(())
    }
}
