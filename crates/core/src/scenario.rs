//! Named scenario sets with JSON persistence
//!
//! A scenario set is what the CLI and dashboard layers feed to the batch
//! runner: an ordered list of labelled configurations that can be written to
//! and read back from disk.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::ScenarioConfig;

/// A labelled configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedScenario {
    pub name: String,
    pub config: ScenarioConfig,
}

/// Ordered list of named scenarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub scenarios: Vec<NamedScenario>,
}

impl ScenarioSet {
    /// The reference scenario triple of the original study
    pub fn presets() -> Self {
        ScenarioSet {
            scenarios: vec![
                NamedScenario {
                    name: "Base (regime shift ON, baseline climate)".to_string(),
                    config: ScenarioConfig::baseline(),
                },
                NamedScenario {
                    name: "Alt 1: Enforcement (lower human conversion)".to_string(),
                    config: ScenarioConfig::strong_enforcement(),
                },
                NamedScenario {
                    name: "Alt 2: Climate stress (higher fires + stronger feedback)".to_string(),
                    config: ScenarioConfig::climate_stress(),
                },
            ],
        }
    }

    /// Load a scenario set from a JSON file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioFileError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ScenarioFileError::LoadFailed(e.to_string()))?;

        let set: Self = serde_json::from_str(&contents)
            .map_err(|e| ScenarioFileError::ParseFailed(e.to_string()))?;

        Ok(set)
    }

    /// Save the scenario set to a JSON file
    ///
    /// # Errors
    /// Returns error if the file cannot be written or the set serialized
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ScenarioFileError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ScenarioFileError::SerializeFailed(e.to_string()))?;

        fs::write(path, contents).map_err(|e| ScenarioFileError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    /// The scenarios as the `(name, config)` pairs the batch runner takes
    pub fn as_batch(&self) -> Vec<(String, ScenarioConfig)> {
        self.scenarios
            .iter()
            .map(|s| (s.name.clone(), s.config.clone()))
            .collect()
    }
}

/// Scenario file persistence failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioFileError {
    /// Failed to load file
    LoadFailed(String),
    /// Failed to parse file contents
    ParseFailed(String),
    /// Failed to serialize scenario set
    SerializeFailed(String),
    /// Failed to save file
    SaveFailed(String),
}

impl std::fmt::Display for ScenarioFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioFileError::LoadFailed(msg) => write!(f, "Failed to load: {msg}"),
            ScenarioFileError::ParseFailed(msg) => write!(f, "Failed to parse: {msg}"),
            ScenarioFileError::SerializeFailed(msg) => write!(f, "Failed to serialize: {msg}"),
            ScenarioFileError::SaveFailed(msg) => write!(f, "Failed to save: {msg}"),
        }
    }
}

impl std::error::Error for ScenarioFileError {}
