pub mod config;
pub use config::{ChartConfig, Config, DifficultyConfig, DisplayConfig, ExportConfig};

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrawDiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DrawDiffError>;

/// One region's observed tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    #[serde(rename = "abbreviation", alias = "abreviation", alias = "code")]
    pub code: String,
    pub count: f64,
}

impl RegionRecord {
    pub fn new(code: impl Into<String>, count: f64) -> Self {
        Self { code: code.into(), count }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Dataset {
    pub states: Vec<RegionRecord>,
}

impl Dataset {
    pub fn new(states: Vec<RegionRecord>) -> Self {
        Self { states }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
