use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    "dark".into()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { theme: default_theme() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_bins")]
    pub bins: usize,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_disclaimer")]
    pub disclaimer: String,
    #[serde(default = "default_count_label")]
    pub count_label: String,
    #[serde(default = "default_fallback")]
    pub fallback_difficulty: f64, // score for codes missing from the table
}

fn default_bins() -> usize {
    10
}
fn default_title() -> String {
    "Distribution of Gun Deaths by Drawing Difficulty".into()
}
fn default_disclaimer() -> String {
    "I'm just asking questions".into()
}
fn default_count_label() -> String {
    "Gun Deaths".into()
}
fn default_fallback() -> f64 {
    5.0
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            bins: default_bins(),
            title: default_title(),
            disclaimer: default_disclaimer(),
            count_label: default_count_label(),
            fallback_difficulty: default_fallback(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DifficultyConfig {
    /// JSON object of code -> score replacing the built-in table.
    #[serde(default)]
    pub table_path: Option<String>,
    /// Applied on top of whichever table is in use.
    #[serde(default)]
    pub overrides: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_format() -> String {
    "svg".into()
}
fn default_output_dir() -> String {
    ".".into()
}
fn default_width() -> u32 {
    960
}
fn default_height() -> u32 {
    540
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            output_dir: default_output_dir(),
            width: default_width(),
            height: default_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub difficulty: DifficultyConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("drawdiff")
            .join("config.toml")
    }

    pub fn load() -> crate::Result<Self> {
        let path = if let Ok(env_path) = std::env::var("DRAWDIFF_CONFIG") {
            PathBuf::from(env_path) // $DRAWDIFF_CONFIG overrides default config path
        } else {
            Self::config_path()
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let cfg: Self = toml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.chart.bins == 0 {
            return Err(crate::DrawDiffError::Config("chart.bins must be at least 1".into()));
        }
        if self.export.width == 0 || self.export.height == 0 {
            return Err(crate::DrawDiffError::Config(format!(
                "export size must be positive, got {}x{}",
                self.export.width, self.export.height
            )));
        }
        if !self.chart.fallback_difficulty.is_finite() {
            return Err(crate::DrawDiffError::Config("chart.fallback_difficulty must be finite".into()));
        }
        if let Some((code, score)) = self.difficulty.overrides.iter().find(|(_, s)| !s.is_finite()) {
            return Err(crate::DrawDiffError::Config(format!(
                "difficulty.overrides.{code} must be finite, got {score}"
            )));
        }
        Ok(())
    }

    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::DrawDiffError::Other(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
