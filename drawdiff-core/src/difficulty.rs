use drawdiff_common::{DifficultyConfig, DrawDiffError, Result};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_FALLBACK: f64 = 5.0;

// MN appears twice in the hand-entered source data (2.1, then 5.1); the later
// value is the one that was ever rendered, so it is the one kept here.
const BUILTIN: &[(&str, f64)] = &[
    ("IL", 9.0), ("AL", 2.0), ("AK", 1.0), ("AR", 3.0), ("CA", 9.51),
    ("CO", 0.0), ("DE", 3.1), ("DC", 1.3), ("FL", 8.9), ("GA", 3.9),
    ("HI", 4.5), ("ID", 4.0), ("IN", 4.3), ("IA", 4.1), ("KS", 1.6),
    ("KY", 7.0), ("LA", 6.5), ("MO", 5.5), ("ME", 7.44), ("MD", 10.0),
    ("MA", 6.8), ("MI", 9.7), ("MN", 5.1), ("MS", 3.8), ("MT", 1.4),
    ("NE", 1.9), ("NV", 0.5), ("NH", 3.7), ("NJ", 9.1), ("NM", 0.2),
    ("NY", 8.7), ("NC", 8.5), ("ND", 2.3), ("OH", 5.8), ("OK", 6.05),
    ("OR", 4.7), ("PA", 4.01), ("RI", 8.4), ("SC", 7.1), ("SD", 0.9),
    ("TN", 3.333333), ("TX", 8.1), ("UT", 2.8), ("VT", 2.6), ("VA", 8.2),
    ("WA", 9.2), ("WV", 7.9), ("WY", 0.0),
];

/// Region code -> drawing difficulty score, with a score for unknown codes.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyTable {
    scores: BTreeMap<String, f64>,
    fallback: f64,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DifficultyTable {
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN.iter().map(|&(code, score)| (code.to_owned(), score)))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self { scores: entries.into_iter().collect(), fallback: DEFAULT_FALLBACK }
    }

    /// Reads a JSON object such as `{"CA": 9.51, "TX": 8.1}`.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let scores: BTreeMap<String, f64> = serde_json::from_str(&content)?;
        for (code, score) in &scores {
            check_finite(code, *score)?;
        }
        Ok(Self { scores, fallback: DEFAULT_FALLBACK })
    }

    pub fn from_config(cfg: &DifficultyConfig, fallback: f64) -> Result<Self> {
        let mut table = match &cfg.table_path {
            Some(p) => Self::from_json_path(Path::new(p))?,
            None => Self::builtin(),
        };
        for (code, score) in &cfg.overrides {
            check_finite(code, *score)?;
            table.insert(code.clone(), *score);
        }
        tracing::debug!(entries = table.len(), fallback, "difficulty table ready");
        Ok(table.with_fallback(fallback))
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    pub fn lookup(&self, code: &str) -> f64 {
        self.scores.get(code).copied().unwrap_or(self.fallback)
    }

    pub fn insert(&mut self, code: impl Into<String>, score: f64) -> Option<f64> {
        self.scores.insert(code.into(), score)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.scores.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

// A non-finite score would stretch the bin domain to infinity.
fn check_finite(code: &str, score: f64) -> Result<()> {
    if score.is_finite() {
        Ok(())
    } else {
        Err(DrawDiffError::Config(format!("difficulty for {code} must be finite, got {score}")))
    }
}
