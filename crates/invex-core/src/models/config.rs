//! Configuration for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::extract::patterns::PatternTables;

/// Main configuration for the invex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Classifier score thresholds.
    pub classifier: ClassifierThresholds,

    /// Pattern library source tables. Defaults to the built-in tables;
    /// compiled once at pipeline construction.
    pub patterns: PatternTables,
}

/// Invoice classifier decision thresholds.
///
/// Fixed heuristic constants; kept as configuration surface for tuning,
/// but the defaults preserve behavioural compatibility.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    /// Minimum score for an Invoice with partial data.
    pub partial_score: u32,

    /// Minimum score for an Invoice with complete data.
    pub complete_score: u32,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            partial_score: 2,
            complete_score: 4,
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
