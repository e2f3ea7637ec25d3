//! Numeric policy for a run.
//!
//! Loaded from an optional JSON document; every field has a default so an
//! empty object (`{}`) is a valid rules file.

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// Default weight above which an unmarked container is Heavy.
pub const DEFAULT_HEAVY_THRESHOLD: f64 = 3000.0;

/// How the per-category capacity limits are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityMode {
    /// Heavy limit covers Heavy, Refrigerated and Liquid; each specialised
    /// limit counts its own category.
    #[default]
    Standard,
    /// Compatibility counting: the heavy limit counts exact Heavy
    /// containers only, and the refrigerated limit is compared against the
    /// liquid count.
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub heavy_weight_threshold: f64,
    pub capacity_mode: CapacityMode,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            heavy_weight_threshold: DEFAULT_HEAVY_THRESHOLD,
            capacity_mode: CapacityMode::Standard,
        }
    }
}

impl Rules {
    /// Parse and validate a JSON rules document.
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        let rules: Rules = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        let t = self.heavy_weight_threshold;
        if !t.is_finite() || t < 0.0 {
            return Err(RulesError::InvalidThreshold(t));
        }
        Ok(())
    }
}
