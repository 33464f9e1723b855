//! Suppression aggressiveness levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How strongly the suppressor attenuates detected noise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuppressionLevel {
    Low,
    #[default]
    Moderate,
    High,
    VeryHigh,
}

impl SuppressionLevel {
    /// All levels, mildest first.
    pub const ALL: [SuppressionLevel; 4] = [
        SuppressionLevel::Low,
        SuppressionLevel::Moderate,
        SuppressionLevel::High,
        SuppressionLevel::VeryHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SuppressionLevel::Low => "low",
            SuppressionLevel::Moderate => "moderate",
            SuppressionLevel::High => "high",
            SuppressionLevel::VeryHigh => "very-high",
        }
    }
}

impl fmt::Display for SuppressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuppressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" | "0" => Ok(SuppressionLevel::Low),
            "moderate" | "1" => Ok(SuppressionLevel::Moderate),
            "high" | "2" => Ok(SuppressionLevel::High),
            "very-high" | "veryhigh" | "very_high" | "3" => Ok(SuppressionLevel::VeryHigh),
            other => Err(format!(
                "Unknown suppression level: {other}. Use: low, moderate, high, very-high"
            )),
        }
    }
}
