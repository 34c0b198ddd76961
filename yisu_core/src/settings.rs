//! Tunables shared by the scorer, the estimator and the config file.

use serde::{Deserialize, Serialize};

/// Configuration for query scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Clinical factors recognised in queries, scanned in this order.
    #[serde(default = "default_factor_library")]
    pub factor_library: Vec<String>,

    #[serde(default)]
    pub weights: ScoringWeights,

    #[serde(default)]
    pub staging: StagingMarker,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            factor_library: default_factor_library(),
            weights: ScoringWeights::default(),
            staging: StagingMarker::default(),
        }
    }
}

/// Default clinical factor library: drugs, diagnoses, staging and biomarkers.
#[must_use]
pub fn default_factor_library() -> Vec<String> {
    [
        "华法林",
        "房颤",
        "消化道出血",
        "黑便",
        "肺癌",
        "EGFR",
        "T4",
        "结肠",
        "淋巴结",
        "N",
        "低分化",
        "胃癌",
        "新辅助",
        "dMMR",
        "免疫",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Additive weights of the substring scoring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Points per distinct factor found in a record's text.
    #[serde(default = "default_factor_weight")]
    pub factor: u32,

    /// Bonus when the staging token was queried and the text has a qualified stage.
    #[serde(default = "default_staging_bonus")]
    pub staging_bonus: u32,

    /// Points per query number found inside the record's age.
    #[serde(default = "default_age_bonus")]
    pub age_bonus: u32,
}

const fn default_factor_weight() -> u32 {
    3
}
const fn default_staging_bonus() -> u32 {
    2
}
const fn default_age_bonus() -> u32 {
    1
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            factor: default_factor_weight(),
            staging_bonus: default_staging_bonus(),
            age_bonus: default_age_bonus(),
        }
    }
}

/// A generic staging token and the qualified forms that earn the staging bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingMarker {
    #[serde(default = "StagingMarker::default_token")]
    pub token: String,
    #[serde(default = "StagingMarker::default_qualified")]
    pub qualified: Vec<String>,
}

impl StagingMarker {
    fn default_token() -> String {
        "N".to_string()
    }

    fn default_qualified() -> Vec<String> {
        vec!["N1".to_string(), "N2".to_string()]
    }
}

impl Default for StagingMarker {
    fn default() -> Self {
        Self {
            token: Self::default_token(),
            qualified: Self::default_qualified(),
        }
    }
}

/// How records sharing the same follow-up time are folded into the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieHandling {
    /// One multiplicative step per record, in stable time order.
    #[default]
    PerRecord,
    /// One step per distinct time with the risk set taken before the ties.
    Grouped,
}

impl TieHandling {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PerRecord => "per_record",
            Self::Grouped => "grouped",
        }
    }
}

/// Configuration for survival estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurvivalConfig {
    #[serde(default)]
    pub tie_handling: TieHandling,
}
