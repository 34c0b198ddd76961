use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use yisu_core::{ScoringConfig, SurvivalConfig};

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub survival: SurvivalConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Where `search` reads records from when no `--corpus` is given.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CorpusConfig {
    /// Default CSV/JSON/Excel corpus file. The mock corpus is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Seed for the mock corpus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_seed: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default = "DisplayConfig::default_top_n")]
    pub top_n: usize,
    #[serde(default = "DisplayConfig::default_open")]
    pub highlight_open: String,
    #[serde(default = "DisplayConfig::default_close")]
    pub highlight_close: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_n: Self::default_top_n(),
            highlight_open: Self::default_open(),
            highlight_close: Self::default_close(),
        }
    }
}

impl DisplayConfig {
    const fn default_top_n() -> usize {
        10
    }

    fn default_open() -> String {
        "【".to_string()
    }

    fn default_close() -> String {
        "】".to_string()
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "scoring": {
    "factor_library": [
      "华法林", "房颤", "消化道出血", "黑便",
      "肺癌", "EGFR", "T4",
      "结肠", "淋巴结", "N", "低分化",
      "胃癌", "新辅助", "dMMR", "免疫"
    ],
    "weights": {
      "factor": 3,
      "staging_bonus": 2,
      "age_bonus": 1
    },
    "staging": {
      "token": "N",
      "qualified": ["N1", "N2"]
    }
  },
  "survival": {
    "tie_handling": "per_record"
  },
  "corpus": {},
  "display": {
    "top_n": 10,
    "highlight_open": "【",
    "highlight_close": "】"
  }
}"#;

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("yisu"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'yisu init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config at {}: {e}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `~/yisu/config.json`, or use defaults when it does not exist.
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No config at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        Self::write_template(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Set corpus.path to your CSV/JSON/Excel cohort file (optional)");
        println!("   2. Run 'yisu template' for the upload column layout");
        println!("   3. Run 'yisu search -q \"高龄 房颤 华法林\"' to build a cohort");
        println!();
        println!("🔧 Configuration options:");
        println!("   - scoring.factor_library: clinical factors recognised in queries");
        println!("   - scoring.weights: factor / staging_bonus / age_bonus points");
        println!("   - survival.tie_handling: per_record or grouped");
        println!("   - display.top_n: ranked records shown by 'yisu search'");
        println!();
        Ok(())
    }

    /// Write the default template, refusing to overwrite.
    pub fn write_template(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }
        std::fs::write(path, CONFIG_TEMPLATE)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yisu_core::TieHandling;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn template_matches_defaults() {
        let parsed: Config = serde_json::from_str(CONFIG_TEMPLATE).expect("template parses");
        assert_eq!(parsed, Config::default());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn partial_config_fills_defaults() {
        let parsed: Config = serde_json::from_str(
            r#"{"survival": {"tie_handling": "grouped"}, "display": {"top_n": 3}}"#,
        )
        .expect("partial config parses");

        assert_eq!(parsed.survival.tie_handling, TieHandling::Grouped);
        assert_eq!(parsed.display.top_n, 3);
        assert_eq!(parsed.display.highlight_open, "【");
        assert_eq!(parsed.scoring, ScoringConfig::default());
        assert_eq!(parsed.corpus.path, None);
    }
}
