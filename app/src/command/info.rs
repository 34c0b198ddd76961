use yisu_config::Config;
use yisu_search::ClinicalLibrary;

const CAPABILITY_NOTE: &str = "\
  1. Search: weighted keyword scoring over free text, no semantic inference.
  2. Scale: tuned for de-identified corpora of up to about 1,000 records.
  3. Factors: drugs, diagnoses, staging and biomarkers from the factor library.
  4. Privacy: records live in memory for one search and are never persisted.
     Only upload de-identified data.";

/// Strategy for displaying the effective configuration.
///
/// Falls back to defaults when no config file exists, so the output always
/// reflects what `search` would use.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::config_path()?;
        let config = Config::load_or_default()?;

        println!("=== yisu Configuration ===\n");

        println!("Config file: {}", config_path.display());
        if !config_path.exists() {
            println!("  (not found, showing defaults; run 'yisu init' to create)");
        }
        println!();

        let library = ClinicalLibrary::from_config(&config.scoring);
        println!("Scoring:");
        println!("  Factor Library ({}):", library.len());
        println!("    {}", library.factors().collect::<Vec<_>>().join(", "));
        println!("  Factor Weight: {}", config.scoring.weights.factor);
        println!(
            "  Staging Bonus: {} ({} -> {})",
            config.scoring.weights.staging_bonus,
            config.scoring.staging.token,
            config.scoring.staging.qualified.join("/")
        );
        println!("  Age Bonus: {}", config.scoring.weights.age_bonus);
        println!();

        println!("Survival:");
        println!("  Tie Handling: {}", config.survival.tie_handling.as_str());
        println!();

        println!("Corpus:");
        println!(
            "  Path: {}",
            config.corpus.path.as_deref().unwrap_or("(mock corpus)")
        );
        match config.corpus.mock_seed {
            Some(seed) => println!("  Mock Seed: {seed}"),
            None => println!("  Mock Seed: (random)"),
        }
        println!();

        println!("Display:");
        println!("  Top N: {}", config.display.top_n);
        println!(
            "  Highlight: {}factor{}",
            config.display.highlight_open, config.display.highlight_close
        );
        println!();

        println!("Capability Boundaries:");
        println!("{CAPABILITY_NOTE}");

        Ok(())
    }
}
