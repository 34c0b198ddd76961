use std::path::PathBuf;
use yisu_corpus::{template_csv, write_template};

/// Strategy for writing the upload template.
///
/// Files get a UTF-8 BOM for spreadsheet tools; stdout gets plain CSV.
#[derive(Debug, Clone, Copy)]
pub struct TemplateStrategy;

impl super::CommandStrategy for TemplateStrategy {
    type Input = Option<PathBuf>;

    async fn execute(&self, output: Self::Input) -> anyhow::Result<()> {
        match output {
            Some(path) => {
                write_template(&path)?;
                println!("✅ Wrote template to {}", path.display());
            }
            None => print!("{}", template_csv()?),
        }
        Ok(())
    }
}
