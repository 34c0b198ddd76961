//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input, dispatched
//! statically from `main`.

use std::path::Path;
use tracing::{info, warn};
use yisu_core::Record;
use yisu_corpus::MockCorpus;

mod info;
mod init;
mod mock;
mod search;
mod template;
mod version;

pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use mock::{MockInput, MockStrategy};
pub use search::{SearchInput, SearchStrategy};
pub use template::TemplateStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// Each strategy defines its own input type via the associated type, so
/// parameters are passed without boxing or runtime casting.
pub trait CommandStrategy: Send + Sync + 'static {
    type Input;

    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Load the corpus file, or generate the mock corpus.
///
/// A file that cannot be loaded is reported and replaced by the mock corpus
/// so a search always has something to run against.
fn load_corpus(path: Option<&Path>, seed: Option<u64>) -> Vec<Record> {
    if let Some(path) = path {
        match yisu_corpus::load_path(path) {
            Ok(records) => return records,
            Err(e) => warn!(
                "Failed to load corpus from {}: {e}; falling back to mock data",
                path.display()
            ),
        }
    }

    let records = MockCorpus::new(seed).generate();
    info!("Using mock corpus ({} records)", records.len());
    records
}

/// Write `content` to `output`, or print it when no path is given.
fn emit(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            println!("✅ Wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use yisu_corpus::MOCK_CORPUS_SIZE;

    #[test]
    fn missing_file_falls_back_to_mock() {
        let records = load_corpus(Some(Path::new("/nonexistent/cohort.csv")), Some(1));
        assert_eq!(records.len(), MOCK_CORPUS_SIZE);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn loaded_file_is_used_as_is() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("cohort.csv");
        std::fs::write(&path, "ID,content\nP1,房颤\n").expect("write csv");

        let records = load_corpus(Some(&path), None);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "P1");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn emit_writes_to_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out.csv");
        emit(Some(&path), "a,b\n").expect("emit succeeds");
        assert_eq!(std::fs::read_to_string(&path).expect("read back"), "a,b\n");
    }
}
