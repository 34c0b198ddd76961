use std::path::PathBuf;
use yisu_corpus::{MockCorpus, to_csv_string};

use super::emit;

/// Input parameters for the Mock command strategy.
#[derive(Debug, Clone)]
pub struct MockInput {
    pub output: Option<PathBuf>,
    pub seed: Option<u64>,
}

/// Strategy for exporting the demo corpus as CSV.
///
/// The export uses the upload schema, so the file can be edited and passed
/// back to `yisu search --corpus`.
#[derive(Debug, Clone, Copy)]
pub struct MockStrategy;

impl super::CommandStrategy for MockStrategy {
    type Input = MockInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let records = MockCorpus::new(input.seed).generate();
        let csv = to_csv_string(&records)?;
        emit(input.output.as_deref(), &csv)
    }
}
