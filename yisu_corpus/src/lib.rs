#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

mod error;
pub mod loader;
pub mod mock;
mod row;
pub mod template;

pub use error::{CorpusError, Result};
pub use loader::{
    CorpusFormat, decode_text, from_csv_str, from_json_str, from_xlsx_path, load_path,
    to_csv_string,
};
pub use mock::{MOCK_CORPUS_SIZE, MockCorpus};
pub use template::{template_csv, write_template};
