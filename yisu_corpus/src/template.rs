//! Upload template with one example row.

use std::path::Path;
use tracing::info;
use yisu_core::{Record, Sex};

use crate::error::Result;
use crate::loader::to_csv_string;

fn example_row() -> Record {
    Record::new("P001", "此处输入病历文本...")
        .with_age(65)
        .with_sex(Sex::Male)
        .with_follow_up(24.0, true)
}

/// Template CSV text.
pub fn template_csv() -> Result<String> {
    to_csv_string(&[example_row()])
}

/// Write the template with a UTF-8 BOM so spreadsheet tools detect the encoding.
pub fn write_template(path: &Path) -> Result<()> {
    let content = format!("\u{feff}{}", template_csv()?);
    std::fs::write(path, content)?;
    info!("Wrote corpus template to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::from_csv_str;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn template_has_standard_header_and_reloads() {
        let csv = template_csv().expect("template renders");
        let header = csv.lines().next().expect("header line");
        assert_eq!(header, "ID,年龄,性别,content,survival,status,full_record");

        let records = from_csv_str(&csv).expect("template reloads");
        assert_eq!(records, vec![example_row()]);
    }
}
