//! Corpus loading and export.
//!
//! Uploads are CSV, a JSON array of objects, or the first sheet of an Excel
//! workbook. Text files are read as UTF-8 (BOM tolerated) and fall back to
//! GBK, the usual encoding of spreadsheets exported on Chinese systems.
//! Loading never rejects a row for a bad cell; it only fails when the file
//! cannot be read or parsed at all, or holds no rows.

use calamine::{Data, Reader};
use std::path::Path;
use tracing::{debug, info, warn};
use yisu_core::Record;

use crate::error::{CorpusError, Result};
use crate::row::{Column, ExportRow, RawRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusFormat {
    Csv,
    Json,
    Xlsx,
}

impl CorpusFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            Some("xlsx" | "xls") => Ok(Self::Xlsx),
            _ => Err(CorpusError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Load a corpus file.
pub fn load_path(path: &Path) -> Result<Vec<Record>> {
    let format = CorpusFormat::from_path(path)?;
    debug!("Loading {:?} corpus from {}", format, path.display());

    let records = match format {
        CorpusFormat::Csv => from_csv_str(&decode_text(std::fs::read(path)?)?)?,
        CorpusFormat::Json => from_json_str(&decode_text(std::fs::read(path)?)?)?,
        CorpusFormat::Xlsx => from_xlsx_path(path)?,
    };

    if records.is_empty() {
        return Err(CorpusError::Empty(path.display().to_string()));
    }

    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Decode file bytes as UTF-8, falling back to GBK.
pub fn decode_text(bytes: Vec<u8>) -> Result<String> {
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            let bytes = e.into_bytes();
            let (text, had_errors) = encoding_rs::GBK.decode_without_bom_handling(&bytes);
            if had_errors {
                return Err(CorpusError::Encoding(format!(
                    "{} bytes could not be decoded",
                    bytes.len()
                )));
            }
            debug!("Decoded corpus text as GBK");
            Ok(text.into_owned())
        }
    }
}

/// Parse CSV text with a header row. Unknown columns are ignored.
pub fn from_csv_str(content: &str) -> Result<Vec<Record>> {
    let content = content.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns = map_header(reader.headers()?.iter());

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = result?;
        records.push(build_record(&columns, row.iter(), i + 1));
    }

    Ok(records)
}

/// Read the first worksheet of an Excel workbook. The first row is the header.
pub fn from_xlsx_path(path: &Path) -> Result<Vec<Record>> {
    let mut workbook = calamine::open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CorpusError::Empty(path.display().to_string()))??;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let header: Vec<String> = header.iter().map(cell_text).collect();
    let columns = map_header(header.iter().map(String::as_str));

    Ok(rows
        .enumerate()
        .map(|(i, row)| {
            let cells: Vec<String> = row.iter().map(cell_text).collect();
            build_record(&columns, cells.iter().map(String::as_str), i + 1)
        })
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn map_header<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<Option<Column>> {
    let columns: Vec<Option<Column>> = headers.map(Column::from_header).collect();
    if columns.iter().all(Option::is_none) {
        warn!("Corpus header has no recognised columns");
    }
    columns
}

fn build_record<'a>(
    columns: &[Option<Column>],
    cells: impl Iterator<Item = &'a str>,
    line: usize,
) -> Record {
    let mut raw = RawRow::default();
    for (column, value) in columns.iter().zip(cells) {
        if let Some(column) = column {
            raw.set(*column, value);
        }
    }
    raw.into_record(line)
}

/// Parse a JSON array of row objects.
pub fn from_json_str(content: &str) -> Result<Vec<Record>> {
    let rows: Vec<RawRow> = serde_json::from_str(content.trim_start_matches('\u{feff}'))?;
    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| row.into_record(i + 1))
        .collect())
}

/// Render records as CSV using the template schema.
pub fn to_csv_string(records: &[Record]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(ExportRow::from(record))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CorpusError::Write(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CorpusError::Write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use yisu_core::Sex;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            CorpusFormat::from_path(Path::new("data/cohort.CSV")).ok(),
            Some(CorpusFormat::Csv)
        );
        assert_eq!(
            CorpusFormat::from_path(Path::new("cohort.json")).ok(),
            Some(CorpusFormat::Json)
        );
        assert_eq!(
            CorpusFormat::from_path(Path::new("cohort.xlsx")).ok(),
            Some(CorpusFormat::Xlsx)
        );
        assert!(matches!(
            CorpusFormat::from_path(Path::new("cohort.txt")),
            Err(CorpusError::UnsupportedFormat(_))
        ));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn csv_keeps_leading_zero_ids_and_ignores_unknown_columns() {
        let csv = "\u{feff}ID,年龄,性别,content,survival,status,备注\n001,65,男,房颤,24,1,x\n002,,女,,abc,0,y\n";
        let records = from_csv_str(csv).expect("valid csv");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "001");
        assert_eq!(records[0].age, Some(65));
        assert_eq!(records[0].sex, Sex::Male);
        assert!((records[0].time - 24.0).abs() < f64::EPSILON);
        assert!(records[0].event);

        assert_eq!(records[1].age, None);
        assert!(records[1].text.is_empty());
        assert!(records[1].time.abs() < f64::EPSILON);
        assert!(!records[1].event);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn json_accepts_numbers_and_english_keys() {
        let json = r#"[
            {"id": "P1", "age": 72, "sex": "F", "text": "EGFR突变", "time": 18.5, "event": true},
            {"ID": 2, "年龄": "58", "性别": "男", "content": "胃癌", "survival": "40", "status": 0, "full_record": null}
        ]"#;
        let records = from_json_str(json).expect("valid json");

        assert_eq!(records[0].age, Some(72));
        assert_eq!(records[0].sex, Sex::Female);
        assert!((records[0].time - 18.5).abs() < f64::EPSILON);
        assert!(records[0].event);

        assert_eq!(records[1].id, "2");
        assert_eq!(records[1].age, Some(58));
        assert!(!records[1].event);
        assert_eq!(records[1].full_record, None);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn implausible_age_is_dropped() {
        let records = from_csv_str("ID,年龄,content\nP1,4294967290,房颤\n").expect("valid csv");
        assert_eq!(records[0].age, None);
        assert_eq!(records[0].text, "房颤");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn gbk_text_is_decoded() {
        let (bytes, _, unmappable) = encoding_rs::GBK.encode("ID,性别,content\nP1,女,胃癌 dMMR\n");
        assert!(!unmappable);
        assert!(std::str::from_utf8(&bytes).is_err());

        let text = decode_text(bytes.into_owned()).expect("gbk decodes");
        let records = from_csv_str(&text).expect("valid csv");
        assert_eq!(records[0].sex, Sex::Female);
        assert_eq!(records[0].text, "胃癌 dMMR");
    }

    #[test]
    fn undecodable_bytes_are_an_encoding_error() {
        assert!(matches!(
            decode_text(vec![b'I', b'D', 0x81, b'\n']),
            Err(CorpusError::Encoding(_))
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(from_json_str("{not json"), Err(CorpusError::Json(_))));
    }
}
