//! Lenient row schema shared by the CSV, Excel and JSON loaders.
//!
//! Every column is read as optional text and converted afterwards, so a bad
//! cell degrades to a default instead of rejecting the whole upload. CSV and Excel
//! cells are stored verbatim through [`RawRow::set`]; JSON values go through
//! serde and may be strings, numbers, booleans or null. Headers
//! are accepted in the template form (`ID, 年龄, 性别, content, survival,
//! status, full_record`) or in English (`id, age, sex, text, time, event`).

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use yisu_core::{Record, Sex};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawRow {
    #[serde(rename = "ID", alias = "id", alias = "Id", default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(rename = "年龄", alias = "age", default, deserialize_with = "lenient")]
    pub age: Option<String>,
    #[serde(rename = "性别", alias = "sex", default, deserialize_with = "lenient")]
    pub sex: Option<String>,
    #[serde(rename = "content", alias = "text", default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(rename = "survival", alias = "time", default, deserialize_with = "lenient")]
    pub time: Option<String>,
    #[serde(rename = "status", alias = "event", default, deserialize_with = "lenient")]
    pub event: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub full_record: Option<String>,
}

/// Known columns, matched case-insensitively against CSV headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Column {
    Id,
    Age,
    Sex,
    Text,
    Time,
    Event,
    FullRecord,
}

impl Column {
    pub fn from_header(header: &str) -> Option<Self> {
        match header.trim_start_matches('\u{feff}').trim().to_lowercase().as_str() {
            "id" => Some(Self::Id),
            "年龄" | "age" => Some(Self::Age),
            "性别" | "sex" => Some(Self::Sex),
            "content" | "text" => Some(Self::Text),
            "survival" | "time" => Some(Self::Time),
            "status" | "event" => Some(Self::Event),
            "full_record" => Some(Self::FullRecord),
            _ => None,
        }
    }
}

impl RawRow {
    /// Store a CSV cell verbatim, without type inference.
    pub fn set(&mut self, column: Column, value: &str) {
        let value = Some(value.to_string());
        match column {
            Column::Id => self.id = value,
            Column::Age => self.age = value,
            Column::Sex => self.sex = value,
            Column::Text => self.text = value,
            Column::Time => self.time = value,
            Column::Event => self.event = value,
            Column::FullRecord => self.full_record = value,
        }
    }

    /// Convert into a record. `line` (1-based) names rows that have no id.
    pub fn into_record(self, line: usize) -> Record {
        let id = non_empty(self.id).unwrap_or_else(|| format!("ROW-{line:03}"));
        let mut record = Record::new(id, self.text.unwrap_or_default())
            .with_sex(self.sex.as_deref().map_or(Sex::Unknown, Sex::from))
            .with_follow_up(
                self.time.as_deref().and_then(parse_number).unwrap_or(0.0),
                self.event.as_deref().is_some_and(parse_event),
            );
        record.age = self.age.as_deref().and_then(parse_age);
        record.full_record = non_empty(self.full_record);
        record
    }
}

/// Output schema, identical to the upload template.
#[derive(Debug, Serialize)]
pub(crate) struct ExportRow<'a> {
    #[serde(rename = "ID")]
    pub id: &'a str,
    #[serde(rename = "年龄")]
    pub age: Option<u32>,
    #[serde(rename = "性别")]
    pub sex: &'a str,
    pub content: &'a str,
    pub survival: f64,
    pub status: u8,
    pub full_record: Option<&'a str>,
}

impl<'a> From<&'a Record> for ExportRow<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            id: &record.id,
            age: record.age,
            sex: record.sex.label(),
            content: &record.text,
            survival: record.time,
            status: u8::from(record.event),
            full_record: record.full_record.as_deref(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Ages above this are treated as data-entry errors and dropped.
const MAX_AGE: f64 = 150.0;

fn parse_age(value: &str) -> Option<u32> {
    parse_number(value)
        .filter(|v| (0.0..=MAX_AGE).contains(v))
        .map(|v| v.trunc() as u32)
}

fn parse_event(value: &str) -> bool {
    let value = value.trim();
    match value.to_lowercase().as_str() {
        "true" | "yes" | "y" | "是" | "死亡" | "事件" => true,
        _ => parse_number(value).is_some_and(|v| v != 0.0),
    }
}

/// Accept strings, numbers, booleans and nulls as optional text.
fn lenient<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientVisitor;

    impl<'de> Visitor<'de> for LenientVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number, boolean or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(LenientVisitor)
}
