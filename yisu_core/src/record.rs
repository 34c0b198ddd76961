use serde::{Deserialize, Serialize};

/// Recorded sex of a patient.
///
/// The set is open: anything that is not recognised as male or female is
/// kept verbatim in `Other` so uploaded data is never silently rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
    Other(String),
}

impl Sex {
    /// Display label used in reports and exported corpora.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Male => "男",
            Self::Female => "女",
            Self::Unknown => "未知",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for Sex {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Self::Unknown,
            "男" | "m" | "male" | "man" => Self::Male,
            "女" | "f" | "female" | "woman" => Self::Female,
            "未知" | "unknown" => Self::Unknown,
            _ => Self::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for Sex {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Sex> for String {
    fn from(value: Sex) -> Self {
        value.label().to_string()
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One patient case in a corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    /// Age in years. `None` when the source row had no usable age.
    pub age: Option<u32>,
    #[serde(default)]
    pub sex: Sex,
    /// Clinical narrative; the only field matched against queries.
    #[serde(default)]
    pub text: String,
    /// Follow-up duration, always finite and `>= 0`.
    #[serde(default)]
    pub time: f64,
    /// `true` if the outcome event occurred at `time`, `false` if censored.
    #[serde(default)]
    pub event: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_record: Option<String>,
}

impl Record {
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            age: None,
            sex: Sex::Unknown,
            text: text.into(),
            time: 0.0,
            event: false,
            full_record: None,
        }
    }

    #[must_use]
    pub const fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    #[must_use]
    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = sex;
        self
    }

    /// Set follow-up time and event flag. Negative or non-finite times become 0.
    #[must_use]
    pub fn with_follow_up(mut self, time: f64, event: bool) -> Self {
        self.time = sanitize_time(time);
        self.event = event;
        self
    }

    #[must_use]
    pub fn with_full_record(mut self, full_record: impl Into<String>) -> Self {
        self.full_record = Some(full_record.into());
        self
    }
}

/// Clamp a follow-up time into the valid domain.
#[must_use]
pub fn sanitize_time(time: f64) -> f64 {
    if time.is_finite() && time > 0.0 {
        time
    } else {
        0.0
    }
}
