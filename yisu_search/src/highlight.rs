//! Marking recognised factors inside record text for display.

use yisu_core::FactorSet;

/// Wraps factor occurrences in a pair of markers.
#[derive(Debug, Clone)]
pub struct Highlighter {
    open: String,
    close: String,
}

impl Highlighter {
    #[must_use]
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Mark every occurrence of every factor in `text`.
    ///
    /// Matching folds case with `to_uppercase`, the same folding the scorer
    /// uses, so every factor that scored a record is marked in it. At each
    /// position the longest factor wins and matches never overlap, so
    /// markers are never nested.
    #[must_use]
    pub fn apply(&self, text: &str, factors: &FactorSet) -> String {
        let mut needles: Vec<String> = factors
            .iter()
            .filter(|f| !f.is_empty())
            .map(str::to_uppercase)
            .collect();
        if needles.is_empty() {
            return text.to_string();
        }
        needles.sort_by_key(|f| std::cmp::Reverse(f.len()));

        let mut out = String::with_capacity(text.len() + 16);
        let mut pos = 0;
        while pos < text.len() {
            let rest = &text[pos..];
            let hit = needles
                .iter()
                .find_map(|needle| folded_prefix_len(rest, needle));

            if let Some(len) = hit {
                out.push_str(&self.open);
                out.push_str(&rest[..len]);
                out.push_str(&self.close);
                pos += len;
            } else if let Some(c) = rest.chars().next() {
                out.push(c);
                pos += c.len_utf8();
            } else {
                break;
            }
        }
        out
    }
}

/// Byte length of the shortest prefix of `text` whose upper-cased form is
/// exactly `needle_upper`.
fn folded_prefix_len(text: &str, needle_upper: &str) -> Option<usize> {
    let mut folded = String::with_capacity(needle_upper.len());
    for (i, c) in text.char_indices() {
        folded.extend(c.to_uppercase());
        if folded.len() >= needle_upper.len() {
            return (folded == needle_upper).then_some(i + c.len_utf8());
        }
        if !needle_upper.starts_with(folded.as_str()) {
            return None;
        }
    }
    None
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new("【", "】")
    }
}

/// Mark factors with the default `【…】` markers.
#[must_use]
pub fn highlight(text: &str, factors: &FactorSet) -> String {
    Highlighter::default().apply(text, factors)
}
