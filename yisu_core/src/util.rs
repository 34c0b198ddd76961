//! Corpus fingerprinting.

use sha2::{Digest, Sha256};

use crate::record::Record;

/// Compute a SHA-256 fingerprint of a corpus.
///
/// Logs and reports carry this digest instead of record contents, so two runs
/// over the same upload can be correlated without retaining patient data.
#[must_use]
pub fn corpus_fingerprint(records: &[Record]) -> String {
    let mut hasher = Sha256::new();
    for record in records {
        hasher.update(record.id.as_bytes());
        hasher.update(b"\x1f");
        if let Some(age) = record.age {
            hasher.update(age.to_le_bytes());
        }
        hasher.update(b"\x1f");
        hasher.update(record.sex.label().as_bytes());
        hasher.update(b"\x1f");
        hasher.update(record.text.as_bytes());
        hasher.update(b"\x1f");
        hasher.update(record.time.to_le_bytes());
        hasher.update([u8::from(record.event)]);
        hasher.update(b"\x1e");
    }
    format!("{:x}", hasher.finalize())
}
