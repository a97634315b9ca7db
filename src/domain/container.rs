// ==========================================
// Container Scan Reconciliation - Container Code
// ==========================================
// Canonical shape: 4 uppercase carrier letters + 7 digits
// A normalized code is accepted even when it does not match
// the canonical shape; completeness of the log wins over
// strict format enforcement.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized container code.
///
/// Produced by `CodeNormalizer::normalize`, which never fails; the
/// wrapped string is therefore guaranteed to contain only `[A-Z0-9]`
/// but NOT guaranteed to be canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerCode(String);

impl ContainerCode {
    pub fn new(code: String) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether the code matches the canonical 4-letter + 7-digit shape.
    ///
    /// Downstream consumers treat non-canonical codes as "unrecognized"
    /// for display, but the engine still records them.
    pub fn is_canonical(&self) -> bool {
        let bytes = self.0.as_bytes();
        bytes.len() == 11
            && bytes[..4].iter().all(|b| b.is_ascii_uppercase())
            && bytes[4..].iter().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Display for ContainerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ContainerCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}
