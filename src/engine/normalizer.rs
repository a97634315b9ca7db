// ==========================================
// Container Scan Reconciliation - Code Normalizer
// ==========================================
// Cleans a raw OCR/typed string into a container code and
// auto-corrects the common OCR failure where the leading letter
// of a 4-letter carrier prefix is misread or dropped while the
// tail survives.
//
// Correction is a first-match suffix scan over the configured
// prefix list, NOT edit-distance matching. Changing the heuristic
// would change which codes get silently rewritten, so the exact
// semantics are load-bearing.
// ==========================================

use crate::domain::ContainerCode;

pub struct CodeNormalizer {
    /// 4-letter carrier prefixes in correction priority order.
    prefixes: Vec<String>,
}

impl CodeNormalizer {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    /// Normalize a raw scan into a container code. Never fails.
    ///
    /// Steps, in order:
    /// 1. uppercase
    /// 2. strip whitespace and every character outside [A-Z0-9]
    /// 3. prefix correction: for each known prefix P, if the cleaned
    ///    string starts with the last 3 letters of P, replace that
    ///    start with the full P; first match in list order wins
    ///
    /// No match returns the cleaned string unchanged (best-effort
    /// cleanup); the result is not guaranteed to be canonical.
    pub fn normalize(&self, raw: &str) -> ContainerCode {
        let cleaned: String = raw
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            .collect();

        for prefix in &self.prefixes {
            if prefix.len() != 4 {
                continue;
            }
            let suffix = &prefix[1..];
            if cleaned.starts_with(suffix) {
                return ContainerCode::new(format!("{}{}", prefix, &cleaned[suffix.len()..]));
            }
        }

        ContainerCode::new(cleaned)
    }
}
