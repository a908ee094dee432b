//! Candidate normalization shared by the post-processor and the evaluator.

use deunicode::deunicode;

/// Normalize a word or phrase for comparison.
///
/// Transliterates to ASCII, lower-cases, and replaces spaces with `_` so
/// multi-word phrases compare as single tokens. Idempotent.
///
/// ```
/// use revdict_core::normalize::normalize;
///
/// assert_eq!(normalize("Café au lait"), "cafe_au_lait");
/// assert_eq!(normalize(&normalize("Café au lait")), "cafe_au_lait");
/// ```
pub fn normalize(word: &str) -> String {
    deunicode(word).to_lowercase().replace(' ', "_")
}
