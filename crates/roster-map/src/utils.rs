//! Utility functions for mapping operations.

/// Lowercases and strips everything but letters and digits.
///
/// Digits are kept so metric headers such as `40 yd` and `10 yd` stay distinct.
pub fn normalize_header(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Trimmed, lowercased text for exact comparisons.
pub fn exact_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}
