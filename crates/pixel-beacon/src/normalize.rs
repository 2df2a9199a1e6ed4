//! Canonicalization of user data before hashing.

use crate::types::{NormalizationRule, UserDataField};

/// Canonicalize a raw user data value for `field`.
///
/// Every field is lowercased then trimmed. Phone, birth date and postal code
/// keep only ASCII digits; city drops all whitespace.
pub fn normalize(field: UserDataField, value: &str) -> String {
    let value = value.to_lowercase();
    let value = value.trim();

    match field.normalization() {
        NormalizationRule::Default => value.to_string(),
        NormalizationRule::DigitsOnly => value.chars().filter(char::is_ascii_digit).collect(),
        NormalizationRule::NoWhitespace => value.chars().filter(|c| !c.is_whitespace()).collect(),
    }
}
