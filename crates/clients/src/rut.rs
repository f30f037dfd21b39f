//! National tax-id (RUT) helpers.
//!
//! Shared by every entry point that accepts a tax id: client registration,
//! edition and the combined name/RUT search boxes. Every function here is
//! total: arbitrary input yields a value, never a panic.

use core::fmt;

use serde::{Deserialize, Serialize};

use arriendo_core::{DomainError, DomainResult, ValueObject};

/// Strip every character that is not a decimal digit or the letter K,
/// uppercasing the result.
pub fn clean(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, 'k' | 'K'))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Expected check digit for a numeric body, per the mod-11 algorithm:
/// walk the body right-to-left with cyclic weights 2..=7, sum the products,
/// then `11 - (sum % 11)` maps 11 to "0" and 10 to "K".
///
/// Returns `None` when the body contains a non-digit (a K can only ever be
/// the check digit itself).
fn expected_check_digit(body: &str) -> Option<char> {
    let mut sum: u32 = 0;
    let mut factor: u32 = 2;

    for c in body.chars().rev() {
        let digit = c.to_digit(10)?;
        sum += digit * factor;
        factor = if factor == 7 { 2 } else { factor + 1 };
    }

    Some(match 11 - (sum % 11) {
        11 => '0',
        10 => 'K',
        remainder => (b'0' + remainder as u8) as char,
    })
}

/// Validate the check digit of a tax id. Inputs with fewer than two cleaned
/// characters are invalid.
pub fn is_valid(value: &str) -> bool {
    let cleaned = clean(value);
    if cleaned.len() < 2 {
        return false;
    }

    let (body, check) = cleaned.split_at(cleaned.len() - 1);
    match expected_check_digit(body) {
        Some(expected) => check == expected.to_string(),
        None => false,
    }
}

/// Display form: thousands-dotted body, dash, check digit
/// (`12345678K` becomes `12.345.678-K`).
pub fn format(value: &str) -> String {
    let cleaned = clean(value);
    if cleaned.len() <= 1 {
        return cleaned;
    }

    let (body, check) = cleaned.split_at(cleaned.len() - 1);

    let mut dotted = String::with_capacity(body.len() + body.len() / 3);
    for (i, c) in body.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            dotted.insert(0, '.');
        }
        dotted.insert(0, c);
    }

    fmt_body_check(&dotted, check)
}

/// Transport form: `body-check`, no thousands separators. This is the shape
/// the backend stores and matches on.
pub fn normalize_for_transport(value: &str) -> String {
    let cleaned = clean(value);
    if cleaned.len() < 2 {
        return cleaned;
    }

    let (body, check) = cleaned.split_at(cleaned.len() - 1);
    fmt_body_check(body, check)
}

fn fmt_body_check(body: &str, check: &str) -> String {
    let mut out = String::with_capacity(body.len() + 2);
    out.push_str(body);
    out.push('-');
    out.push_str(check);
    out
}

/// Heuristic for combined search boxes: does the text look like a tax id
/// rather than a legal name?
pub fn looks_like_tax_id(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | 'k' | 'K'))
}

/// A checksum-validated tax id, stored in transport form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxId(String);

impl TaxId {
    /// Parse and validate. Accepts any display or transport spelling;
    /// rejects inputs whose check digit does not match.
    pub fn parse(value: &str) -> DomainResult<Self> {
        if is_valid(value) {
            Ok(Self(normalize_for_transport(value)))
        } else {
            Err(DomainError::validation(format!(
                "invalid tax id: {value:?}"
            )))
        }
    }

    /// Transport form (`body-check`, no dots).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Thousands-dotted display form.
    pub fn formatted(&self) -> String {
        format(&self.0)
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ValueObject for TaxId {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clean_keeps_digits_and_k_only() {
        assert_eq!(clean("12.345.678-k"), "12345678K");
        assert_eq!(clean(" 7 6.543.210 - 9 "), "765432109");
        assert_eq!(clean("no digits here"), "");
    }

    #[test]
    fn validates_known_tax_ids() {
        assert!(is_valid("12345678-5"));
        assert!(is_valid("12.345.678-5"));
        assert!(is_valid("123456785"));
        assert!(!is_valid("12345678-0"));
        assert!(!is_valid("12345678-K"));
    }

    #[test]
    fn check_digit_k_is_accepted() {
        // body 6: 6 * 2 = 12, 11 - (12 % 11) = 10, so the check digit is K
        assert!(is_valid("6-K"));
        assert!(is_valid("6k"));
        assert!(!is_valid("6-0"));
    }

    #[test]
    fn too_short_inputs_are_invalid() {
        assert!(!is_valid(""));
        assert!(!is_valid("5"));
        assert!(!is_valid("..-"));
    }

    #[test]
    fn k_inside_the_body_is_invalid() {
        assert!(!is_valid("1K345678-5"));
    }

    #[test]
    fn formats_with_thousands_dots() {
        assert_eq!(format("123456785"), "12.345.678-5");
        assert_eq!(format("6k"), "6-K");
        assert_eq!(format("5"), "5");
        assert_eq!(format(""), "");
    }

    #[test]
    fn normalizes_for_transport() {
        assert_eq!(normalize_for_transport("12.345.678-5"), "12345678-5");
        assert_eq!(normalize_for_transport("6-K"), "6-K");
        assert_eq!(normalize_for_transport("5"), "5");
    }

    #[test]
    fn tax_id_round_trips_between_spellings() {
        let bare = TaxId::parse("123456785").unwrap();
        let dotted = TaxId::parse("12.345.678-5").unwrap();
        assert_eq!(bare, dotted);
        assert_eq!(bare.as_str(), "12345678-5");
        assert_eq!(bare.formatted(), "12.345.678-5");
    }

    #[test]
    fn tax_id_rejects_bad_check_digit() {
        assert!(TaxId::parse("12345678-0").is_err());
    }

    #[test]
    fn search_heuristic_separates_ids_from_names() {
        assert!(looks_like_tax_id("12.345.678-5"));
        assert!(looks_like_tax_id("123456785"));
        assert!(looks_like_tax_id(" 6-K "));
        assert!(!looks_like_tax_id("Constructora Andes"));
        assert!(!looks_like_tax_id(""));
    }

    proptest! {
        /// Total functions: no input panics, and cleaning is idempotent.
        #[test]
        fn helpers_are_total(s in ".*") {
            let cleaned = clean(&s);
            prop_assert_eq!(clean(&cleaned), cleaned.clone());
            let _ = is_valid(&s);
            let _ = format(&s);
            let _ = normalize_for_transport(&s);
            let _ = looks_like_tax_id(&s);
        }

        /// Formatting never changes what the transport form sees.
        #[test]
        fn format_preserves_transport_form(body in "[0-9]{1,8}", check in "[0-9K]") {
            let raw = body + &check;
            prop_assert_eq!(
                normalize_for_transport(&format(&raw)),
                normalize_for_transport(&raw)
            );
        }
    }
}
