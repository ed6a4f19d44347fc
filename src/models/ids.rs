//! Sequential record identifiers
//!
//! Identifiers look like `EMP001` or `STU042`: a fixed prefix followed by a
//! zero-padded counter. The next identifier is always one past the highest
//! existing counter, so identifiers freed by deletion are never handed out
//! again.

use crate::error::{RosterError, RosterResult};

/// Minimum number of digits in a rendered identifier
const MIN_WIDTH: usize = 3;

/// Parse the numeric part of `id`, which must be `prefix` followed by digits
pub fn parse_suffix(id: &str, prefix: &str) -> RosterResult<u64> {
    let malformed = || RosterError::MalformedIdentifier {
        identifier: id.to_string(),
        prefix: prefix.to_string(),
    };

    let digits = id.strip_prefix(prefix).ok_or_else(malformed)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    digits.parse::<u64>().map_err(|_| malformed())
}

/// Render an identifier from its prefix and counter
pub fn format_id(prefix: &str, counter: u64) -> String {
    format!("{}{:0width$}", prefix, counter, width = MIN_WIDTH)
}

/// Derive the next identifier from the existing ones
///
/// Fails with [`RosterError::MalformedIdentifier`] if any existing identifier
/// does not parse, rather than skipping it and risking a duplicate.
pub fn next_id<'a, I>(existing: I, prefix: &str) -> RosterResult<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut highest: Option<u64> = None;
    for id in existing {
        let counter = parse_suffix(id, prefix)?;
        highest = Some(highest.map_or(counter, |h| h.max(counter)));
    }

    let next = match highest {
        None => 1,
        Some(h) => h.checked_add(1).ok_or_else(|| {
            RosterError::Validation(format!("Identifier space for '{}' is exhausted", prefix))
        })?,
    };

    Ok(format_id(prefix, next))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_id() {
        assert_eq!(next_id(std::iter::empty(), "EMP").unwrap(), "EMP001");
    }

    #[test]
    fn test_next_after_max_with_gaps() {
        let ids = ["EMP001", "EMP003"];
        assert_eq!(next_id(ids, "EMP").unwrap(), "EMP004");
    }

    #[test]
    fn test_width_grows_past_999() {
        let ids = ["STU998", "STU999"];
        assert_eq!(next_id(ids, "STU").unwrap(), "STU1000");
        assert_eq!(next_id(["STU1000", "STU007"], "STU").unwrap(), "STU1001");
    }

    #[test]
    fn test_result_is_new_and_greater() {
        let ids = ["EMP005", "EMP002", "EMP010", "EMP001"];
        let next = next_id(ids, "EMP").unwrap();
        assert!(!ids.contains(&next.as_str()));
        let n = parse_suffix(&next, "EMP").unwrap();
        assert!(ids.iter().all(|id| parse_suffix(id, "EMP").unwrap() < n));
    }

    #[test]
    fn test_malformed_ids_are_reported() {
        for bad in ["EMPabc", "EMP", "STU001", "EMP-01", "EMP 12"] {
            let err = next_id(["EMP001", bad], "EMP").unwrap_err();
            assert!(
                matches!(err, RosterError::MalformedIdentifier { ref identifier, .. } if identifier == bad),
                "{bad} should be malformed"
            );
        }
    }

    #[test]
    fn test_overflowing_suffix_is_malformed() {
        let err = next_id(["EMP99999999999999999999999"], "EMP").unwrap_err();
        assert!(matches!(err, RosterError::MalformedIdentifier { .. }));
    }

    #[test]
    fn test_format_id() {
        assert_eq!(format_id("EMP", 7), "EMP007");
        assert_eq!(format_id("EMP", 1234), "EMP1234");
    }
}
