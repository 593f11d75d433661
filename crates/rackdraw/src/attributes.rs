//! Parsing of free-form device metadata.
//!
//! Inventories often carry extra device data in a single spreadsheet column,
//! written as `key:value` pairs separated by `|`:
//!
//! ```text
//! serial: CN-0X1234 | owner: netops | rack_position: front
//! ```
//!
//! Each pair becomes one attribute on the device's `object` element.

use std::ops::Range;

use rackdraw_core::xml;

use crate::{AttributeIssue, RackError};

/// Attributes the builder sets itself and that metadata may not replace.
pub const RESERVED_NAMES: [&str; 2] = ["id", "label"];

/// Separator between pairs.
const PAIR_SEPARATOR: char = '|';
/// Separator between key and value.
const KEY_SEPARATOR: char = ':';

/// Parses `raw` into `(key, value)` pairs in input order.
///
/// Keys and values are trimmed. An empty `raw` yields no pairs; any other
/// input must consist only of well-formed pairs, otherwise nothing is
/// returned.
///
/// # Errors
///
/// Returns [`RackError::MalformedAttribute`] for the first pair that does
/// not contain exactly one `:`, or whose key is empty, reserved (see
/// [`RESERVED_NAMES`]) or not a valid XML attribute name.
///
/// # Examples
///
/// ```
/// use rackdraw::attributes::parse_other_data;
///
/// let pairs = parse_other_data("a:1| b : 2 ").unwrap();
/// assert_eq!(
///     pairs,
///     vec![
///         ("a".to_string(), "1".to_string()),
///         ("b".to_string(), "2".to_string()),
///     ]
/// );
///
/// assert!(parse_other_data("bad").is_err());
/// ```
pub fn parse_other_data(raw: &str) -> Result<Vec<(String, String)>, RackError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let mut pairs = Vec::new();
    let mut start = 0;
    for segment in raw.split(PAIR_SEPARATOR) {
        let span = start..start + segment.len();
        start = span.end + PAIR_SEPARATOR.len_utf8();

        let mut parts = segment.split(KEY_SEPARATOR);
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            let issue = if segment.contains(KEY_SEPARATOR) {
                AttributeIssue::ExtraSeparator
            } else {
                AttributeIssue::MissingSeparator
            };
            return Err(RackError::new_malformed_attribute(raw, span, issue));
        };

        let key = key.trim();
        check_name(key).map_err(|issue| RackError::new_malformed_attribute(raw, span, issue))?;
        pairs.push((key.to_string(), value.trim().to_string()));
    }

    Ok(pairs)
}

/// Validates a single attribute name supplied outside of a pair string.
///
/// # Errors
///
/// Returns [`RackError::MalformedAttribute`] spanning the whole name when it
/// is empty, reserved or not a valid XML attribute name.
pub fn validate_name(name: &str) -> Result<(), RackError> {
    check_name(name).map_err(|issue| RackError::new_malformed_attribute(name, full_span(name), issue))
}

pub(crate) fn check_name(name: &str) -> Result<(), AttributeIssue> {
    if name.is_empty() {
        Err(AttributeIssue::EmptyName)
    } else if RESERVED_NAMES.contains(&name) {
        Err(AttributeIssue::ReservedName)
    } else if !xml::is_valid_name(name) {
        Err(AttributeIssue::InvalidName)
    } else {
        Ok(())
    }
}

fn full_span(text: &str) -> Range<usize> {
    0..text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue_and_pair(raw: &str) -> (AttributeIssue, Range<usize>, String) {
        match parse_other_data(raw) {
            Err(RackError::MalformedAttribute {
                issue, span, pair, ..
            }) => (issue, span, pair),
            other => panic!("Expected MalformedAttribute for {raw:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_has_no_pairs() {
        assert!(parse_other_data("").unwrap().is_empty());
    }

    #[test]
    fn test_two_pairs() {
        let pairs = parse_other_data("a:1|b:2").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_whitespace_is_trimmed_and_empty_value_allowed() {
        let pairs = parse_other_data("  owner :  net ops |note:").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("owner".to_string(), "net ops".to_string()),
                ("note".to_string(), String::new())
            ]
        );
    }

    #[test]
    fn test_missing_separator() {
        let (issue, span, pair) = issue_and_pair("bad");
        assert_eq!(issue, AttributeIssue::MissingSeparator);
        assert_eq!(span, 0..3);
        assert_eq!(pair, "bad");
    }

    #[test]
    fn test_extra_separator_points_at_second_pair() {
        let (issue, span, pair) = issue_and_pair("a:1|url:http://x");
        assert_eq!(issue, AttributeIssue::ExtraSeparator);
        assert_eq!(span, 4..16);
        assert_eq!(pair, "url:http://x");
    }

    #[test]
    fn test_trailing_separator_is_an_empty_pair() {
        let (issue, span, _) = issue_and_pair("a:1|");
        assert_eq!(issue, AttributeIssue::MissingSeparator);
        assert_eq!(span, 4..4);
    }

    #[test]
    fn test_whitespace_only_input_is_malformed() {
        let (issue, _, _) = issue_and_pair("   ");
        assert_eq!(issue, AttributeIssue::MissingSeparator);
    }

    #[test]
    fn test_key_checks() {
        assert_eq!(issue_and_pair(" :1").0, AttributeIssue::EmptyName);
        assert_eq!(issue_and_pair("id:x").0, AttributeIssue::ReservedName);
        assert_eq!(issue_and_pair("label:x").0, AttributeIssue::ReservedName);
        assert_eq!(issue_and_pair("rack unit:4").0, AttributeIssue::InvalidName);
    }

    #[test]
    fn test_multibyte_spans() {
        let (_, span, pair) = issue_and_pair("用途:web|状态");
        assert_eq!(pair, "状态");
        assert_eq!(span, "用途:web|".len().."用途:web|状态".len());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("serial").is_ok());
        assert!(matches!(
            validate_name("id"),
            Err(RackError::MalformedAttribute {
                issue: AttributeIssue::ReservedName,
                ..
            })
        ));
    }
}
