use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SEPARATOR: char = '/';
pub const PREFIX_MAX_DIGITS: usize = 3;
pub const SUFFIX_MAX_CHARS: usize = 4;

/// Reason a site-location value does not match the `ddd/ssss` pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PatternViolation {
    #[error("first part must be numeric")]
    NonNumericPrefix,
    #[error("first part must be ≤3 digits")]
    PrefixTooLong,
    #[error("only one slash allowed")]
    MultipleSeparators,
    #[error("after slash must be alphanumeric")]
    NonAlphanumericSuffix,
    #[error("Enter up to 4 letters or digits after the slash")]
    MissingSuffix,
    #[error("Format must be ddd/ssss: up to 3 digits, a slash, then up to 4 letters or digits")]
    Malformed,
}

/// Per-edit verdict handed back to the form layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInput {
    pub is_valid: bool,
    pub formatted_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LocationInput {
    pub(crate) fn from_pattern(formatted_value: String) -> Self {
        match validate_pattern(&formatted_value) {
            Ok(()) => Self::accepted(formatted_value),
            Err(violation) => Self::rejected(formatted_value, violation.to_string()),
        }
    }

    pub(crate) fn accepted(formatted_value: String) -> Self {
        Self {
            is_valid: true,
            formatted_value,
            error: None,
        }
    }

    pub(crate) fn rejected(formatted_value: String, error: String) -> Self {
        Self {
            is_valid: false,
            formatted_value,
            error: Some(error),
        }
    }
}

/// Re-formats the raw field text after an edit.
///
/// `previous` is the value the field held before the edit; it only decides whether the
/// edit lengthened the text, which gates automatic separator insertion.
pub fn format_input(raw: &str, previous: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == SEPARATOR)
        .collect();

    let (head, tail) = match cleaned.split_once(SEPARATOR) {
        Some((head, tail)) => (head, Some(tail.replace(SEPARATOR, ""))),
        None => (cleaned.as_str(), None),
    };

    let prefix: String = head
        .chars()
        .filter(char::is_ascii_digit)
        .take(PREFIX_MAX_DIGITS)
        .collect();

    let mut suffix: Option<String> = tail.map(|tail| {
        tail.chars()
            .filter(char::is_ascii_alphanumeric)
            .take(SUFFIX_MAX_CHARS)
            .collect()
    });

    // A character typed past a full prefix becomes the separator; the character itself is dropped.
    let lengthening = cleaned.len() > previous.len();
    if suffix.is_none()
        && lengthening
        && prefix.len() == PREFIX_MAX_DIGITS
        && head.len() > PREFIX_MAX_DIGITS
    {
        suffix = Some(String::new());
    }

    match suffix {
        Some(suffix) => format!("{prefix}{SEPARATOR}{suffix}"),
        None => prefix,
    }
}

/// Checks a value against the pattern, allowing an in-progress empty suffix.
pub fn validate_pattern(value: &str) -> Result<(), PatternViolation> {
    if value.is_empty() {
        return Err(PatternViolation::Malformed);
    }

    if value.matches(SEPARATOR).count() > 1 {
        return Err(PatternViolation::MultipleSeparators);
    }

    let (prefix, suffix) = split(value);

    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_digit()) {
        return Err(PatternViolation::NonNumericPrefix);
    }
    if prefix.len() > PREFIX_MAX_DIGITS {
        return Err(PatternViolation::PrefixTooLong);
    }

    match suffix {
        Some(suffix) if !suffix.chars().all(|c| c.is_ascii_alphanumeric()) => {
            Err(PatternViolation::NonAlphanumericSuffix)
        }
        Some(suffix) if suffix.len() > SUFFIX_MAX_CHARS => Err(PatternViolation::Malformed),
        _ => Ok(()),
    }
}

/// A complete code has a separator and a non-empty suffix.
pub fn is_complete(value: &str) -> bool {
    validate_pattern(value).is_ok() && matches!(split(value), (_, Some(suffix)) if !suffix.is_empty())
}

pub fn has_separator(value: &str) -> bool {
    value.contains(SEPARATOR)
}

/// Numeric value of the part before the separator, when it is purely digits.
pub fn numeric_prefix(value: &str) -> Option<u16> {
    let (prefix, _) = split(value);
    if prefix.is_empty() || prefix.len() > PREFIX_MAX_DIGITS {
        return None;
    }
    if !prefix.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Formats an edit and validates the result against the pattern.
pub fn process_input(raw: &str, previous: &str) -> LocationInput {
    LocationInput::from_pattern(format_input(raw, previous))
}

fn split(value: &str) -> (&str, Option<&str>) {
    match value.split_once(SEPARATOR) {
        Some((prefix, suffix)) => (prefix, Some(suffix)),
        None => (value, None),
    }
}

/// Complete, normalized site-location code (`ddd/ssss`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteLocationCode {
    prefix: String,
    suffix: String,
}

impl SiteLocationCode {
    pub fn numeric_prefix(&self) -> u16 {
        // Construction guarantees 1-3 ASCII digits.
        self.prefix.parse().unwrap_or_default()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl FromStr for SiteLocationCode {
    type Err = PatternViolation;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        validate_pattern(value)?;
        match split(value) {
            (prefix, Some(suffix)) if !suffix.is_empty() => Ok(Self {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            }),
            _ => Err(PatternViolation::MissingSuffix),
        }
    }
}

impl fmt::Display for SiteLocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, SEPARATOR, self.suffix)
    }
}
