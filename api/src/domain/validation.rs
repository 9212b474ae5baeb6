//! Field-level validation
//!
//! Validators never fail fast: every violated field is collected into a
//! `ValidationErrors` so callers can report all problems in one response.

use std::ops::RangeInclusive;

use serde::Serialize;
use serde_json::{Map, Value};

/// Kind of validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
    TooBig,
}

/// A single violation, addressed by the path of the offending field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Type the bound applied to: `"string"` (length) or `"number"`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact: Option<bool>,
    pub path: Vec<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn invalid_type(path: &[&str], expected: &str, received: &str) -> Self {
        let message = if received == "undefined" {
            "Required".to_string()
        } else {
            format!("Expected {}, received {}", expected, received)
        };

        Self {
            code: IssueCode::InvalidType,
            expected: Some(expected.to_string()),
            received: Some(received.to_string()),
            minimum: None,
            maximum: None,
            kind: None,
            inclusive: None,
            exact: None,
            path: to_path(path),
            message,
        }
    }

    pub fn too_small(
        path: &[&str],
        kind: &'static str,
        minimum: f64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: IssueCode::TooSmall,
            expected: None,
            received: None,
            minimum: Some(minimum),
            maximum: None,
            kind: Some(kind),
            inclusive: Some(true),
            exact: Some(false),
            path: to_path(path),
            message: message.into(),
        }
    }

    pub fn too_big(
        path: &[&str],
        kind: &'static str,
        maximum: f64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: IssueCode::TooBig,
            expected: None,
            received: None,
            minimum: None,
            maximum: Some(maximum),
            kind: Some(kind),
            inclusive: Some(true),
            exact: Some(false),
            path: to_path(path),
            message: message.into(),
        }
    }

    /// Issue for input that could not be read at all (e.g. malformed JSON)
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            code: IssueCode::InvalidType,
            expected: None,
            received: None,
            minimum: None,
            maximum: None,
            kind: None,
            inclusive: None,
            exact: None,
            path: Vec::new(),
            message: message.into(),
        }
    }

    /// Whether this issue points at the given top-level field
    pub fn is_for(&self, field: &str) -> bool {
        self.path.first().map(String::as_str) == Some(field)
    }
}

fn to_path(path: &[&str]) -> Vec<String> {
    path.iter().map(|s| s.to_string()).collect()
}

/// Collected validation issues
#[derive(Debug, Clone, Default, PartialEq, thiserror::Error)]
#[error("{} validation issue(s)", .issues.len())]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(issue: ValidationIssue) -> Self {
        Self {
            issues: vec![issue],
        }
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }
}

/// JSON type name as reported in `received`
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Require `value` to be a JSON object
pub fn require_object(value: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    value.as_object().ok_or_else(|| {
        ValidationErrors::single(ValidationIssue::invalid_type(
            &[],
            "object",
            json_type_name(value),
        ))
    })
}

/// Require a string field of at least `min_len` characters
pub fn require_string(
    object: &Map<String, Value>,
    field: &str,
    min_len: usize,
    too_short_message: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match object.get(field) {
        None => {
            errors.push(ValidationIssue::invalid_type(&[field], "string", "undefined"));
            None
        }
        Some(Value::String(s)) => {
            if s.chars().count() < min_len {
                errors.push(ValidationIssue::too_small(
                    &[field],
                    "string",
                    min_len as f64,
                    too_short_message,
                ));
                None
            } else {
                Some(s.clone())
            }
        }
        Some(other) => {
            errors.push(ValidationIssue::invalid_type(
                &[field],
                "string",
                json_type_name(other),
            ));
            None
        }
    }
}

/// Require a JSON number field inside `range`
pub fn require_number_in(
    object: &Map<String, Value>,
    field: &str,
    range: &RangeInclusive<f64>,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    match object.get(field) {
        None => {
            errors.push(ValidationIssue::invalid_type(&[field], "number", "undefined"));
            None
        }
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) => check_range(field, v, range, errors),
            None => {
                errors.push(ValidationIssue::invalid_type(&[field], "number", "nan"));
                None
            }
        },
        Some(other) => {
            errors.push(ValidationIssue::invalid_type(
                &[field],
                "number",
                json_type_name(other),
            ));
            None
        }
    }
}

/// Coerce a raw text parameter to a number inside `range`
///
/// Text converts the way a JavaScript `Number(text)` call would: blank
/// text is 0, `0x`/`0o`/`0b` literals are read in their radix and
/// `Infinity` is the only spelling of an infinite value. Absent and
/// unconvertible input report `received: "nan"`.
pub fn coerce_number_in(
    raw: Option<&str>,
    field: &str,
    range: &RangeInclusive<f64>,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    let parsed = raw.and_then(text_to_number);

    match parsed {
        Some(v) => check_range(field, v, range, errors),
        None => {
            errors.push(ValidationIssue::invalid_type(&[field], "number", "nan"));
            None
        }
    }
}

/// Numeric value of `text`, or `None` where the conversion yields NaN
fn text_to_number(text: &str) -> Option<f64> {
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if text.is_empty() {
        return Some(0.0);
    }

    let prefix = text.get(..2).map(str::to_ascii_lowercase);
    let radix = match prefix.as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return radix_literal(&text[2..], radix);
    }

    let (sign, unsigned) = match text.as_bytes()[0] {
        b'-' => (-1.0, &text[1..]),
        b'+' => (1.0, &text[1..]),
        _ => (1.0, text),
    };
    if unsigned == "Infinity" {
        return Some(sign * f64::INFINITY);
    }

    // Rules out `inf`, `nan` and other spellings only Rust accepts
    let decimal = unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal || !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    unsigned.parse::<f64>().ok().map(|v| sign * v)
}

fn radix_literal(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

fn check_range(
    field: &str,
    value: f64,
    range: &RangeInclusive<f64>,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    let (min, max) = (*range.start(), *range.end());
    if value < min {
        errors.push(ValidationIssue::too_small(
            &[field],
            "number",
            min,
            format!("Number must be greater than or equal to {}", min),
        ));
        None
    } else if value > max {
        errors.push(ValidationIssue::too_big(
            &[field],
            "number",
            max,
            format!("Number must be less than or equal to {}", max),
        ));
        None
    } else {
        Some(value)
    }
}
