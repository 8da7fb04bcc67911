use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Target type a descriptive field is coerced to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Float,
    Int,
    FloatArray,
}

/// A coerced descriptive field value
///
/// `Missing` covers both absent attributes and values that failed coercion.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(untagged))]
pub enum FieldValue {
    Text(String),
    Float(f64),
    Int(i64),
    FloatArray(Vec<f32>),
    #[default]
    Missing,
}

impl FieldValue {
    /// Returns whether the value is missing or unparsable
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Returns the text value, if this is a text field
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::FloatArray(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(" "))
            }
            FieldValue::Missing => Ok(()),
        }
    }
}

/// Parses every decimal number found in a string
///
/// Accepts backslash-separated DICOM multi-values as well as loosely
/// formatted text like `"[0.5, 0.5]"` or `"1.5e-1 1.5e-1"`.
/// Returns `None` if no number is found.
pub fn parse_float_list(s: &str) -> Option<Vec<f32>> {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| {
        Regex::new(r"[-+]?\d*\.?\d+(?:[eE][-+]?\d+)?").expect("Failed to compile regex")
    });

    let values: Vec<f32> = re
        .find_iter(s)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0.5\\0.5", vec![0.5, 0.5])]
    #[case("0.194 0.194", vec![0.194, 0.194])]
    #[case("[0.1, 0.1]", vec![0.1, 0.1])]
    #[case("1.5e-1\\1.5e-1", vec![0.15, 0.15])]
    #[case("1.5e+1", vec![15.0])]
    fn test_parse_float_list(#[case] input: &str, #[case] expected: Vec<f32>) {
        assert_eq!(parse_float_list(input), Some(expected));
    }

    #[test]
    fn test_parse_float_list_invalid() {
        assert_eq!(parse_float_list("invalid"), None);
        assert_eq!(parse_float_list(""), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Text("CHEST".to_string()).to_string(), "CHEST");
        assert_eq!(FieldValue::Float(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::Int(512).to_string(), "512");
        assert_eq!(FieldValue::FloatArray(vec![0.5, 0.75]).to_string(), "[0.5 0.75]");
        assert_eq!(FieldValue::Missing.to_string(), "");
    }

    #[test]
    fn test_missing_default() {
        assert!(FieldValue::default().is_missing());
        assert_eq!(FieldValue::Text("x".to_string()).as_text(), Some("x"));
        assert_eq!(FieldValue::Int(1).as_text(), None);
    }
}
