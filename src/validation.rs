//! Declarative validation rules evaluated after command construction.
//!
//! Rules are attached to a parameter at registration time and evaluated
//! against a snapshot of the field's value once every supplied parameter
//! has been assigned. Each violation becomes a [`Diagnostic`] tagged with
//! the member name; a command with any violation is discarded rather than
//! returned partially valid.

use regex::Regex;

use crate::error::Diagnostic;

/// A uniform snapshot of one field's current value, read back through the
/// parameter's getter for rule evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Absent,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<char> for FieldValue {
    fn from(value: char) -> Self {
        FieldValue::Text(value.to_string())
    }
}

macro_rules! numeric_field_value {
    ($($numeric:ty),*) => {
        $(
            impl From<$numeric> for FieldValue {
                fn from(value: $numeric) -> Self {
                    FieldValue::Number(value as f64)
                }
            }
        )*
    };
}

numeric_field_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => FieldValue::Absent,
        }
    }
}

/// A declarative constraint on one parameter.
///
/// Absent values pass every rule except [`Rule::Required`]; a rule applied
/// to a value of a kind it does not constrain passes as well.
#[derive(Debug, Clone)]
pub enum Rule {
    /// The field must carry a value; empty or whitespace-only text counts
    /// as missing.
    Required,
    /// Numeric value must fall within the inclusive bounds.
    Range(f64, f64),
    /// Text must be at least this many characters long.
    MinLength(usize),
    /// Text must match the expression.
    Pattern(Regex),
}

impl Rule {
    /// Checks one field value against this rule, returning the violation
    /// diagnostic if any.
    pub fn check(&self, name: &str, value: &FieldValue) -> Option<Diagnostic> {
        match self {
            Rule::Required => {
                let missing = match value {
                    FieldValue::Absent => true,
                    FieldValue::Text(text) => text.trim().is_empty(),
                    _ => false,
                };
                missing.then(|| Diagnostic::tagged(name, format!("the {name} field is required")))
            }
            Rule::Range(minimum, maximum) => match value {
                FieldValue::Number(number) if number < minimum || number > maximum => {
                    Some(Diagnostic::tagged(
                        name,
                        format!("{name} must be between {minimum} and {maximum}"),
                    ))
                }
                _ => None,
            },
            Rule::MinLength(minimum) => match value {
                FieldValue::Text(text) if text.chars().count() < *minimum => {
                    Some(Diagnostic::tagged(
                        name,
                        format!("{name} must be at least {minimum} characters long"),
                    ))
                }
                _ => None,
            },
            Rule::Pattern(pattern) => match value {
                FieldValue::Text(text) if !pattern.is_match(text) => Some(Diagnostic::tagged(
                    name,
                    format!("{name} does not match `{pattern}`"),
                )),
                _ => None,
            },
        }
    }
}

/// Evaluates a rule list against one field, appending every violation.
pub fn evaluate(
    name: &str,
    rules: &[Rule],
    value: &FieldValue,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for rule in rules {
        if let Some(violation) = rule.check(name, value) {
            diagnostics.push(violation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_absent_and_blank_text() {
        assert!(Rule::Required.check("Name", &FieldValue::Absent).is_some());
        assert!(Rule::Required
            .check("Name", &FieldValue::Text(String::new()))
            .is_some());
        assert!(Rule::Required
            .check("Name", &FieldValue::Text("  ".to_string()))
            .is_some());
        assert!(Rule::Required
            .check("Name", &FieldValue::Text("abc".to_string()))
            .is_none());
        assert!(Rule::Required.check("Flag", &FieldValue::Bool(false)).is_none());
    }

    #[test]
    fn range_is_inclusive_and_ignores_non_numbers() {
        let rule = Rule::Range(1.0, 9.0);
        assert!(rule.check("TypeId", &FieldValue::Number(0.0)).is_some());
        assert!(rule.check("TypeId", &FieldValue::Number(1.0)).is_none());
        assert!(rule.check("TypeId", &FieldValue::Number(9.0)).is_none());
        assert!(rule.check("TypeId", &FieldValue::Number(10.0)).is_some());
        assert!(rule.check("TypeId", &FieldValue::Absent).is_none());
        assert!(rule
            .check("TypeId", &FieldValue::Text("0".to_string()))
            .is_none());
    }

    #[test]
    fn range_violation_names_the_bounds() {
        let violation = Rule::Range(1.0, 9.0)
            .check("TypeId", &FieldValue::Number(0.0))
            .unwrap();
        assert_eq!(violation.field_names, vec!["TypeId".to_string()]);
        assert!(violation.message.contains("TypeId must be between 1 and 9"));
    }

    #[test]
    fn min_length_counts_characters() {
        let rule = Rule::MinLength(3);
        assert!(rule.check("Name", &FieldValue::Text("ab".to_string())).is_some());
        assert!(rule.check("Name", &FieldValue::Text("abc".to_string())).is_none());
        assert!(rule.check("Name", &FieldValue::Absent).is_none());
    }

    #[test]
    fn pattern_must_match_text() {
        let rule = Rule::Pattern(Regex::new("^[a-z]+$").unwrap());
        assert!(rule.check("Name", &FieldValue::Text("abc".to_string())).is_none());
        assert!(rule.check("Name", &FieldValue::Text("123".to_string())).is_some());
        assert!(rule.check("Name", &FieldValue::Absent).is_none());
    }

    #[test]
    fn evaluate_accumulates_every_violation() {
        let rules = vec![Rule::Required, Rule::MinLength(3)];
        let mut diagnostics = Vec::new();
        evaluate("Name", &rules, &FieldValue::Text(String::new()), &mut diagnostics);
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn option_converts_to_absent_or_inner() {
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Absent);
        assert_eq!(FieldValue::from(Some(3i64)), FieldValue::Number(3.0));
    }
}
