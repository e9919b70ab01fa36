use std::fmt::{Display, Formatter};

use itertools::Itertools;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("usage: verb (noun) (parameters)")]
    MissingVerb,

    #[error("malformed parameter token: `{}`", .0)]
    MalformedToken(String),

    #[error("unknown command: {} {}", .verb, .noun)]
    UnknownCommand { verb: String, noun: String },

    #[error("ambiguous command: {} {}", .verb, .noun)]
    AmbiguousCommand { verb: String, noun: String },

    #[error("parameter abbreviation is ambiguous")]
    AmbiguousParameter,

    #[error("expecting one command to instantiate, got {}", .0)]
    UnresolvedCandidates(usize),

    #[error("factory returned an incompatible instance for {}", .0)]
    IncompatibleInstance(String),

    #[error("`{}` is not a valid value for {}: {}", .text, .type_name, .reason)]
    Conversion {
        type_name: &'static str,
        text: String,
        reason: String,
    },

    #[error("no converter registered for {}", .0)]
    MissingConverter(&'static str),
}

impl Error {
    pub fn unknown_command(verb: &str, noun: &str) -> Self {
        Self::UnknownCommand {
            verb: verb.to_string(),
            noun: noun.to_string(),
        }
    }

    pub fn ambiguous_command(verb: &str, noun: &str) -> Self {
        Self::AmbiguousCommand {
            verb: verb.to_string(),
            noun: noun.to_string(),
        }
    }

    pub fn conversion(type_name: &'static str, text: &str, reason: String) -> Self {
        Self::Conversion {
            type_name,
            text: text.to_string(),
            reason,
        }
    }
}

/// One piece of interpretation feedback: a message tagged with the names of
/// the fields it concerns. The tag list is empty for vector-level problems
/// such as a missing verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub field_names: Vec<String>,
    pub message: String,
}

impl Diagnostic {
    /// An untagged diagnostic.
    pub fn message(message: impl ToString) -> Self {
        Self {
            field_names: Vec::new(),
            message: message.to_string(),
        }
    }

    /// A diagnostic tagged with a single field name.
    pub fn tagged(field_name: impl Into<String>, message: impl ToString) -> Self {
        Self {
            field_names: vec![field_name.into()],
            message: message.to_string(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.field_names.is_empty() {
            formatter.write_str(&self.message)
        } else {
            write!(
                formatter,
                "{}: {}",
                self.field_names.iter().join(", "),
                self.message
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_diagnostic_displays_message_only() {
        let diagnostic = Diagnostic::message("usage: verb (noun) (parameters)");
        assert_eq!(diagnostic.to_string(), "usage: verb (noun) (parameters)");
    }

    #[test]
    fn tagged_diagnostic_joins_field_names() {
        let mut diagnostic = Diagnostic::tagged("Name", "field is required");
        diagnostic.field_names.push("TypeId".to_string());
        assert_eq!(diagnostic.to_string(), "Name, TypeId: field is required");
    }

    #[test]
    fn conversion_error_names_type_and_text() {
        let error = Error::conversion("i64", "abc", "invalid digit".to_string());
        let message = error.to_string();
        assert!(message.contains("abc"));
        assert!(message.contains("i64"));
    }
}
