//! The interpretation pipeline: parse, filter, disambiguate, build.
//!
//! The interpreter owns only immutable configuration — prefix and
//! delimiter characters, the converter registry, an optional instance
//! factory. Every [`interpret`](Interpreter::interpret) call is
//! independent: the catalog is rebuilt from the universe, all mutable
//! state lives in the returned [`Interpretation`], and the interpreter
//! itself can be shared across threads.

use std::any::Any;

use indexmap::IndexMap;
use log::debug;

use crate::conversion::Converters;
use crate::error::{Diagnostic, Error, Result};
use crate::interpretation::Interpretation;
use crate::universe::{Factory, Universe};

/// Parameter prefix characters trimmed from the start of a key.
pub const DEFAULT_PREFIXES: [char; 2] = ['-', '/'];
/// Delimiter characters trimmed from both ends of keys and values.
pub const DEFAULT_DELIMITERS: [char; 2] = ['"', '\''];

/// The command-line interpreter, core of this crate.
pub struct Interpreter {
    prefixes: Vec<char>,
    delimiters: Vec<char>,
    converters: Converters,
    factory: Option<Box<Factory>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES.to_vec(),
            delimiters: DEFAULT_DELIMITERS.to_vec(),
            converters: Converters::with_defaults(),
            factory: None,
        }
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the parameter prefix characters.
    pub fn with_prefixes(mut self, prefixes: Vec<char>) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Replaces the value delimiter characters.
    pub fn with_delimiters(mut self, delimiters: Vec<char>) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Replaces the converter registry.
    pub fn with_converters(mut self, converters: Converters) -> Self {
        self.converters = converters;
        self
    }

    /// Installs an instance factory consulted before default construction.
    pub fn with_factory(
        mut self,
        factory: impl Fn(&str) -> Option<Box<dyn Any>> + 'static,
    ) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Interprets the argument vector against the universe's shapes.
    ///
    /// Token 0 is the verb, token 1 the noun, the rest `key=value`
    /// parameters. The result carries either the constructed command or
    /// the diagnostics explaining why there is none, together with the
    /// candidate descriptors relevant for help output.
    pub fn interpret<'u, C: 'static>(
        &self,
        universe: &'u Universe<C>,
        args: &[String],
    ) -> Interpretation<'u, C> {
        let verb = args.first().map(String::as_str);
        let noun = args.get(1).map(String::as_str).unwrap_or_default();

        let mut interpretation = Interpretation::new(universe, args);
        debug!(
            "interpreting {:?} against {} commands",
            args,
            interpretation.command_descriptors.len()
        );

        match self.parse_parameters(args) {
            Ok(parameters) => interpretation.parameters = parameters,
            Err(error) => interpretation.diagnostics.push(Diagnostic::message(error)),
        }
        let verb = match verb {
            Some(verb) if !verb.trim().is_empty() => verb,
            _ => {
                interpretation
                    .diagnostics
                    .push(Diagnostic::message(Error::MissingVerb));
                return interpretation;
            }
        };
        if !interpretation.diagnostics.is_empty() {
            return interpretation;
        }

        let catalog = interpretation.command_descriptors.clone();
        interpretation
            .command_descriptors
            .retain(|descriptor| descriptor.is_matching_command(verb, noun));
        debug!(
            "{} candidates match `{verb} {noun}`",
            interpretation.command_descriptors.len()
        );

        if !interpretation.command_descriptors.is_empty() {
            let narrowed = {
                let Interpretation {
                    command_descriptors,
                    parameters,
                    diagnostics,
                    ..
                } = &mut interpretation;
                command_descriptors
                    .iter()
                    .filter(|descriptor| {
                        descriptor.is_matching_parameters(
                            parameters.keys().map(String::as_str),
                            diagnostics,
                        )
                    })
                    .cloned()
                    .collect::<Vec<_>>()
            };
            // Narrow only on an exact hit; otherwise the broader set is
            // kept so help output still enumerates the ambiguity.
            if narrowed.len() == 1 {
                debug!("narrowed to `{}` by parameters", narrowed[0].type_name());
                interpretation.command_descriptors = narrowed;
            }
        }

        match interpretation.command_descriptors.len() {
            1 => {
                if !interpretation.diagnostics.is_empty() {
                    return interpretation;
                }
            }
            0 => {
                interpretation
                    .diagnostics
                    .push(Diagnostic::message(Error::unknown_command(verb, noun)));
                interpretation.command_descriptors = catalog;
                return interpretation;
            }
            _ => {
                interpretation
                    .diagnostics
                    .push(Diagnostic::message(Error::ambiguous_command(verb, noun)));
                return interpretation;
            }
        }

        interpretation.create_command(&self.converters, self.factory.as_deref());
        interpretation
    }

    /// Parses tokens two onward into the ordered parameter mapping.
    ///
    /// Each token splits on its first `=`; the key loses leading prefix
    /// characters and surrounding delimiters, the value its surrounding
    /// delimiters. A token without `=` maps to an empty value. Duplicate
    /// keys overwrite silently; a key that trims away to nothing is a
    /// malformed token.
    fn parse_parameters(&self, args: &[String]) -> Result<IndexMap<String, String>> {
        let mut parameters = IndexMap::new();
        for token in args.iter().skip(2) {
            if token.trim().is_empty() {
                continue;
            }
            let (raw_key, raw_value) = token.split_once('=').unwrap_or((token.as_str(), ""));
            let key = raw_key
                .trim()
                .trim_start_matches(|character| self.prefixes.contains(&character))
                .trim_matches(|character| self.delimiters.contains(&character));
            let value = raw_value
                .trim()
                .trim_matches(|character| self.delimiters.contains(&character));
            if key.is_empty() {
                return Err(Error::MalformedToken(token.clone()));
            }
            parameters.insert(key.to_string(), value.to_string());
        }
        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    fn parse(tokens: &[&str]) -> IndexMap<String, String> {
        Interpreter::new().parse_parameters(&args(tokens)).unwrap()
    }

    #[test]
    fn splits_on_the_first_equals_only() {
        let parameters = parse(&["verb", "noun", "Filter=a=b"]);
        assert_eq!(parameters.get("Filter"), Some(&"a=b".to_string()));
    }

    #[test]
    fn trims_prefixes_and_delimiters() {
        let parameters = parse(&["verb", "noun", "--Name='abc'", "/Type=\"1\""]);
        assert_eq!(parameters.get("Name"), Some(&"abc".to_string()));
        assert_eq!(parameters.get("Type"), Some(&"1".to_string()));
    }

    #[test]
    fn token_without_equals_maps_to_empty_value() {
        let parameters = parse(&["verb", "noun", "--Verbose"]);
        assert_eq!(parameters.get("Verbose"), Some(&String::new()));
    }

    #[test]
    fn duplicate_keys_overwrite_silently() {
        let parameters = parse(&["verb", "noun", "Name=a", "Name=b"]);
        assert_eq!(parameters.len(), 1);
        assert_eq!(parameters.get("Name"), Some(&"b".to_string()));
    }

    #[test]
    fn blank_tokens_are_skipped() {
        let parameters = parse(&["verb", "noun", "  ", "Name=a"]);
        assert_eq!(parameters.len(), 1);
    }

    #[test]
    fn keys_preserve_argument_order() {
        let parameters = parse(&["verb", "noun", "B=2", "A=1", "C=3"]);
        let keys: Vec<&str> = parameters.keys().map(String::as_str).collect();
        assert_eq!(keys, ["B", "A", "C"]);
    }

    #[test]
    fn key_trimming_to_nothing_is_malformed() {
        let error = Interpreter::new()
            .parse_parameters(&args(&["verb", "noun", "=abc"]))
            .unwrap_err();
        assert!(matches!(error, Error::MalformedToken(_)));
        let error = Interpreter::new()
            .parse_parameters(&args(&["verb", "noun", "--='x'"]))
            .unwrap_err();
        assert!(matches!(error, Error::MalformedToken(_)));
    }

    #[test]
    fn custom_prefixes_replace_the_defaults() {
        let interpreter = Interpreter::new().with_prefixes(vec!['+']);
        let parameters = interpreter
            .parse_parameters(&args(&["verb", "noun", "+Name=a", "-Negative=b"]))
            .unwrap();
        assert!(parameters.contains_key("Name"));
        assert!(parameters.contains_key("-Negative"));
    }
}
