//! Command descriptors and the matching pipeline over them.
//!
//! A catalog is the metadata view of a [`Universe`](crate::Universe):
//! one [`CommandDescriptor`] per registered shape, with the verb/noun
//! identity resolved (explicit metadata wins over the name convention)
//! and minimal abbreviations computed against the sibling set. The
//! catalog is rebuilt on every interpretation call; abbreviations depend
//! on all siblings, so they can only be computed once the whole set is
//! known.

use crate::abbreviation::{minimal_abbreviation, split_camel_case, Casing};
use crate::error::{Diagnostic, Error};
use crate::universe::{Member, ShapeDef, Universe};

/// Immutable metadata describing one command shape within a catalog.
pub struct CommandDescriptor<'u, C> {
    pub(crate) shape: &'u ShapeDef<C>,
    verb: String,
    noun: String,
    verb_abbreviation: String,
    noun_abbreviation: String,
    parameters: Vec<ParameterDescriptor<'u>>,
}

/// Immutable metadata describing one settable parameter of a command.
pub struct ParameterDescriptor<'u> {
    pub(crate) member: &'u Member,
    name_abbreviation: String,
}

impl<C> Clone for CommandDescriptor<'_, C> {
    fn clone(&self) -> Self {
        Self {
            shape: self.shape,
            verb: self.verb.clone(),
            noun: self.noun.clone(),
            verb_abbreviation: self.verb_abbreviation.clone(),
            noun_abbreviation: self.noun_abbreviation.clone(),
            parameters: self.parameters.clone(),
        }
    }
}

impl Clone for ParameterDescriptor<'_> {
    fn clone(&self) -> Self {
        Self {
            member: self.member,
            name_abbreviation: self.name_abbreviation.clone(),
        }
    }
}

impl<'u, C> CommandDescriptor<'u, C> {
    pub fn type_name(&self) -> &str {
        &self.shape.type_name
    }

    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// The noun; empty for a verb-only command.
    pub fn noun(&self) -> &str {
        &self.noun
    }

    pub fn description(&self) -> Option<&str> {
        self.shape.description.as_deref()
    }

    pub fn verb_abbreviation(&self) -> &str {
        &self.verb_abbreviation
    }

    pub fn noun_abbreviation(&self) -> &str {
        &self.noun_abbreviation
    }

    pub fn parameters(&self) -> &[ParameterDescriptor<'u>] {
        &self.parameters
    }

    /// Tests whether this command corresponds to the supplied verb/noun
    /// pair, both matched as case-insensitive prefixes. An empty supplied
    /// noun matches every descriptor noun.
    pub fn is_matching_command(&self, verb: &str, noun: &str) -> bool {
        Casing::Insensitive.starts_with(&self.verb, verb)
            && Casing::Insensitive.starts_with(&self.noun, noun)
    }

    /// Resolves a supplied parameter name, possibly abbreviated, against
    /// this command's parameters.
    ///
    /// An exact case-insensitive match wins outright when it is unique;
    /// otherwise every parameter whose name starts with the fragment is
    /// returned — zero, one, or many.
    pub fn matching_parameters(&self, name: &str) -> Vec<&ParameterDescriptor<'u>> {
        let exact: Vec<&ParameterDescriptor<'u>> = self
            .parameters
            .iter()
            .filter(|parameter| Casing::Insensitive.equals(parameter.name(), name))
            .collect();
        if exact.len() == 1 {
            return exact;
        }
        self.parameters
            .iter()
            .filter(|parameter| Casing::Insensitive.starts_with(parameter.name(), name))
            .collect()
    }

    /// Tests whether this command accepts every supplied parameter name
    /// without ambiguity.
    ///
    /// Every name is checked even after a failure; each name resolving to
    /// more than one parameter appends an ambiguity diagnostic tagged with
    /// that name. Names resolving to nothing fail the match silently.
    pub fn is_matching_parameters<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> bool {
        let mut all_unique = true;
        for name in names {
            let matches = self.matching_parameters(name);
            if matches.len() > 1 {
                diagnostics.push(Diagnostic::tagged(name, Error::AmbiguousParameter));
            }
            if matches.len() != 1 {
                all_unique = false;
            }
        }
        all_unique
    }
}

impl<'u> ParameterDescriptor<'u> {
    pub fn name(&self) -> &str {
        &self.member.name
    }

    pub fn description(&self) -> Option<&str> {
        self.member.description.as_deref()
    }

    pub fn name_abbreviation(&self) -> &str {
        &self.name_abbreviation
    }
}

/// Builds the full catalog for a universe, in registration order.
///
/// Two passes: first every descriptor is collected with its verb/noun
/// identity resolved, then abbreviations are computed — verbs against all
/// catalog verbs, nouns against the nouns sharing the same verb, parameter
/// names against their own command's parameters.
pub fn build_catalog<C>(universe: &Universe<C>) -> Vec<CommandDescriptor<'_, C>> {
    let mut descriptors: Vec<CommandDescriptor<'_, C>> = universe
        .shapes
        .iter()
        .map(|shape| {
            let segments = split_camel_case(&shape.type_name);
            let verb = shape
                .verb
                .clone()
                .unwrap_or_else(|| segments.first().cloned().unwrap_or_default());
            let noun = shape
                .noun
                .clone()
                .unwrap_or_else(|| segments.get(1).cloned().unwrap_or_default());
            let parameters = shape
                .members
                .iter()
                .map(|member| ParameterDescriptor {
                    member,
                    name_abbreviation: member.name.clone(),
                })
                .collect();
            CommandDescriptor {
                shape,
                verb_abbreviation: verb.clone(),
                noun_abbreviation: noun.clone(),
                verb,
                noun,
                parameters,
            }
        })
        .collect();

    let verbs: Vec<String> = descriptors
        .iter()
        .map(|descriptor| descriptor.verb.clone())
        .collect();
    let identities: Vec<(String, String)> = descriptors
        .iter()
        .map(|descriptor| (descriptor.verb.clone(), descriptor.noun.clone()))
        .collect();

    for descriptor in &mut descriptors {
        let nouns: Vec<String> = identities
            .iter()
            .filter(|(verb, _)| Casing::Insensitive.equals(verb, &descriptor.verb))
            .map(|(_, noun)| noun.clone())
            .collect();
        descriptor.verb_abbreviation =
            minimal_abbreviation(&descriptor.verb, &verbs, Casing::Insensitive);
        descriptor.noun_abbreviation =
            minimal_abbreviation(&descriptor.noun, &nouns, Casing::Insensitive);

        let names: Vec<String> = descriptor
            .parameters
            .iter()
            .map(|parameter| parameter.name().to_string())
            .collect();
        for parameter in &mut descriptor.parameters {
            parameter.name_abbreviation =
                minimal_abbreviation(&parameter.member.name, &names, Casing::Insensitive);
        }
    }

    descriptors
}
