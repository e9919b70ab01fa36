//! The outcome of one interpretation call, and its feedback rendering.
//!
//! An interpretation carries either a fully constructed and validated
//! command instance, or one or more diagnostics — never both. Alongside
//! the outcome it keeps the candidate descriptor set that was still in
//! play when the pipeline stopped, so feedback can show contextual help:
//! the whole catalog after a usage error, the ambiguous subset after an
//! ambiguous command, the single match after a validation failure.

use std::any::{Any, TypeId};

use indexmap::IndexMap;
use log::{debug, trace};

use crate::catalog::{build_catalog, CommandDescriptor};
use crate::conversion::Converters;
use crate::error::{Diagnostic, Error};
use crate::universe::{Factory, Universe};
use crate::validation::evaluate;

/// Result of interpreting one argument vector against a universe.
///
/// Invariant: [`instance`](Interpretation::instance) is present exactly
/// when [`diagnostics`](Interpretation::diagnostics) is empty.
pub struct Interpretation<'u, C> {
    pub(crate) universe: &'u Universe<C>,
    pub(crate) args: Vec<String>,
    pub(crate) instance: Option<C>,
    pub(crate) command_descriptors: Vec<CommandDescriptor<'u, C>>,
    pub(crate) parameters: IndexMap<String, String>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'u, C: 'static> Interpretation<'u, C> {
    pub(crate) fn new(universe: &'u Universe<C>, args: &[String]) -> Self {
        Self {
            universe,
            args: args.to_vec(),
            instance: None,
            command_descriptors: build_catalog(universe),
            parameters: IndexMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// The argument vector as received.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The interpreted command, when interpretation succeeded.
    pub fn instance(&self) -> Option<&C> {
        self.instance.as_ref()
    }

    /// Consumes the interpretation, yielding the command if any.
    pub fn into_instance(self) -> Option<C> {
        self.instance
    }

    /// The candidate descriptors still relevant to the outcome.
    pub fn command_descriptors(&self) -> &[CommandDescriptor<'u, C>] {
        &self.command_descriptors
    }

    /// The parsed name/value parameters, in argument order.
    pub fn parameters(&self) -> &IndexMap<String, String> {
        &self.parameters
    }

    /// All diagnostics collected during interpretation; empty on success.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Constructs the command from the single remaining descriptor,
    /// assigns converted parameter values, and validates the result.
    ///
    /// Any diagnostic recorded along the way — construction failure,
    /// conversion failure, rule violation — discards the instance; the
    /// interpretation then carries the diagnostics instead.
    pub fn create_command(&mut self, converters: &Converters, factory: Option<&Factory>) {
        let Self {
            command_descriptors,
            parameters,
            diagnostics,
            instance,
            ..
        } = self;

        if command_descriptors.len() != 1 {
            if diagnostics.is_empty() {
                diagnostics.push(Diagnostic::message(Error::UnresolvedCandidates(
                    command_descriptors.len(),
                )));
            }
            return;
        }
        let descriptor = &command_descriptors[0];
        let shape = descriptor.shape;

        let mut boxed: Box<dyn Any> = match factory.and_then(|factory| factory(&shape.type_name)) {
            Some(created) => {
                if created.as_ref().type_id() != shape.instance_type {
                    diagnostics.push(Diagnostic::tagged(
                        &shape.type_name,
                        Error::IncompatibleInstance(shape.type_name.clone()),
                    ));
                    return;
                }
                created
            }
            None => (shape.construct)(),
        };

        for (name, value) in parameters.iter() {
            let matches = descriptor.matching_parameters(name);
            if matches.len() != 1 {
                // Ambiguity was diagnosed during matching; unknown names
                // on an already unique command are ignored.
                trace!("parameter `{name}` skipped: {} matches", matches.len());
                continue;
            }
            let member = matches[0].member;
            if value.trim().is_empty() && member.value_type == TypeId::of::<bool>() {
                (member.set)(boxed.as_mut(), Box::new(true));
                continue;
            }
            match converters.parse(member.value_type, member.value_type_name, value) {
                Ok(converted) => (member.set)(boxed.as_mut(), converted),
                Err(error) => diagnostics.push(Diagnostic::tagged(name, error)),
            }
        }

        for member in &shape.members {
            let value = (member.get)(boxed.as_ref());
            evaluate(&member.name, &member.rules, &value, diagnostics);
        }

        if diagnostics.is_empty() {
            *instance = (shape.finish)(boxed);
        } else {
            debug!(
                "{} discarded with {} diagnostics",
                shape.type_name,
                diagnostics.len()
            );
        }
    }

    /// Emits the feedback lines for this interpretation: the title when
    /// the universe carries one, one marked line per diagnostic, and —
    /// with `show_help` — contextual help for every attached descriptor.
    ///
    /// Rendering is read-only and repeatable.
    pub fn feedback(&self, mut sink: impl FnMut(&str), show_help: bool) {
        if self.universe.name.is_some() || self.universe.description.is_some() {
            let title = [
                self.universe.name.as_deref(),
                self.universe.description.as_deref(),
            ]
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<&str>>()
            .join(" ");
            sink(&title);
        }

        for diagnostic in &self.diagnostics {
            sink(&format!("*** {diagnostic}"));
        }

        if !show_help {
            return;
        }
        for descriptor in &self.command_descriptors {
            sink(&format!(
                "  {:<8} {:<16} {} ({} {})",
                descriptor.verb(),
                descriptor.noun(),
                descriptor.description().unwrap_or_default(),
                descriptor.verb_abbreviation(),
                descriptor.noun_abbreviation(),
            ));
            for parameter in descriptor.parameters() {
                sink(&format!(
                    "    {:<23} {} ({})",
                    parameter.name(),
                    parameter.description().unwrap_or_default(),
                    parameter.name_abbreviation(),
                ));
            }
        }
    }
}
