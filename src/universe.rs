//! The closed set of command shapes the interpreter can produce.
//!
//! Rust has no runtime enumeration of subtypes, so the shapes are declared
//! up front: the host registers each concrete command struct into a
//! [`Universe`] keyed by its base command type `C` (usually an enum with
//! one variant per shape). Registration captures everything the engine
//! needs at interpretation time — construction, typed member setters and
//! getters, identity metadata and validation rules — behind type-erased
//! closures, so the interpretation pipeline itself never needs to know the
//! concrete types.
//!
//! # Examples
//!
//! ```
//! use command_interpreter::{Param, Rule, Shape, Universe};
//!
//! #[derive(Debug, Default)]
//! struct ListImage {
//!     name: String,
//! }
//!
//! enum Command {
//!     ListImage(ListImage),
//! }
//!
//! impl From<ListImage> for Command {
//!     fn from(value: ListImage) -> Self {
//!         Command::ListImage(value)
//!     }
//! }
//!
//! let universe = Universe::<Command>::new().shape(
//!     Shape::<ListImage>::new("ListImage").parameter(
//!         Param::bound(
//!             "Name",
//!             |command: &ListImage| command.name.clone(),
//!             |command: &mut ListImage, value: String| command.name = value,
//!         )
//!         .rule(Rule::Required),
//!     ),
//! );
//! ```

use std::any::{type_name, Any, TypeId};
use std::marker::PhantomData;

use crate::validation::{FieldValue, Rule};

/// Optional instance factory: given a shape's type name, produce the
/// instance to populate, or `None` to fall back to default construction.
pub type Factory = dyn Fn(&str) -> Option<Box<dyn Any>>;

pub(crate) type SetFn = Box<dyn Fn(&mut dyn Any, Box<dyn Any>)>;
pub(crate) type GetFn = Box<dyn Fn(&dyn Any) -> FieldValue>;

/// One registered settable member, type-erased.
pub(crate) struct Member {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) value_type: TypeId,
    pub(crate) value_type_name: &'static str,
    pub(crate) set: SetFn,
    pub(crate) get: GetFn,
    pub(crate) rules: Vec<Rule>,
}

/// Registration builder for one settable member of a shape `S`.
pub struct Param<S> {
    member: Member,
    _shape: PhantomData<fn(S)>,
}

impl<S: Any> Param<S> {
    /// Declares a member bound to one value type `T`, with a getter used
    /// for rule evaluation and a setter used for assignment.
    ///
    /// The setter receives the converted value of the underlying type;
    /// wrapping into an `Option` field happens inside the closure. The
    /// getter may return anything convertible to [`FieldValue`] — for a
    /// custom-typed field, map it through `Display` first.
    pub fn bound<T, F, G, A>(name: impl Into<String>, get: G, set: A) -> Self
    where
        T: Any,
        F: Into<FieldValue>,
        G: Fn(&S) -> F + 'static,
        A: Fn(&mut S, T) + 'static,
    {
        let set: SetFn = Box::new(move |instance, value| {
            if let (Some(instance), Ok(value)) =
                (instance.downcast_mut::<S>(), value.downcast::<T>())
            {
                set(instance, *value);
            }
        });
        let get: GetFn = Box::new(move |instance| match instance.downcast_ref::<S>() {
            Some(instance) => get(instance).into(),
            None => FieldValue::Absent,
        });
        Self {
            member: Member {
                name: name.into(),
                description: None,
                value_type: TypeId::of::<T>(),
                value_type_name: type_name::<T>(),
                set,
                get,
                rules: Vec::new(),
            },
            _shape: PhantomData,
        }
    }

    /// Attaches a help description.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.member.description = Some(text.into());
        self
    }

    /// Appends a validation rule; rules are evaluated in the order given.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.member.rules.push(rule);
        self
    }
}

/// Registration builder for one concrete command shape `S`.
pub struct Shape<S> {
    type_name: String,
    verb: Option<String>,
    noun: Option<String>,
    description: Option<String>,
    members: Vec<Member>,
    _shape: PhantomData<fn() -> S>,
}

impl<S: Any + Default> Shape<S> {
    /// Declares a shape under its simple type name. Without an explicit
    /// [`identity`](Shape::identity) the verb and noun are derived from
    /// the name's internal capitalization.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            verb: None,
            noun: None,
            description: None,
            members: Vec::new(),
            _shape: PhantomData,
        }
    }

    /// Overrides the conventional verb/noun identity. The noun may be
    /// empty for a verb-only command.
    pub fn identity(mut self, verb: impl Into<String>, noun: impl Into<String>) -> Self {
        self.verb = Some(verb.into());
        self.noun = Some(noun.into());
        self
    }

    /// Attaches a help description.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Adds a settable parameter.
    pub fn parameter(mut self, parameter: Param<S>) -> Self {
        self.members.push(parameter.member);
        self
    }
}

/// One registered shape, fully type-erased against the base type `C`.
pub(crate) struct ShapeDef<C> {
    pub(crate) type_name: String,
    pub(crate) instance_type: TypeId,
    pub(crate) verb: Option<String>,
    pub(crate) noun: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) members: Vec<Member>,
    pub(crate) construct: Box<dyn Fn() -> Box<dyn Any>>,
    pub(crate) finish: Box<dyn Fn(Box<dyn Any>) -> Option<C>>,
}

/// The type universe: every command shape derivable from the base type
/// `C`, plus the namespace-like identity used for the feedback title.
///
/// Immutable once built; interpretation only reads it, so a universe can
/// be shared freely across calls and threads.
pub struct Universe<C> {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) shapes: Vec<ShapeDef<C>>,
}

impl<C: 'static> Default for Universe<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> Universe<C> {
    pub fn new() -> Self {
        Self {
            name: None,
            description: None,
            shapes: Vec::new(),
        }
    }

    /// Names the universe; shown on the feedback title line.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Describes the universe; shown on the feedback title line.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Registers a shape. Registration order is the catalog order.
    pub fn shape<S>(mut self, shape: Shape<S>) -> Self
    where
        S: Any + Default + Into<C>,
    {
        self.shapes.push(ShapeDef {
            type_name: shape.type_name,
            instance_type: TypeId::of::<S>(),
            verb: shape.verb,
            noun: shape.noun,
            description: shape.description,
            members: shape.members,
            construct: Box::new(|| Box::new(S::default())),
            finish: Box::new(|instance| instance.downcast::<S>().ok().map(|shape| (*shape).into())),
        });
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Number of registered shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Probe {
        label: String,
        count: i64,
    }

    enum Holder {
        Probe(Probe),
    }

    impl From<Probe> for Holder {
        fn from(value: Probe) -> Self {
            Holder::Probe(value)
        }
    }

    fn probe_universe() -> Universe<Holder> {
        Universe::<Holder>::new().shape(
            Shape::<Probe>::new("Probe")
                .describe("a probe")
                .parameter(Param::bound(
                    "Label",
                    |probe: &Probe| probe.label.clone(),
                    |probe: &mut Probe, value: String| probe.label = value,
                ))
                .parameter(Param::bound(
                    "Count",
                    |probe: &Probe| probe.count,
                    |probe: &mut Probe, value: i64| probe.count = value,
                )),
        )
    }

    #[test]
    fn registration_captures_member_metadata() {
        let universe = probe_universe();
        assert_eq!(universe.len(), 1);
        let shape = &universe.shapes[0];
        assert_eq!(shape.type_name, "Probe");
        assert_eq!(shape.description.as_deref(), Some("a probe"));
        assert_eq!(shape.members.len(), 2);
        assert_eq!(shape.members[1].value_type, TypeId::of::<i64>());
    }

    #[test]
    fn erased_setter_and_getter_reach_the_field() {
        let universe = probe_universe();
        let shape = &universe.shapes[0];
        let mut instance = (shape.construct)();

        (shape.members[0].set)(instance.as_mut(), Box::new("abc".to_string()));
        assert_eq!(
            (shape.members[0].get)(instance.as_ref()),
            FieldValue::Text("abc".to_string())
        );

        // Values of the wrong type are dropped, not applied.
        (shape.members[1].set)(instance.as_mut(), Box::new("oops".to_string()));
        assert_eq!(
            (shape.members[1].get)(instance.as_ref()),
            FieldValue::Number(0.0)
        );

        let Holder::Probe(probe) = (shape.finish)(instance).unwrap();
        assert_eq!(probe.label, "abc");
    }
}
