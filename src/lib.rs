//! Command-Line Interpretation Engine
//!
//! This crate interprets free-form argument vectors of the form
//! `verb noun key=value...` into strongly-typed command objects drawn from
//! a closed set of registered shapes. It is an interpretation *engine*,
//! not a specific CLI: the host declares its command shapes in a
//! [`Universe`], hands the interpreter an argument vector, and gets back
//! either a constructed, validated command or the diagnostics and
//! contextual help explaining why there is none.
//!
//! # Key Features
//!
//! - **Catalog discovery**: verb/noun identities derived from type names
//!   or explicit metadata, with minimal unique abbreviations computed
//!   against the sibling set
//! - **Abbreviation-tolerant matching**: `L Ima T=1` resolves like
//!   `List Image TypeId=1` as long as each fragment stays unambiguous
//! - **Pluggable conversion**: per-type string converters with defaults
//!   for the primitives
//! - **Declarative validation**: required/range/length/pattern rules
//!   evaluated after construction; a command with violations is discarded
//!   rather than returned half-built
//!
//! # Examples
//!
//! ```
//! use command_interpreter::{Interpreter, Param, Rule, Shape, Universe};
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
//!
//! let args: Vec<String> = ["List", "Image", "Name=alpine"]
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//! let interpretation = Interpreter::new().interpret(&universe, &args);
//! let Some(Command::ListImage(command)) = interpretation.instance() else {
//!     panic!("expected a ListImage command");
//! };
//! assert_eq!(command.name, "alpine");
//! ```

pub mod abbreviation;
pub mod catalog;
pub mod conversion;
pub mod error;
pub mod interpretation;
pub mod interpreter;
pub mod universe;
pub mod validation;

// Re-exports for convenience
pub use abbreviation::{minimal_abbreviation, split_camel_case, Casing};
pub use catalog::{build_catalog, CommandDescriptor, ParameterDescriptor};
pub use conversion::Converters;
pub use error::{Diagnostic, Error, Result};
pub use interpretation::Interpretation;
pub use interpreter::{Interpreter, DEFAULT_DELIMITERS, DEFAULT_PREFIXES};
pub use universe::{Factory, Param, Shape, Universe};
pub use validation::{FieldValue, Rule};
