//! String-to-value conversion keyed by the declared parameter type.
//!
//! Every parameter declares one value type at registration; when a raw
//! argument value is assigned, the registry converts the text to that type.
//! Defaults cover the primitives; hosts register their own types either
//! with explicit parse/format closures or through [`Converters::register_parsed`]
//! for anything implementing `FromStr`/`Display`.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Error, Result};

type ParseFn = Box<dyn Fn(&str) -> Result<Box<dyn Any>>>;
type FormatFn = Box<dyn Fn(&dyn Any) -> Option<String>>;

struct Converter {
    parse: ParseFn,
    format: FormatFn,
}

/// Registry of per-type string⇄value converters.
pub struct Converters {
    by_type: HashMap<TypeId, Converter>,
}

impl Default for Converters {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Converters {
    /// A registry with no converters at all.
    pub fn empty() -> Self {
        Self {
            by_type: HashMap::new(),
        }
    }

    /// A registry covering the primitive types: `bool`, `char`, `String`,
    /// the integer types, and the floats.
    pub fn with_defaults() -> Self {
        let mut converters = Self::empty();
        converters.register_parsed::<bool>();
        converters.register_parsed::<char>();
        converters.register_parsed::<String>();
        converters.register_parsed::<i8>();
        converters.register_parsed::<i16>();
        converters.register_parsed::<i32>();
        converters.register_parsed::<i64>();
        converters.register_parsed::<isize>();
        converters.register_parsed::<u8>();
        converters.register_parsed::<u16>();
        converters.register_parsed::<u32>();
        converters.register_parsed::<u64>();
        converters.register_parsed::<usize>();
        converters.register_parsed::<f32>();
        converters.register_parsed::<f64>();
        converters
    }

    /// Registers (or replaces) the converter for `T`.
    ///
    /// `parse` returns the converted value or a failure reason; the reason
    /// is wrapped into [`Error::Conversion`] together with the type name
    /// and the offending text.
    pub fn register<T: Any>(
        &mut self,
        parse: impl Fn(&str) -> std::result::Result<T, String> + 'static,
        format: impl Fn(&T) -> String + 'static,
    ) {
        let parse: ParseFn = Box::new(move |text| {
            parse(text)
                .map(|value| Box::new(value) as Box<dyn Any>)
                .map_err(|reason| Error::conversion(type_name::<T>(), text, reason))
        });
        let format: FormatFn =
            Box::new(move |value| value.downcast_ref::<T>().map(|value| format(value)));
        self.by_type
            .insert(TypeId::of::<T>(), Converter { parse, format });
    }

    /// Registers `T` through its `FromStr`/`Display` implementations. This
    /// is the usual entry point for user enums and newtypes.
    pub fn register_parsed<T>(&mut self)
    where
        T: Any + FromStr + Display,
        T::Err: Display,
    {
        self.register::<T>(
            |text| text.parse::<T>().map_err(|error| error.to_string()),
            ToString::to_string,
        );
    }

    /// Converts `text` to the type registered under `type_id`.
    pub fn parse(
        &self,
        type_id: TypeId,
        type_name: &'static str,
        text: &str,
    ) -> Result<Box<dyn Any>> {
        let converter = self
            .by_type
            .get(&type_id)
            .ok_or(Error::MissingConverter(type_name))?;
        (converter.parse)(text)
    }

    /// Formats a value back to text through its registered converter.
    pub fn format(&self, value: &dyn Any) -> Option<String> {
        self.by_type
            .get(&value.type_id())
            .and_then(|converter| (converter.format)(value))
    }
}
