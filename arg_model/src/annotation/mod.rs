//! Declared field types and the conversions derived from them.
//!
//! An [`Annotation`] is the type tag a schema attaches to each field. The
//! binder inspects it to decide whether a field becomes a value flag, a
//! toggle, a repeatable flag, or a nested schema whose flags are flattened
//! into the parent's namespace.

mod arg_type;
mod converter;

use std::fmt;

use serde::Serialize;

use crate::model::{ArgModel, NestedModel};

pub use arg_type::ArgType;
pub use converter::{Converter, ParseFn};

/// Type tag attached to a schema field.
#[derive(Clone, Debug)]
pub enum Annotation {
    /// Plain text, used as-is.
    Text,
    /// Boolean switch.
    Bool,
    /// Any type built from raw text by a constructor.
    Scalar(Converter),
    /// Repeatable flag collecting one element per occurrence.
    List(Box<Annotation>),
    /// Another schema whose fields share the parent's flag namespace.
    Nested(NestedModel),
    /// The none-type; only meaningful inside a [`Annotation::Union`].
    Absent,
    /// Any of the listed alternatives.
    Union(Vec<Annotation>),
}

impl Annotation {
    /// Builds the "optional-T" shape: `inner` unioned with [`Annotation::Absent`].
    ///
    /// # Examples
    ///
    /// ```
    /// use arg_model::Annotation;
    /// let optional = Annotation::optional(Annotation::Text);
    /// assert_eq!(optional.to_string(), "String | None");
    /// ```
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Union(vec![inner, Self::Absent])
    }

    /// Builds a union of the given alternatives in declaration order.
    #[must_use]
    pub fn union<I>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Union(alternatives.into_iter().collect())
    }

    /// Annotation for a type parsed from text via [`std::str::FromStr`].
    #[must_use]
    pub fn scalar<T>() -> Self
    where
        T: std::str::FromStr + Serialize,
        T::Err: fmt::Display,
    {
        Self::Scalar(Converter::of::<T>())
    }

    /// Annotation for a field whose type is itself a schema.
    #[must_use]
    pub fn nested<M>() -> Self
    where
        M: ArgModel + Serialize,
    {
        Self::Nested(NestedModel::of::<M>())
    }

    /// Returns `true` for the none-type.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("String"),
            Self::Bool => f.write_str("bool"),
            Self::Scalar(converter) => f.write_str(converter.type_name()),
            Self::List(element) => write!(f, "Vec<{element}>"),
            Self::Nested(nested) => f.write_str(nested.name()),
            Self::Absent => f.write_str("None"),
            Self::Union(alternatives) => {
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{alternative}")?;
                }
                Ok(())
            }
        }
    }
}
