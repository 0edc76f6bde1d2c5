//! Field descriptors making up a schema.

use std::{borrow::Cow, fmt, sync::Arc};

use serde::Serialize;
use serde_json::Value;

use crate::{
    annotation::{Annotation, ArgType},
    error::{ArgModelError, ArgModelResult},
    model::ArgModel,
};

/// Function producing a default value on demand.
pub type DefaultFactory = Arc<dyn Fn() -> Result<Value, serde_json::Error> + Send + Sync>;

/// Default policy declared for a field.
#[derive(Clone, Default)]
pub enum FieldDefault {
    /// No default: the flag must be supplied.
    #[default]
    Required,
    /// A fixed default value.
    Value(Value),
    /// A function evaluated once each time the schema is registered.
    Factory(DefaultFactory),
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("Required"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// Descriptor for one schema field.
///
/// # Examples
///
/// ```
/// use arg_model::FieldSpec;
///
/// let host = FieldSpec::of::<String>("host")
///     .description("The host to connect to.")
///     .default_value("puppy");
/// assert_eq!(host.name(), "host");
/// assert!(host.has_default());
/// ```
#[derive(Clone, Debug)]
pub struct FieldSpec {
    name: &'static str,
    annotation: Annotation,
    description: Option<Cow<'static, str>>,
    default: FieldDefault,
}

impl FieldSpec {
    /// Creates a required field with an explicit annotation.
    #[must_use]
    pub const fn new(name: &'static str, annotation: Annotation) -> Self {
        Self {
            name,
            annotation,
            description: None,
            default: FieldDefault::Required,
        }
    }

    /// Creates a required field annotated from its Rust type.
    #[must_use]
    pub fn of<T: ArgType>(name: &'static str) -> Self {
        Self::new(name, T::annotation())
    }

    /// Creates a field holding another schema.
    #[must_use]
    pub fn nested<M>(name: &'static str) -> Self
    where
        M: ArgModel + Serialize,
    {
        Self::new(name, Annotation::nested::<M>())
    }

    /// Sets the human-readable description used as help text.
    #[must_use]
    pub fn description(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Declares a fixed default.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = FieldDefault::Value(value.into());
        self
    }

    /// Declares a default-producing function.
    ///
    /// The function runs when flags are registered, not when arguments are
    /// parsed.
    #[must_use]
    pub fn default_factory<F, T>(mut self, factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Serialize,
    {
        self.default = FieldDefault::Factory(Arc::new(move || serde_json::to_value(factory())));
        self
    }

    /// Field name, also used as the destination key of its flag.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type of the field.
    #[must_use]
    pub const fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    /// Description, when one was declared.
    #[must_use]
    pub fn help(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Declared default policy.
    #[must_use]
    pub const fn default_policy(&self) -> &FieldDefault {
        &self.default
    }

    /// Returns `true` when a fixed default or a factory is declared.
    #[must_use]
    pub const fn has_default(&self) -> bool {
        !matches!(self.default, FieldDefault::Required)
    }

    /// Evaluates the declared default, invoking a factory exactly once.
    pub(crate) fn resolve_default(&self, schema: &'static str) -> ArgModelResult<Option<Value>> {
        match &self.default {
            FieldDefault::Required => Ok(None),
            FieldDefault::Value(value) => Ok(Some(value.clone())),
            FieldDefault::Factory(factory) => {
                factory()
                    .map(Some)
                    .map_err(|source| ArgModelError::Default {
                        schema,
                        field: self.name,
                        source,
                    })
            }
        }
    }
}
