//! Primary error enum for registration, parsing and validation flows.

use figment::Error as FigmentError;
use thiserror::Error;

/// Convenient result alias used throughout the crate.
pub type ArgModelResult<T> = Result<T, ArgModelError>;

/// Errors that can occur while deriving a command line from a schema or
/// rebuilding a model from parsed arguments.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArgModelError {
    /// A field's annotation cannot be turned into a value conversion.
    #[error("Annotation is not callable: {annotation} on field {schema}.{field}")]
    TypeConversion {
        /// Name of the schema declaring the field.
        schema: &'static str,
        /// Name of the offending field.
        field: &'static str,
        /// Rendered form of the rejected annotation.
        annotation: String,
    },

    /// A declared default could not be turned into a value.
    #[error("Failed to evaluate default for field {schema}.{field}: {source}")]
    Default {
        /// Name of the schema declaring the field.
        schema: &'static str,
        /// Name of the field whose default failed.
        field: &'static str,
        /// Underlying serialisation failure.
        #[source]
        source: serde_json::Error,
    },

    /// A flag token does not have the `--name` shape.
    #[error("invalid flag token '{token}': {reason}")]
    InvalidFlag {
        /// Token supplied by the schema author.
        token: String,
        /// Why the token was rejected.
        reason: &'static str,
    },

    /// A flag token or destination key was registered twice.
    #[error("flag '{token}' conflicts with an existing flag (destination '{dest}')")]
    FlagConflict {
        /// Token that could not be registered.
        token: String,
        /// Destination key of the rejected flag.
        dest: String,
    },

    /// A nested model could not be converted back into a value.
    #[error("Failed to serialise nested model {schema}: {source}")]
    Serialization {
        /// Name of the nested schema.
        schema: &'static str,
        /// Underlying serialisation failure.
        #[source]
        source: serde_json::Error,
    },

    /// Error parsing command-line arguments.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// The resolved field values were rejected by the model.
    #[error("Validation failed for {schema}: {source}")]
    Validation {
        /// Name of the schema being constructed.
        schema: &'static str,
        /// Underlying extraction failure.
        #[source]
        source: Box<FigmentError>,
    },
}

impl ArgModelError {
    /// Construct a validation error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use arg_model::ArgModelError;
    /// let e = ArgModelError::validation("Args", figment::Error::from("boom"));
    /// assert!(matches!(e, ArgModelError::Validation { schema: "Args", .. }));
    /// ```
    #[must_use]
    pub fn validation(schema: &'static str, source: FigmentError) -> Self {
        Self::Validation {
            schema,
            source: Box::new(source),
        }
    }

    /// Returns `true` for mistakes in a schema's declarations.
    ///
    /// These are raised while flags are registered and indicate a bug in the
    /// schema rather than bad user input.
    #[must_use]
    pub const fn is_authoring_error(&self) -> bool {
        matches!(
            self,
            Self::TypeConversion { .. }
                | Self::Default { .. }
                | Self::InvalidFlag { .. }
                | Self::FlagConflict { .. }
                | Self::Serialization { .. }
        )
    }
}

impl From<clap::Error> for ArgModelError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(Box::new(e))
    }
}
