//! Value conversions applied to raw flag text.

use std::{fmt::Display, str::FromStr};

use serde::Serialize;
use serde_json::Value;

/// Signature of a one-argument constructor from raw flag text.
pub type ParseFn = fn(&str) -> Result<Value, String>;

/// Conversion the tokenizer applies to a flag's raw text.
///
/// [`Converter::Toggle`] marks a boolean field; such flags consume no value
/// and their presence alone means `true`.
#[derive(Clone, Copy, Debug)]
pub enum Converter {
    /// Presence-implies-true switch.
    Toggle,
    /// Constructor turning raw text into a typed value.
    Parse {
        /// Short name of the produced type, used in diagnostics.
        type_name: &'static str,
        /// The constructor itself.
        parse: ParseFn,
    },
}

impl Converter {
    /// Builds a converter for any type parsed with [`FromStr`].
    ///
    /// # Examples
    ///
    /// ```
    /// use arg_model::Converter;
    /// use serde_json::json;
    ///
    /// let port = Converter::of::<u16>();
    /// assert_eq!(port.convert("8080"), Ok(json!(8080)));
    /// assert!(port.convert("eighty").is_err());
    /// ```
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: FromStr + Serialize,
        T::Err: Display,
    {
        Self::Parse {
            type_name: short_type_name(std::any::type_name::<T>()),
            parse: parse_with::<T>,
        }
    }

    /// Wraps a custom constructor.
    #[must_use]
    pub const fn new(type_name: &'static str, parse: ParseFn) -> Self {
        Self::Parse { type_name, parse }
    }

    /// Returns `true` for boolean switches.
    #[must_use]
    pub const fn is_toggle(&self) -> bool {
        matches!(self, Self::Toggle)
    }

    /// Name of the produced type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Toggle => "bool",
            Self::Parse { type_name, .. } => *type_name,
        }
    }

    /// Converts raw flag text.
    ///
    /// Toggles accept the literal spellings `true` and `false`, which is how
    /// defaults are rendered for them.
    ///
    /// # Errors
    ///
    /// Returns the constructor's error message when the text is rejected.
    pub fn convert(&self, raw: &str) -> Result<Value, String> {
        match self {
            Self::Toggle => raw
                .parse::<bool>()
                .map(Value::Bool)
                .map_err(|err| err.to_string()),
            Self::Parse { parse, .. } => parse(raw),
        }
    }
}

fn parse_with<T>(raw: &str) -> Result<Value, String>
where
    T: FromStr + Serialize,
    T::Err: Display,
{
    let parsed = raw.parse::<T>().map_err(|err| err.to_string())?;
    match serde_json::to_value(parsed).map_err(|err| err.to_string())? {
        Value::Null => Err(format!(
            "'{raw}' has no JSON representation (non-finite numbers are not supported)"
        )),
        value => Ok(value),
    }
}

/// Strips the module path from a non-generic type name.
fn short_type_name(full: &'static str) -> &'static str {
    if full.contains('<') {
        return full;
    }
    full.rsplit("::").next().unwrap_or(full)
}
