//! Schema traits and the end-to-end entry points.

use std::{ffi::OsString, fmt};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    binder,
    error::{ArgModelError, ArgModelResult},
    field::FieldSpec,
    parser::{ArgParser, FlagSurface, ParsedArgs},
    values::{ManualFields, PartialValues},
};

/// Ordered field descriptors of a schema.
///
/// Usually generated by `#[derive(ArgModel)]`; implement it by hand to
/// describe fields the derive cannot see.
pub trait ArgSchema {
    /// Name used in diagnostics, normally the type name.
    fn schema_name() -> &'static str;

    /// Fields in declaration order.
    fn fields() -> Vec<FieldSpec>;
}

/// A schema that can be registered on a command line and rebuilt from it.
///
/// Every method has a default implementation. Override
/// [`ArgModel::update_parser`] and [`ArgModel::from_parsed_args`] to take
/// over individual fields, then delegate to [`binder::update_parser`] and
/// [`binder::from_parsed_args`] for the rest:
///
/// ```
/// use arg_model::{
///     ArgModel, ArgModelResult, FlagSpec, FlagSurface, ManualFields, ParsedArgs,
///     PartialValues, binder,
/// };
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Deserialize, Serialize, ArgModel)]
/// #[arg_model(custom_parser)]
/// struct Args {
///     user: String,
/// }
///
/// impl ArgModel for Args {
///     fn update_parser(
///         surface: &mut dyn FlagSurface,
///         mut manual: ManualFields,
///     ) -> ArgModelResult<()> {
///         surface.add_flag(FlagSpec::new("--my-user-flag").help("Put the username here :)"))?;
///         manual.insert("user");
///         binder::update_parser::<Self>(surface, &manual)
///     }
///
///     fn from_parsed_args(args: &ParsedArgs, mut partial: PartialValues) -> ArgModelResult<Self> {
///         partial.insert("user", args.value("my_user_flag"));
///         binder::from_parsed_args::<Self>(args, partial)
///     }
/// }
///
/// # fn main() -> ArgModelResult<()> {
/// let args = Args::try_parse_from(["--my-user-flag", "puppy"])?;
/// assert_eq!(args, Args { user: "puppy".into() });
/// # Ok(())
/// # }
/// ```
pub trait ArgModel: ArgSchema + DeserializeOwned + Sized {
    /// Adds one flag per field not listed in `manual`.
    ///
    /// # Errors
    ///
    /// Returns an authoring error when a field's annotation has no
    /// conversion, a default cannot be evaluated, or a flag collides with an
    /// existing one. Nothing is registered in that case.
    fn update_parser(surface: &mut dyn FlagSurface, manual: ManualFields) -> ArgModelResult<()> {
        binder::update_parser::<Self>(surface, &manual)
    }

    /// Builds an instance from parsed arguments, preferring `partial`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgModelError::Validation`] when the resolved values do not
    /// form a valid instance.
    fn from_parsed_args(args: &ParsedArgs, partial: PartialValues) -> ArgModelResult<Self> {
        binder::from_parsed_args::<Self>(args, partial)
    }

    /// Parses the process's command-line arguments.
    ///
    /// Malformed input and `--help` terminate the process.
    ///
    /// # Errors
    ///
    /// Returns authoring and validation errors.
    fn parse() -> ArgModelResult<Self> {
        Self::parse_with(ArgParser::default(), std::env::args_os().skip(1))
    }

    /// Parses an explicit argument list, excluding the program name.
    ///
    /// Malformed input and `--help` terminate the process.
    ///
    /// # Errors
    ///
    /// Returns authoring and validation errors.
    fn parse_from<I, T>(args: I) -> ArgModelResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::parse_with(ArgParser::default(), args)
    }

    /// Registers this schema on `parser` and parses `args` with it.
    ///
    /// Malformed input and `--help` terminate the process.
    ///
    /// # Errors
    ///
    /// Returns authoring and validation errors.
    fn parse_with<I, T>(mut parser: ArgParser, args: I) -> ArgModelResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::update_parser(&mut parser, ManualFields::new())?;
        let parsed = parser.parse_from(args);
        Self::from_parsed_args(&parsed, PartialValues::new())
    }

    /// Like [`ArgModel::parse_from`], but returns user input errors and help
    /// requests instead of exiting.
    ///
    /// # Errors
    ///
    /// Returns [`ArgModelError::CliParsing`] for anything clap rejects, plus
    /// authoring and validation errors.
    fn try_parse_from<I, T>(args: I) -> ArgModelResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_with(ArgParser::default(), args)
    }

    /// Like [`ArgModel::parse_with`], but returns user input errors and help
    /// requests instead of exiting.
    ///
    /// # Errors
    ///
    /// Returns [`ArgModelError::CliParsing`] for anything clap rejects, plus
    /// authoring and validation errors.
    fn try_parse_with<I, T>(mut parser: ArgParser, args: I) -> ArgModelResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::update_parser(&mut parser, ManualFields::new())?;
        let parsed = parser.try_parse_from(args)?;
        Self::from_parsed_args(&parsed, PartialValues::new())
    }
}

type UpdateFn = fn(&mut dyn FlagSurface, ManualFields) -> ArgModelResult<()>;
type ReconstructFn = fn(&ParsedArgs) -> ArgModelResult<Value>;

/// Type-erased handle on a schema used as a field of another schema.
///
/// Calls go through the nested type's own [`ArgModel`] methods, so its
/// overrides apply. Manual sets and partial maps are never forwarded.
#[derive(Clone, Copy)]
pub struct NestedModel {
    name: &'static str,
    update: UpdateFn,
    reconstruct: ReconstructFn,
}

impl NestedModel {
    /// Handle for `M`.
    #[must_use]
    pub fn of<M>() -> Self
    where
        M: ArgModel + Serialize,
    {
        Self {
            name: M::schema_name(),
            update: M::update_parser,
            reconstruct: reconstruct_value::<M>,
        }
    }

    /// Name of the nested schema.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Registers the nested schema's flags with an empty manual set.
    ///
    /// # Errors
    ///
    /// Propagates the nested schema's registration errors.
    pub fn update_parser(&self, surface: &mut dyn FlagSurface) -> ArgModelResult<()> {
        (self.update)(surface, ManualFields::new())
    }

    /// Rebuilds the nested instance and returns it as a value.
    ///
    /// # Errors
    ///
    /// Propagates validation errors and reports instances that cannot be
    /// serialised.
    pub fn from_parsed_args(&self, args: &ParsedArgs) -> ArgModelResult<Value> {
        (self.reconstruct)(args)
    }
}

impl fmt::Debug for NestedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedModel")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn reconstruct_value<M>(args: &ParsedArgs) -> ArgModelResult<Value>
where
    M: ArgModel + Serialize,
{
    let instance = M::from_parsed_args(args, PartialValues::new())?;
    serde_json::to_value(&instance).map_err(|source| ArgModelError::Serialization {
        schema: M::schema_name(),
        source,
    })
}
