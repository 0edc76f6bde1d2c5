//! Flag-registration surface backed by `clap`.
//!
//! [`ArgParser`] owns a [`clap::Command`] and remembers every flag added
//! through [`FlagSurface::add_flag`], so parsed values can later be looked up
//! by destination key with defaults applied. Tokenizing, required-flag
//! checks, help output and process termination are left entirely to clap.

mod parsed;
mod program;
mod surface;

use std::ffi::OsString;

use clap::{Arg, ArgAction, Command, builder::ValueParser};
use serde_json::Value;
use tracing::debug;

use crate::{
    annotation::Converter,
    error::{ArgModelError, ArgModelResult},
    flag::{FlagAction, FlagSpec},
};

pub use parsed::ParsedArgs;
pub use program::ProgramInfo;
pub use surface::{FlagGroup, FlagSurface, StagedFlags};

/// A flag accepted by [`ArgParser`], kept for value lookup after parsing.
#[derive(Clone, Debug)]
pub(crate) struct RegisteredFlag {
    pub(crate) dest: String,
    pub(crate) long: String,
    pub(crate) action: FlagAction,
    pub(crate) default: Option<Value>,
}

/// Command-line parser that schemas register their flags on.
///
/// Argument lists handed to [`ArgParser::parse_from`] exclude the program
/// name.
///
/// # Examples
///
/// ```
/// use arg_model::{ArgParser, FlagSpec, FlagSurface, ProgramInfo};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut parser = ArgParser::new(ProgramInfo::new("demo"));
/// parser.add_flag(FlagSpec::new("--host").required(true))?;
/// let parsed = parser.try_parse_from(["--host", "doggy"])?;
/// assert_eq!(parsed.value("host"), Some(serde_json::json!("doggy")));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ArgParser {
    command: Command,
    flags: Vec<RegisteredFlag>,
}

impl Default for ArgParser {
    fn default() -> Self {
        Self::new(ProgramInfo::default())
    }
}

impl ArgParser {
    /// Creates a parser described by the given program metadata.
    #[must_use]
    pub fn new(info: ProgramInfo) -> Self {
        Self::from_command(info.into_command())
    }

    /// Wraps an externally managed [`clap::Command`].
    ///
    /// Arguments already defined on the command are kept; flags registered
    /// afterwards must not collide with them.
    #[must_use]
    pub fn from_command(command: Command) -> Self {
        Self {
            command: command.no_binary_name(true),
            flags: Vec::new(),
        }
    }

    /// The underlying command.
    #[must_use]
    pub const fn command(&self) -> &Command {
        &self.command
    }

    /// Returns a surface that places its flags under a help heading.
    pub fn group(&mut self, heading: impl Into<String>) -> FlagGroup<'_> {
        FlagGroup::new(self, heading.into())
    }

    /// Renders the help text clap would print for `--help`.
    pub fn render_help(&mut self) -> String {
        self.command.render_help().to_string()
    }

    /// Parses `args`, terminating the process on malformed input or a help
    /// request.
    ///
    /// Errors exit with clap's non-zero usage status; `--help` prints usage
    /// and exits with status zero.
    #[must_use]
    pub fn parse_from<I, T>(self, args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.try_parse_from(args).unwrap_or_else(|err| err.exit())
    }

    /// Parses `args`, returning clap's error instead of exiting.
    ///
    /// # Errors
    ///
    /// Returns the [`clap::Error`] describing missing, unknown or invalid
    /// flags, or a help request.
    pub fn try_parse_from<I, T>(mut self, args: I) -> Result<ParsedArgs, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.try_get_matches_from_mut(args)?;
        Ok(ParsedArgs::new(matches, self.flags))
    }

    fn ensure_registrable(&self, spec: &FlagSpec) -> ArgModelResult<()> {
        let long = validated_long(spec)?;
        self.ensure_free(long, &spec.dest_key(), spec.token())
    }

    fn register(&mut self, spec: FlagSpec, heading: Option<&str>) -> ArgModelResult<()> {
        self.ensure_registrable(&spec)?;
        let long = validated_long(&spec)?.to_owned();
        let dest = spec.dest_key().into_owned();

        let action = spec.flag_action();
        let mut arg = Arg::new(dest.clone()).long(long.clone());
        arg = match action {
            FlagAction::Toggle => arg.action(ArgAction::SetTrue),
            FlagAction::Set => arg
                .action(ArgAction::Set)
                .value_name(dest.to_uppercase())
                .value_parser(value_parser(spec.value_converter())),
            FlagAction::Append => arg
                .action(ArgAction::Append)
                .value_name(dest.to_uppercase())
                .value_parser(value_parser(spec.value_converter())),
        };
        let required = spec.is_required() && action != FlagAction::Toggle;
        if required {
            arg = arg.required(true);
        }
        if let Some(help) = spec.help_text() {
            arg = arg.help(help.to_owned());
        }
        if let Some(heading) = heading {
            arg = arg.help_heading(heading.to_owned());
        }

        debug!(flag = %spec.token(), dest = %dest, ?action, required, "registered flag");
        self.command = std::mem::take(&mut self.command).arg(arg);
        self.flags.push(RegisteredFlag {
            dest,
            long,
            action,
            default: spec.default_ref().cloned(),
        });
        Ok(())
    }

    fn ensure_free(&self, long: &str, dest: &str, token: &str) -> ArgModelResult<()> {
        let reserved = reserved_longs(&self.command).any(|name| name == long);
        let registered = self
            .flags
            .iter()
            .any(|flag| flag.long == long || flag.dest == dest);
        let predefined = self
            .command
            .get_arguments()
            .any(|arg| arg.get_id() == dest || arg.get_long() == Some(long));
        if reserved || registered || predefined {
            return Err(ArgModelError::FlagConflict {
                token: token.to_owned(),
                dest: dest.to_owned(),
            });
        }
        Ok(())
    }
}

impl FlagSurface for ArgParser {
    fn add_flag(&mut self, spec: FlagSpec) -> ArgModelResult<()> {
        self.register(spec, None)
    }

    fn check(&self, spec: &FlagSpec) -> ArgModelResult<()> {
        self.ensure_registrable(spec)
    }
}

/// Long names clap adds on its own.
fn reserved_longs(command: &Command) -> impl Iterator<Item = &'static str> {
    let help = (!command.is_disable_help_flag_set()).then_some("help");
    let version = (command.get_version().is_some() && !command.is_disable_version_flag_set())
        .then_some("version");
    help.into_iter().chain(version)
}

fn validated_long(spec: &FlagSpec) -> ArgModelResult<&str> {
    let invalid = |reason| ArgModelError::InvalidFlag {
        token: spec.token().to_owned(),
        reason,
    };
    let long = spec
        .long_name()
        .ok_or_else(|| invalid("flag tokens must start with '--'"))?;
    if long.is_empty() {
        return Err(invalid("flag tokens need a name after '--'"));
    }
    if long.starts_with('-') {
        return Err(invalid("flag names must not start with '-'"));
    }
    if long.contains(|c: char| c == '=' || c.is_whitespace()) {
        return Err(invalid("flag names must not contain '=' or whitespace"));
    }
    Ok(long)
}

fn value_parser(converter: Option<Converter>) -> ValueParser {
    ValueParser::new(move |raw: &str| -> Result<Value, String> {
        converter.map_or_else(|| Ok(Value::String(raw.to_owned())), |c| c.convert(raw))
    })
}

#[cfg(test)]
mod tests;
