//! The flag-registration seam and its implementations.

use tracing::debug;

use super::ArgParser;
use crate::{
    error::{ArgModelError, ArgModelResult},
    flag::FlagSpec,
};

/// Anything flags can be registered on.
///
/// Schemas only ever see this trait, so their flags can land on a parser,
/// on a headed group of a parser, or in a staging buffer.
pub trait FlagSurface {
    /// Adds one flag.
    ///
    /// # Errors
    ///
    /// Returns an authoring error when the token is malformed or collides
    /// with a flag that is already registered.
    fn add_flag(&mut self, spec: FlagSpec) -> ArgModelResult<()>;

    /// Reports whether [`FlagSurface::add_flag`] would accept `spec`,
    /// without registering it.
    ///
    /// # Errors
    ///
    /// Returns the error `add_flag` would return for `spec`.
    fn check(&self, _spec: &FlagSpec) -> ArgModelResult<()> {
        Ok(())
    }
}

/// Flags registered on an [`ArgParser`] under a shared help heading.
///
/// # Examples
///
/// ```
/// use arg_model::{ArgParser, FlagSpec, FlagSurface};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut parser = ArgParser::default();
/// parser.group("Connection").add_flag(FlagSpec::new("--host"))?;
/// let help = parser.render_help();
/// assert!(help.contains("Connection:"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FlagGroup<'a> {
    parser: &'a mut ArgParser,
    heading: String,
}

impl<'a> FlagGroup<'a> {
    pub(crate) fn new(parser: &'a mut ArgParser, heading: String) -> Self {
        Self { parser, heading }
    }

    /// Heading shown above this group's flags.
    #[must_use]
    pub fn heading(&self) -> &str {
        &self.heading
    }
}

impl FlagSurface for FlagGroup<'_> {
    fn add_flag(&mut self, spec: FlagSpec) -> ArgModelResult<()> {
        self.parser.register(spec, Some(&self.heading))
    }

    fn check(&self, spec: &FlagSpec) -> ArgModelResult<()> {
        self.parser.ensure_registrable(spec)
    }
}

/// Buffer holding flags until a whole schema has been walked.
///
/// The binder stages every flag of a schema and only commits them once all
/// fields converted successfully and none of them collides with the target
/// surface, so a failing schema registers nothing. Two staged flags sharing
/// a token or destination are rejected when the second one is staged.
#[derive(Clone, Debug, Default)]
pub struct StagedFlags {
    specs: Vec<FlagSpec>,
}

impl StagedFlags {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// Number of staged flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` when nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Staged flags in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FlagSpec> {
        self.specs.iter()
    }

    /// Moves every staged flag onto `surface`, in order.
    ///
    /// Every flag is checked against `surface` before the first one is
    /// added.
    ///
    /// # Errors
    ///
    /// Propagates the first error reported by `surface`; `surface` is left
    /// untouched when a check fails.
    pub fn commit(self, surface: &mut dyn FlagSurface) -> ArgModelResult<()> {
        self.specs.iter().try_for_each(|spec| surface.check(spec))?;
        debug!(count = self.specs.len(), "committing staged flags");
        self.specs
            .into_iter()
            .try_for_each(|spec| surface.add_flag(spec))
    }
}

impl FlagSurface for StagedFlags {
    fn add_flag(&mut self, spec: FlagSpec) -> ArgModelResult<()> {
        self.check(&spec)?;
        self.specs.push(spec);
        Ok(())
    }

    fn check(&self, spec: &FlagSpec) -> ArgModelResult<()> {
        let dest = spec.dest_key();
        let clash = self
            .specs
            .iter()
            .any(|staged| staged.token() == spec.token() || staged.dest_key() == dest);
        if clash {
            return Err(ArgModelError::FlagConflict {
                token: spec.token().to_owned(),
                dest: dest.into_owned(),
            });
        }
        Ok(())
    }
}
