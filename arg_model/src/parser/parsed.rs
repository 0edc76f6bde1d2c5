//! Raw parse results keyed by destination.

use clap::ArgMatches;
use serde_json::Value;

use super::RegisteredFlag;
use crate::flag::FlagAction;

/// Values produced by the tokenizer, looked up by destination key.
///
/// Flags absent from the command line resolve to their registered default.
/// Toggles without a default resolve to `false`.
#[derive(Clone, Debug)]
pub struct ParsedArgs {
    matches: ArgMatches,
    flags: Vec<RegisteredFlag>,
}

impl ParsedArgs {
    pub(crate) const fn new(matches: ArgMatches, flags: Vec<RegisteredFlag>) -> Self {
        Self { matches, flags }
    }

    /// Resolved value stored under `dest`.
    ///
    /// Returns `None` for destinations that were never registered through
    /// [`crate::FlagSurface::add_flag`] and for optional flags that were
    /// neither supplied nor given a default.
    #[must_use]
    pub fn value(&self, dest: &str) -> Option<Value> {
        let flag = self.flags.iter().find(|flag| flag.dest == dest)?;
        match flag.action {
            FlagAction::Toggle => {
                let present = self
                    .matches
                    .try_get_one::<bool>(dest)
                    .ok()
                    .flatten()
                    .copied()
                    .unwrap_or(false);
                if present {
                    Some(Value::Bool(true))
                } else {
                    Some(flag.default.clone().unwrap_or(Value::Bool(false)))
                }
            }
            FlagAction::Set => self
                .matches
                .try_get_one::<Value>(dest)
                .ok()
                .flatten()
                .cloned()
                .or_else(|| flag.default.clone()),
            FlagAction::Append => self
                .matches
                .try_get_many::<Value>(dest)
                .ok()
                .flatten()
                .map(|values| Value::Array(values.cloned().collect()))
                .or_else(|| flag.default.clone()),
        }
    }

    /// Returns `true` when the flag for `dest` appeared on the command line.
    #[must_use]
    pub fn is_present(&self, dest: &str) -> bool {
        self.flags.iter().any(|flag| flag.dest == dest)
            && self.matches.value_source(dest) == Some(clap::parser::ValueSource::CommandLine)
    }

    /// Destination keys of every registered flag, in registration order.
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(|flag| flag.dest.as_str())
    }

    /// Clap's matches, for flags registered directly on the command.
    #[must_use]
    pub const fn matches(&self) -> &ArgMatches {
        &self.matches
    }
}
