//! Helpers for classifying errors returned by the tokenizer.

use clap::{Error as ClapError, error::ErrorKind};

/// Returns `true` when a [`clap::Error`] corresponds to `--help` or
/// `--version`.
///
/// Callers using the `try_parse_*` entry points receive help requests as
/// errors. Delegating those to [`clap::Error::exit`] keeps the zero exit
/// status a plain `parse` call would produce.
#[must_use]
pub fn is_display_request(err: &ClapError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}
