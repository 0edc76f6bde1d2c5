//! Procedural macros for `arg_model`.
//!
//! The [`ArgModel`] derive describes every named field of a struct to the
//! runtime crate, which turns the description into `--flags` and rebuilds
//! the struct from parsed arguments.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derives `arg_model::ArgSchema` and `arg_model::ArgModel`.
///
/// The struct must have named fields and implement `serde::Deserialize`.
/// Nested fields additionally require the nested type to implement
/// `serde::Serialize`.
///
/// Struct attributes, written as `#[arg_model(...)]`:
///
/// - `name = "..."` overrides the schema name used in diagnostics.
/// - `custom_parser` skips the `ArgModel` impl so it can be written by hand.
/// - `crate = "path"` references the runtime crate through an alias.
///
/// Field attributes:
///
/// - `default = expr` evaluates `expr` whenever flags are registered.
/// - `default_factory = path` calls `path()` whenever flags are registered.
/// - `help = "..."` sets the flag's help; doc comments are used otherwise.
/// - `nested` flattens another `ArgModel` struct's flags into this one.
///
/// `Option<T>` fields without a declared default default to `None`.
#[proc_macro_derive(ArgModel, attributes(arg_model))]
pub fn derive_arg_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
