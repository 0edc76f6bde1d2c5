//! Parsing of the struct, its fields and their `#[arg_model(...)]`
//! attributes.

use syn::{Attribute, Expr, LitStr, Path};

mod doc;
mod input;
mod literals;
#[cfg(test)]
mod tests;
mod type_utils;

pub(crate) use input::{FieldDef, ParsedInput, parse_input};
pub(crate) use type_utils::option_inner;

use doc::doc_text;
use literals::lit_str;

/// Struct-level attributes recognised by `#[derive(ArgModel)]`.
#[derive(Default)]
pub(crate) struct StructAttrs {
    pub name: Option<LitStr>,
    pub custom_parser: bool,
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<Path>,
}

/// Declared default for a field.
pub(crate) enum DefaultAttr {
    /// `default = expr`
    Expr(Expr),
    /// `default_factory = path`
    Factory(Path),
}

/// Field-level attributes recognised by `#[derive(ArgModel)]`.
#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub default: Option<DefaultAttr>,
    pub help: Option<String>,
    pub nested: bool,
}

/// Visits every `#[arg_model(...)]` entry in `attrs`.
fn parse_arg_model<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("arg_model")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_arg_model(attrs, |meta| {
        if meta.path.is_ident("name") {
            out.name = Some(lit_str(meta, "name")?);
        } else if meta.path.is_ident("custom_parser") {
            out.custom_parser = true;
        } else if meta.path.is_ident("crate") {
            out.crate_path = Some(lit_str(meta, "crate")?.parse()?);
        } else {
            return Err(meta.error("unknown arg_model struct attribute"));
        }
        Ok(())
    })?;
    Ok(out)
}

pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs {
        help: doc_text(attrs),
        ..FieldAttrs::default()
    };
    parse_arg_model(attrs, |meta| {
        if meta.path.is_ident("default") || meta.path.is_ident("default_factory") {
            if out.default.is_some() {
                return Err(meta.error("a field takes at most one default or default_factory"));
            }
            out.default = Some(if meta.path.is_ident("default") {
                DefaultAttr::Expr(meta.value()?.parse()?)
            } else {
                DefaultAttr::Factory(meta.value()?.parse()?)
            });
        } else if meta.path.is_ident("help") {
            out.help = Some(lit_str(meta, "help")?.value());
        } else if meta.path.is_ident("nested") {
            out.nested = true;
        } else {
            return Err(meta.error("unknown arg_model field attribute"));
        }
        Ok(())
    })?;
    Ok(out)
}
