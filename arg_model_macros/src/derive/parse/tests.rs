//! Tests for attribute and input parsing.

use anyhow::{Result, anyhow};
use rstest::rstest;
use syn::{DeriveInput, Type, parse_quote};

use super::*;

#[rstest]
fn struct_attributes_are_recognised() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[arg_model(name = "Login", custom_parser, crate = "cli")]
        struct Args {}
    };
    let attrs = parse_struct_attrs(&input.attrs)?;
    assert_eq!(attrs.name.map(|name| name.value()).as_deref(), Some("Login"));
    assert!(attrs.custom_parser);
    assert!(attrs.crate_path.is_some_and(|path| path.is_ident("cli")));
    Ok(())
}

#[rstest]
fn help_prefers_attribute_over_doc_comment() -> Result<()> {
    let field: syn::Field = parse_quote! {
        /// Documented.
        #[arg_model(help = "Explicit.")]
        user: String
    };
    let attrs = parse_field_attrs(&field.attrs)?;
    assert_eq!(attrs.help.as_deref(), Some("Explicit."));
    Ok(())
}

#[rstest]
fn multi_line_docs_are_joined() -> Result<()> {
    let field: syn::Field = parse_quote! {
        /// The host
        /// to connect to.
        ///
        host: String
    };
    let attrs = parse_field_attrs(&field.attrs)?;
    assert_eq!(attrs.help.as_deref(), Some("The host to connect to."));
    Ok(())
}

#[rstest]
#[case::unknown_key(parse_quote! { #[arg_model(rename = "x")] user: String })]
#[case::two_defaults(parse_quote! { #[arg_model(default = 1, default_factory = one)] n: u8 })]
#[case::non_string_help(parse_quote! { #[arg_model(help = 3)] n: u8 })]
fn invalid_field_attributes_are_rejected(#[case] field: syn::Field) {
    assert!(parse_field_attrs(&field.attrs).is_err());
}

#[rstest]
#[case::tuple(parse_quote! { struct Args(String); })]
#[case::enumeration(parse_quote! { enum Args { A } })]
#[case::generic(parse_quote! { struct Args<T> { value: T } })]
#[case::nested_default(parse_quote! {
    struct Args {
        #[arg_model(nested, default = Connection::default())]
        connection: Connection,
    }
})]
#[case::unknown_struct_key(parse_quote! { #[arg_model(prefix = "APP")] struct Args {} })]
fn unsupported_inputs_are_rejected(#[case] input: DeriveInput) {
    assert!(parse_input(&input).is_err());
}

#[rstest]
fn schema_name_defaults_to_identifier() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Args {
            #[arg_model(nested)]
            connection: Connection,
        }
    };
    let parsed = parse_input(&input)?;
    assert_eq!(parsed.schema_name().value(), "Args");
    let field = parsed.fields.first().ok_or_else(|| anyhow!("missing field"))?;
    assert!(field.attrs.nested);
    assert_eq!(field.name().value(), "connection");
    Ok(())
}

#[rstest]
#[case::plain(parse_quote!(Option<u8>), true)]
#[case::qualified(parse_quote!(std::option::Option<String>), true)]
#[case::vec(parse_quote!(Vec<u8>), false)]
#[case::bare(parse_quote!(String), false)]
fn detects_option_types(#[case] ty: Type, #[case] expected: bool) {
    assert_eq!(option_inner(&ty).is_some(), expected);
}
