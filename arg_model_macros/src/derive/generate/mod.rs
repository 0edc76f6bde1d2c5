//! Code generation for `#[derive(ArgModel)]`.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{DefaultAttr, FieldDef, ParsedInput, option_inner};

/// Generates the `ArgSchema` impl and, unless `custom_parser` is set, an
/// empty `ArgModel` impl relying on the trait's provided methods.
pub(crate) fn arg_model_impls(input: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let schema_name = input.schema_name();
    let fields = input.fields.iter().map(|field| field_spec(field, krate));
    let model_impl = (!input.attrs.custom_parser).then(|| {
        quote! {
            impl #krate::ArgModel for #ident {}
        }
    });
    quote! {
        impl #krate::ArgSchema for #ident {
            fn schema_name() -> &'static str {
                #schema_name
            }

            fn fields() -> ::std::vec::Vec<#krate::FieldSpec> {
                ::std::vec![#(#fields),*]
            }
        }

        #model_impl
    }
}

/// Builder expression producing one field's `FieldSpec`.
fn field_spec(field: &FieldDef, krate: &TokenStream) -> TokenStream {
    let name = field.name();
    let ty = &field.ty;
    let mut spec = if field.attrs.nested {
        quote! { #krate::FieldSpec::nested::<#ty>(#name) }
    } else {
        quote! { #krate::FieldSpec::of::<#ty>(#name) }
    };
    if let Some(help) = &field.attrs.help {
        spec = quote! { #spec.description(#help) };
    }
    match &field.attrs.default {
        Some(DefaultAttr::Expr(expr)) => {
            spec = quote! { #spec.default_factory(|| -> #ty { #expr }) };
        }
        Some(DefaultAttr::Factory(path)) => {
            spec = quote! { #spec.default_factory(|| -> #ty { #path() }) };
        }
        None if option_inner(ty).is_some() => {
            spec = quote! { #spec.default_value(#krate::Value::Null) };
        }
        None => {}
    }
    spec
}
