//! Input parsing for the `ArgModel` derive macro.
//!
//! Gathers the struct identifier, its fields and their attributes in one
//! pass so invalid input fails before any code is generated.

use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type, ext::IdentExt};

use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// A named field and its parsed attributes.
pub(crate) struct FieldDef {
    pub ident: Ident,
    pub ty: Type,
    pub attrs: FieldAttrs,
}

impl FieldDef {
    /// Field name as written, without any raw-identifier prefix.
    pub(crate) fn name(&self) -> LitStr {
        LitStr::new(&self.ident.unraw().to_string(), self.ident.span())
    }
}

/// Everything the generator needs from the annotated struct.
pub(crate) struct ParsedInput {
    pub ident: Ident,
    pub attrs: StructAttrs,
    pub fields: Vec<FieldDef>,
}

impl ParsedInput {
    /// Schema name: the `name` attribute, else the struct identifier.
    pub(crate) fn schema_name(&self) -> LitStr {
        self.attrs
            .name
            .clone()
            .unwrap_or_else(|| LitStr::new(&self.ident.to_string(), self.ident.span()))
    }
}

pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let ident = input.ident.clone();
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "ArgModel cannot be derived for generic structs",
        ));
    }
    let attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "ArgModel requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &ident,
                "ArgModel can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(field_ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "ArgModel requires named fields"));
        };
        let field_attrs = parse_field_attrs(&field.attrs)?;
        if field_attrs.nested && field_attrs.default.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "nested fields cannot declare a default",
            ));
        }
        fields.push(FieldDef {
            ident: field_ident,
            ty: field.ty.clone(),
            attrs: field_attrs,
        });
    }
    Ok(ParsedInput {
        ident,
        attrs,
        fields,
    })
}
