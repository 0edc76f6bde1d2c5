//! Literal parsing helpers for derive attributes.

use syn::{Lit, LitStr};

/// Parses `key = "..."`, naming the key when the literal is not a string.
pub(super) fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(other.span(), format!("{key} must be a string"))),
    }
}
