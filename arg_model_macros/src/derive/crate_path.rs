//! Runtime crate path used by generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Tokens naming the runtime crate.
///
/// Defaults to `::arg_model`; `#[arg_model(crate = "...")]` replaces it so
/// generated code still resolves when the dependency is renamed.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::arg_model }, |path| quote! { #path })
}
