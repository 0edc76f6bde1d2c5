//! Shallow type inspection.

use syn::{GenericArgument, PathArguments, Type};

/// Returns `T` when `ty` is written as `Option<T>`.
///
/// Only the last path segment is inspected, so `std::option::Option<T>`
/// matches too. Aliases of `Option` are not recognised.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let last = path.path.segments.last()?;
    if last.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
