//! Mapping from Rust field types to annotations.

use std::path::PathBuf;

use camino::Utf8PathBuf;

use super::Annotation;

/// Rust types that can appear as schema fields.
///
/// The derive macro calls [`ArgType::annotation`] for every field that is
/// not marked `nested`. Implement it for your own types to make them usable
/// as flag values; [`Annotation::scalar`] covers anything implementing
/// [`std::str::FromStr`] and [`serde::Serialize`].
///
/// # Examples
///
/// ```
/// use arg_model::{Annotation, ArgType};
///
/// assert!(matches!(<bool as ArgType>::annotation(), Annotation::Bool));
/// assert_eq!(<Option<u8> as ArgType>::annotation().to_string(), "u8 | None");
/// ```
pub trait ArgType {
    /// Type tag describing `Self`.
    fn annotation() -> Annotation;
}

impl ArgType for String {
    fn annotation() -> Annotation {
        Annotation::Text
    }
}

impl ArgType for bool {
    fn annotation() -> Annotation {
        Annotation::Bool
    }
}

impl<T: ArgType> ArgType for Option<T> {
    fn annotation() -> Annotation {
        Annotation::optional(T::annotation())
    }
}

impl<T: ArgType> ArgType for Vec<T> {
    fn annotation() -> Annotation {
        Annotation::List(Box::new(T::annotation()))
    }
}

// 128-bit integers are left out: parsed values travel as JSON numbers,
// which hold at most 64 bits.
macro_rules! scalar_arg_types {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ArgType for $ty {
                fn annotation() -> Annotation {
                    Annotation::scalar::<$ty>()
                }
            }
        )*
    };
}

scalar_arg_types!(
    PathBuf,
    Utf8PathBuf,
    char,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
);
