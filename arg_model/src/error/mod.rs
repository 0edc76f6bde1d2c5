//! Error types produced while binding schemas to command lines.

mod helpers;
mod types;

pub use helpers::is_display_request;
pub use types::{ArgModelError, ArgModelResult};
