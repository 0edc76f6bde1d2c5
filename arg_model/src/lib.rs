//! Command-line flags derived from declarative schemas.
//!
//! A schema is a struct whose fields carry a type, an optional description
//! and an optional default. Deriving [`ArgModel`] registers one `--flag` per
//! field on an [`ArgParser`] and turns the parsed arguments back into a
//! validated instance. Tokenizing is delegated to `clap`; validation goes
//! through `serde` via `figment` extraction.
//!
//! ```
//! use arg_model::ArgModel;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Deserialize, Serialize, ArgModel)]
//! struct Args {
//!     /// The user to connect as.
//!     user: String,
//!     #[arg_model(default = "puppy".into())]
//!     host: String,
//! }
//!
//! # fn main() -> arg_model::ArgModelResult<()> {
//! let args = Args::try_parse_from(["--user", "kitten"])?;
//! assert_eq!((args.user.as_str(), args.host.as_str()), ("kitten", "puppy"));
//! # Ok(())
//! # }
//! ```

pub use arg_model_macros::ArgModel;

mod annotation;
pub mod binder;
mod error;
mod field;
mod flag;
mod model;
mod parser;
mod values;

pub use annotation::{Annotation, ArgType, Converter, ParseFn};
pub use error::{ArgModelError, ArgModelResult, is_display_request};
pub use field::{DefaultFactory, FieldDefault, FieldSpec};
pub use flag::{FlagAction, FlagSpec, field_name_to_flag, flag_to_dest};
pub use model::{ArgModel, ArgSchema, NestedModel};
pub use parser::{ArgParser, FlagGroup, FlagSurface, ParsedArgs, ProgramInfo, StagedFlags};
pub use values::{ManualFields, PartialValues};

/// Dynamic value type used for defaults, parsed values and partial maps.
pub use serde_json::Value;
