//! Schema-driven flag generation and model reconstruction.
//!
//! These are the functions behind the default [`ArgModel`] methods. Custom
//! implementations call them after handling their manual fields.
//!
//! [`ArgModel`]: crate::ArgModel

use figment::{Figment, providers::Serialized};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::{
    annotation::{Annotation, Converter},
    error::{ArgModelError, ArgModelResult},
    field::FieldSpec,
    flag::{FlagAction, FlagSpec, field_name_to_flag},
    model::ArgSchema,
    parser::{FlagSurface, ParsedArgs, StagedFlags},
    values::{ManualFields, PartialValues},
};

/// How a field's flag consumes and converts its values.
#[derive(Clone, Copy, Debug)]
struct Conversion {
    action: FlagAction,
    converter: Option<Converter>,
}

impl Conversion {
    const fn set(converter: Option<Converter>) -> Self {
        Self {
            action: FlagAction::Set,
            converter,
        }
    }

    const fn append(converter: Option<Converter>) -> Self {
        Self {
            action: FlagAction::Append,
            converter,
        }
    }
}

/// Resolves the conversion for a field's annotation.
///
/// Text needs no conversion and yields `None`. Booleans yield
/// [`Converter::Toggle`]. A union with exactly one alternative besides the
/// none-type resolves to that alternative. Lists resolve to the conversion
/// of their element.
///
/// # Errors
///
/// Returns [`ArgModelError::TypeConversion`] for unions with several
/// non-absent alternatives, for the bare none-type, for nested schemas and
/// for lists of anything but text or scalars.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
///
/// use arg_model::{Annotation, ArgType, binder::annotation_to_converter};
///
/// # fn main() -> arg_model::ArgModelResult<()> {
/// let optional = <Option<PathBuf> as ArgType>::annotation();
/// let converter = annotation_to_converter("Args", "infile", &optional)?;
/// assert_eq!(converter.map(|c| c.type_name()), Some("PathBuf"));
///
/// let ambiguous = Annotation::union([Annotation::scalar::<PathBuf>(), Annotation::Text]);
/// assert!(annotation_to_converter("Args", "infile", &ambiguous).is_err());
/// # Ok(())
/// # }
/// ```
pub fn annotation_to_converter(
    schema: &'static str,
    field: &'static str,
    annotation: &Annotation,
) -> ArgModelResult<Option<Converter>> {
    conversion_for(schema, field, annotation).map(|conversion| conversion.converter)
}

fn conversion_for(
    schema: &'static str,
    field: &'static str,
    annotation: &Annotation,
) -> ArgModelResult<Conversion> {
    resolve(annotation).ok_or_else(|| ArgModelError::TypeConversion {
        schema,
        field,
        annotation: annotation.to_string(),
    })
}

fn resolve(annotation: &Annotation) -> Option<Conversion> {
    match annotation {
        Annotation::Text => Some(Conversion::set(None)),
        Annotation::Bool => Some(Conversion {
            action: FlagAction::Toggle,
            converter: Some(Converter::Toggle),
        }),
        Annotation::Scalar(converter) => Some(Conversion::set(Some(*converter))),
        Annotation::List(element) => match element.as_ref() {
            Annotation::Text => Some(Conversion::append(None)),
            Annotation::Scalar(converter) => Some(Conversion::append(Some(*converter))),
            _ => None,
        },
        Annotation::Union(alternatives) => {
            let mut present = alternatives.iter().filter(|alt| !alt.is_absent());
            let only = present.next()?;
            if present.next().is_some() {
                return None;
            }
            resolve(only)
        }
        Annotation::Nested(_) | Annotation::Absent => None,
    }
}

/// Registers one flag per field of `M` not listed in `manual`.
///
/// Nested schemas register their own flags, flattened into the same
/// namespace and without the manual set. Every flag is staged first and
/// committed only once the whole schema converted, so a failure leaves
/// `surface` untouched.
///
/// # Errors
///
/// Returns [`ArgModelError::TypeConversion`] or [`ArgModelError::Default`]
/// for fields that cannot become flags, and propagates conflicts reported by
/// `surface`.
pub fn update_parser<M>(surface: &mut dyn FlagSurface, manual: &ManualFields) -> ArgModelResult<()>
where
    M: ArgSchema + ?Sized,
{
    let schema = M::schema_name();
    let mut staged = StagedFlags::new();
    for field in M::fields() {
        let name = field.name();
        if manual.contains(name) {
            debug!(schema, field = name, "skipping manually handled field");
            continue;
        }
        if let Annotation::Nested(nested) = field.annotation() {
            debug!(schema, field = name, nested = nested.name(), "flattening nested schema");
            nested.update_parser(&mut staged)?;
            continue;
        }
        staged.add_flag(flag_for(schema, &field)?)?;
    }
    debug!(schema, flags = staged.len(), "schema converted");
    staged.commit(surface)
}

fn flag_for(schema: &'static str, field: &FieldSpec) -> ArgModelResult<FlagSpec> {
    let conversion = conversion_for(schema, field.name(), field.annotation())?;
    let mut spec = FlagSpec::new(field_name_to_flag(field.name()))
        .dest(field.name())
        .action(conversion.action);
    if let Some(converter) = conversion.converter {
        spec = spec.converter(converter);
    }
    spec = match field.resolve_default(schema)? {
        Some(default) => spec.default_value(default),
        None => spec.required(true),
    };
    if let Some(help) = field.help() {
        spec = spec.help(help.to_owned());
    }
    Ok(spec)
}

/// Builds an `M` from parsed arguments.
///
/// See [`reconstruct_values`] for how each field is resolved. The resulting
/// map is handed to [`figment`] for extraction, which performs the model's
/// validation.
///
/// # Errors
///
/// Propagates nested reconstruction failures and returns
/// [`ArgModelError::Validation`] when extraction fails.
pub fn from_parsed_args<M>(args: &ParsedArgs, partial: PartialValues) -> ArgModelResult<M>
where
    M: ArgSchema + DeserializeOwned,
{
    let values = reconstruct_values::<M>(args, partial)?;
    let schema = M::schema_name();
    trace!(schema, fields = values.len(), "validating reconstructed values");
    Figment::from(Serialized::defaults(Value::Object(values)))
        .extract()
        .map_err(|err| ArgModelError::validation(schema, err))
}

/// Resolves the raw value of every field of `M`.
///
/// Each field takes the first of: its entry in `partial`, the rebuilt
/// nested instance for nested fields, the parsed value stored under its
/// name, or its declared default. The last case covers manual fields whose
/// flag was never supplied. Required fields with none of these are left out
/// and reported by validation. Entries in `partial` naming no field are
/// ignored.
///
/// # Errors
///
/// Propagates nested reconstruction failures and default evaluation
/// failures.
pub fn reconstruct_values<M>(
    args: &ParsedArgs,
    mut partial: PartialValues,
) -> ArgModelResult<Map<String, Value>>
where
    M: ArgSchema + ?Sized,
{
    let schema = M::schema_name();
    let mut values = Map::new();
    for field in M::fields() {
        let name = field.name();
        let value = if let Some(value) = partial.take(name) {
            trace!(schema, field = name, "using partial value");
            Some(value)
        } else if let Annotation::Nested(nested) = field.annotation() {
            Some(nested.from_parsed_args(args)?)
        } else if let Some(value) = args.value(name) {
            Some(value)
        } else {
            field.resolve_default(schema)?
        };
        match value {
            Some(value) => {
                values.insert(name.to_owned(), value);
            }
            None => trace!(schema, field = name, "no value or default; leaving field unset"),
        }
    }
    Ok(values)
}
