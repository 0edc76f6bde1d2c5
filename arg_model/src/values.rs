//! Manual override sets and partial-value maps.
//!
//! Both are scoped to a single schema level: the binder never forwards them
//! into nested schemas.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ArgModelError, ArgModelResult};

/// Field names excluded from automatic flag generation and reconstruction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualFields(BTreeSet<String>);

impl ManualFields {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Marks a field as handled manually.
    pub fn insert(&mut self, field: impl Into<String>) -> &mut Self {
        self.0.insert(field.into());
        self
    }

    /// Returns `true` if the field is handled manually.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains(field)
    }

    /// Number of manual fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no field is handled manually.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ManualFields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Already-resolved field values that take precedence over parsed flags.
///
/// # Examples
///
/// ```
/// use arg_model::PartialValues;
///
/// let mut partial = PartialValues::new();
/// partial.insert("user", "puppy");
/// assert_eq!(partial.get("user"), Some(&serde_json::json!("puppy")));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartialValues(Map<String, Value>);

impl PartialValues {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Records a value for a field, replacing any earlier one.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Records any serialisable value for a field.
    ///
    /// # Errors
    ///
    /// Returns [`ArgModelError::Serialization`] when `value` cannot be
    /// represented as a [`Value`].
    pub fn insert_serialized<T: Serialize>(
        &mut self,
        field: impl Into<String>,
        value: &T,
    ) -> ArgModelResult<&mut Self> {
        let value = serde_json::to_value(value).map_err(|source| ArgModelError::Serialization {
            schema: "PartialValues",
            source,
        })?;
        self.0.insert(field.into(), value);
        Ok(self)
    }

    /// Looks up the value recorded for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Removes and returns the value recorded for a field.
    pub fn take(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Returns `true` if a value is recorded for the field.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}
