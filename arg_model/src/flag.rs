//! Flag tokens and flag specifications.

use std::borrow::Cow;

use serde_json::Value;

use crate::annotation::Converter;

/// Converts a field name into its flag token.
///
/// The token is the name prefixed with `--`, with every underscore replaced
/// by a hyphen. No escaping or collision detection is performed.
///
/// # Examples
///
/// ```
/// assert_eq!(arg_model::field_name_to_flag("account_ids"), "--account-ids");
/// assert_eq!(arg_model::field_name_to_flag("host"), "--host");
/// ```
#[must_use]
pub fn field_name_to_flag(field_name: &str) -> String {
    format!("--{}", field_name.replace('_', "-"))
}

/// Derives the destination key for a token lacking an explicit one.
///
/// Leading dashes are dropped and the remaining hyphens become underscores,
/// so `--my-user-flag` stores its value under `my_user_flag`.
#[must_use]
pub fn flag_to_dest(token: &str) -> String {
    token.trim_start_matches('-').replace('-', "_")
}

/// How a flag consumes its values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlagAction {
    /// Takes exactly one value; the last occurrence wins.
    #[default]
    Set,
    /// Takes no value; presence means `true`.
    Toggle,
    /// Takes one value per occurrence and collects them in order.
    Append,
}

/// Everything a flag-registration surface needs to add one flag.
///
/// # Examples
///
/// ```
/// use arg_model::{FlagAction, FlagSpec};
///
/// let spec = FlagSpec::new("--account-id")
///     .dest("account_ids")
///     .action(FlagAction::Append)
///     .help("Account to include; may be repeated.");
/// assert_eq!(spec.dest_key(), "account_ids");
/// assert_eq!(spec.long_name(), Some("account-id"));
/// ```
#[derive(Clone, Debug)]
pub struct FlagSpec {
    token: String,
    dest: Option<String>,
    action: FlagAction,
    converter: Option<Converter>,
    default: Option<Value>,
    required: bool,
    help: Option<Cow<'static, str>>,
}

impl FlagSpec {
    /// Starts a specification for the given token, e.g. `--host`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            dest: None,
            action: FlagAction::Set,
            converter: None,
            default: None,
            required: false,
            help: None,
        }
    }

    /// Overrides the destination key.
    #[must_use]
    pub fn dest(mut self, dest: impl Into<String>) -> Self {
        self.dest = Some(dest.into());
        self
    }

    /// Sets how the flag consumes values.
    #[must_use]
    pub fn action(mut self, action: FlagAction) -> Self {
        self.action = action;
        self
    }

    /// Sets the conversion applied to each raw value.
    ///
    /// A [`Converter::Toggle`] turns the flag into a toggle.
    #[must_use]
    pub fn converter(mut self, converter: Converter) -> Self {
        if converter.is_toggle() {
            self.action = FlagAction::Toggle;
        } else {
            self.converter = Some(converter);
        }
        self
    }

    /// Pre-populates the flag with a default value.
    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Marks the flag as mandatory.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help(mut self, help: impl Into<Cow<'static, str>>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Token as supplied, e.g. `--host`.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Token without its `--` prefix, or `None` when the prefix is missing.
    #[must_use]
    pub fn long_name(&self) -> Option<&str> {
        self.token.strip_prefix("--")
    }

    /// Destination key, derived from the token when not set explicitly.
    #[must_use]
    pub fn dest_key(&self) -> Cow<'_, str> {
        self.dest
            .as_deref()
            .map_or_else(|| Cow::Owned(flag_to_dest(&self.token)), Cow::Borrowed)
    }

    /// How the flag consumes values.
    #[must_use]
    pub const fn flag_action(&self) -> FlagAction {
        self.action
    }

    /// Conversion applied to raw values, if any.
    #[must_use]
    pub const fn value_converter(&self) -> Option<Converter> {
        self.converter
    }

    /// Default value, if any.
    #[must_use]
    pub const fn default_ref(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether the flag is mandatory.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Help text, if any.
    #[must_use]
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }
}
