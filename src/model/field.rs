use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::{
    FieldError, parse_date, parse_number, validate_email, validate_text, validate_url,
};

/// One of the five fields every record carries.
///
/// Variant order is display order, tab order and error-reporting order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    #[default]
    Text,
    Number,
    Email,
    Date,
    Url,
}

static ALL_FIELDS: &[Field] = &[
    Field::Text,
    Field::Number,
    Field::Email,
    Field::Date,
    Field::Url,
];

/// Number of fields in a record.
pub const FIELD_COUNT: usize = 5;

impl Field {
    /// Returns all fields in display order.
    pub fn all() -> &'static [Field] {
        ALL_FIELDS
    }

    /// Position of this field within a record (0-based).
    pub fn index(self) -> usize {
        match self {
            Field::Text => 0,
            Field::Number => 1,
            Field::Email => 2,
            Field::Date => 3,
            Field::Url => 4,
        }
    }

    /// Returns the next field in display order, or `None` after the last.
    pub fn next(self) -> Option<Field> {
        ALL_FIELDS.get(self.index() + 1).copied()
    }

    /// Returns the previous field in display order, or `None` before the first.
    pub fn prev(self) -> Option<Field> {
        self.index()
            .checked_sub(1)
            .and_then(|i| ALL_FIELDS.get(i).copied())
    }

    /// Human-readable label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::Text => "Text",
            Field::Number => "Number",
            Field::Email => "Email",
            Field::Date => "Date",
            Field::Url => "URL",
        }
    }

    /// Hint rendered in an empty input.
    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Text => "Enter text",
            Field::Number => "Enter number",
            Field::Email => "Enter email",
            Field::Date => "YYYY-MM-DD",
            Field::Url => "Enter URL",
        }
    }

    /// Runs this field's rule against a raw input value.
    pub fn validate(self, raw: &str) -> Result<(), FieldError> {
        match self {
            Field::Text => validate_text(raw).map(drop),
            Field::Number => parse_number(raw).map(drop),
            Field::Email => validate_email(raw).map(drop),
            Field::Date => parse_date(raw).map(drop),
            Field::Url => validate_url(raw).map(drop),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
