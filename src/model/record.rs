use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::field::Field;
use super::validation::{
    FieldError, parse_date, parse_number, validate_email, validate_text, validate_url,
};

/// Stable identity of a record, assigned once at creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Raw, unvalidated input for one record, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub text: String,
    pub number: String,
    pub email: String,
    pub date: String,
    pub url: String,
}

impl RecordDraft {
    /// Creates a draft with default values: empty text, zero, empty email,
    /// `now` as an RFC 3339 timestamp, empty URL.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            text: String::new(),
            number: "0".to_string(),
            email: String::new(),
            date: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            url: String::new(),
        }
    }

    /// Returns the raw value of one field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Text => &self.text,
            Field::Number => &self.number,
            Field::Email => &self.email,
            Field::Date => &self.date,
            Field::Url => &self.url,
        }
    }

    /// Replaces the raw value of one field.
    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Text => &mut self.text,
            Field::Number => &mut self.number,
            Field::Email => &mut self.email,
            Field::Date => &mut self.date,
            Field::Url => &mut self.url,
        };
        *slot = value;
    }
}

/// A fully validated record with parsed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub text: String,
    pub number: f64,
    pub email: String,
    pub date: DateTime<Utc>,
    pub url: String,
}

impl TryFrom<&RecordDraft> for Record {
    /// Every broken rule, in field display order.
    type Error = Vec<(Field, FieldError)>;

    fn try_from(draft: &RecordDraft) -> Result<Self, Self::Error> {
        let text = validate_text(&draft.text);
        let number = parse_number(&draft.number);
        let email = validate_email(&draft.email);
        let date = parse_date(&draft.date);
        let url = validate_url(&draft.url);

        match (text, number, email, date, url) {
            (Ok(text), Ok(number), Ok(email), Ok(date), Ok(url)) => Ok(Self {
                text,
                number,
                email,
                date,
                url,
            }),
            (text, number, email, date, url) => Err([
                (Field::Text, text.err()),
                (Field::Number, number.err()),
                (Field::Email, email.err()),
                (Field::Date, date.err()),
                (Field::Url, url.err()),
            ]
            .into_iter()
            .filter_map(|(field, err)| err.map(|e| (field, e)))
            .collect()),
        }
    }
}

/// Validation state of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    /// Not yet edited or validated; shows no error.
    #[default]
    Untouched,
    Valid,
    Invalid(FieldError),
}

impl FieldState {
    /// Builds the state from a rule outcome.
    pub fn from_result(result: Result<(), FieldError>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(e) => Self::Invalid(e),
        }
    }

    /// Returns the error, if the field is invalid.
    pub fn error(&self) -> Option<FieldError> {
        match self {
            Self::Invalid(e) => Some(*e),
            _ => None,
        }
    }
}
