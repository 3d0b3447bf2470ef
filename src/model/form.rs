use std::collections::BTreeMap;

use chrono::Utc;
use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

use super::field::{FIELD_COUNT, Field};
use super::record::{FieldState, Record, RecordDraft, RecordId};
use super::validation::FieldError;

/// Current error messages keyed by (record position, field), in display order.
pub type ValidationErrors = BTreeMap<(usize, Field), FieldError>;

/// Structural misuse of a [`FormState`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("no record at position {0}")]
    UnknownPosition(usize),
    #[error("no record with id {0}")]
    UnknownRecord(RecordId),
}

/// A rejected submission.
///
/// `position`/`field`/`error` name the first failure in display order;
/// `errors` holds every failure so they can all be shown at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {position}, {field}: {error}")]
pub struct SubmitError {
    pub position: usize,
    pub field: Field,
    pub error: FieldError,
    pub errors: ValidationErrors,
}

/// The dataset produced by a successful submission, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub items: Vec<Record>,
}

impl Submission {
    /// Formats the dataset as indented JSON.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// One record in the list: its identity, raw input and per-field state.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordEntry {
    id: RecordId,
    draft: RecordDraft,
    states: [FieldState; FIELD_COUNT],
}

impl RecordEntry {
    fn new(id: RecordId, draft: RecordDraft) -> Self {
        Self {
            id,
            draft,
            states: [FieldState::Untouched; FIELD_COUNT],
        }
    }

    /// Returns the record's stable id.
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the raw input.
    pub fn draft(&self) -> &RecordDraft {
        &self.draft
    }

    /// Returns the raw value of one field.
    pub fn value(&self, field: Field) -> &str {
        self.draft.get(field)
    }

    /// Returns the validation state of one field.
    pub fn state(&self, field: Field) -> FieldState {
        self.states[field.index()]
    }

    /// Returns the error currently shown for one field.
    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.state(field).error()
    }

    /// Returns `true` if any field currently shows an error.
    pub fn has_errors(&self) -> bool {
        self.states.iter().any(|s| s.error().is_some())
    }

    fn validate(&mut self, field: Field) -> FieldState {
        let state = FieldState::from_result(field.validate(self.draft.get(field)));
        self.states[field.index()] = state;
        state
    }
}

/// Ordered, growable list of records with per-field validation.
///
/// Always holds at least one record. Records keep their [`RecordId`] for
/// their whole life, so addressing by id stays correct when the list
/// changes around them.
#[derive(Debug, Clone)]
pub struct FormState {
    entries: Vec<RecordEntry>,
    next_id: u64,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Creates a form holding one default record.
    pub fn new() -> Self {
        let mut form = Self {
            entries: Vec::new(),
            next_id: 0,
        };
        form.push_default();
        form
    }

    /// Number of records. Never zero.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: a form holds at least one record.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns all records in display order.
    pub fn records(&self) -> &[RecordEntry] {
        &self.entries
    }

    /// Returns the record at `position`, if any.
    pub fn get(&self, position: usize) -> Option<&RecordEntry> {
        self.entries.get(position)
    }

    /// Returns the current display position of a record.
    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Appends a default record at the end and returns its id.
    pub fn append(&mut self) -> RecordId {
        let id = self.push_default();
        debug!("appended record {id}, {} records", self.len());
        id
    }

    /// Returns `true` if [`remove_last`](Self::remove_last) would remove anything.
    pub fn can_remove(&self) -> bool {
        self.entries.len() > 1
    }

    /// Removes the last record. A no-op returning `false` when only one remains.
    pub fn remove_last(&mut self) -> bool {
        if !self.can_remove() {
            debug!("remove_last ignored: only one record left");
            return false;
        }
        if let Some(entry) = self.entries.pop() {
            debug!("removed record {}, {} records", entry.id, self.len());
        }
        true
    }

    /// Sets one field of the record at `position` and re-validates that field.
    pub fn update_field(
        &mut self,
        position: usize,
        field: Field,
        raw: impl Into<String>,
    ) -> Result<FieldState, FormError> {
        let entry = self
            .entries
            .get_mut(position)
            .ok_or(FormError::UnknownPosition(position))?;
        entry.draft.set(field, raw.into());
        Ok(entry.validate(field))
    }

    /// Same as [`update_field`](Self::update_field), addressing the record by id.
    pub fn update_field_by_id(
        &mut self,
        id: RecordId,
        field: Field,
        raw: impl Into<String>,
    ) -> Result<FieldState, FormError> {
        let position = self.position_of(id).ok_or(FormError::UnknownRecord(id))?;
        self.update_field(position, field, raw)
    }

    /// Current error messages for every invalid field.
    pub fn errors(&self) -> ValidationErrors {
        self.entries
            .iter()
            .enumerate()
            .flat_map(|(position, entry)| {
                Field::all()
                    .iter()
                    .filter_map(move |&field| entry.error(field).map(|e| ((position, field), e)))
            })
            .collect()
    }

    /// Validates every field of every record.
    ///
    /// All field states are refreshed either way and raw input is left
    /// untouched. On success the parsed records are returned in display
    /// order.
    pub fn submit(&mut self) -> Result<Submission, SubmitError> {
        let mut items = Vec::with_capacity(self.entries.len());
        for entry in &mut self.entries {
            entry.states = [FieldState::Valid; FIELD_COUNT];
            match Record::try_from(&entry.draft) {
                Ok(record) => items.push(record),
                Err(failures) => {
                    for (field, error) in failures {
                        entry.states[field.index()] = FieldState::Invalid(error);
                    }
                }
            }
        }

        let errors = self.errors();
        if let Some((&(position, field), &error)) = errors.iter().next() {
            warn!(
                "submit rejected: {} invalid field(s), first at record {position} {field}: {error}",
                errors.len()
            );
            return Err(SubmitError {
                position,
                field,
                error,
                errors,
            });
        }

        info!("submit accepted: {} records", items.len());
        Ok(Submission { items })
    }

    fn push_default(&mut self) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.entries.push(RecordEntry::new(id, RecordDraft::new(Utc::now())));
        id
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use quickcheck_macros::quickcheck;

    use super::*;

    fn fill_valid(form: &mut FormState, position: usize, text: &str) {
        form.update_field(position, Field::Text, text).unwrap();
        form.update_field(position, Field::Number, "25").unwrap();
        form.update_field(position, Field::Email, "a@b.com").unwrap();
        form.update_field(position, Field::Date, "2024-01-01").unwrap();
        form.update_field(position, Field::Url, "https://x.com").unwrap();
    }

    mod construction {
        use super::*;

        #[test]
        fn starts_with_one_default_record() {
            let form = FormState::new();
            assert_eq!(form.len(), 1);
            assert!(!form.is_empty());
            let entry = form.get(0).unwrap();
            assert_eq!(entry.value(Field::Text), "");
            assert_eq!(entry.value(Field::Number), "0");
            assert_eq!(entry.value(Field::Email), "");
            assert!(Field::Date.validate(entry.value(Field::Date)).is_ok());
            assert_eq!(entry.value(Field::Url), "");
        }

        #[test]
        fn starts_without_errors() {
            let form = FormState::new();
            assert!(form.errors().is_empty());
            for field in Field::all() {
                assert_eq!(form.get(0).unwrap().state(*field), FieldState::Untouched);
            }
        }

        #[test]
        fn default_trait() {
            assert_eq!(FormState::default().len(), 1);
        }
    }

    mod append_remove {
        use super::*;

        #[test]
        fn append_adds_default_record_at_end() {
            let mut form = FormState::new();
            let id = form.append();
            assert_eq!(form.len(), 2);
            assert_eq!(form.position_of(id), Some(1));
            let entry = form.get(1).unwrap();
            assert_eq!(entry.value(Field::Number), "0");
            assert!(!entry.has_errors());
        }

        #[test]
        fn append_has_no_errors_even_after_failed_submit() {
            let mut form = FormState::new();
            assert!(form.submit().is_err());
            form.append();
            assert!(!form.get(1).unwrap().has_errors());
            assert!(form.errors().keys().all(|(position, _)| *position == 0));
        }

        #[test]
        fn ids_are_monotonic() {
            let mut form = FormState::new();
            let first = form.get(0).unwrap().id();
            let second = form.append();
            let third = form.append();
            assert!(first < second && second < third);
        }

        #[test]
        fn ids_are_never_reused() {
            let mut form = FormState::new();
            let removed = form.append();
            assert!(form.remove_last());
            let fresh = form.append();
            assert_ne!(removed, fresh);
            assert_eq!(form.position_of(removed), None);
        }

        #[test]
        fn remove_last_with_one_record_is_noop() {
            let mut form = FormState::new();
            assert!(!form.can_remove());
            assert!(!form.remove_last());
            assert_eq!(form.len(), 1);
        }

        #[test]
        fn remove_last_removes_the_tail() {
            let mut form = FormState::new();
            let head = form.get(0).unwrap().id();
            form.append();
            assert!(form.can_remove());
            assert!(form.remove_last());
            assert_eq!(form.len(), 1);
            assert_eq!(form.get(0).unwrap().id(), head);
        }

        #[test]
        fn remove_last_discards_its_errors() {
            let mut form = FormState::new();
            form.append();
            form.update_field(1, Field::Email, "bad").unwrap();
            assert!(form.errors().contains_key(&(1, Field::Email)));
            form.remove_last();
            assert!(form.errors().is_empty());
        }

        #[quickcheck]
        fn count_never_drops_below_one(ops: Vec<bool>) -> bool {
            let mut form = FormState::new();
            let mut expected = 1usize;
            for append in ops {
                if append {
                    form.append();
                    expected += 1;
                } else {
                    form.remove_last();
                    expected = expected.saturating_sub(1).max(1);
                }
                if form.len() < 1 || form.len() != expected {
                    return false;
                }
            }
            true
        }
    }

    mod update_field {
        use super::*;

        #[test]
        fn sets_value_and_validates_that_field_only() {
            let mut form = FormState::new();
            let state = form.update_field(0, Field::Number, "-5").unwrap();
            assert_eq!(state, FieldState::Invalid(FieldError::Negative));
            let entry = form.get(0).unwrap();
            assert_eq!(entry.value(Field::Number), "-5");
            assert_eq!(entry.state(Field::Text), FieldState::Untouched);
            assert_eq!(entry.state(Field::Email), FieldState::Untouched);
        }

        #[test]
        fn negative_then_non_numeric() {
            let mut form = FormState::new();
            form.update_field(0, Field::Number, "-5").unwrap();
            assert_eq!(form.get(0).unwrap().error(Field::Number), Some(FieldError::Negative));
            assert_eq!(form.errors()[&(0, Field::Number)].to_string(), "Must be positive");

            form.update_field(0, Field::Number, "abc").unwrap();
            assert_eq!(form.get(0).unwrap().error(Field::Number), Some(FieldError::NotANumber));
            assert_eq!(form.errors()[&(0, Field::Number)].to_string(), "Must be a number");
        }

        #[test]
        fn error_cleared_when_field_becomes_valid() {
            let mut form = FormState::new();
            form.update_field(0, Field::Email, "nope").unwrap();
            assert!(form.get(0).unwrap().has_errors());
            let state = form.update_field(0, Field::Email, "a@b.com").unwrap();
            assert_eq!(state, FieldState::Valid);
            assert!(form.errors().is_empty());
        }

        #[test]
        fn unknown_position_is_an_error() {
            let mut form = FormState::new();
            assert_eq!(
                form.update_field(3, Field::Text, "x"),
                Err(FormError::UnknownPosition(3))
            );
        }

        #[test]
        fn by_id_follows_the_record() {
            let mut form = FormState::new();
            let second = form.append();
            form.append();
            form.update_field_by_id(second, Field::Text, "Bob").unwrap();
            assert_eq!(form.get(1).unwrap().value(Field::Text), "Bob");
            assert_eq!(form.get(2).unwrap().value(Field::Text), "");
        }

        #[test]
        fn by_id_after_removal_is_an_error() {
            let mut form = FormState::new();
            let tail = form.append();
            form.remove_last();
            assert_eq!(
                form.update_field_by_id(tail, Field::Text, "x"),
                Err(FormError::UnknownRecord(tail))
            );
        }

        #[test]
        fn edits_to_other_records_survive_removal() {
            let mut form = FormState::new();
            let head = form.get(0).unwrap().id();
            form.append();
            form.update_field_by_id(head, Field::Text, "Alice").unwrap();
            form.remove_last();
            form.update_field_by_id(head, Field::Email, "a@b.com").unwrap();
            let entry = form.get(0).unwrap();
            assert_eq!(entry.value(Field::Text), "Alice");
            assert_eq!(entry.value(Field::Email), "a@b.com");
        }
    }

    mod submit {
        use super::*;

        #[test]
        fn single_valid_record() {
            let mut form = FormState::new();
            fill_valid(&mut form, 0, "Alice");
            let submission = form.submit().unwrap();
            assert_eq!(
                submission.items,
                vec![Record {
                    text: "Alice".into(),
                    number: 25.0,
                    email: "a@b.com".into(),
                    date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                    url: "https://x.com".into(),
                }]
            );
        }

        #[test]
        fn dataset_preserves_display_order() {
            let mut form = FormState::new();
            form.append();
            form.append();
            for (position, name) in ["first", "second", "third"].into_iter().enumerate() {
                fill_valid(&mut form, position, name);
            }
            let texts: Vec<String> = form
                .submit()
                .unwrap()
                .items
                .into_iter()
                .map(|r| r.text)
                .collect();
            assert_eq!(texts, vec!["first", "second", "third"]);
        }

        #[test]
        fn empty_email_in_second_record_rejects() {
            let mut form = FormState::new();
            form.append();
            fill_valid(&mut form, 0, "Alice");
            fill_valid(&mut form, 1, "Bob");
            form.update_field(1, Field::Email, "").unwrap();

            let err = form.submit().unwrap_err();
            assert_eq!(err.position, 1);
            assert_eq!(err.field, Field::Email);
            assert_eq!(err.error.to_string(), "Email field is required");
            assert_eq!(
                form.get(1).unwrap().error(Field::Email),
                Some(FieldError::EmailRequired)
            );
        }

        #[test]
        fn rejection_reports_every_error() {
            let mut form = FormState::new();
            form.append();
            let err = form.submit().unwrap_err();
            let expected: ValidationErrors = [0, 1]
                .into_iter()
                .flat_map(|p| {
                    [
                        ((p, Field::Text), FieldError::TextRequired),
                        ((p, Field::Email), FieldError::EmailRequired),
                        ((p, Field::Url), FieldError::UrlRequired),
                    ]
                })
                .collect();
            assert_eq!(err.errors, expected);
            assert_eq!(form.errors(), expected);
            assert_eq!((err.position, err.field), (0, Field::Text));
        }

        #[test]
        fn rejection_keeps_input() {
            let mut form = FormState::new();
            form.update_field(0, Field::Text, "Alice").unwrap();
            form.update_field(0, Field::Url, "not a url").unwrap();
            assert!(form.submit().is_err());
            let entry = form.get(0).unwrap();
            assert_eq!(entry.value(Field::Text), "Alice");
            assert_eq!(entry.value(Field::Url), "not a url");
        }

        #[test]
        fn submit_marks_valid_fields_valid() {
            let mut form = FormState::new();
            assert!(form.submit().is_err());
            let entry = form.get(0).unwrap();
            assert_eq!(entry.state(Field::Number), FieldState::Valid);
            assert_eq!(entry.state(Field::Date), FieldState::Valid);
        }

        #[test]
        fn resubmit_after_fix_succeeds() {
            let mut form = FormState::new();
            assert!(form.submit().is_err());
            fill_valid(&mut form, 0, "Alice");
            assert!(form.submit().is_ok());
            assert!(form.errors().is_empty());
        }

        #[test]
        fn submit_error_display() {
            let mut form = FormState::new();
            let err = form.submit().unwrap_err();
            assert_eq!(err.to_string(), "record 0, Text: Text field is required");
        }

        #[test]
        fn dataset_json() {
            let mut form = FormState::new();
            fill_valid(&mut form, 0, "Alice");
            let json = form.submit().unwrap().to_pretty_json().unwrap();
            insta::assert_snapshot!(json, @r#"
            {
              "items": [
                {
                  "text": "Alice",
                  "number": 25.0,
                  "email": "a@b.com",
                  "date": "2024-01-01T00:00:00Z",
                  "url": "https://x.com"
                }
              ]
            }
            "#);
        }
    }
}
