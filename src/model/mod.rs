mod field;
mod form;
mod record;
mod validation;

pub use field::{FIELD_COUNT, Field};
pub use form::{FormError, FormState, RecordEntry, SubmitError, Submission, ValidationErrors};
pub use record::{FieldState, Record, RecordDraft, RecordId};
pub use validation::{
    FieldError, parse_date, parse_number, validate_email, validate_text, validate_url,
};
