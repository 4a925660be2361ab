//! Account editing module.
//!
//! Provides the editable row representation, the label codec and validation.

mod labels;
mod row;
mod validation;

pub use labels::{LABEL_SEPARATOR, join_labels, parse_labels};
pub use row::{AccountRow, RowField};
pub use validation::{
    MAX_LABELS_LEN, MAX_LOGIN_LEN, MAX_PASSWORD_LEN, ValidationError, ValidationResult,
    validate_row,
};
