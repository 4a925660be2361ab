//! # keyroster-core
//!
//! Client-side state for managing accounts through the accounts REST resource.
//!
//! This crate provides:
//! - Editable row model and the label edit-string codec
//! - Row validation with field-level errors
//! - **Account Store** - the in-memory account list, kept in step with the
//!   backend and observable through a `watch` channel
//! - User notifications (log, desktop, in-memory)
//! - Settings loading

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
mod error;
pub mod notify;
pub mod settings;
pub mod store;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use account::{
    AccountRow, RowField, ValidationError, ValidationResult, join_labels, parse_labels,
    validate_row,
};
pub use error::{Error, Result};
pub use notify::{DesktopNotifier, Level, LogNotifier, MemoryNotifier, Notification, Notifier};
pub use settings::Settings;
pub use store::{AccountStore, StoreState};

pub use keyroster_api::{Account, AccountApi, AccountId, AccountType, Label};
