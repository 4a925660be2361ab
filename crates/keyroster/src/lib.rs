//! # keyroster
//!
//! Inline editor for accounts served by a REST backend.
//!
//! [`AccountForm`] turns the core store into editable rows: it validates a
//! row when focus leaves it, creates or updates it on the backend, and asks
//! for confirmation before deleting. The [`shell`] module drives a form from
//! text commands.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod form;
pub mod shell;

pub use form::{AccountForm, RowState};
pub use shell::{Command, execute, render, render_notifications};
