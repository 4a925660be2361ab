//! Account form controller.
//!
//! Keeps one editable [`AccountRow`] per account, validates a row when it
//! loses focus and pushes it to the [`AccountStore`]. Every operation takes
//! `&mut self`, so at most one request per form is in flight and a row's
//! create/update calls can never overtake each other.

use keyroster_core::{AccountApi, AccountRow, AccountStore, ValidationError};
use tracing::debug;

/// One editable row and its UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowState {
    /// Field values as edited.
    pub row: AccountRow,
    /// Errors from the last failed validation, cleared when it passes.
    pub errors: Vec<ValidationError>,
    /// Show the password in clear text.
    pub password_visible: bool,
}

impl RowState {
    fn new(row: AccountRow) -> Self {
        Self {
            row,
            errors: Vec::new(),
            password_visible: false,
        }
    }

    /// First error attached to `field`, if any.
    #[must_use]
    pub fn error_for(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field() == field)
    }
}

/// Form controller over an [`AccountStore`].
#[derive(Debug)]
pub struct AccountForm<A> {
    store: AccountStore<A>,
    rows: Vec<RowState>,
    /// Row awaiting delete confirmation; `Some` while the prompt is open.
    pending_removal: Option<usize>,
}

impl<A: AccountApi> AccountForm<A> {
    /// Creates an empty form driving `store`.
    #[must_use]
    pub const fn new(store: AccountStore<A>) -> Self {
        Self {
            store,
            rows: Vec::new(),
            pending_removal: None,
        }
    }

    /// Underlying store.
    #[must_use]
    pub const fn store(&self) -> &AccountStore<A> {
        &self.store
    }

    /// All rows, in display order.
    #[must_use]
    pub fn rows(&self) -> &[RowState] {
        &self.rows
    }

    /// Row at `index` for editing.
    pub fn row_mut(&mut self, index: usize) -> Option<&mut AccountRow> {
        self.rows.get_mut(index).map(|state| &mut state.row)
    }

    /// Whether the delete confirmation prompt is open.
    #[must_use]
    pub const fn is_confirm_open(&self) -> bool {
        self.pending_removal.is_some()
    }

    /// Row the open confirmation prompt refers to.
    #[must_use]
    pub const fn pending_removal(&self) -> Option<usize> {
        self.pending_removal
    }

    /// Reload from the backend and rebuild every row from the store.
    ///
    /// Unsaved rows are discarded. If the reload fails the rows are rebuilt
    /// from the store's previous list.
    pub async fn load_accounts(&mut self) {
        self.store.load().await;

        self.rows = self
            .store
            .accounts()
            .iter()
            .map(|account| RowState::new(AccountRow::from_account(account)))
            .collect();
        self.pending_removal = None;
    }

    /// Validate the row at `index` and persist it if valid.
    ///
    /// An invalid row keeps its errors in [`RowState::errors`] and nothing is
    /// sent. A valid unsaved row is created and then overwritten with the
    /// backend's copy; a valid saved row is updated.
    pub async fn handle_blur(&mut self, index: usize) {
        let Some(state) = self.rows.get_mut(index) else {
            debug!(index, "Blur on missing row");
            return;
        };

        let account = match state.row.to_account() {
            Ok(account) => {
                state.errors.clear();
                account
            }
            Err(errors) => {
                debug!(index, ?errors, "Row failed validation");
                state.errors = errors;
                return;
            }
        };

        if account.id.is_some() {
            self.store.update(account).await;
            return;
        }

        if let Some(created) = self.store.add(account).await {
            if let Some(state) = self.rows.get_mut(index) {
                state.row = AccountRow::from_account(&created);
            }
        }
    }

    /// Append a blank unsaved row and return its index.
    pub fn handle_add(&mut self) -> usize {
        self.rows.push(RowState::new(AccountRow::new()));
        self.rows.len() - 1
    }

    /// Ask for confirmation before removing the row at `index`.
    pub fn handle_remove(&mut self, index: usize) {
        if index < self.rows.len() {
            self.pending_removal = Some(index);
        } else {
            debug!(index, "Remove requested for missing row");
        }
    }

    /// Close the confirmation prompt without removing anything.
    pub fn cancel_remove(&mut self) {
        self.pending_removal = None;
    }

    /// Remove the row the prompt refers to and close the prompt.
    ///
    /// A saved row is deleted on the backend first. The row leaves the form
    /// even if that delete fails; the store keeps its entry in that case.
    pub async fn handle_confirm(&mut self) {
        let Some(index) = self.pending_removal.take() else {
            return;
        };
        let Some(state) = self.rows.get(index) else {
            return;
        };

        if let Some(id) = state.row.id.clone() {
            self.store.remove_account(&id).await;
        }
        self.rows.remove(index);
    }

    /// Flip between masked and clear-text password display for a row.
    pub fn toggle_password_visibility(&mut self, index: usize) {
        if let Some(state) = self.rows.get_mut(index) {
            state.password_visible = !state.password_visible;
        }
    }
}
