//! Account store.
//!
//! [`AccountStore`] owns the client-side account list. Every operation calls
//! the backend first and only touches the local list when the call succeeds.
//! Failures never reach the caller: they are logged and turned into an error
//! notification, and the list keeps its last known good contents.

use std::fmt;
use std::sync::Arc;

use keyroster_api::{Account, AccountApi, AccountId};
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::notify::{Notification, Notifier};

/// Snapshot of the store, as published to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    /// Accounts in server order, plus anything added since the last load.
    pub accounts: Vec<Account>,
    /// Whether a full reload is in flight.
    pub is_loading: bool,
}

/// Store operation, named in logs and failure notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Load,
    Add,
    Update,
    Delete,
}

impl Action {
    const fn description(self) -> &'static str {
        match self {
            Self::Load => "load accounts",
            Self::Add => "add account",
            Self::Update => "update account",
            Self::Delete => "delete account",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Clears the loading flag when dropped, whichever way `load` exits.
struct LoadingGuard<'a>(&'a watch::Sender<StoreState>);

impl<'a> LoadingGuard<'a> {
    fn begin(state: &'a watch::Sender<StoreState>) -> Self {
        state.send_modify(|s| s.is_loading = true);
        Self(state)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_modify(|s| s.is_loading = false);
    }
}

/// Single source of truth for the account list.
pub struct AccountStore<A> {
    api: A,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<StoreState>,
}

impl<A> fmt::Debug for AccountStore<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountStore")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl<A: AccountApi> AccountStore<A> {
    /// Creates an empty store backed by `api`.
    #[must_use]
    pub fn new(api: A, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self {
            api,
            notifier,
            state,
        }
    }

    /// Backend this store talks to.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Copy of the current account list.
    #[must_use]
    pub fn accounts(&self) -> Vec<Account> {
        self.state.borrow().accounts.clone()
    }

    /// Whether a reload is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Observe every change to the store.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Replace the local list with the backend's.
    ///
    /// On failure the previous list is kept. The loading flag is set for the
    /// duration of the call.
    pub async fn load(&self) {
        let _loading = LoadingGuard::begin(&self.state);

        match self.api.list().await {
            Ok(accounts) => {
                debug!(count = accounts.len(), "Loaded accounts");
                self.state.send_modify(|s| s.accounts = accounts);
            }
            Err(e) => self.report_failure(Action::Load, &e),
        }
    }

    /// Create an account and append the backend's copy to the list.
    ///
    /// Returns the created account (with its assigned id), or `None` if the
    /// backend rejected it.
    pub async fn add(&self, account: Account) -> Option<Account> {
        match self.api.create(&account).await {
            Ok(created) => {
                info!(id = ?created.id, login = %created.login, "Account added");
                self.state
                    .send_modify(|s| s.accounts.push(created.clone()));
                self.notifier.notify(Notification::success("Account added"));
                Some(created)
            }
            Err(e) => {
                self.report_failure(Action::Add, &e);
                None
            }
        }
    }

    /// Persist changes to an existing account.
    ///
    /// On success the local entry with the same id is replaced by `account`;
    /// if there is none, the list is left alone.
    pub async fn update(&self, account: Account) {
        match self.api.update(&account).await {
            Ok(()) => {
                info!(id = ?account.id, "Account updated");
                self.state.send_modify(|s| {
                    if let Some(slot) = s.accounts.iter_mut().find(|a| a.id == account.id) {
                        *slot = account;
                    }
                });
                self.notifier.notify(Notification::success("Account updated"));
            }
            Err(e) => self.report_failure(Action::Update, &e),
        }
    }

    /// Delete an account and drop every local entry with that id.
    pub async fn remove_account(&self, id: &AccountId) {
        match self.api.delete(id).await {
            Ok(()) => {
                info!(%id, "Account deleted");
                self.state
                    .send_modify(|s| s.accounts.retain(|a| a.id.as_ref() != Some(id)));
                self.notifier.notify(Notification::success("Account deleted"));
            }
            Err(e) => self.report_failure(Action::Delete, &e),
        }
    }

    fn report_failure(&self, action: Action, err: &keyroster_api::Error) {
        error!(%action, "Failed to {action}: {err}");
        self.notifier
            .notify(Notification::error(format!("Failed to {action}")));
    }
}
