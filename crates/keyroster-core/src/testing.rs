//! In-memory [`AccountApi`] for tests.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use keyroster_api::{Account, AccountApi, AccountId, Error, Result, StatusCode};

/// Resource operation, for recording calls and injecting failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `GET /accounts`.
    List,
    /// `POST /accounts`.
    Create,
    /// `PUT /accounts/{id}`.
    Update,
    /// `DELETE /accounts/{id}`.
    Delete,
}

/// A request the fake received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// List request.
    List,
    /// Create request with the submitted account.
    Create(Account),
    /// Update request with the submitted account.
    Update(Account),
    /// Delete request for an id.
    Delete(AccountId),
}

impl Call {
    /// Operation this call belongs to.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::List => Operation::List,
            Self::Create(_) => Operation::Create,
            Self::Update(_) => Operation::Update,
            Self::Delete(_) => Operation::Delete,
        }
    }
}

#[derive(Debug, Default)]
struct Backend {
    accounts: Vec<Account>,
    next_id: u64,
    failing: HashSet<Operation>,
    calls: Vec<Call>,
}

/// Backend kept in memory that behaves like a simple REST server.
///
/// Ids are assigned sequentially from 1. Failing operations answer with
/// `500 Internal Server Error` and leave the stored accounts untouched.
#[derive(Debug, Default)]
pub struct MemoryApi {
    backend: Mutex<Backend>,
}

impl MemoryApi {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that already stores `accounts`.
    #[must_use]
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        let api = Self::new();
        {
            let mut backend = api.lock();
            backend.next_id = accounts.len() as u64;
            backend.accounts = accounts;
        }
        api
    }

    /// Make every later call of `operation` fail.
    pub fn fail(&self, operation: Operation) {
        self.lock().failing.insert(operation);
    }

    /// Undo [`MemoryApi::fail`].
    pub fn recover(&self, operation: Operation) {
        self.lock().failing.remove(&operation);
    }

    /// Accounts currently stored by the fake backend.
    #[must_use]
    pub fn accounts(&self) -> Vec<Account> {
        self.lock().accounts.clone()
    }

    /// Every call received, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Number of calls received for `operation`.
    #[must_use]
    pub fn count(&self, operation: Operation) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records `call` and fails it if its operation is marked failing.
    fn begin(&self, call: Call) -> Result<MutexGuard<'_, Backend>> {
        let mut backend = self.lock();
        let operation = call.operation();
        backend.calls.push(call);

        if backend.failing.contains(&operation) {
            return Err(Error::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: format!("{operation:?} failed"),
            });
        }
        Ok(backend)
    }
}

impl AccountApi for MemoryApi {
    async fn list(&self) -> Result<Vec<Account>> {
        let backend = self.begin(Call::List)?;
        Ok(backend.accounts.clone())
    }

    async fn create(&self, account: &Account) -> Result<Account> {
        let mut backend = self.begin(Call::Create(account.clone()))?;
        backend.next_id += 1;

        let created = Account {
            id: Some(AccountId::new(backend.next_id.to_string())),
            ..account.clone()
        };
        backend.accounts.push(created.clone());
        Ok(created)
    }

    async fn update(&self, account: &Account) -> Result<()> {
        let mut backend = self.begin(Call::Update(account.clone()))?;
        let id = account.id.as_ref().ok_or(Error::MissingId)?;

        let stored = backend
            .accounts
            .iter_mut()
            .find(|stored| stored.id.as_ref() == Some(id))
            .ok_or_else(|| not_found(id))?;
        *stored = account.clone();
        Ok(())
    }

    async fn delete(&self, id: &AccountId) -> Result<()> {
        let mut backend = self.begin(Call::Delete(id.clone()))?;
        let before = backend.accounts.len();
        backend.accounts.retain(|stored| stored.id.as_ref() != Some(id));

        if backend.accounts.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: &AccountId) -> Error {
    Error::Status {
        status: StatusCode::NOT_FOUND,
        body: format!("account {id} not found"),
    }
}
