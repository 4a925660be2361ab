//! Editable account row.

use std::fmt;
use std::str::FromStr;

use keyroster_api::{Account, AccountId, AccountType};

use super::labels::{join_labels, parse_labels};
use super::validation::{ValidationResult, validate_row};

/// Account as edited in a form row.
///
/// Fields hold raw user input; nothing is guaranteed valid until
/// [`validate_row`] passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRow {
    /// Backend id (None until the account has been created).
    pub id: Option<AccountId>,
    /// Labels as a `;`-delimited edit string.
    pub labels: String,
    /// Account type as entered (`local` or `ldap` when valid).
    pub kind: String,
    /// Login name.
    pub login: String,
    /// Password; None when the backend sent none.
    pub password: Option<String>,
}

impl Default for AccountRow {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountRow {
    /// Create a blank, unsaved local row.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: None,
            labels: String::new(),
            kind: AccountType::Local.as_str().to_string(),
            login: String::new(),
            password: Some(String::new()),
        }
    }

    /// Build a row from a stored account, joining its labels.
    #[must_use]
    pub fn from_account(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            labels: join_labels(&account.labels),
            kind: account.kind.as_str().to_string(),
            login: account.login.clone(),
            password: account.password.clone(),
        }
    }

    /// Validate the row and convert it into an account ready to persist.
    ///
    /// Labels are split on `;` with blank segments dropped; LDAP accounts
    /// lose whatever password was typed.
    ///
    /// # Errors
    ///
    /// Returns every validation error if the row is invalid.
    pub fn to_account(&self) -> ValidationResult<Account> {
        validate_row(self)?;

        // validate_row has already rejected unknown types.
        let kind = self.kind.parse::<AccountType>().unwrap_or_default();
        let password = match kind {
            AccountType::Local => self.password.clone(),
            AccountType::Ldap => None,
        };

        Ok(Account {
            id: self.id.clone(),
            kind,
            login: self.login.clone(),
            password,
            labels: parse_labels(&self.labels),
        })
    }

    /// Whether the backend has created this account yet.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Overwrite one field with user input.
    pub fn set(&mut self, field: RowField, value: impl Into<String>) {
        let value = value.into();
        match field {
            RowField::Type => self.kind = value,
            RowField::Login => self.login = value,
            RowField::Password => self.password = Some(value),
            RowField::Labels => self.labels = value,
        }
    }

    /// Remove the password entirely.
    pub fn clear_password(&mut self) {
        self.password = None;
    }
}

/// Editable field of an [`AccountRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    /// Account type.
    Type,
    /// Login name.
    Login,
    /// Password.
    Password,
    /// Labels edit string.
    Labels,
}

impl RowField {
    /// Field name, as used by [`ValidationError::field`](super::ValidationError::field).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Login => "login",
            Self::Password => "password",
            Self::Labels => "labels",
        }
    }
}

impl fmt::Display for RowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RowField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "type" => Ok(Self::Type),
            "login" => Ok(Self::Login),
            "password" => Ok(Self::Password),
            "labels" => Ok(Self::Labels),
            other => Err(format!("unknown field: {other}")),
        }
    }
}
