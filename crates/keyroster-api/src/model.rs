//! Account wire model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Backend-assigned identifier of an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    /// Create a new account ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an account authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Password stored with the account.
    #[default]
    Local,
    /// Password checked against a directory; none is stored.
    Ldap,
}

impl AccountType {
    /// Wire name of the account type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Ldap => "ldap",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown account type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown account type: {0:?}")]
pub struct ParseAccountTypeError(pub String);

impl FromStr for AccountType {
    type Err = ParseAccountTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "ldap" => Ok(Self::Ldap),
            other => Err(ParseAccountTypeError(other.to_string())),
        }
    }
}

/// Free-text tag attached to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Tag text.
    pub text: String,
}

impl Label {
    /// Create a label.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Account as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier (None until the backend has created the account).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AccountId>,
    /// Authentication type.
    #[serde(rename = "type")]
    pub kind: AccountType,
    /// Login name.
    pub login: String,
    /// Password; always `None` for LDAP accounts.
    #[serde(default)]
    pub password: Option<String>,
    /// Labels in the order they were entered.
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl Account {
    /// Create an unsaved account with the given type and login.
    #[must_use]
    pub fn new(kind: AccountType, login: impl Into<String>) -> Self {
        Self {
            kind,
            login: login.into(),
            ..Self::default()
        }
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(AccountId::new(id));
        self
    }

    /// Sets the password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the labels.
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Label::new).collect();
        self
    }
}
