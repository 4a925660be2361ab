//! Row validation.

use keyroster_api::AccountType;

use super::row::AccountRow;

/// Longest accepted labels edit string, in characters.
pub const MAX_LABELS_LEN: usize = 50;
/// Longest accepted login, in characters.
pub const MAX_LOGIN_LEN: usize = 100;
/// Longest accepted password, in characters.
pub const MAX_PASSWORD_LEN: usize = 100;

/// Validation error for an account row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Labels edit string is too long.
    LabelsTooLong,
    /// Type is neither `local` nor `ldap`.
    InvalidType,
    /// Login is empty.
    EmptyLogin,
    /// Login is too long.
    LoginTooLong,
    /// Password is too long.
    PasswordTooLong,
    /// Local account without a usable password.
    MissingPassword,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::LabelsTooLong => "Labels must be at most 50 characters",
            Self::InvalidType => "Type must be local or ldap",
            Self::EmptyLogin | Self::MissingPassword => "Required field",
            Self::LoginTooLong => "Login must be at most 100 characters",
            Self::PasswordTooLong => "Password must be at most 100 characters",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::LabelsTooLong => "labels",
            Self::InvalidType => "type",
            Self::EmptyLogin | Self::LoginTooLong => "login",
            Self::PasswordTooLong | Self::MissingPassword => "password",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result of validating a row.
pub type ValidationResult<T = ()> = Result<T, Vec<ValidationError>>;

/// Validate an editable row.
///
/// Returns `Ok(())` if valid, or `Err(Vec<ValidationError>)` with all errors.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any fields are invalid.
pub fn validate_row(row: &AccountRow) -> ValidationResult {
    let mut errors = Vec::new();

    if row.labels.chars().count() > MAX_LABELS_LEN {
        errors.push(ValidationError::LabelsTooLong);
    }

    let kind = row.kind.parse::<AccountType>().ok();
    if kind.is_none() {
        errors.push(ValidationError::InvalidType);
    }

    let login_len = row.login.chars().count();
    if login_len == 0 {
        errors.push(ValidationError::EmptyLogin);
    } else if login_len > MAX_LOGIN_LEN {
        errors.push(ValidationError::LoginTooLong);
    }

    let password = row.password.as_deref();
    if password.is_some_and(|p| p.chars().count() > MAX_PASSWORD_LEN) {
        errors.push(ValidationError::PasswordTooLong);
    }

    if kind == Some(AccountType::Local) && password.is_none_or(|p| p.trim().is_empty()) {
        errors.push(ValidationError::MissingPassword);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn local(login: &str, password: Option<&str>) -> AccountRow {
        AccountRow {
            login: login.to_string(),
            password: password.map(str::to_string),
            ..AccountRow::new()
        }
    }

    #[test]
    fn blank_row_fails_on_login_and_password() {
        let errors = validate_row(&AccountRow::new()).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::EmptyLogin, ValidationError::MissingPassword]
        );
    }

    #[test]
    fn complete_local_row_passes() {
        assert!(validate_row(&local("bob", Some("secret"))).is_ok());
    }

    #[test]
    fn local_requires_non_blank_password() {
        for password in [None, Some(""), Some("   "), Some("\t\n")] {
            let errors = validate_row(&local("bob", password)).unwrap_err();
            assert_eq!(errors, vec![ValidationError::MissingPassword]);
            assert_eq!(errors[0].field(), "password");
        }
    }

    #[test]
    fn ldap_ignores_password_content() {
        for password in [None, Some(""), Some("  "), Some("anything")] {
            let row = AccountRow {
                kind: "ldap".to_string(),
                ..local("carol", password)
            };
            assert!(validate_row(&row).is_ok());
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        let row = AccountRow {
            kind: "oauth".to_string(),
            ..local("bob", None)
        };
        assert_eq!(
            validate_row(&row).unwrap_err(),
            vec![ValidationError::InvalidType]
        );
    }

    #[test]
    fn length_limits() {
        let row = AccountRow {
            labels: "x".repeat(MAX_LABELS_LEN + 1),
            ..local(&"l".repeat(MAX_LOGIN_LEN + 1), Some(&"p".repeat(MAX_PASSWORD_LEN + 1)))
        };
        assert_eq!(
            validate_row(&row).unwrap_err(),
            vec![
                ValidationError::LabelsTooLong,
                ValidationError::LoginTooLong,
                ValidationError::PasswordTooLong,
            ]
        );
    }

    #[test]
    fn limits_are_inclusive_and_count_chars() {
        let row = AccountRow {
            labels: "é".repeat(MAX_LABELS_LEN),
            ..local(&"ж".repeat(MAX_LOGIN_LEN), Some(&"p".repeat(MAX_PASSWORD_LEN)))
        };
        assert!(validate_row(&row).is_ok());
    }

    #[test]
    fn login_is_not_trimmed() {
        assert!(validate_row(&local(" ", Some("pw"))).is_ok());
    }

    #[test]
    fn messages() {
        assert_eq!(ValidationError::EmptyLogin.message(), "Required field");
        assert_eq!(ValidationError::MissingPassword.to_string(), "Required field");
        assert_eq!(ValidationError::InvalidType.field(), "type");
    }
}
