//! Property tests for the label codec and row validation.

#![allow(clippy::unwrap_used)]

use keyroster_core::account::{MAX_LOGIN_LEN, MAX_PASSWORD_LEN};
use keyroster_core::{AccountRow, ValidationError, join_labels, parse_labels, validate_row};
use proptest::prelude::*;

fn row(kind: &str, password: Option<String>) -> AccountRow {
    AccountRow {
        kind: kind.to_string(),
        login: "user".to_string(),
        password,
        ..AccountRow::new()
    }
}

proptest! {
    #[test]
    fn parsed_labels_are_never_blank(input in "[a-z ;]{0,40}") {
        for label in parse_labels(&input) {
            prop_assert!(!label.text.trim().is_empty());
            prop_assert!(!label.text.contains(';'));
        }
    }

    #[test]
    fn join_then_parse_is_identity(texts in prop::collection::vec("[a-z][a-z ]{0,8}", 0..6)) {
        let labels: Vec<_> = texts.iter().map(keyroster_core::Label::new).collect();
        prop_assert_eq!(parse_labels(&join_labels(&labels)), labels);
    }

    #[test]
    fn parse_is_idempotent_through_join(input in "[a-z ;]{0,40}") {
        let once = join_labels(&parse_labels(&input));
        prop_assert_eq!(join_labels(&parse_labels(&once)), once.clone());
    }

    #[test]
    fn local_fails_iff_password_blank(password in prop::option::of("[ a-z\t]{0,20}")) {
        let blank = password.as_deref().is_none_or(|p| p.trim().is_empty());
        let result = validate_row(&row("local", password));

        prop_assert_eq!(result.is_err(), blank);
        if let Err(errors) = result {
            prop_assert_eq!(errors, vec![ValidationError::MissingPassword]);
        }
    }

    #[test]
    fn ldap_never_fails_on_password(password in prop::option::of(".{0,100}")) {
        prop_assert!(validate_row(&row("ldap", password)).is_ok());
    }

    #[test]
    fn login_length_bounds(len in 0usize..=MAX_LOGIN_LEN + 20) {
        let mut row = row("local", Some("pw".to_string()));
        row.login = "x".repeat(len);
        let ok = (1..=MAX_LOGIN_LEN).contains(&len);
        prop_assert_eq!(validate_row(&row).is_ok(), ok);
    }

    #[test]
    fn password_length_bound(len in 1usize..=MAX_PASSWORD_LEN + 20) {
        let row = row("local", Some("p".repeat(len)));
        prop_assert_eq!(validate_row(&row).is_ok(), len <= MAX_PASSWORD_LEN);
    }
}
