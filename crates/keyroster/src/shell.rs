//! Line-oriented front-end for the account form.
//!
//! Each input line is one [`Command`]; [`render`] draws the rows as a plain
//! text table after every state change.

use std::str::FromStr;

use keyroster_core::{AccountApi, Notification, RowField};

use crate::form::{AccountForm, RowState};

/// Shown in place of a hidden password.
const MASK: &str = "********";

/// Usage text for `help`.
pub const HELP: &str = "\
commands:
  load                          reload accounts from the server
  add                           append a blank local account
  set <row> <field> [value...]  edit a field (type, login, password, labels)
  blur <row>                    validate and save a row
  rm <row>                      ask to delete a row
  confirm | cancel              answer the delete prompt
  show <row>                    toggle password visibility
  list                          print the table
  help                          print this text
  quit                          exit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reload from the backend.
    Load,
    /// Append a blank row.
    Add,
    /// Edit one field; `None` clears the password.
    Set {
        /// Row index.
        row: usize,
        /// Field to edit.
        field: RowField,
        /// New value.
        value: Option<String>,
    },
    /// Validate and persist a row.
    Blur(usize),
    /// Open the delete prompt for a row.
    Remove(usize),
    /// Confirm the delete prompt.
    Confirm,
    /// Dismiss the delete prompt.
    Cancel,
    /// Toggle password visibility.
    Show(usize),
    /// Print the table.
    List,
    /// Print usage.
    Help,
    /// Leave the shell.
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err("empty command".to_string());
        };

        let command = match name {
            "load" => Self::Load,
            "add" => Self::Add,
            "set" => return parse_set(line),
            "blur" => Self::Blur(parse_index(words.next())?),
            "rm" => Self::Remove(parse_index(words.next())?),
            "confirm" => Self::Confirm,
            "cancel" => Self::Cancel,
            "show" => Self::Show(parse_index(words.next())?),
            "list" => Self::List,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command: {other}")),
        };

        if words.next().is_some() {
            return Err(format!("too many arguments for {name}"));
        }
        Ok(command)
    }
}

/// `set <row> <field> [value]`, keeping the value exactly as typed.
fn parse_set(line: &str) -> Result<Command, String> {
    let (_, rest) = next_word(line);
    let (row, rest) = next_word(rest.unwrap_or_default());
    let row = parse_index(row)?;
    let (field, value) = next_word(rest.unwrap_or_default());
    let field = field.ok_or("set needs a field")?.parse::<RowField>()?;

    let value = match value {
        Some(value) => Some(value.to_string()),
        None if field == RowField::Password => None,
        None => Some(String::new()),
    };
    Ok(Command::Set { row, field, value })
}

/// First word of `s`, and whatever follows the single separator after it.
fn next_word(s: &str) -> (Option<&str>, Option<&str>) {
    let s = s.trim_start();
    if s.is_empty() {
        return (None, None);
    }
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (Some(word), Some(rest)),
        None => (Some(s), None),
    }
}

fn parse_index(word: Option<&str>) -> Result<usize, String> {
    let word = word.ok_or("missing row number")?;
    word.parse()
        .map_err(|_| format!("not a row number: {word}"))
}

/// Apply a command to the form.
///
/// Returns `false` once the shell should exit.
pub async fn execute<A: AccountApi>(
    form: &mut AccountForm<A>,
    command: Command,
) -> Result<bool, String> {
    match command {
        Command::Load => form.load_accounts().await,
        Command::Add => {
            form.handle_add();
        }
        Command::Set { row, field, value } => {
            let target = form.row_mut(row).ok_or_else(|| no_row(row))?;
            match value {
                Some(value) => target.set(field, value),
                None => target.clear_password(),
            }
        }
        Command::Blur(row) => {
            check_row(form, row)?;
            form.handle_blur(row).await;
        }
        Command::Remove(row) => {
            check_row(form, row)?;
            form.handle_remove(row);
        }
        Command::Confirm => {
            if !form.is_confirm_open() {
                return Err("nothing to confirm".to_string());
            }
            form.handle_confirm().await;
        }
        Command::Cancel => form.cancel_remove(),
        Command::Show(row) => {
            check_row(form, row)?;
            form.toggle_password_visibility(row);
        }
        Command::List | Command::Help => {}
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn check_row<A: AccountApi>(form: &AccountForm<A>, row: usize) -> Result<(), String> {
    if row < form.rows().len() {
        Ok(())
    } else {
        Err(no_row(row))
    }
}

fn no_row(row: usize) -> String {
    format!("no row {row}")
}

/// Draw the form as a text table.
#[must_use]
pub fn render<A: AccountApi>(form: &AccountForm<A>) -> String {
    let mut out = String::new();

    if form.store().is_loading() {
        out.push_str("loading...\n");
    }
    if form.rows().is_empty() {
        out.push_str("(no accounts)\n");
    }

    for (index, state) in form.rows().iter().enumerate() {
        out.push_str(&format!(
            "{index:>3}  {id:<8} {kind:<6} {login:<20} {password:<20} {labels}\n",
            id = state.row.id.as_ref().map_or("new", |id| id.as_str()),
            kind = state.row.kind,
            login = state.row.login,
            password = password_cell(state),
            labels = state.row.labels,
        ));
        for error in &state.errors {
            out.push_str(&format!(
                "       ! {}: {}\n",
                error.field(),
                error.message()
            ));
        }
    }

    if let Some(index) = form.pending_removal() {
        out.push_str(&format!("delete row {index}? (confirm/cancel)\n"));
    }
    out
}

/// Draw notifications one per line, oldest first.
#[must_use]
pub fn render_notifications(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|n| format!("[{}] {}\n", n.title, n.description))
        .collect()
}

fn password_cell(state: &RowState) -> &str {
    // LDAP accounts have no password to show.
    if state.row.kind == "ldap" {
        return "-";
    }
    match state.row.password.as_deref() {
        None | Some("") => "",
        Some(password) if state.password_visible => password,
        Some(_) => MASK,
    }
}
