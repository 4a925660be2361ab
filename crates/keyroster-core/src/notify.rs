//! User-facing notifications.
//!
//! The store reports every outcome the user should see through a
//! [`Notifier`]. Front-ends pick the sink: desktop popups, the log, or an
//! in-memory list they render themselves.

use std::sync::{Mutex, PoisonError};

use tracing::{error, info, warn};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// An operation completed.
    Success,
    /// An operation failed.
    Error,
}

/// A short message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub level: Level,
    /// Headline ("Success" or "Error").
    pub title: String,
    /// One-line detail.
    pub description: String,
}

impl Notification {
    /// Creates a success notification.
    #[must_use]
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            title: "Success".to_string(),
            description: description.into(),
        }
    }

    /// Creates an error notification.
    #[must_use]
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title: "Error".to_string(),
            description: description.into(),
        }
    }
}

/// Destination for user notifications.
pub trait Notifier: Send + Sync {
    /// Show a notification to the user.
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        log_notification(&notification);
    }
}

fn log_notification(notification: &Notification) {
    match notification.level {
        Level::Success => info!(title = %notification.title, "{}", notification.description),
        Level::Error => error!(title = %notification.title, "{}", notification.description),
    }
}

/// Shows notifications as desktop popups.
///
/// Falls back to the log when no notification daemon is reachable.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    /// Creates a notifier that shows popups under the given application name.
    #[must_use]
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, notification: Notification) {
        let shown = notify_rust::Notification::new()
            .appname(&self.app_name)
            .summary(&notification.title)
            .body(&notification.description)
            .show();

        if let Err(e) = shown {
            warn!("Desktop notification failed: {e}");
            log_notification(&notification);
        }
    }
}

/// Keeps notifications in memory, oldest first.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    received: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return everything received so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.received.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        log_notification(&notification);
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        let ok = Notification::success("Account added");
        assert_eq!(ok.level, Level::Success);
        assert_eq!(ok.title, "Success");

        let err = Notification::error("Failed to load accounts");
        assert_eq!(err.level, Level::Error);
        assert_eq!(err.title, "Error");
        assert_eq!(err.description, "Failed to load accounts");
    }

    #[test]
    fn memory_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notification::success("one"));
        notifier.notify(Notification::error("two"));

        let seen = notifier.notifications();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].description, "one");
        assert_eq!(seen[1].description, "two");

        assert_eq!(notifier.drain().len(), 2);
        assert!(notifier.notifications().is_empty());
    }

    #[test]
    fn log_notifier_accepts_everything() {
        LogNotifier.notify(Notification::error("ignored"));
    }
}
