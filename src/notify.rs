//! Notification surface
//!
//! The store reports user-visible events (the "toasts") through a `Notifier`.
//! Delivery is fire-and-forget: nothing is returned and nothing is awaited.

use std::sync::Mutex;
use tracing::{info, warn};

/// A user-visible event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Login completed
    LoggedIn {
        /// Display name of the user
        name: String,
    },
    /// Login was rejected
    LoginFailed {
        /// User-facing message
        message: String,
    },
    /// The user signed out
    LoggedOut,
    /// A feed was created
    FeedCreated {
        /// Name of the new feed
        name: String,
    },
    /// A feed was deleted
    FeedDeleted {
        /// Id of the deleted feed
        id: String,
    },
    /// The current filters were saved as a view
    ViewSaved {
        /// Name of the new view
        name: String,
    },
}

/// Receiver for user-visible events
pub trait Notifier: Send + Sync {
    /// Deliver a notification
    fn notify(&self, notification: Notification);
}

/// Notifier that writes every event to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification {
            Notification::LoginFailed { message } => {
                warn!(message = %message, "Login failed");
            }
            Notification::LoggedIn { name } => info!(user = %name, "Welcome back"),
            Notification::LoggedOut => info!("Logged out"),
            Notification::FeedCreated { name } => info!(feed = %name, "Feed created"),
            Notification::FeedDeleted { id } => info!(feed_id = %id, "Feed deleted"),
            Notification::ViewSaved { name } => info!(view = %name, "Board saved"),
        }
    }
}

/// Notifier that keeps every event, for inspection in tests
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything delivered so far
    pub fn events(&self) -> Vec<Notification> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut events) = self.events.lock() {
            events.push(notification);
        }
    }
}
