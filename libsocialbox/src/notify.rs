//! Notification channel for user-facing outcome messages
//!
//! Stores and the composer report outcomes (post published, platform
//! connected, validation failure) through an in-process broadcast
//! channel. Any number of front-ends can subscribe; if nobody is
//! listening, notifications are dropped without blocking the emitter.
//!
//! # Example
//!
//! ```no_run
//! use libsocialbox::notify::{Notifier, Notification, Severity};
//!
//! # async fn example() {
//! let notifier = Notifier::new(100);
//! let mut receiver = notifier.subscribe();
//!
//! notifier.emit(Notification::success(
//!     "Post published",
//!     "Your post has been published successfully",
//! ));
//!
//! if let Ok(notification) = receiver.recv().await {
//!     println!("{}: {}", notification.title, notification.description);
//! }
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Notification receiver type alias
pub type NotificationReceiver = broadcast::Receiver<Notification>;

/// How a notification should be presented
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A user-facing outcome message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            severity: Severity::Info,
        }
    }

    pub fn success(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            severity: Severity::Success,
        }
    }

    pub fn error(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            severity: Severity::Error,
        }
    }
}

/// Broadcast channel distributing notifications to subscribers
///
/// Emitting never blocks: with no subscribers the notification is
/// dropped, and a lagging subscriber loses its oldest entries first.
#[derive(Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Notifier {
    /// Create a notifier with the given per-subscriber buffer capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to notifications emitted after this call
    pub fn subscribe(&self) -> NotificationReceiver {
        self.sender.subscribe()
    }

    /// Emit a notification to all subscribers
    pub fn emit(&self, notification: Notification) {
        // send() errors when no receivers exist, which is fine
        let _ = self.sender.send(notification);
    }

    /// Number of active subscribers. For debugging, not control flow.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
