use log::info;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NotificationPosition {
    #[serde(rename = "topR")]
    TopRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationIcon {
    Bell,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub title: String,
    pub position: NotificationPosition,
    pub icon: Option<NotificationIcon>,
}

impl Notification {
    /// Raised once an entry transaction is confirmed.
    pub fn transaction_complete() -> Self {
        Self {
            kind: NotificationKind::Info,
            message: String::from("Transaction complete!"),
            title: String::from("Tx notification"),
            position: NotificationPosition::TopRight,
            icon: Some(NotificationIcon::Bell),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn dispatch(&self, notification: Notification);
}

/// Writes notifications to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn dispatch(&self, notification: Notification) {
        info!("[{}] {}", notification.title, notification.message);
    }
}
