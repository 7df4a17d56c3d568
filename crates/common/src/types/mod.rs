use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// Transient banner payload rendered by the dashboard frontend.
/// Carries the dismissal delay as data so the client does not hardcode it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub auto_dismiss_ms: u64,
}

impl Notification {
    pub const AUTO_DISMISS_MS: u64 = 4000;

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), auto_dismiss_ms: Self::AUTO_DISMISS_MS }
    }
}
