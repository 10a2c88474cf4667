use serde::Serialize;

/// Severity of a notification raised by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    /// A request was understood but had no effect or was dropped.
    Warning,
    /// A request failed in a way the consumer should surface.
    Error,
}

/// A message intended for whoever renders the UI.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationMessage {
    pub notification_type: NotificationType,
    pub message: String,
}
