/// Modal alerts shown on top of the main window
use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};

/// A titled message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub body: String,
    pub level: AlertLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Error,
}

impl Alert {
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            level: AlertLevel::Error,
        }
    }

    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            level: AlertLevel::Info,
        }
    }
}

/// Show the alert with the native message dialog and wait for dismissal
pub async fn show(alert: Alert) {
    let level = match alert.level {
        AlertLevel::Info => MessageLevel::Info,
        AlertLevel::Error => MessageLevel::Error,
    };

    AsyncMessageDialog::new()
        .set_level(level)
        .set_title(alert.title.as_str())
        .set_description(alert.body.as_str())
        .set_buttons(MessageButtons::Ok)
        .show()
        .await;
}
