use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(Notification),
    Dismiss(NotificationKind),
    SchedulePoll { delay: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    ServerOnline,
    ServerDown,
    IndexingFinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A user-facing message with an auto-dismiss duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub severity: Severity,
    pub message: String,
    pub auto_dismiss: Duration,
}

const SHORT_NOTICE: Duration = Duration::from_secs(2);

impl Notification {
    pub fn server_online() -> Self {
        Self {
            kind: NotificationKind::ServerOnline,
            severity: Severity::Success,
            message: "Server online.".to_string(),
            auto_dismiss: SHORT_NOTICE,
        }
    }

    /// `retry_in` is the delay before the next attempt; `visible_for` keeps the
    /// notice up until the debounce window allows another one.
    pub fn server_down(retry_in: Duration, visible_for: Duration) -> Self {
        let seconds = retry_in.as_secs().max(1);
        let unit = if seconds == 1 { "second" } else { "seconds" };
        Self {
            kind: NotificationKind::ServerDown,
            severity: Severity::Error,
            message: format!("Server is down, retrying in {seconds} {unit}..."),
            auto_dismiss: visible_for,
        }
    }

    pub fn indexing_finished() -> Self {
        Self {
            kind: NotificationKind::IndexingFinished,
            severity: Severity::Success,
            message: "Indexing finished.".to_string(),
            auto_dismiss: SHORT_NOTICE,
        }
    }
}
