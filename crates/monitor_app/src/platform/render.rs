use chrono::{DateTime, Utc};
use monitor_core::{MonitorView, Severity};
use monitor_engine::NotificationEvent;

pub fn status_line(view: &MonitorView) -> String {
    let health = if view.server_down {
        "offline, search disabled"
    } else {
        "online"
    };
    match &view.status_text {
        Some(text) => format!("[{health}] {text}"),
        None => format!("[{health}] idle"),
    }
}

pub fn notification_line(event: &NotificationEvent, at: DateTime<Utc>) -> String {
    let stamp = at.format("%H:%M:%S");
    match event {
        NotificationEvent::Show(notification) => {
            let marker = match notification.severity {
                Severity::Success => "ok",
                Severity::Error => "error",
            };
            format!(
                "{stamp} [{marker}] {} (for {}s)",
                notification.message,
                notification.auto_dismiss.as_secs()
            )
        }
        NotificationEvent::Dismiss(kind) => format!("{stamp} [dismiss] {kind:?}"),
    }
}
