use monitor_core::{Notification, NotificationKind};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Show(Notification),
    Dismiss(NotificationKind),
}

/// Fire-and-forget destination for user notifications. Implementations must not block.
pub trait NotificationSink: Send + Sync {
    fn emit(&self, event: NotificationEvent);
}

pub struct ChannelNotificationSink {
    tx: mpsc::UnboundedSender<NotificationEvent>,
}

impl ChannelNotificationSink {
    pub fn new(tx: mpsc::UnboundedSender<NotificationEvent>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<NotificationEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl NotificationSink for ChannelNotificationSink {
    fn emit(&self, event: NotificationEvent) {
        // A closed receiver means the UI went away; nothing left to tell.
        let _ = self.tx.send(event);
    }
}
