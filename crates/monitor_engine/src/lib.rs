//! Status monitor engine: status fetching, notification delivery and the poll task.
mod engine;
mod fetch;
mod notify;
mod types;

pub use engine::MonitorHandle;
pub use fetch::{FetchSettings, ReqwestStatusFetcher, StatusFetcher};
pub use notify::{ChannelNotificationSink, NotificationEvent, NotificationSink};
pub use types::{FailureKind, FetchError, StatusResponse};
