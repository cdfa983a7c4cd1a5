use std::time::{Duration, Instant};

use crate::view_model::MonitorView;

/// One status reading as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServerReading {
    pub docs_in_indexing: u64,
    pub docs_left_to_index: u64,
}

impl ServerReading {
    pub fn new(docs_in_indexing: u64, docs_left_to_index: u64) -> Self {
        Self {
            docs_in_indexing,
            docs_left_to_index,
        }
    }

    /// True when the backend reports any queued or in-flight documents.
    pub fn has_activity(&self) -> bool {
        self.docs_in_indexing > 0 || self.docs_left_to_index > 0
    }

    pub fn is_drained(&self) -> bool {
        !self.has_activity()
    }
}

/// Timing knobs for the poll cycle and the server-down debounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub success_delay: Duration,
    pub failure_delay: Duration,
    pub down_notice_interval: Duration,
    /// Upper bound on one fetch; an overrun counts as a failed cycle.
    pub fetch_timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            success_delay: Duration::from_secs(5),
            failure_delay: Duration::from_secs(1),
            down_notice_interval: Duration::from_secs(5),
            fetch_timeout: Duration::from_secs(5),
        }
    }
}

/// Monitor state owned by the poll task. Consumers only ever see clones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonitorState {
    server_down: bool,
    preparing_indexing: bool,
    docs_in_indexing: u64,
    docs_left_to_index: u64,
    last_server_down_notice: Option<Instant>,
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> MonitorView {
        MonitorView::from_state(self)
    }

    pub fn is_server_down(&self) -> bool {
        self.server_down
    }

    pub fn is_preparing_indexing(&self) -> bool {
        self.preparing_indexing
    }

    pub fn docs_in_indexing(&self) -> u64 {
        self.docs_in_indexing
    }

    pub fn docs_left_to_index(&self) -> u64 {
        self.docs_left_to_index
    }

    /// Last time a server-down notification was surfaced; `None` means never.
    pub fn last_server_down_notice(&self) -> Option<Instant> {
        self.last_server_down_notice
    }

    pub(crate) fn mark_job_submitted(&mut self) {
        self.preparing_indexing = true;
    }

    pub(crate) fn clear_preparing(&mut self) {
        self.preparing_indexing = false;
    }

    pub(crate) fn mark_server_down(&mut self) {
        self.server_down = true;
    }

    pub(crate) fn apply_reading(&mut self, reading: ServerReading) {
        self.server_down = false;
        self.docs_in_indexing = reading.docs_in_indexing;
        self.docs_left_to_index = reading.docs_left_to_index;
    }

    pub(crate) fn record_server_down_notice(&mut self, now: Instant) {
        self.last_server_down_notice = Some(now);
    }
}
