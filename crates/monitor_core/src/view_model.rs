use crate::MonitorState;

/// Mutually exclusive indexing phase derived from the monitor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayPhase {
    #[default]
    Idle,
    Preparing,
    Indexing { in_indexing: u64, left: u64 },
    QueuedOnly { left: u64 },
}

impl DisplayPhase {
    /// Precedence: Preparing, then Indexing, then QueuedOnly.
    pub fn of(state: &MonitorState) -> Self {
        if state.is_preparing_indexing() {
            DisplayPhase::Preparing
        } else if state.docs_in_indexing() > 0 {
            DisplayPhase::Indexing {
                in_indexing: state.docs_in_indexing(),
                left: state.docs_left_to_index(),
            }
        } else if state.docs_left_to_index() > 0 {
            DisplayPhase::QueuedOnly {
                left: state.docs_left_to_index(),
            }
        } else {
            DisplayPhase::Idle
        }
    }

    pub fn status_text(&self) -> Option<String> {
        match *self {
            DisplayPhase::Idle => None,
            DisplayPhase::Preparing => Some("Fetching docs to index...".to_string()),
            DisplayPhase::Indexing { in_indexing, left } => {
                let mut text = format!("Indexing {in_indexing} documents...");
                if left > 0 {
                    text.push_str(&format!(" ({left} left)"));
                }
                Some(text)
            }
            DisplayPhase::QueuedOnly { left } => {
                Some(format!("Preparing to index {left} documents..."))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonitorView {
    pub server_down: bool,
    pub search_enabled: bool,
    pub phase: DisplayPhase,
    pub status_text: Option<String>,
}

impl MonitorView {
    pub(crate) fn from_state(state: &MonitorState) -> Self {
        let phase = DisplayPhase::of(state);
        Self {
            server_down: state.is_server_down(),
            search_enabled: !state.is_server_down(),
            phase,
            status_text: phase.status_text(),
        }
    }

    pub fn show_indexing_status(&self) -> bool {
        self.phase != DisplayPhase::Idle
    }
}
