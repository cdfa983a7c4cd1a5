use crate::{MonitorState, ServerReading};

/// A named transition detected between two consecutive successful cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticEvent {
    /// The previous cycle had failed and this one succeeded.
    ServerRecovered,
    /// A pending job submission became visible as queued or in-flight documents.
    PreparingCleared,
    /// Documents were being indexed and the backend now reports nothing left.
    IndexingFinished,
}

/// Maps the previous state and a fresh reading to the next state.
///
/// Events come out in rule order: recovery, preparing-cleared, finished.
pub fn classify(previous: &MonitorState, reading: ServerReading) -> (MonitorState, Vec<SemanticEvent>) {
    let mut next = previous.clone();
    let mut events = Vec::new();

    if previous.is_server_down() {
        events.push(SemanticEvent::ServerRecovered);
    }

    if previous.is_preparing_indexing() && reading.has_activity() {
        next.clear_preparing();
        events.push(SemanticEvent::PreparingCleared);
    }

    if previous.docs_in_indexing() > 0 && reading.is_drained() {
        events.push(SemanticEvent::IndexingFinished);
    }

    next.apply_reading(reading);
    (next, events)
}
