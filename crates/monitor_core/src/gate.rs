use std::time::Instant;

use crate::{Effect, MonitorState, Notification, NotificationKind, PollPolicy, SemanticEvent};

/// Maps classifier events to notification effects.
///
/// Recovery and finish notices are edge-triggered, so they are never debounced.
pub fn gate_events(events: &[SemanticEvent]) -> Vec<Effect> {
    let mut effects = Vec::with_capacity(events.len() + 1);
    for event in events {
        match event {
            SemanticEvent::ServerRecovered => {
                effects.push(Effect::Dismiss(NotificationKind::ServerDown));
                effects.push(Effect::Notify(Notification::server_online()));
            }
            SemanticEvent::IndexingFinished => {
                effects.push(Effect::Notify(Notification::indexing_finished()));
            }
            SemanticEvent::PreparingCleared => {}
        }
    }
    effects
}

/// Decides whether a failed cycle surfaces a server-down notice.
///
/// The debounce clock only moves when a notice is actually surfaced.
pub fn gate_failure(
    state: &mut MonitorState,
    now: Instant,
    policy: &PollPolicy,
) -> Option<Notification> {
    let due = match state.last_server_down_notice() {
        None => true,
        Some(last) => now.saturating_duration_since(last) >= policy.down_notice_interval,
    };
    if !due {
        return None;
    }
    state.record_server_down_notice(now);
    Some(Notification::server_down(
        policy.failure_delay,
        policy.down_notice_interval,
    ))
}
