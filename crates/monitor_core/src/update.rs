use crate::{classify, gate_events, gate_failure, Effect, MonitorState, Msg, PollPolicy};

/// Pure update function: applies a message to state and returns any effects.
///
/// Each fetch outcome ends with exactly one `SchedulePoll`, so the caller never
/// has to guess when the next cycle starts.
pub fn update(state: MonitorState, msg: Msg, policy: &PollPolicy) -> (MonitorState, Vec<Effect>) {
    match msg {
        Msg::StatusFetched { reading } => {
            let (next, events) = classify(&state, reading);
            let mut effects = gate_events(&events);
            effects.push(Effect::SchedulePoll {
                delay: policy.success_delay,
            });
            (next, effects)
        }
        Msg::StatusFailed { now } => {
            let mut next = state;
            next.mark_server_down();
            let mut effects = Vec::with_capacity(2);
            if let Some(notice) = gate_failure(&mut next, now, policy) {
                effects.push(Effect::Notify(notice));
            }
            effects.push(Effect::SchedulePoll {
                delay: policy.failure_delay,
            });
            (next, effects)
        }
        Msg::JobSubmitted => {
            let mut next = state;
            next.mark_job_submitted();
            (next, Vec::new())
        }
        Msg::NoOp => (state, Vec::new()),
    }
}
