use std::sync::Once;
use std::time::{Duration, Instant};

use monitor_core::{
    update, Effect, MonitorState, Msg, NotificationKind, PollPolicy, ServerReading, Severity,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(monitor_logging::initialize_for_tests);
}

fn fetched(state: MonitorState, in_indexing: u64, left: u64) -> (MonitorState, Vec<Effect>) {
    update(
        state,
        Msg::StatusFetched {
            reading: ServerReading::new(in_indexing, left),
        },
        &PollPolicy::default(),
    )
}

fn failed(state: MonitorState, now: Instant) -> (MonitorState, Vec<Effect>) {
    update(state, Msg::StatusFailed { now }, &PollPolicy::default())
}

fn notices(effects: &[Effect]) -> Vec<NotificationKind> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Notify(notification) => Some(notification.kind),
            _ => None,
        })
        .collect()
}

fn scheduled_delay(effects: &[Effect]) -> Option<Duration> {
    match effects.last() {
        Some(Effect::SchedulePoll { delay }) => Some(*delay),
        _ => None,
    }
}

#[test]
fn next_poll_delay_depends_on_outcome() {
    init_logging();
    let (state, effects) = fetched(MonitorState::new(), 0, 0);
    assert_eq!(scheduled_delay(&effects), Some(Duration::from_secs(5)));

    let (state, effects) = failed(state, Instant::now());
    assert_eq!(scheduled_delay(&effects), Some(Duration::from_secs(1)));

    let (_, effects) = fetched(state, 1, 0);
    assert_eq!(scheduled_delay(&effects), Some(Duration::from_secs(5)));
}

#[test]
fn custom_policy_delays_are_used() {
    let policy = PollPolicy {
        success_delay: Duration::from_millis(700),
        failure_delay: Duration::from_millis(300),
        down_notice_interval: Duration::from_secs(2),
        fetch_timeout: Duration::from_secs(1),
    };
    let (state, effects) = update(
        MonitorState::new(),
        Msg::StatusFailed {
            now: Instant::now(),
        },
        &policy,
    );
    assert_eq!(scheduled_delay(&effects), Some(Duration::from_millis(300)));

    let (_, effects) = update(
        state,
        Msg::StatusFetched {
            reading: ServerReading::default(),
        },
        &policy,
    );
    assert_eq!(scheduled_delay(&effects), Some(Duration::from_millis(700)));
}

#[test]
fn server_down_notices_are_debounced() {
    init_logging();
    let t0 = Instant::now();
    let mut state = MonitorState::new();
    let mut fired_at = Vec::new();

    for secs in [0u64, 2, 4, 6, 8] {
        let (next, effects) = failed(state, t0 + Duration::from_secs(secs));
        state = next;
        if notices(&effects) == vec![NotificationKind::ServerDown] {
            fired_at.push(secs);
        }
    }

    assert_eq!(fired_at, vec![0, 6]);
    assert_eq!(
        state.last_server_down_notice(),
        Some(t0 + Duration::from_secs(6))
    );
}

#[test]
fn failure_leaves_counts_unchanged() {
    let (state, _) = fetched(MonitorState::new(), 3, 9);
    let (state, _) = failed(state, Instant::now());

    assert!(state.is_server_down());
    assert_eq!(state.docs_in_indexing(), 3);
    assert_eq!(state.docs_left_to_index(), 9);
}

#[test]
fn server_down_notice_is_an_error() {
    let (_, effects) = failed(MonitorState::new(), Instant::now());
    let notice = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Notify(notification) => Some(notification.clone()),
            _ => None,
        })
        .expect("server down notice");

    assert_eq!(notice.severity, Severity::Error);
    assert_eq!(notice.message, "Server is down, retrying in 1 second...");
    assert_eq!(notice.auto_dismiss, Duration::from_secs(5));
}

#[test]
fn recovery_fires_once_and_dismisses_down_notice() {
    init_logging();
    let t0 = Instant::now();
    let (state, _) = failed(MonitorState::new(), t0);
    assert!(state.is_server_down());

    let (state, effects) = fetched(state, 0, 0);
    assert!(!state.is_server_down());
    assert_eq!(
        effects,
        vec![
            Effect::Dismiss(NotificationKind::ServerDown),
            Effect::Notify(monitor_core::Notification::server_online()),
            Effect::SchedulePoll {
                delay: Duration::from_secs(5)
            },
        ]
    );

    let (_, effects) = fetched(state, 0, 0);
    assert!(notices(&effects).is_empty());
}

#[test]
fn indexing_finished_fires_on_the_edge_only() {
    let (state, _) = fetched(MonitorState::new(), 5, 0);

    let (state, effects) = fetched(state, 0, 0);
    assert_eq!(notices(&effects), vec![NotificationKind::IndexingFinished]);

    let (_, effects) = fetched(state, 0, 0);
    assert!(notices(&effects).is_empty());
}

#[test]
fn preparing_clears_only_on_activity() {
    let (state, _) = update(MonitorState::new(), Msg::JobSubmitted, &PollPolicy::default());

    let (state, _) = fetched(state, 0, 0);
    assert!(state.is_preparing_indexing());

    let (state, effects) = fetched(state, 0, 3);
    assert!(!state.is_preparing_indexing());
    assert!(notices(&effects).is_empty());

    let (state, _) = fetched(state, 0, 0);
    let (state, _) = fetched(state, 2, 0);
    assert!(!state.is_preparing_indexing());
}

#[test]
fn preparing_survives_failures() {
    let (state, _) = update(MonitorState::new(), Msg::JobSubmitted, &PollPolicy::default());
    let (state, _) = failed(state, Instant::now());
    assert!(state.is_preparing_indexing());
    assert!(state.is_server_down());
}

#[test]
fn outage_then_indexing_cycle_notifies_in_order() {
    init_logging();
    let t0 = Instant::now();
    let mut state = MonitorState::new();
    let mut fired = Vec::new();

    for secs in 0..3u64 {
        let (next, effects) = failed(state, t0 + Duration::from_secs(secs));
        state = next;
        fired.extend(notices(&effects));
    }
    for (in_indexing, left) in [(0, 4), (0, 0), (4, 0), (0, 0)] {
        let (next, effects) = fetched(state, in_indexing, left);
        state = next;
        fired.extend(notices(&effects));
    }

    assert_eq!(
        fired,
        vec![
            NotificationKind::ServerDown,
            NotificationKind::ServerOnline,
            NotificationKind::IndexingFinished,
        ]
    );
}
