use std::sync::Arc;
use std::time::Duration;

use monitor_core::{update, Effect, MonitorState, Msg, PollPolicy};
use monitor_logging::{monitor_debug, monitor_info, monitor_warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{FailureKind, FetchError, NotificationEvent, NotificationSink, StatusFetcher};

enum MonitorSignal {
    JobSubmitted,
}

/// Owner-side handle of a running status monitor.
///
/// Dropping the handle cancels the poll task, including any in-flight fetch
/// and the pending timer.
pub struct MonitorHandle {
    signal_tx: mpsc::UnboundedSender<MonitorSignal>,
    state_rx: watch::Receiver<MonitorState>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl MonitorHandle {
    /// Starts polling on the current tokio runtime. The first fetch is issued immediately.
    pub fn spawn(
        fetcher: Arc<dyn StatusFetcher>,
        policy: PollPolicy,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self::spawn_with_token(fetcher, policy, sink, CancellationToken::new())
    }

    pub fn spawn_with_token(
        fetcher: Arc<dyn StatusFetcher>,
        policy: PollPolicy,
        sink: Arc<dyn NotificationSink>,
        cancel: CancellationToken,
    ) -> Self {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(MonitorState::new());

        let poller = Poller {
            fetcher,
            policy,
            sink,
            state: MonitorState::new(),
            state_tx,
            signal_rx,
            cancel: cancel.clone(),
        };
        let task = tokio::spawn(poller.run());

        Self {
            signal_tx,
            state_rx,
            cancel,
            task: Some(task),
        }
    }

    /// Read-only subscription to state snapshots, one per applied change.
    pub fn subscribe(&self) -> watch::Receiver<MonitorState> {
        self.state_rx.clone()
    }

    pub fn snapshot(&self) -> MonitorState {
        self.state_rx.borrow().clone()
    }

    /// Signals that a new data source was registered and indexing is being prepared.
    pub fn job_submitted(&self) {
        let _ = self.signal_tx.send(MonitorSignal::JobSubmitted);
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Cancels polling and waits for the task to release its resources.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct Poller {
    fetcher: Arc<dyn StatusFetcher>,
    policy: PollPolicy,
    sink: Arc<dyn NotificationSink>,
    state: MonitorState,
    state_tx: watch::Sender<MonitorState>,
    signal_rx: mpsc::UnboundedReceiver<MonitorSignal>,
    cancel: CancellationToken,
}

impl Poller {
    async fn run(mut self) {
        monitor_info!("status monitor started");
        let mut cycle: u64 = 0;
        loop {
            cycle += 1;
            let Some(msg) = self.fetch_once(cycle).await else {
                break;
            };
            let delay = self.apply(msg).unwrap_or(self.policy.success_delay);
            monitor_debug!("cycle {} settled, next poll in {:?}", cycle, delay);
            if !self.pause(delay).await {
                break;
            }
        }
        monitor_info!("status monitor stopped after {} cycles", cycle);
    }

    /// Runs one fetch to completion or to the fetch timeout, which counts as a
    /// failure. Returns `None` when cancelled mid-flight.
    async fn fetch_once(&mut self, cycle: u64) -> Option<Msg> {
        let fetcher = self.fetcher.clone();
        let fetch = tokio::time::timeout(self.policy.fetch_timeout, fetcher.fetch_status());
        tokio::pin!(fetch);

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return None,
                Some(signal) = self.signal_rx.recv() => self.handle_signal(signal),
                result = &mut fetch => {
                    let result = result.unwrap_or_else(|_| {
                        Err(FetchError::new(
                            FailureKind::Timeout,
                            format!("no answer within {:?}", self.policy.fetch_timeout),
                        ))
                    });
                    let msg = match result {
                        Ok(reading) => Msg::StatusFetched { reading },
                        Err(err) => {
                            monitor_warn!("status fetch failed on cycle {}: {}", cycle, err);
                            Msg::StatusFailed {
                                now: Instant::now().into_std(),
                            }
                        }
                    };
                    return Some(msg);
                }
            }
        }
    }

    /// Sleeps until the next cycle. Returns `false` when cancelled.
    async fn pause(&mut self, delay: Duration) -> bool {
        let sleep = tokio::time::sleep(delay);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return false,
                Some(signal) = self.signal_rx.recv() => self.handle_signal(signal),
                _ = &mut sleep => return true,
            }
        }
    }

    fn handle_signal(&mut self, signal: MonitorSignal) {
        match signal {
            MonitorSignal::JobSubmitted => {
                monitor_debug!("job submitted, waiting for indexing to start");
                self.apply(Msg::JobSubmitted);
            }
        }
    }

    /// Applies a message, runs its effects in order and publishes the new state.
    /// Returns the delay requested for the next poll, if any.
    fn apply(&mut self, msg: Msg) -> Option<Duration> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg, &self.policy);
        self.state = state;

        let mut next_poll = None;
        for effect in effects {
            match effect {
                Effect::Notify(notification) => {
                    monitor_info!("notify {:?}: {}", notification.kind, notification.message);
                    self.sink.emit(NotificationEvent::Show(notification));
                }
                Effect::Dismiss(kind) => {
                    self.sink.emit(NotificationEvent::Dismiss(kind));
                }
                Effect::SchedulePoll { delay } => next_poll = Some(delay),
            }
        }

        self.state_tx.send_replace(self.state.clone());
        next_poll
    }
}
