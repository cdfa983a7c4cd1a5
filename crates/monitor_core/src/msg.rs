use std::time::Instant;

use crate::ServerReading;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A status fetch settled successfully.
    StatusFetched { reading: ServerReading },
    /// A status fetch failed (transport, status code, timeout or bad body).
    StatusFailed { now: Instant },
    /// The presentation layer registered a new data source.
    JobSubmitted,
    /// Fallback for placeholder wiring.
    NoOp,
}
