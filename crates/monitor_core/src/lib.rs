//! Status monitor core: pure indexing-progress state machine and view-model helpers.
mod classify;
mod effect;
mod gate;
mod msg;
mod state;
mod update;
mod view_model;

pub use classify::{classify, SemanticEvent};
pub use effect::{Effect, Notification, NotificationKind, Severity};
pub use gate::{gate_events, gate_failure};
pub use msg::Msg;
pub use state::{MonitorState, PollPolicy, ServerReading};
pub use update::update;
pub use view_model::{DisplayPhase, MonitorView};
