//! `ed-control` — the controller facade and tick loop.
//!
//! The [`Controller`] is the single caller-facing mutator: the chatbot/action
//! layer, the dashboard, and any embedding host all go through it and never
//! touch entity internals.  It owns the aggregate [`EdState`], mirrors the
//! three services 1:1, and adds the pieces that only make sense at the top:
//!
//! - [`Controller::tick`] — the one place the passage of time triggers state
//!   progression: advances the clock, finalizes due transports in roster
//!   order, runs the best-effort auto-cover sweep, and reports alerts.
//! - [`Controller::alerts`] — supervision-lapse and long-wait scans.
//! - [`Controller::consultation_queue`] / [`Controller::exit_transport_queue`]
//!   — priority-sorted views, recomputed fresh on every call.
//! - [`Controller::snapshot`] — the serializable contract the presentation
//!   and action layers poll.
//!
//! # Concurrency
//!
//! Single-threaded and cooperative: every operation is synchronous and
//! returns immediately.  A multi-threaded host must serialize mutating calls
//! behind one lock or actor; snapshot reads tolerate eventual consistency.

pub mod alert;
pub mod controller;
pub mod error;
pub mod snapshot;


pub use alert::Alert;
pub use controller::{Controller, LoggedEvent, TickReport};
pub use error::{ControlError, ControlResult, ErrorKind};
pub use snapshot::Snapshot;

// Re-export the vocabulary callers need to drive the facade without naming
// every sub-crate.
pub use ed_core::{
    Disposition, FlowConfig, FlowEvent, Minute, PatientId, RoomId, Severity, StaffId, StaffRole,
    UnitId,
};
pub use ed_state::{EdState, EdStateBuilder, Patient, PatientStatus, standard_department};
