//! `ed-state` — entity model and aggregate state.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`patient`]      | `Patient`, `PatientStatus` + the exhaustive transition table |
//! | [`room`]         | `WaitingRoom`                                             |
//! | [`consultation`] | `Consultation` — the single system-wide slot              |
//! | [`unit`]         | `CareUnit`                                                |
//! | [`staff`]        | `StaffMember`, `Location`, `ActiveTransport`              |
//! | [`state`]        | `EdState` aggregate root                                  |
//! | [`builder`]      | `EdStateBuilder`, `standard_department()`                 |
//!
//! # Ownership model
//!
//! `EdState` is the single owner of every entity.  Cross-entity relations
//! (patient↔room, staff↔patient, room↔supervisor) are expressed as typed ids
//! resolved through the aggregate's fallible accessors — never as references,
//! so there are no ownership cycles and a dangling id surfaces as a
//! `NotFound`-kind error in the service layer instead of a crash.
//!
//! All mutation flows through the controller crate (`ed-control`); the
//! service crates take `&mut EdState` per call and hold no state of their
//! own.  A multi-threaded host must serialize mutating calls behind one lock
//! or actor — entities carry no per-item concurrency control.

pub mod builder;
pub mod consultation;
pub mod patient;
pub mod room;
pub mod staff;
pub mod state;
pub mod unit;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::{EdStateBuilder, standard_department};
pub use consultation::Consultation;
pub use patient::{Patient, PatientStatus};
pub use room::WaitingRoom;
pub use staff::{ActiveTransport, Location, StaffMember, TransportDest};
pub use state::EdState;
pub use unit::CareUnit;
