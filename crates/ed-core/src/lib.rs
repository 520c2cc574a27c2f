//! `ed-core` — foundational types for the emergency-department flow engine.
//!
//! This crate is a dependency of every other `ed-*` crate.  It intentionally
//! has no `ed-*` dependencies and no required external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PatientId`, `RoomId`, `UnitId`, `StaffId`            |
//! | [`time`]        | `Minute`, `SimClock`                                  |
//! | [`severity`]    | `Severity` triage tiers                               |
//! | [`role`]        | `StaffRole` enum                                      |
//! | [`disposition`] | `Disposition` (post-consultation orientation)         |
//! | [`config`]      | `FlowConfig` — every tunable duration and threshold   |
//! | [`event`]       | `FlowEvent` — typed, human-readable log entries       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `ed-control`.                                  |

pub mod config;
pub mod disposition;
pub mod event;
pub mod ids;
pub mod role;
pub mod severity;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::FlowConfig;
pub use disposition::Disposition;
pub use event::FlowEvent;
pub use ids::{PatientId, RoomId, StaffId, UnitId};
pub use role::StaffRole;
pub use severity::Severity;
pub use time::{Minute, SimClock};
