//! `ed-transport` — the transport service.
//!
//! Owns the two timing state machines that move patients between posts:
//!
//! | Machine                | Start                      | Finalize                    |
//! |------------------------|----------------------------|-----------------------------|
//! | Consultation transport | [`start_to_consultation`]  | [`finalize_to_consultation`]|
//! | Unit transfer          | [`start_to_unit`]          | [`finalize_to_unit`]        |
//!
//! Both are anchored on the simulated clock: a start stamps the escorting
//! staff member with an `expected_arrival`, and the controller's `tick` calls
//! the matching finalize once that stamp has passed.  Nothing here sleeps or
//! polls — once in transit, the only way forward is the finalize.
//!
//! [`end_consultation`] closes the consultation machine (freeing the single
//! slot), and [`return_to_waiting_room`] is the rescue path that keeps a
//! patient from being stranded when their unit transfer cannot dispatch.
//!
//! Every status change routes through `ed_patient::transition_status`, so
//! the central transition table also polices this crate.

pub mod consult;
pub mod error;
pub mod unit;

#[cfg(test)]
mod tests;

pub use consult::{end_consultation, finalize_to_consultation, start_to_consultation};
pub use error::{TransportError, TransportResult};
pub use unit::{finalize_to_unit, return_to_waiting_room, start_to_unit};
