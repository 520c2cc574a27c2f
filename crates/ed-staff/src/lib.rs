//! `ed-staff` — the staff service.
//!
//! Availability discovery (the may-leave predicate), waiting-room
//! supervision, the best-effort auto-cover sweep, and release back to the
//! idle pool.  Like the patient service, everything is a free function over
//! `&mut EdState`.

pub mod error;
pub mod service;


pub use error::{StaffError, StaffResult};
pub use service::{
    assign_supervision, auto_cover_unsupervised_rooms, find_available, release,
    withdraw_supervision,
};
