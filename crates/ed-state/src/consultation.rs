//! The single consultation slot.

use ed_core::{Minute, PatientId};

/// The examining physician's slot — one patient system-wide, at most.
///
/// `patient` is set when a consultation transport departs (the reservation
/// that keeps a second transport from racing for the slot) and cleared when
/// the consultation ends.  `started_at` is stamped on arrival only.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Consultation {
    pub patient:    Option<PatientId>,
    pub started_at: Option<Minute>,
}

impl Consultation {
    #[inline]
    pub fn is_free(&self) -> bool {
        self.patient.is_none()
    }

    /// Clear both fields (consultation ended or administratively voided).
    pub fn clear(&mut self) {
        self.patient = None;
        self.started_at = None;
    }
}
