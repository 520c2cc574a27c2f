//! Specialized care units.

use ed_core::{PatientId, UnitId};

/// A capacity-bounded ward a patient may be transferred to after their
/// consultation.  Invariant: `patients.len() <= capacity` — and the transport
/// service additionally counts in-flight inbound transfers against capacity,
/// so the bound holds while transports are still on the corridor.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CareUnit {
    pub id:       UnitId,
    pub name:     String,
    pub capacity: usize,
    /// `true` for the unit whose `Rouge` admissions take the 5-minute
    /// expressway instead of the standard 45-minute transfer.
    pub critical_care: bool,
    pub patients: Vec<PatientId>,
}

impl CareUnit {
    pub fn new(id: UnitId, name: impl Into<String>, capacity: usize, critical_care: bool) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
            critical_care,
            patients: Vec::new(),
        }
    }

    /// Seats not yet occupied by admitted patients.  The transport service
    /// subtracts in-flight inbound transfers on top of this.
    #[inline]
    pub fn free_beds(&self) -> usize {
        self.capacity.saturating_sub(self.patients.len())
    }
}
