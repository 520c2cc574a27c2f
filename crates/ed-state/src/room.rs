//! Capacity-bounded waiting rooms.

use ed_core::{Minute, PatientId, RoomId, StaffId};

/// A holding area for patients awaiting their consultation transport.
///
/// `patients` is membership, not ownership: the ids are weak references into
/// `EdState::patients`, kept in seating order.  Invariant (enforced by the
/// patient service, checked by tests): `patients.len() <= capacity` always.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitingRoom {
    pub id:       RoomId,
    pub name:     String,
    pub capacity: usize,
    pub patients: Vec<PatientId>,

    /// The staff member currently watching this room, if any.
    pub supervisor: Option<StaffId>,
    /// When the room was last checked on.  Reset on every supervision
    /// assignment; drives the supervision-lapse alert.
    pub last_supervised: Minute,
}

impl WaitingRoom {
    pub fn new(id: RoomId, name: impl Into<String>, capacity: usize) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
            patients: Vec::new(),
            supervisor: None,
            last_supervised: Minute::ZERO,
        }
    }

    /// Free seats remaining.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.capacity.saturating_sub(self.patients.len())
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.patients.len() >= self.capacity
    }

    /// Minutes since the last supervision event.
    #[inline]
    pub fn minutes_unsupervised(&self, now: Minute) -> u64 {
        now.since(self.last_supervised)
    }
}
