//! The `EdState` aggregate root.

use rustc_hash::FxHashMap;

use ed_core::{Minute, PatientId, RoomId, SimClock, StaffId, UnitId};

use crate::{CareUnit, Consultation, Patient, StaffMember, TransportDest, WaitingRoom};

/// Everything the department owns: the simulated clock, the fixed layout
/// (rooms, the consultation slot, units, roster) and the patient map.
///
/// Rooms, units, and staff are stored in declaration order and indexed by
/// their typed ids; lookups are fallible so a dangling id becomes a
/// `NotFound`-kind error in the service layer rather than a panic.  Patients
/// live in an `FxHashMap` keyed by their caller-assigned id — discharged
/// records are kept for audit, never removed.
#[derive(Clone, Debug)]
pub struct EdState {
    pub clock:        SimClock,
    pub rooms:        Vec<WaitingRoom>,
    pub consultation: Consultation,
    pub units:        Vec<CareUnit>,
    pub staff:        Vec<StaffMember>,
    pub patients:     FxHashMap<PatientId, Patient>,
}

impl EdState {
    /// The current simulated minute.
    #[inline]
    pub fn now(&self) -> Minute {
        self.clock.now
    }

    // ── Fallible id lookups ───────────────────────────────────────────────

    pub fn room(&self, id: RoomId) -> Option<&WaitingRoom> {
        self.rooms.get(id.index())
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut WaitingRoom> {
        self.rooms.get_mut(id.index())
    }

    pub fn unit(&self, id: UnitId) -> Option<&CareUnit> {
        self.units.get(id.index())
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut CareUnit> {
        self.units.get_mut(id.index())
    }

    pub fn staff_member(&self, id: StaffId) -> Option<&StaffMember> {
        self.staff.get(id.index())
    }

    pub fn staff_member_mut(&mut self, id: StaffId) -> Option<&mut StaffMember> {
        self.staff.get_mut(id.index())
    }

    pub fn patient(&self, id: &PatientId) -> Option<&Patient> {
        self.patients.get(id)
    }

    pub fn patient_mut(&mut self, id: &PatientId) -> Option<&mut Patient> {
        self.patients.get_mut(id)
    }

    /// Find a unit by display name (the protocol layer speaks names, not ids).
    pub fn unit_by_name(&self, name: &str) -> Option<&CareUnit> {
        self.units.iter().find(|u| u.name == name)
    }

    // ── Derived queries ───────────────────────────────────────────────────

    /// How many in-flight transports are headed for `unit`.
    ///
    /// Counted against the unit's capacity at dispatch time so the bound
    /// holds during 45-minute transfers, not only at arrival.
    pub fn inbound_transports(&self, unit: UnitId) -> usize {
        self.staff
            .iter()
            .filter_map(|s| s.transport.as_ref())
            .filter(|t| t.destination == TransportDest::Unit(unit))
            .count()
    }

    /// The staff member currently escorting `patient`, if any.
    pub fn transporter_of(&self, patient: &PatientId) -> Option<StaffId> {
        self.staff
            .iter()
            .find(|s| s.transport.as_ref().is_some_and(|t| &t.patient == patient))
            .map(|s| s.id)
    }
}
