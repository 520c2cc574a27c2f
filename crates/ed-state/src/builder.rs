//! Fluent builder for constructing an [`EdState`], plus the standard
//! department preset.

use rustc_hash::FxHashMap;

use ed_core::{RoomId, SimClock, StaffId, StaffRole, UnitId};

use crate::{CareUnit, Consultation, EdState, StaffMember, WaitingRoom};

/// Fluent builder for [`EdState`].
///
/// Rooms, units, and staff are assigned their typed ids in declaration
/// order — the same order the auto-selection rules use for tie-breaking.
///
/// # Example
///
/// ```rust
/// use ed_core::StaffRole;
/// use ed_state::EdStateBuilder;
///
/// let state = EdStateBuilder::new()
///     .add_room("Waiting Room 1", 5)
///     .add_unit("Critical Care", 2, true)
///     .add_staff("Triage Nurse", StaffRole::FixedTriageNurse)
///     .add_staff("Aide 1", StaffRole::Aide)
///     .build();
///
/// assert_eq!(state.rooms.len(), 1);
/// assert_eq!(state.staff.len(), 2);
/// ```
#[derive(Default)]
pub struct EdStateBuilder {
    start_unix_secs: i64,
    rooms: Vec<WaitingRoom>,
    units: Vec<CareUnit>,
    staff: Vec<StaffMember>,
}

impl EdStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor minute 0 at a Unix timestamp (for snapshot consumers that want
    /// wall-clock labels).  Defaults to 0.
    pub fn start_unix_secs(mut self, secs: i64) -> Self {
        self.start_unix_secs = secs;
        self
    }

    pub fn add_room(mut self, name: impl Into<String>, capacity: usize) -> Self {
        let id = RoomId(self.rooms.len() as u16);
        self.rooms.push(WaitingRoom::new(id, name, capacity));
        self
    }

    pub fn add_unit(
        mut self,
        name: impl Into<String>,
        capacity: usize,
        critical_care: bool,
    ) -> Self {
        let id = UnitId(self.units.len() as u16);
        self.units.push(CareUnit::new(id, name, capacity, critical_care));
        self
    }

    pub fn add_staff(mut self, name: impl Into<String>, role: StaffRole) -> Self {
        let id = StaffId(self.staff.len() as u16);
        self.staff.push(StaffMember::new(id, name, role));
        self
    }

    pub fn build(self) -> EdState {
        EdState {
            clock:        SimClock::new(self.start_unix_secs),
            rooms:        self.rooms,
            consultation: Consultation::default(),
            units:        self.units,
            staff:        self.staff,
            patients:     FxHashMap::default(),
        }
    }
}

/// The department layout this engine was sized for: three waiting rooms
/// (5/10/5 seats), five units led by a critical-care ward, and a six-person
/// roster with exactly two mobile nurses and two aides.
pub fn standard_department() -> EdState {
    EdStateBuilder::new()
        .add_room("Waiting Room 1", 5)
        .add_room("Waiting Room 2", 10)
        .add_room("Waiting Room 3", 5)
        .add_unit("Critical Care", 5, true)
        .add_unit("Cardiology", 10, false)
        .add_unit("Pneumology", 5, false)
        .add_unit("Neurology", 8, false)
        .add_unit("Orthopedics", 7, false)
        .add_staff("Doctor 1", StaffRole::FixedDoctor)
        .add_staff("Triage Nurse", StaffRole::FixedTriageNurse)
        .add_staff("Nurse 2", StaffRole::MobileNurse)
        .add_staff("Nurse 3", StaffRole::MobileNurse)
        .add_staff("Aide 1", StaffRole::Aide)
        .add_staff("Aide 2", StaffRole::Aide)
        .build()
}
