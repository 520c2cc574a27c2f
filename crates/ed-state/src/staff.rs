//! Staff members and their occupancy state.

use std::fmt;

use ed_core::{FlowConfig, Minute, PatientId, RoomId, StaffId, StaffRole, UnitId};

// ── Location ──────────────────────────────────────────────────────────────────

/// Where a staff member currently is (when not mid-transport).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    /// The idle pool — where auto-cover looks for supervisors.
    #[default]
    Idle,
    /// The intake desk (the fixed triage nurse's permanent post).
    Triage,
    /// The consultation slot (the fixed doctor's permanent post).
    Consultation,
    /// Posted in a waiting room.
    Room(RoomId),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Idle => f.write_str("idle"),
            Location::Triage => f.write_str("triage"),
            Location::Consultation => f.write_str("consultation"),
            Location::Room(r) => write!(f, "{r}"),
        }
    }
}

// ── ActiveTransport ───────────────────────────────────────────────────────────

/// Where an in-transit staff member is headed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportDest {
    Consultation,
    Unit(UnitId),
}

/// An escort in progress.
///
/// Grouping the three transport fields in one `Option` makes "in transit
/// implies a patient, a destination, and an eta" true by construction — the
/// tick loop never has to handle a half-populated transport.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveTransport {
    pub patient:          PatientId,
    pub destination:      TransportDest,
    /// When the escort reaches the destination; `tick` finalizes every
    /// transport whose stamp has passed.
    pub expected_arrival: Minute,
}

// ── StaffMember ───────────────────────────────────────────────────────────────

/// One member of the fixed roster.
///
/// Invariants: a `FixedTriageNurse` never changes location or availability;
/// a member is never simultaneously in transit and supervising a room (both
/// transport starts withdraw supervision first).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaffMember {
    pub id:   StaffId,
    pub name: String,
    pub role: StaffRole,

    pub available: bool,
    pub location:  Location,

    /// When this member last became busy at a post.  Drives the
    /// minimum-occupancy lock in [`may_leave`](StaffMember::may_leave).
    pub busy_since: Option<Minute>,
    /// Absence cap for aides away on a unit transfer.
    pub must_return_by: Option<Minute>,

    /// The escort in progress, if any.
    pub transport: Option<ActiveTransport>,
    /// The waiting room this member supervises, if any.
    pub watching: Option<RoomId>,
}

impl StaffMember {
    /// Build a roster entry.  Fixed roles start at their permanent post;
    /// mobile roles start in the idle pool.
    pub fn new(id: StaffId, name: impl Into<String>, role: StaffRole) -> Self {
        let location = match role {
            StaffRole::FixedDoctor => Location::Consultation,
            StaffRole::FixedTriageNurse => Location::Triage,
            StaffRole::MobileNurse | StaffRole::Aide => Location::Idle,
        };
        Self {
            id,
            name: name.into(),
            role,
            available: true,
            location,
            busy_since: None,
            must_return_by: None,
            transport: None,
            watching: None,
        }
    }

    #[inline]
    pub fn in_transit(&self) -> bool {
        self.transport.is_some()
    }

    /// The may-leave predicate: can this member be pulled away right now?
    ///
    /// A `FixedTriageNurse` may never leave.  Anyone else may leave only if
    /// marked available, not in transit, and — when `busy_since` is set —
    /// after at least `min_dwell_min` at their current post.
    pub fn may_leave(&self, now: Minute, config: &FlowConfig) -> bool {
        if self.role == StaffRole::FixedTriageNurse {
            return false;
        }
        if self.in_transit() || !self.available {
            return false;
        }
        match self.busy_since {
            Some(since) => now.since(since) >= config.min_dwell_min,
            None => true,
        }
    }

    /// Minutes an aide has left before their absence cap expires.
    ///
    /// `None` for every other role and for aides with no deadline stamped.
    pub fn remaining_leave_minutes(&self, now: Minute) -> Option<u64> {
        if self.role != StaffRole::Aide {
            return None;
        }
        self.must_return_by.map(|deadline| deadline.since(now))
    }
}
