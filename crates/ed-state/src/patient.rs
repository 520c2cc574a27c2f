//! The `Patient` record and its status state machine.

use std::fmt;

use ed_core::{Minute, PatientId, RoomId, Severity, UnitId};

// ── PatientStatus ─────────────────────────────────────────────────────────────

/// Where a patient currently stands in the care pathway.
///
/// The allowed edges form the one state machine every orchestration layer
/// must route through (see [`PatientStatus::can_transition`]):
///
/// ```text
/// AwaitingTriage          -> InWaitingRoom
/// InWaitingRoom           -> InTransitToConsultation
/// InTransitToConsultation -> InConsultation
/// InConsultation          -> AwaitingExitTransport | Discharged
/// AwaitingExitTransport   -> InTransitToUnit | InWaitingRoom   (rescue path)
/// InTransitToUnit         -> Discharged
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PatientStatus {
    AwaitingTriage,
    InWaitingRoom,
    InTransitToConsultation,
    InConsultation,
    AwaitingExitTransport,
    InTransitToUnit,
    Discharged,
}

impl PatientStatus {
    /// `true` iff `self -> target` is one of the listed edges.
    ///
    /// This is the single source of truth for transition legality; the
    /// patient service consults it and every other crate goes through the
    /// patient service.
    pub fn can_transition(self, target: PatientStatus) -> bool {
        use PatientStatus::*;
        matches!(
            (self, target),
            (AwaitingTriage, InWaitingRoom)
                | (InWaitingRoom, InTransitToConsultation)
                | (InTransitToConsultation, InConsultation)
                | (InConsultation, AwaitingExitTransport | Discharged)
                | (AwaitingExitTransport, InTransitToUnit | InWaitingRoom)
                | (InTransitToUnit, Discharged)
        )
    }

    /// `Discharged` is terminal: the record stays in the map for audit and
    /// metrics but never transitions again.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, PatientStatus::Discharged)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PatientStatus::AwaitingTriage => "awaiting_triage",
            PatientStatus::InWaitingRoom => "in_waiting_room",
            PatientStatus::InTransitToConsultation => "in_transit_to_consultation",
            PatientStatus::InConsultation => "in_consultation",
            PatientStatus::AwaitingExitTransport => "awaiting_exit_transport",
            PatientStatus::InTransitToUnit => "in_transit_to_unit",
            PatientStatus::Discharged => "discharged",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Patient ───────────────────────────────────────────────────────────────────

/// A patient somewhere between triage intake and discharge.
///
/// Owned exclusively by [`EdState`](crate::EdState); services mutate it
/// through the controller only.  `severity` is assigned at intake and never
/// changed by the engine (the external protocol layer may overwrite it).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patient {
    pub id:         PatientId,
    pub first_name: String,
    pub last_name:  String,
    pub severity:   Severity,
    /// Free text taken down at triage.
    pub symptoms:   String,
    pub age:        u8,
    /// Prior conditions relevant to orientation decisions.
    pub history:    Vec<String>,

    /// Stamped by `admit` with the simulated clock, never wall time.
    pub arrived_at: Minute,
    pub status:     PatientStatus,

    /// The waiting room currently holding this patient, if any.
    pub room:        Option<RoomId>,
    /// Orientation recorded when the consultation ended.
    pub target_unit: Option<UnitId>,

    pub consultation_started_at: Option<Minute>,
    pub consultation_ended_at:   Option<Minute>,
}

impl Patient {
    /// Build an intake record.  `arrived_at` and `status` are placeholders
    /// here — `admit` overwrites both.
    pub fn new(
        id:         impl Into<PatientId>,
        first_name: impl Into<String>,
        last_name:  impl Into<String>,
        severity:   Severity,
        symptoms:   impl Into<String>,
        age:        u8,
    ) -> Self {
        Self {
            id:         id.into(),
            first_name: first_name.into(),
            last_name:  last_name.into(),
            severity,
            symptoms:   symptoms.into(),
            age,
            history:    Vec::new(),
            arrived_at: Minute::ZERO,
            status:     PatientStatus::AwaitingTriage,
            room:        None,
            target_unit: None,
            consultation_started_at: None,
            consultation_ended_at:   None,
        }
    }

    /// Attach prior conditions (fluent, for intake code).
    pub fn with_history(mut self, history: Vec<String>) -> Self {
        self.history = history;
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whole minutes since arrival.
    #[inline]
    pub fn wait_minutes(&self, now: Minute) -> u64 {
        now.since(self.arrived_at)
    }

    /// Priority key for the consultation and exit-transport queues —
    /// ascending sort, ties broken by earlier arrival.
    ///
    /// | Tier | Who                                            |
    /// |------|------------------------------------------------|
    /// | 0    | `Rouge`                                        |
    /// | 1    | `Vert` waiting longer than `long_wait_min`     |
    /// | 2    | `Jaune`                                        |
    /// | 3    | `Vert` within the threshold                    |
    /// | 4    | `Gris`                                         |
    ///
    /// The tier-1 exception is what keeps a six-hour `Vert` from being
    /// starved forever by a steady stream of `Jaune` arrivals.
    pub fn queue_priority(&self, now: Minute, long_wait_min: u64) -> (u8, Minute) {
        let tier = match self.severity {
            Severity::Rouge => 0,
            Severity::Vert if self.wait_minutes(now) > long_wait_min => 1,
            Severity::Jaune => 2,
            Severity::Vert => 3,
            Severity::Gris => 4,
        };
        (tier, self.arrived_at)
    }
}
