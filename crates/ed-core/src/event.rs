//! Typed flow events.
//!
//! Every automatic or caller-triggered mutation worth showing on the
//! dashboard produces one of these.  The variants carry ids, not prose;
//! `Display` renders the human-readable line the tick loop and event log
//! hand to the presentation layer.

use std::fmt;

use crate::{Disposition, Minute, PatientId, RoomId, Severity, StaffId, UnitId};

/// One entry in the department's event log.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlowEvent {
    /// A new patient entered the system at triage.
    PatientAdmitted { patient: PatientId, severity: Severity },

    /// A patient was seated in a waiting room.
    RoomAssigned { patient: PatientId, room: RoomId },

    /// A staff member took over supervision of a room.  `auto` marks
    /// assignments made by the best-effort auto-cover sweep.
    SupervisionAssigned { staff: StaffId, room: RoomId, auto: bool },

    /// An escort departed for the consultation slot with a patient.
    ConsultTransportStarted { patient: PatientId, staff: StaffId, eta: Minute },

    /// A patient reached the consultation slot; the examination begins.
    ConsultationStarted { patient: PatientId },

    /// The physician ended a consultation and set the orientation.
    ConsultationEnded { patient: PatientId, disposition: Disposition },

    /// An escort departed for a care unit with a patient.
    UnitTransportStarted { patient: PatientId, staff: StaffId, unit: UnitId, eta: Minute },

    /// A patient was admitted into their target unit.
    UnitAdmission { patient: PatientId, unit: UnitId },

    /// Rescue path: a patient awaiting an exit transport was returned to a
    /// waiting room instead.
    ReturnedToWaitingRoom { patient: PatientId, room: RoomId },

    /// A patient left the department (home discharge or administrative
    /// override).
    Discharged { patient: PatientId },

    /// A due transport could not be finalized during `tick`; the failure is
    /// logged instead of aborting the whole reconciliation.
    FinalizeFailed { patient: PatientId, reason: String },
}

impl fmt::Display for FlowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowEvent::PatientAdmitted { patient, severity } => {
                write!(f, "patient {patient} admitted at triage ({severity})")
            }
            FlowEvent::RoomAssigned { patient, room } => {
                write!(f, "patient {patient} seated in {room}")
            }
            FlowEvent::SupervisionAssigned { staff, room, auto: false } => {
                write!(f, "{staff} now supervising {room}")
            }
            FlowEvent::SupervisionAssigned { staff, room, auto: true } => {
                write!(f, "auto-cover: {staff} now supervising {room}")
            }
            FlowEvent::ConsultTransportStarted { patient, staff, eta } => {
                write!(f, "{staff} escorting patient {patient} to consultation, arrival {eta}")
            }
            FlowEvent::ConsultationStarted { patient } => {
                write!(f, "patient {patient} arrived in consultation")
            }
            FlowEvent::ConsultationEnded { patient, disposition } => {
                write!(f, "consultation of patient {patient} ended, destination {disposition}")
            }
            FlowEvent::UnitTransportStarted { patient, staff, unit, eta } => {
                write!(f, "{staff} transferring patient {patient} to {unit}, arrival {eta}")
            }
            FlowEvent::UnitAdmission { patient, unit } => {
                write!(f, "patient {patient} admitted into {unit}")
            }
            FlowEvent::ReturnedToWaitingRoom { patient, room } => {
                write!(f, "patient {patient} returned to {room} (unit transfer deferred)")
            }
            FlowEvent::Discharged { patient } => {
                write!(f, "patient {patient} discharged")
            }
            FlowEvent::FinalizeFailed { patient, reason } => {
                write!(f, "could not finalize transport of patient {patient}: {reason}")
            }
        }
    }
}
