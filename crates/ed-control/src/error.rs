//! The facade error type and the four-kind taxonomy external layers see.

use ed_patient::PatientError;
use ed_staff::StaffError;
use ed_transport::TransportError;
use thiserror::Error;

/// Any failure a controller operation can surface.
///
/// Wraps the service errors unchanged — the controller never swallows or
/// rewrites them.  [`ControlError::kind`] collapses every variant onto the
/// four kinds the action layer branches on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error(transparent)]
    Patient(#[from] PatientError),

    #[error(transparent)]
    Staff(#[from] StaffError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type ControlResult<T> = Result<T, ControlError>;

// ── ErrorKind ─────────────────────────────────────────────────────────────────

/// The coarse failure taxonomy exposed to external layers.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// An id (patient, staff, room, unit) resolved to nothing.
    NotFound,
    /// A state-machine violation: the operation is not legal from the
    /// entity's current state.
    InvalidTransition,
    /// A capacity or staffing constraint blocked the operation; retrying
    /// after the next tick may succeed.
    ResourceUnavailable,
    /// The operation itself is against department rules regardless of
    /// timing.
    PolicyViolation,
}

impl ControlError {
    /// Collapse onto the external taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ControlError::Patient(e) => patient_kind(e),
            ControlError::Staff(e) => staff_kind(e),
            ControlError::Transport(e) => transport_kind(e),
        }
    }
}

fn patient_kind(e: &PatientError) -> ErrorKind {
    match e {
        PatientError::UnknownPatient(_) | PatientError::UnknownRoom(_) => ErrorKind::NotFound,
        PatientError::InvalidTransition { .. } => ErrorKind::InvalidTransition,
        PatientError::RoomFull(_) | PatientError::AllRoomsFull => ErrorKind::ResourceUnavailable,
        PatientError::DuplicateId(_) => ErrorKind::PolicyViolation,
    }
}

fn staff_kind(e: &StaffError) -> ErrorKind {
    match e {
        StaffError::UnknownStaff(_) | StaffError::UnknownRoom(_) => ErrorKind::NotFound,
        StaffError::CannotLeave(_) => ErrorKind::ResourceUnavailable,
        StaffError::RoleNotEligible { .. } => ErrorKind::PolicyViolation,
    }
}

fn transport_kind(e: &TransportError) -> ErrorKind {
    match e {
        TransportError::Patient(inner) => patient_kind(inner),
        TransportError::Staff(inner) => staff_kind(inner),
        TransportError::UnknownUnit(_) => ErrorKind::NotFound,
        TransportError::NotInConsultation(_)
        | TransportError::NotInTransit(_)
        | TransportError::NoTargetUnit(_) => ErrorKind::InvalidTransition,
        TransportError::ConsultationOccupied
        | TransportError::UnitFull(_)
        | TransportError::ReserveDepleted { .. } => ErrorKind::ResourceUnavailable,
        TransportError::CriticalSentHome(_) => ErrorKind::PolicyViolation,
    }
}
