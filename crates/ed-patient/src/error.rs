use ed_core::{PatientId, RoomId};
use ed_state::PatientStatus;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatientError {
    #[error("patient {0} is already admitted")]
    DuplicateId(PatientId),

    #[error("patient {0} not found")]
    UnknownPatient(PatientId),

    #[error("waiting room {0} not found")]
    UnknownRoom(RoomId),

    #[error("waiting room {0} is full")]
    RoomFull(RoomId),

    #[error("every waiting room is full")]
    AllRoomsFull,

    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: PatientStatus,
        to:   PatientStatus,
    },
}

pub type PatientResult<T> = Result<T, PatientError>;
