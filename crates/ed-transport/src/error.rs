use ed_core::{PatientId, UnitId};
use ed_patient::PatientError;
use ed_staff::StaffError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error(transparent)]
    Patient(#[from] PatientError),

    #[error(transparent)]
    Staff(#[from] StaffError),

    #[error("the consultation slot is occupied")]
    ConsultationOccupied,

    #[error("patient {0} is not the one in consultation")]
    NotInConsultation(PatientId),

    #[error("patient {0} has no target unit recorded")]
    NoTargetUnit(PatientId),

    #[error("care unit {0} not found")]
    UnknownUnit(UnitId),

    #[error("care unit {0} has no free bed (admitted + inbound at capacity)")]
    UnitFull(UnitId),

    #[error("patient {0} is ROUGE and cannot be discharged home")]
    CriticalSentHome(PatientId),

    #[error("dispatch would leave {available} mobile staff free, {required} required")]
    ReserveDepleted { available: usize, required: usize },

    #[error("no transport in progress for patient {0}")]
    NotInTransit(PatientId),
}

pub type TransportResult<T> = Result<T, TransportError>;
