use ed_core::{RoomId, StaffId, StaffRole};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StaffError {
    #[error("staff member {0} not found")]
    UnknownStaff(StaffId),

    #[error("waiting room {0} not found")]
    UnknownRoom(RoomId),

    #[error("a {role} cannot take supervision or transport duty")]
    RoleNotEligible { staff: StaffId, role: StaffRole },

    #[error("staff member {0} cannot leave their post right now")]
    CannotLeave(StaffId),
}

pub type StaffResult<T> = Result<T, StaffError>;
