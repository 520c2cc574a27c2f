//! Safety alerts.

use std::fmt;

use ed_core::{PatientId, RoomId};

/// A condition the dispatch desk must act on.
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alert {
    /// A waiting room with patients has gone unchecked past the safety
    /// threshold.
    SupervisionLapse { room: RoomId, minutes: u64 },

    /// A seated patient has waited past the long-wait threshold (which also
    /// promotes `Vert` patients in the queue).
    LongWait { patient: PatientId, minutes: u64 },
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::SupervisionLapse { room, minutes } => {
                write!(f, "{room} unsupervised for {minutes} min")
            }
            Alert::LongWait { patient, minutes } => {
                write!(f, "patient {patient} waiting for {minutes} min")
            }
        }
    }
}
