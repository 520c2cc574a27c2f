//! The serializable state snapshot.
//!
//! This is the read contract for the excluded collaborators: the chatbot
//! layer answers status questions from it, the dashboard polls it on every
//! refresh, and neither ever reaches into entity internals.  Views copy the
//! fields those layers actually consume plus the derived numbers they would
//! otherwise recompute (wait minutes, unsupervised minutes, inbound counts).

use serde::Serialize;

use ed_core::{Minute, PatientId, RoomId, Severity, StaffId, StaffRole, UnitId};
use ed_state::{Location, PatientStatus};

use crate::Controller;

/// A point-in-time, JSON-serializable view of the whole department.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    /// The simulated clock, both as a minute counter and mapped to Unix time.
    pub current_minute:    Minute,
    pub current_unix_secs: i64,

    pub rooms:        Vec<RoomView>,
    pub consultation: ConsultationView,
    pub units:        Vec<UnitView>,
    pub staff:        Vec<StaffView>,
    /// Every patient ever admitted (discharged records included), sorted by id.
    pub patients: Vec<PatientView>,

    /// Priority-ordered ids, head of the queue first.
    pub consultation_queue:   Vec<PatientId>,
    pub exit_transport_queue: Vec<PatientId>,

    /// Active alerts, rendered for display.
    pub alerts: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RoomView {
    pub id:       RoomId,
    pub name:     String,
    pub capacity: usize,
    pub patients: Vec<PatientId>,
    pub supervisor: Option<StaffId>,
    pub minutes_unsupervised: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConsultationView {
    pub patient:    Option<PatientId>,
    pub started_at: Option<Minute>,
}

#[derive(Clone, Debug, Serialize)]
pub struct UnitView {
    pub id:            UnitId,
    pub name:          String,
    pub capacity:      usize,
    pub critical_care: bool,
    pub patients:      Vec<PatientId>,
    /// Transfers currently on their way here — already counted against
    /// capacity by the dispatch rule.
    pub inbound: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct StaffView {
    pub id:        StaffId,
    pub name:      String,
    pub role:      StaffRole,
    pub available: bool,
    pub location:  Location,
    pub in_transit: bool,
    pub transporting:     Option<PatientId>,
    pub expected_arrival: Option<Minute>,
    pub watching: Option<RoomId>,
    /// Minutes left on an aide's absence cap, when one is stamped.
    pub remaining_leave_minutes: Option<u64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PatientView {
    pub id:       PatientId,
    pub name:     String,
    pub severity: Severity,
    pub age:      u8,
    pub symptoms: String,
    pub status:   PatientStatus,
    pub room:        Option<RoomId>,
    pub target_unit: Option<UnitId>,
    pub arrived_at:   Minute,
    pub wait_minutes: u64,
}

impl Snapshot {
    /// Copy the current state out of the controller.
    pub(crate) fn capture(controller: &Controller) -> Snapshot {
        let state = controller.state();
        let now = state.now();

        let rooms = state
            .rooms
            .iter()
            .map(|r| RoomView {
                id:       r.id,
                name:     r.name.clone(),
                capacity: r.capacity,
                patients: r.patients.clone(),
                supervisor: r.supervisor,
                minutes_unsupervised: r.minutes_unsupervised(now),
            })
            .collect();

        let consultation = ConsultationView {
            patient:    state.consultation.patient.clone(),
            started_at: state.consultation.started_at,
        };

        let units = state
            .units
            .iter()
            .map(|u| UnitView {
                id:            u.id,
                name:          u.name.clone(),
                capacity:      u.capacity,
                critical_care: u.critical_care,
                patients:      u.patients.clone(),
                inbound:       state.inbound_transports(u.id),
            })
            .collect();

        let staff = state
            .staff
            .iter()
            .map(|s| StaffView {
                id:        s.id,
                name:      s.name.clone(),
                role:      s.role,
                available: s.available,
                location:  s.location,
                in_transit: s.in_transit(),
                transporting:     s.transport.as_ref().map(|t| t.patient.clone()),
                expected_arrival: s.transport.as_ref().map(|t| t.expected_arrival),
                watching: s.watching,
                remaining_leave_minutes: s.remaining_leave_minutes(now),
            })
            .collect();

        let mut patients: Vec<PatientView> = state
            .patients
            .values()
            .map(|p| PatientView {
                id:       p.id.clone(),
                name:     p.full_name(),
                severity: p.severity,
                age:      p.age,
                symptoms: p.symptoms.clone(),
                status:   p.status,
                room:        p.room,
                target_unit: p.target_unit,
                arrived_at:   p.arrived_at,
                wait_minutes: p.wait_minutes(now),
            })
            .collect();
        patients.sort_by(|a, b| a.id.cmp(&b.id));

        Snapshot {
            current_minute:    now,
            current_unix_secs: state.clock.current_unix_secs(),
            rooms,
            consultation,
            units,
            staff,
            patients,
            consultation_queue: controller
                .consultation_queue()
                .iter()
                .map(|p| p.id.clone())
                .collect(),
            exit_transport_queue: controller
                .exit_transport_queue()
                .iter()
                .map(|p| p.id.clone())
                .collect(),
            alerts: controller.alerts().iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Pretty JSON for the dashboard/chatbot layers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
