//! The `Controller` facade and its tick loop.

use ed_core::{
    Disposition, FlowConfig, FlowEvent, Minute, PatientId, RoomId, StaffId, StaffRole,
};
use ed_state::{EdState, Patient, PatientStatus, TransportDest, standard_department};

use crate::{Alert, ControlResult, Snapshot};

// ── Events and tick report ────────────────────────────────────────────────────

/// One retained event-log entry: what happened and when.
#[derive(Clone, Debug, serde::Serialize)]
pub struct LoggedEvent {
    pub at:    Minute,
    pub event: FlowEvent,
}

/// What one `tick` call did.
#[derive(Clone, Debug)]
pub struct TickReport {
    /// The clock after advancing.
    pub now: Minute,
    /// Automatic progressions, in the order they were applied.
    pub events: Vec<FlowEvent>,
    /// Active alerts as of `now`.
    pub alerts: Vec<Alert>,
}

// ── Controller ────────────────────────────────────────────────────────────────

/// The sole public facade over the department state.
///
/// Owns the aggregate exclusively; every mutating operation takes `&mut self`
/// so a single writer is enforced by the borrow checker within one process.
/// Operations mirror the three services 1:1, append to the retained event
/// log, and never swallow a service error.
pub struct Controller {
    pub(crate) state:  EdState,
    pub(crate) config: FlowConfig,
    pub(crate) events: Vec<LoggedEvent>,
}

impl Controller {
    pub fn new(state: EdState, config: FlowConfig) -> Self {
        Self {
            state,
            config,
            events: Vec::new(),
        }
    }

    /// The standard department layout with default tunables.
    pub fn standard() -> Self {
        Self::new(standard_department(), FlowConfig::default())
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> &EdState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    #[inline]
    pub fn now(&self) -> Minute {
        self.state.now()
    }

    /// The retained event log, oldest first (polled by the dashboard).
    pub fn event_log(&self) -> &[LoggedEvent] {
        &self.events
    }

    fn log(&mut self, event: FlowEvent) {
        self.events.push(LoggedEvent {
            at: self.state.now(),
            event,
        });
    }

    // ── Patient operations ────────────────────────────────────────────────

    /// Admit a new patient at triage (see `ed_patient::admit`).
    pub fn admit_patient(&mut self, patient: Patient) -> ControlResult<()> {
        let id = patient.id.clone();
        let severity = patient.severity;
        ed_patient::admit(&mut self.state, patient)?;
        self.log(FlowEvent::PatientAdmitted { patient: id, severity });
        Ok(())
    }

    /// Seat a triaged patient in a waiting room; `None` auto-selects.
    pub fn assign_waiting_room(
        &mut self,
        patient: &PatientId,
        room: Option<RoomId>,
    ) -> ControlResult<RoomId> {
        let room_id = ed_patient::assign_to_waiting_room(&mut self.state, patient, room)?;
        self.log(FlowEvent::RoomAssigned {
            patient: patient.clone(),
            room:    room_id,
        });
        Ok(room_id)
    }

    /// Whole minutes since the patient arrived.
    pub fn wait_minutes(&self, patient: &PatientId) -> ControlResult<u64> {
        Ok(ed_patient::wait_minutes(&self.state, patient)?)
    }

    /// Administrative discharge override.
    pub fn discharge_patient(&mut self, patient: &PatientId) -> ControlResult<()> {
        ed_patient::discharge(&mut self.state, patient)?;
        self.log(FlowEvent::Discharged {
            patient: patient.clone(),
        });
        Ok(())
    }

    // ── Staff operations ──────────────────────────────────────────────────

    /// Every member of `role` the may-leave predicate would let us dispatch.
    pub fn available_staff(&self, role: StaffRole) -> Vec<StaffId> {
        ed_staff::find_available(&self.state, &self.config, role, true)
    }

    /// Put a staff member in charge of a waiting room.
    pub fn assign_supervision(&mut self, staff: StaffId, room: RoomId) -> ControlResult<()> {
        ed_staff::assign_supervision(&mut self.state, &self.config, staff, room)?;
        self.log(FlowEvent::SupervisionAssigned {
            staff,
            room,
            auto: false,
        });
        Ok(())
    }

    /// Best-effort sweep covering occupied, unsupervised rooms.
    pub fn auto_cover(&mut self) -> Vec<FlowEvent> {
        let events = ed_staff::auto_cover_unsupervised_rooms(&mut self.state, &self.config);
        for event in &events {
            self.events.push(LoggedEvent {
                at:    self.state.now(),
                event: event.clone(),
            });
        }
        events
    }

    // ── Transport operations ──────────────────────────────────────────────

    /// Dispatch an escort to bring a waiting patient to consultation.
    pub fn start_consultation_transport(
        &mut self,
        patient: &PatientId,
        staff: StaffId,
    ) -> ControlResult<Minute> {
        let eta =
            ed_transport::start_to_consultation(&mut self.state, &self.config, patient, staff)?;
        self.log(FlowEvent::ConsultTransportStarted {
            patient: patient.clone(),
            staff,
            eta,
        });
        Ok(eta)
    }

    /// Manually finalize a consultation transport (normally `tick` does it).
    pub fn finalize_consultation_transport(&mut self, patient: &PatientId) -> ControlResult<()> {
        ed_transport::finalize_to_consultation(&mut self.state, patient)?;
        self.log(FlowEvent::ConsultationStarted {
            patient: patient.clone(),
        });
        Ok(())
    }

    /// End the consultation with the physician's orientation decision.
    pub fn end_consultation(
        &mut self,
        patient: &PatientId,
        disposition: Disposition,
    ) -> ControlResult<()> {
        ed_transport::end_consultation(&mut self.state, patient, disposition)?;
        self.log(FlowEvent::ConsultationEnded {
            patient: patient.clone(),
            disposition,
        });
        if disposition.is_home() {
            self.log(FlowEvent::Discharged {
                patient: patient.clone(),
            });
        }
        Ok(())
    }

    /// Dispatch an escort to transfer a patient to their target unit.
    pub fn start_unit_transport(
        &mut self,
        patient: &PatientId,
        staff: StaffId,
    ) -> ControlResult<Minute> {
        let unit = self.state.patient(patient).and_then(|p| p.target_unit);
        let eta = ed_transport::start_to_unit(&mut self.state, &self.config, patient, staff)?;
        if let Some(unit) = unit {
            self.log(FlowEvent::UnitTransportStarted {
                patient: patient.clone(),
                staff,
                unit,
                eta,
            });
        }
        Ok(eta)
    }

    /// Manually finalize a unit transfer (normally `tick` does it).
    pub fn finalize_unit_transport(&mut self, patient: &PatientId) -> ControlResult<()> {
        let unit = self.state.patient(patient).and_then(|p| p.target_unit);
        ed_transport::finalize_to_unit(&mut self.state, patient)?;
        if let Some(unit) = unit {
            self.log(FlowEvent::UnitAdmission {
                patient: patient.clone(),
                unit,
            });
        }
        Ok(())
    }

    /// Rescue path: seat a patient awaiting an exit transport back in a
    /// waiting room.
    pub fn return_to_waiting_room(
        &mut self,
        patient: &PatientId,
        staff: StaffId,
        room: Option<RoomId>,
    ) -> ControlResult<RoomId> {
        let room_id =
            ed_transport::return_to_waiting_room(&mut self.state, patient, staff, room)?;
        self.log(FlowEvent::ReturnedToWaitingRoom {
            patient: patient.clone(),
            room:    room_id,
        });
        Ok(room_id)
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the simulated clock and reconcile everything that came due.
    ///
    /// The only place automatic state progression happens.  Due transports
    /// are finalized in staff-roster order — deterministic, not
    /// severity-ordered, which is fine because finalization never reorders
    /// the priority queues (those are recomputed from status on every
    /// query).  A finalization failure becomes a logged event, never an
    /// abort: the remaining due transports still complete.
    pub fn tick(&mut self, minutes: u64) -> TickReport {
        self.state.clock.advance(minutes);
        let now = self.state.now();
        tracing::debug!(%now, advanced_min = minutes, "tick");

        let mut events = Vec::new();

        // Collect due transports first; finalizing mutates the roster.
        let due: Vec<(PatientId, TransportDest)> = self
            .state
            .staff
            .iter()
            .filter_map(|s| s.transport.as_ref())
            .filter(|t| t.expected_arrival <= now)
            .map(|t| (t.patient.clone(), t.destination))
            .collect();

        for (patient, destination) in due {
            let outcome = match destination {
                TransportDest::Consultation => {
                    ed_transport::finalize_to_consultation(&mut self.state, &patient)
                        .map(|()| FlowEvent::ConsultationStarted {
                            patient: patient.clone(),
                        })
                }
                TransportDest::Unit(unit) => {
                    ed_transport::finalize_to_unit(&mut self.state, &patient)
                        .map(|()| FlowEvent::UnitAdmission {
                            patient: patient.clone(),
                            unit,
                        })
                }
            };
            let event = match outcome {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(patient = %patient, error = %e, "finalization failed");
                    FlowEvent::FinalizeFailed {
                        patient,
                        reason: e.to_string(),
                    }
                }
            };
            self.log(event.clone());
            events.push(event);
        }

        // Re-cover any room whose supervisor left on a transport.
        events.extend(self.auto_cover());

        TickReport {
            now,
            events,
            alerts: self.alerts(),
        }
    }

    // ── Alerts and queues ─────────────────────────────────────────────────

    /// Scan for supervision lapses and long waits.
    pub fn alerts(&self) -> Vec<Alert> {
        let now = self.state.now();
        let mut alerts = Vec::new();

        for room in &self.state.rooms {
            let minutes = room.minutes_unsupervised(now);
            if !room.patients.is_empty() && minutes > self.config.supervision_lapse_min {
                alerts.push(Alert::SupervisionLapse {
                    room: room.id,
                    minutes,
                });
            }
        }

        let mut waiting: Vec<&Patient> = self
            .state
            .patients
            .values()
            .filter(|p| p.status == PatientStatus::InWaitingRoom)
            .collect();
        waiting.sort_by(|a, b| (a.arrived_at, &a.id).cmp(&(b.arrived_at, &b.id)));
        for patient in waiting {
            let minutes = patient.wait_minutes(now);
            if minutes > self.config.long_wait_min {
                alerts.push(Alert::LongWait {
                    patient: patient.id.clone(),
                    minutes,
                });
            }
        }

        alerts
    }

    /// Patients in `InWaitingRoom`, highest priority first.
    pub fn consultation_queue(&self) -> Vec<&Patient> {
        self.queue_of(PatientStatus::InWaitingRoom)
    }

    /// Patients in `AwaitingExitTransport`, highest priority first.
    pub fn exit_transport_queue(&self) -> Vec<&Patient> {
        self.queue_of(PatientStatus::AwaitingExitTransport)
    }

    fn queue_of(&self, status: PatientStatus) -> Vec<&Patient> {
        let now = self.state.now();
        let long_wait = self.config.long_wait_min;
        let mut queue: Vec<&Patient> = self
            .state
            .patients
            .values()
            .filter(|p| p.status == status)
            .collect();
        // The id tail keeps the order total when tier and arrival tie.
        queue.sort_by(|a, b| {
            let ka = a.queue_priority(now, long_wait);
            let kb = b.queue_priority(now, long_wait);
            (ka, &a.id).cmp(&(kb, &b.id))
        });
        queue
    }

    /// Build the serializable view of everything (see [`Snapshot`]).
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
