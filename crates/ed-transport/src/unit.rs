//! The unit-transfer machine and the rescue path.

use ed_core::{FlowConfig, Minute, PatientId, RoomId, StaffId, StaffRole};
use ed_state::{ActiveTransport, EdState, PatientStatus, TransportDest};

use crate::{TransportError, TransportResult};

/// Dispatch an escort to transfer a post-consultation patient to their unit.
///
/// Preconditions, in order: the patient is `AwaitingExitTransport` with a
/// recorded target unit that has a free bed (in-flight inbound transfers
/// count as occupied — the capacity invariant holds during the 45-minute
/// corridor run, not just at arrival), the escort is a mobile role, the
/// escort may leave, and enough other mobile staff remain to satisfy
/// `unit_transport_reserve`.
///
/// Duration: `unit_transport_express_min` iff the patient is `Rouge` AND the
/// unit is flagged critical care; `unit_transport_standard_min` otherwise.
/// Dispatching an `Aide` stamps their `must_return_by` absence cap.
///
/// Returns the expected arrival minute.
pub fn start_to_unit(
    state: &mut EdState,
    config: &FlowConfig,
    patient_id: &PatientId,
    staff_id: StaffId,
) -> TransportResult<Minute> {
    let now = state.now();

    let patient = state
        .patient(patient_id)
        .ok_or_else(|| ed_patient::PatientError::UnknownPatient(patient_id.clone()))?;
    if patient.status != PatientStatus::AwaitingExitTransport {
        return Err(ed_patient::PatientError::InvalidTransition {
            from: patient.status,
            to:   PatientStatus::InTransitToUnit,
        }
        .into());
    }
    let unit_id = patient
        .target_unit
        .ok_or_else(|| TransportError::NoTargetUnit(patient_id.clone()))?;
    let severity = patient.severity;

    let unit = state.unit(unit_id).ok_or(TransportError::UnknownUnit(unit_id))?;
    let critical_care = unit.critical_care;
    if unit.free_beds() <= state.inbound_transports(unit_id) {
        return Err(TransportError::UnitFull(unit_id));
    }

    let staff = state
        .staff_member(staff_id)
        .ok_or(ed_staff::StaffError::UnknownStaff(staff_id))?;
    if !staff.role.is_mobile() {
        return Err(ed_staff::StaffError::RoleNotEligible {
            staff: staff_id,
            role:  staff.role,
        }
        .into());
    }
    if !staff.may_leave(now, config) {
        return Err(ed_staff::StaffError::CannotLeave(staff_id).into());
    }
    let is_aide = staff.role == StaffRole::Aide;

    // Staffing quorum: how many other mobile members could still be
    // dispatched once this one leaves.
    if config.unit_transport_reserve > 0 {
        let remaining = state
            .staff
            .iter()
            .filter(|s| s.id != staff_id && s.role.is_mobile() && s.may_leave(now, config))
            .count();
        if remaining < config.unit_transport_reserve {
            return Err(TransportError::ReserveDepleted {
                available: remaining,
                required:  config.unit_transport_reserve,
            });
        }
    }

    let minutes = if severity.is_critical() && critical_care {
        config.unit_transport_express_min
    } else {
        config.unit_transport_standard_min
    };

    ed_patient::detach_from_room(state, patient_id);
    ed_patient::transition_status(state, patient_id, PatientStatus::InTransitToUnit)?;

    let eta = now + minutes;
    // The escort's room, if any, re-enters the auto-cover pool.
    ed_staff::withdraw_supervision(state, staff_id);
    if let Some(member) = state.staff_member_mut(staff_id) {
        member.available = false;
        member.transport = Some(ActiveTransport {
            patient:          patient_id.clone(),
            destination:      TransportDest::Unit(unit_id),
            expected_arrival: eta,
        });
        if is_aide {
            member.must_return_by = Some(now + config.aide_absence_cap_min);
        }
    }

    tracing::info!(
        patient = %patient_id,
        staff = %staff_id,
        unit = %unit_id,
        duration_min = minutes,
        "unit transfer started"
    );
    Ok(eta)
}

/// Complete a unit transfer: the patient is admitted into their unit.
///
/// Fails (and changes nothing) unless the patient is `InTransitToUnit`.
/// Admission into the unit is terminal for this engine: the patient becomes
/// `Discharged` and the escort is released.
pub fn finalize_to_unit(state: &mut EdState, patient_id: &PatientId) -> TransportResult<()> {
    let patient = state
        .patient(patient_id)
        .ok_or_else(|| ed_patient::PatientError::UnknownPatient(patient_id.clone()))?;
    if patient.status != PatientStatus::InTransitToUnit {
        return Err(TransportError::NotInTransit(patient_id.clone()));
    }
    let unit_id = patient
        .target_unit
        .ok_or_else(|| TransportError::NoTargetUnit(patient_id.clone()))?;
    if state.unit(unit_id).is_none() {
        return Err(TransportError::UnknownUnit(unit_id));
    }

    if let Some(escort) = state.transporter_of(patient_id) {
        ed_staff::release(state, escort);
    }
    if let Some(unit) = state.unit_mut(unit_id) {
        unit.patients.push(patient_id.clone());
    }
    ed_patient::transition_status(state, patient_id, PatientStatus::Discharged)?;

    tracing::info!(patient = %patient_id, unit = %unit_id, "patient admitted into unit");
    Ok(())
}

/// Rescue path: return a patient awaiting an exit transport to a waiting
/// room instead.
///
/// Used when the target unit is saturated or no transporter can dispatch —
/// it guarantees the patient always has a legal next state.  Room selection
/// follows the intake rule (most free seats, first declared wins).  The
/// escort only needs to exist and not be mid-transport: the full dwell check
/// is waived precisely because this path must stay open when nobody is
/// dispatch-eligible.  The short move is modeled by stamping the escort's
/// `busy_since`, which dwell-locks them for `min_dwell_min`.
///
/// Returns the room the patient was seated in.
pub fn return_to_waiting_room(
    state: &mut EdState,
    patient_id: &PatientId,
    staff_id: StaffId,
    room: Option<RoomId>,
) -> TransportResult<RoomId> {
    let now = state.now();

    let patient = state
        .patient(patient_id)
        .ok_or_else(|| ed_patient::PatientError::UnknownPatient(patient_id.clone()))?;
    if patient.status != PatientStatus::AwaitingExitTransport {
        return Err(ed_patient::PatientError::InvalidTransition {
            from: patient.status,
            to:   PatientStatus::InWaitingRoom,
        }
        .into());
    }
    let staff = state
        .staff_member(staff_id)
        .ok_or(ed_staff::StaffError::UnknownStaff(staff_id))?;
    if staff.in_transit() {
        return Err(ed_staff::StaffError::CannotLeave(staff_id).into());
    }

    // Validate the destination before mutating anything.
    let room_id = match room {
        Some(id) => {
            let room = state
                .room(id)
                .ok_or(ed_patient::PatientError::UnknownRoom(id))?;
            if room.is_full() {
                return Err(ed_patient::PatientError::RoomFull(id).into());
            }
            id
        }
        None => ed_patient::pick_waiting_room(state)?,
    };

    ed_patient::transition_status(state, patient_id, PatientStatus::InWaitingRoom)?;
    ed_patient::seat_in_room(state, patient_id, room_id)?;
    // The target unit stays recorded so the transfer can be retried later.

    if let Some(member) = state.staff_member_mut(staff_id) {
        member.busy_since = Some(now);
    }

    tracing::info!(patient = %patient_id, room = %room_id, "returned to waiting room");
    Ok(room_id)
}
