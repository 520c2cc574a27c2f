//! Patient operations.

use ed_core::{PatientId, RoomId};
use ed_state::{EdState, Patient, PatientStatus};

use crate::{PatientError, PatientResult};

/// Admit a new patient at triage.
///
/// Fails if the id is already known.  Overwrites `arrived_at` with the
/// current simulated clock and forces status `AwaitingTriage` — whatever the
/// intake layer put in those fields is a placeholder.
pub fn admit(state: &mut EdState, mut patient: Patient) -> PatientResult<()> {
    if state.patients.contains_key(&patient.id) {
        return Err(PatientError::DuplicateId(patient.id));
    }

    patient.arrived_at = state.now();
    patient.status = PatientStatus::AwaitingTriage;

    tracing::info!(
        patient = %patient.id,
        severity = %patient.severity,
        age = patient.age,
        "patient admitted at triage"
    );
    state.patients.insert(patient.id.clone(), patient);
    Ok(())
}

/// Seat a freshly triaged patient in a waiting room.
///
/// With `room = None`, picks the non-full room with the most free seats
/// (ties broken by declaration order).  An explicit room must exist and have
/// a free seat.  Only legal from `AwaitingTriage` — the rescue path re-seats
/// patients through the transport service's return operation instead.
pub fn assign_to_waiting_room(
    state: &mut EdState,
    patient_id: &PatientId,
    room: Option<RoomId>,
) -> PatientResult<RoomId> {
    let patient = state
        .patient(patient_id)
        .ok_or_else(|| PatientError::UnknownPatient(patient_id.clone()))?;
    if patient.status != PatientStatus::AwaitingTriage {
        return Err(PatientError::InvalidTransition {
            from: patient.status,
            to:   PatientStatus::InWaitingRoom,
        });
    }

    // Validate the target before mutating anything.
    let room_id = match room {
        Some(id) => {
            let room = state.room(id).ok_or(PatientError::UnknownRoom(id))?;
            if room.is_full() {
                return Err(PatientError::RoomFull(id));
            }
            id
        }
        None => pick_waiting_room(state)?,
    };

    transition_status(state, patient_id, PatientStatus::InWaitingRoom)?;
    seat_in_room(state, patient_id, room_id)?;
    Ok(room_id)
}

/// The room auto-selection rule: the non-full room with the most free seats,
/// first declared wins ties.
pub fn pick_waiting_room(state: &EdState) -> PatientResult<RoomId> {
    let mut best: Option<(usize, RoomId)> = None;
    for room in &state.rooms {
        if room.is_full() {
            continue;
        }
        let free = room.free_slots();
        // Strict `>` keeps the earliest-declared room on ties.
        if best.is_none_or(|(best_free, _)| free > best_free) {
            best = Some((free, room.id));
        }
    }
    best.map(|(_, id)| id).ok_or(PatientError::AllRoomsFull)
}

/// Append `patient_id` to a room's seating and point the patient back at it.
///
/// Building block shared by [`assign_to_waiting_room`] and the transport
/// service's rescue path; does not touch `status`.
pub fn seat_in_room(
    state: &mut EdState,
    patient_id: &PatientId,
    room_id: RoomId,
) -> PatientResult<RoomId> {
    {
        let room = state
            .room_mut(room_id)
            .ok_or(PatientError::UnknownRoom(room_id))?;
        if room.is_full() {
            return Err(PatientError::RoomFull(room_id));
        }
        room.patients.push(patient_id.clone());
    }
    if let Some(patient) = state.patient_mut(patient_id) {
        patient.room = Some(room_id);
    }

    let occupied = state.room(room_id).map(|r| r.patients.len()).unwrap_or(0);
    let capacity = state.room(room_id).map(|r| r.capacity).unwrap_or(0);
    tracing::info!(patient = %patient_id, room = %room_id, "seated ({occupied}/{capacity})");
    Ok(room_id)
}

/// Remove a patient from whatever waiting room holds them.
///
/// Quiet no-op when the patient is unknown or unseated — transports call
/// this unconditionally before moving someone.
pub fn detach_from_room(state: &mut EdState, patient_id: &PatientId) {
    let Some(room_id) = state.patient(patient_id).and_then(|p| p.room) else {
        return;
    };
    if let Some(room) = state.room_mut(room_id) {
        room.patients.retain(|id| id != patient_id);
    }
    if let Some(patient) = state.patient_mut(patient_id) {
        patient.room = None;
    }
    tracing::debug!(patient = %patient_id, room = %room_id, "left waiting room");
}

/// Move a patient along one edge of the state machine.
///
/// Rejects any `(current, target)` pair not in the transition table and
/// leaves the record untouched on failure.
pub fn transition_status(
    state: &mut EdState,
    patient_id: &PatientId,
    target: PatientStatus,
) -> PatientResult<()> {
    let patient = state
        .patient_mut(patient_id)
        .ok_or_else(|| PatientError::UnknownPatient(patient_id.clone()))?;

    let from = patient.status;
    if !from.can_transition(target) {
        return Err(PatientError::InvalidTransition { from, to: target });
    }
    patient.status = target;

    tracing::debug!(patient = %patient_id, %from, to = %target, "status transition");
    Ok(())
}

/// Whole minutes the patient has been in the department.
pub fn wait_minutes(state: &EdState, patient_id: &PatientId) -> PatientResult<u64> {
    let patient = state
        .patient(patient_id)
        .ok_or_else(|| PatientError::UnknownPatient(patient_id.clone()))?;
    Ok(patient.wait_minutes(state.now()))
}

/// Administrative override: force the terminal state from wherever the
/// patient currently is, bypassing the transition table.
///
/// Still keeps the books straight: the patient is pulled out of any waiting
/// room and out of the consultation slot, so capacity counts survive the
/// override.
pub fn discharge(state: &mut EdState, patient_id: &PatientId) -> PatientResult<()> {
    if state.patient(patient_id).is_none() {
        return Err(PatientError::UnknownPatient(patient_id.clone()));
    }

    detach_from_room(state, patient_id);
    if state.consultation.patient.as_ref() == Some(patient_id) {
        state.consultation.clear();
    }
    if let Some(patient) = state.patient_mut(patient_id) {
        patient.status = PatientStatus::Discharged;
    }

    tracing::info!(patient = %patient_id, "administratively discharged");
    Ok(())
}
