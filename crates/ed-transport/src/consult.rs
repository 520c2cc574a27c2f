//! The consultation-transport machine and consultation close-out.

use ed_core::{Disposition, FlowConfig, Minute, PatientId, Severity, StaffId};
use ed_state::{ActiveTransport, EdState, PatientStatus, TransportDest};

use crate::{TransportError, TransportResult};

/// Dispatch an escort to bring a waiting patient to the consultation slot.
///
/// Preconditions: the patient is `InWaitingRoom`, the slot is free, and the
/// escort may leave their post.  On success the patient leaves their room,
/// the slot is reserved (keeping a second transport from racing for it), and
/// the escort is marked in transit with arrival `now + consult_transport_min`.
///
/// Returns the expected arrival minute.
pub fn start_to_consultation(
    state: &mut EdState,
    config: &FlowConfig,
    patient_id: &PatientId,
    staff_id: StaffId,
) -> TransportResult<Minute> {
    let now = state.now();

    let patient = state
        .patient(patient_id)
        .ok_or_else(|| ed_patient::PatientError::UnknownPatient(patient_id.clone()))?;
    if patient.status != PatientStatus::InWaitingRoom {
        return Err(ed_patient::PatientError::InvalidTransition {
            from: patient.status,
            to:   PatientStatus::InTransitToConsultation,
        }
        .into());
    }
    if !state.consultation.is_free() {
        return Err(TransportError::ConsultationOccupied);
    }
    let staff = state
        .staff_member(staff_id)
        .ok_or(ed_staff::StaffError::UnknownStaff(staff_id))?;
    if !staff.may_leave(now, config) {
        return Err(ed_staff::StaffError::CannotLeave(staff_id).into());
    }

    ed_patient::detach_from_room(state, patient_id);
    ed_patient::transition_status(state, patient_id, PatientStatus::InTransitToConsultation)?;
    state.consultation.patient = Some(patient_id.clone());

    let eta = now + config.consult_transport_min;
    // An escort never supervises while in transit.
    ed_staff::withdraw_supervision(state, staff_id);
    if let Some(member) = state.staff_member_mut(staff_id) {
        member.available = false;
        member.transport = Some(ActiveTransport {
            patient:          patient_id.clone(),
            destination:      TransportDest::Consultation,
            expected_arrival: eta,
        });
    }

    tracing::info!(patient = %patient_id, staff = %staff_id, %eta, "transport to consultation started");
    Ok(eta)
}

/// Complete a consultation transport: the patient has arrived.
///
/// Fails (and changes nothing) unless the patient is
/// `InTransitToConsultation` — calling it twice, or for the wrong patient,
/// is a no-op error.  Releases the escort and stamps the consultation start.
pub fn finalize_to_consultation(
    state: &mut EdState,
    patient_id: &PatientId,
) -> TransportResult<()> {
    let patient = state
        .patient(patient_id)
        .ok_or_else(|| ed_patient::PatientError::UnknownPatient(patient_id.clone()))?;
    if patient.status != PatientStatus::InTransitToConsultation {
        return Err(TransportError::NotInTransit(patient_id.clone()));
    }

    if let Some(escort) = state.transporter_of(patient_id) {
        ed_staff::release(state, escort);
    }

    ed_patient::transition_status(state, patient_id, PatientStatus::InConsultation)?;
    let now = state.now();
    state.consultation.patient = Some(patient_id.clone());
    state.consultation.started_at = Some(now);

    if let Some(patient) = state.patient_mut(patient_id) {
        patient.consultation_started_at = Some(now);
    }

    tracing::info!(patient = %patient_id, "consultation started");
    Ok(())
}

/// The physician ends the consultation and orients the patient.
///
/// A `Rouge` patient may not be sent home — that is the one medical rule
/// this engine enforces rather than delegates.  `Home` discharges
/// immediately; a unit destination parks the patient in
/// `AwaitingExitTransport` with the target recorded.  The slot is freed
/// either way.
pub fn end_consultation(
    state: &mut EdState,
    patient_id: &PatientId,
    disposition: Disposition,
) -> TransportResult<()> {
    let patient = state
        .patient(patient_id)
        .ok_or_else(|| ed_patient::PatientError::UnknownPatient(patient_id.clone()))?;
    if patient.status != PatientStatus::InConsultation
        || state.consultation.patient.as_ref() != Some(patient_id)
    {
        return Err(TransportError::NotInConsultation(patient_id.clone()));
    }
    if patient.severity == Severity::Rouge && disposition.is_home() {
        return Err(TransportError::CriticalSentHome(patient_id.clone()));
    }
    if let Disposition::Unit(unit_id) = disposition
        && state.unit(unit_id).is_none()
    {
        return Err(TransportError::UnknownUnit(unit_id));
    }

    let now = state.now();
    state.consultation.clear();
    if let Some(patient) = state.patient_mut(patient_id) {
        patient.consultation_ended_at = Some(now);
        if let Disposition::Unit(unit_id) = disposition {
            patient.target_unit = Some(unit_id);
        }
    }
    let target = match disposition {
        Disposition::Home => PatientStatus::Discharged,
        Disposition::Unit(_) => PatientStatus::AwaitingExitTransport,
    };
    ed_patient::transition_status(state, patient_id, target)?;

    tracing::info!(patient = %patient_id, %disposition, "consultation ended");
    Ok(())
}
