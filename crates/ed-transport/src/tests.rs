//! Unit tests for the transport service.

use ed_core::{Disposition, FlowConfig, Minute, PatientId, RoomId, Severity, StaffId, UnitId};
use ed_state::{EdState, PatientStatus, standard_department};

use crate::{TransportError, consult, unit};

/// Standard roster positions: 0 doctor, 1 triage nurse, 2-3 mobile nurses,
/// 4-5 aides.  Standard units: 0 Critical Care (critical), 1 Cardiology.
const NURSE: StaffId = StaffId(2);
const AIDE: StaffId = StaffId(4);
const CRITICAL_CARE: UnitId = UnitId(0);
const CARDIOLOGY: UnitId = UnitId(1);

fn dept() -> (EdState, FlowConfig) {
    (standard_department(), FlowConfig::default())
}

/// Admit + seat a patient, ready for a consultation transport.
fn waiting_patient(state: &mut EdState, id: &str, severity: Severity) -> PatientId {
    let patient = ed_state::Patient::new(id, "Test", "Patient", severity, "test", 50);
    ed_patient::admit(state, patient).unwrap();
    let pid = PatientId::new(id);
    ed_patient::assign_to_waiting_room(state, &pid, None).unwrap();
    pid
}

/// Walk a patient all the way to `AwaitingExitTransport` with `target`.
fn post_consultation(
    state: &mut EdState,
    config: &FlowConfig,
    id: &str,
    severity: Severity,
    target: UnitId,
) -> PatientId {
    let pid = waiting_patient(state, id, severity);
    consult::start_to_consultation(state, config, &pid, NURSE).unwrap();
    consult::finalize_to_consultation(state, &pid).unwrap(); // releases the escort
    consult::end_consultation(state, &pid, Disposition::Unit(target)).unwrap();
    pid
}

#[cfg(test)]
mod consultation_transport {
    use super::*;

    #[test]
    fn start_reserves_slot_and_marks_escort() {
        let (mut state, config) = dept();
        let pid = waiting_patient(&mut state, "P1", Severity::Rouge);

        let eta = consult::start_to_consultation(&mut state, &config, &pid, AIDE).unwrap();

        assert_eq!(eta, Minute(5));
        let p = state.patient(&pid).unwrap();
        assert_eq!(p.status, PatientStatus::InTransitToConsultation);
        assert_eq!(p.room, None);
        assert_eq!(state.consultation.patient, Some(pid.clone()));
        assert_eq!(state.consultation.started_at, None); // not arrived yet

        let escort = state.staff_member(AIDE).unwrap();
        assert!(escort.in_transit());
        assert!(!escort.available);
        assert!(state.rooms.iter().all(|r| r.patients.is_empty()));
    }

    #[test]
    fn occupied_slot_blocks_second_transport() {
        let (mut state, config) = dept();
        let p1 = waiting_patient(&mut state, "P1", Severity::Jaune);
        let p2 = waiting_patient(&mut state, "P2", Severity::Jaune);

        consult::start_to_consultation(&mut state, &config, &p1, NURSE).unwrap();
        let err = consult::start_to_consultation(&mut state, &config, &p2, AIDE).unwrap_err();
        assert_eq!(err, TransportError::ConsultationOccupied);
    }

    #[test]
    fn escort_must_be_able_to_leave() {
        let (mut state, config) = dept();
        let pid = waiting_patient(&mut state, "P1", Severity::Jaune);
        state.staff_member_mut(NURSE).unwrap().busy_since = Some(state.now());

        let err = consult::start_to_consultation(&mut state, &config, &pid, NURSE).unwrap_err();
        assert!(matches!(err, TransportError::Staff(_)));
    }

    #[test]
    fn transporting_supervisor_drops_the_room() {
        let (mut state, config) = dept();
        let pid = waiting_patient(&mut state, "P1", Severity::Jaune);
        let room = state.patient(&pid).unwrap().room.unwrap();
        ed_staff::assign_supervision(&mut state, &config, NURSE, room).unwrap();
        state.clock.advance(config.min_dwell_min);

        consult::start_to_consultation(&mut state, &config, &pid, NURSE).unwrap();

        assert_eq!(state.room(room).unwrap().supervisor, None);
        assert_eq!(state.staff_member(NURSE).unwrap().watching, None);
    }

    #[test]
    fn finalize_starts_the_consultation() {
        let (mut state, config) = dept();
        let pid = waiting_patient(&mut state, "P1", Severity::Jaune);
        consult::start_to_consultation(&mut state, &config, &pid, AIDE).unwrap();
        state.clock.advance(5);

        consult::finalize_to_consultation(&mut state, &pid).unwrap();

        let p = state.patient(&pid).unwrap();
        assert_eq!(p.status, PatientStatus::InConsultation);
        assert_eq!(p.consultation_started_at, Some(Minute(5)));
        assert_eq!(state.consultation.started_at, Some(Minute(5)));
        let escort = state.staff_member(AIDE).unwrap();
        assert!(!escort.in_transit());
        assert!(escort.available);
    }

    /// Finalize idempotence: wrong status is an error and a no-op.
    #[test]
    fn finalize_twice_is_an_error_without_mutation() {
        let (mut state, config) = dept();
        let pid = waiting_patient(&mut state, "P1", Severity::Jaune);
        consult::start_to_consultation(&mut state, &config, &pid, AIDE).unwrap();
        consult::finalize_to_consultation(&mut state, &pid).unwrap();

        let before = state.patient(&pid).unwrap().clone();
        let err = consult::finalize_to_consultation(&mut state, &pid).unwrap_err();
        assert_eq!(err, TransportError::NotInTransit(pid.clone()));
        assert_eq!(state.patient(&pid).unwrap().status, before.status);
    }
}

#[cfg(test)]
mod consultation_end {
    use super::*;

    fn in_consultation(state: &mut EdState, config: &FlowConfig, id: &str, severity: Severity) -> PatientId {
        let pid = waiting_patient(state, id, severity);
        consult::start_to_consultation(state, config, &pid, NURSE).unwrap();
        consult::finalize_to_consultation(state, &pid).unwrap();
        pid
    }

    #[test]
    fn home_discharges_immediately() {
        let (mut state, config) = dept();
        let pid = in_consultation(&mut state, &config, "P1", Severity::Vert);
        state.clock.advance(12);

        consult::end_consultation(&mut state, &pid, Disposition::Home).unwrap();

        let p = state.patient(&pid).unwrap();
        assert_eq!(p.status, PatientStatus::Discharged);
        assert_eq!(p.consultation_ended_at, Some(state.now()));
        assert!(state.consultation.is_free());
    }

    #[test]
    fn unit_destination_parks_for_exit_transport() {
        let (mut state, config) = dept();
        let pid = in_consultation(&mut state, &config, "P1", Severity::Jaune);

        consult::end_consultation(&mut state, &pid, Disposition::Unit(CARDIOLOGY)).unwrap();

        let p = state.patient(&pid).unwrap();
        assert_eq!(p.status, PatientStatus::AwaitingExitTransport);
        assert_eq!(p.target_unit, Some(CARDIOLOGY));
        assert!(state.consultation.is_free());
    }

    #[test]
    fn rouge_home_is_a_policy_violation() {
        let (mut state, config) = dept();
        let pid = in_consultation(&mut state, &config, "P1", Severity::Rouge);

        let err = consult::end_consultation(&mut state, &pid, Disposition::Home).unwrap_err();
        assert_eq!(err, TransportError::CriticalSentHome(pid.clone()));
        // Nothing moved: patient still in consultation, slot still held.
        assert_eq!(state.patient(&pid).unwrap().status, PatientStatus::InConsultation);
        assert_eq!(state.consultation.patient, Some(pid));
    }

    #[test]
    fn wrong_patient_rejected() {
        let (mut state, config) = dept();
        let pid = in_consultation(&mut state, &config, "P1", Severity::Vert);
        let other = waiting_patient(&mut state, "P2", Severity::Vert);

        let err = consult::end_consultation(&mut state, &other, Disposition::Home).unwrap_err();
        assert_eq!(err, TransportError::NotInConsultation(other));
        assert_eq!(state.consultation.patient, Some(pid));
    }

    #[test]
    fn unknown_unit_rejected() {
        let (mut state, config) = dept();
        let pid = in_consultation(&mut state, &config, "P1", Severity::Vert);

        let err =
            consult::end_consultation(&mut state, &pid, Disposition::Unit(UnitId(99))).unwrap_err();
        assert_eq!(err, TransportError::UnknownUnit(UnitId(99)));
        assert_eq!(state.patient(&pid).unwrap().status, PatientStatus::InConsultation);
    }
}

#[cfg(test)]
mod unit_transfer {
    use super::*;

    #[test]
    fn rouge_to_critical_care_takes_the_expressway() {
        let (mut state, config) = dept();
        let pid = post_consultation(&mut state, &config, "P1", Severity::Rouge, CRITICAL_CARE);

        let start = state.now();
        let eta = unit::start_to_unit(&mut state, &config, &pid, AIDE).unwrap();
        assert_eq!(eta, start + config.unit_transport_express_min);
    }

    #[test]
    fn everyone_else_takes_the_standard_transfer() {
        let (mut state, config) = dept();
        let pid = post_consultation(&mut state, &config, "P1", Severity::Rouge, CARDIOLOGY);

        let start = state.now();
        // ROUGE to a non-critical unit is still 45 minutes.
        let eta = unit::start_to_unit(&mut state, &config, &pid, AIDE).unwrap();
        assert_eq!(eta, start + config.unit_transport_standard_min);
    }

    #[test]
    fn aide_dispatch_stamps_absence_cap() {
        let (mut state, config) = dept();
        let pid = post_consultation(&mut state, &config, "P1", Severity::Jaune, CARDIOLOGY);

        unit::start_to_unit(&mut state, &config, &pid, AIDE).unwrap();
        let aide = state.staff_member(AIDE).unwrap();
        assert_eq!(aide.must_return_by, Some(state.now() + config.aide_absence_cap_min));

        let (mut state, config) = dept();
        let pid = post_consultation(&mut state, &config, "P2", Severity::Jaune, CARDIOLOGY);
        state.clock.advance(config.min_dwell_min);
        unit::start_to_unit(&mut state, &config, &pid, NURSE).unwrap();
        assert_eq!(state.staff_member(NURSE).unwrap().must_return_by, None);
    }

    #[test]
    fn finalize_admits_and_discharges() {
        let (mut state, config) = dept();
        let pid = post_consultation(&mut state, &config, "P1", Severity::Jaune, CARDIOLOGY);
        unit::start_to_unit(&mut state, &config, &pid, AIDE).unwrap();
        state.clock.advance(45);

        unit::finalize_to_unit(&mut state, &pid).unwrap();

        assert_eq!(state.patient(&pid).unwrap().status, PatientStatus::Discharged);
        assert_eq!(state.unit(CARDIOLOGY).unwrap().patients, vec![pid]);
        let aide = state.staff_member(AIDE).unwrap();
        assert!(aide.available);
        assert!(!aide.in_transit());
        assert_eq!(aide.must_return_by, None);
    }

    #[test]
    fn finalize_without_transit_is_a_no_op_error() {
        let (mut state, config) = dept();
        let pid = post_consultation(&mut state, &config, "P1", Severity::Jaune, CARDIOLOGY);

        let err = unit::finalize_to_unit(&mut state, &pid).unwrap_err();
        assert_eq!(err, TransportError::NotInTransit(pid.clone()));
        assert_eq!(
            state.patient(&pid).unwrap().status,
            PatientStatus::AwaitingExitTransport
        );
        assert!(state.unit(CARDIOLOGY).unwrap().patients.is_empty());
    }

    #[test]
    fn full_unit_blocks_dispatch() {
        let (mut state, config) = dept();
        // Saturate Critical Care (capacity 5) with already-admitted patients.
        for i in 0..5 {
            let occupant = PatientId::new(format!("occupant{i}"));
            state.unit_mut(CRITICAL_CARE).unwrap().patients.push(occupant);
        }
        let pid = post_consultation(&mut state, &config, "P1", Severity::Rouge, CRITICAL_CARE);

        let err = unit::start_to_unit(&mut state, &config, &pid, AIDE).unwrap_err();
        assert_eq!(err, TransportError::UnitFull(CRITICAL_CARE));
    }

    /// Capacity holds during transfers: an in-flight inbound transport
    /// occupies the last bed.
    #[test]
    fn inbound_transfer_counts_against_capacity() {
        let (mut state, config) = dept();
        // Fill Cardiology (capacity 10) to 9 admitted: one bed left.
        for i in 0..9 {
            let occupant = PatientId::new(format!("occupant{i}"));
            state.unit_mut(CARDIOLOGY).unwrap().patients.push(occupant);
        }

        let p1 = post_consultation(&mut state, &config, "P1", Severity::Jaune, CARDIOLOGY);
        let p2 = post_consultation(&mut state, &config, "P2", Severity::Jaune, CARDIOLOGY);

        unit::start_to_unit(&mut state, &config, &p1, AIDE).unwrap();
        let err = unit::start_to_unit(&mut state, &config, &p2, StaffId(5)).unwrap_err();
        assert_eq!(err, TransportError::UnitFull(CARDIOLOGY));
    }

    #[test]
    fn reserve_quorum_blocks_the_last_dispatcher() {
        let (mut state, _) = dept();
        let config = FlowConfig {
            unit_transport_reserve: 3,
            ..FlowConfig::default()
        };
        let pid = post_consultation(&mut state, &config, "P1", Severity::Jaune, CARDIOLOGY);
        // Dwell-lock one nurse so only 3 mobile members are dispatchable.
        state.staff_member_mut(StaffId(3)).unwrap().busy_since = Some(state.now());

        let err = unit::start_to_unit(&mut state, &config, &pid, AIDE).unwrap_err();
        assert_eq!(err, TransportError::ReserveDepleted { available: 2, required: 3 });

        // With the default quorum of 0 the same dispatch sails through.
        let lenient = FlowConfig::default();
        unit::start_to_unit(&mut state, &lenient, &pid, AIDE).unwrap();
    }
}

#[cfg(test)]
mod rescue_path {
    use super::*;

    #[test]
    fn returns_to_a_waiting_room() {
        let (mut state, config) = dept();
        let pid = post_consultation(&mut state, &config, "P1", Severity::Jaune, CARDIOLOGY);

        let room = unit::return_to_waiting_room(&mut state, &pid, AIDE, None).unwrap();

        let p = state.patient(&pid).unwrap();
        assert_eq!(p.status, PatientStatus::InWaitingRoom);
        assert_eq!(p.room, Some(room));
        // The target stays recorded so the transfer can be retried.
        assert_eq!(p.target_unit, Some(CARDIOLOGY));
        assert!(state.room(room).unwrap().patients.contains(&pid));
        // The escort is dwell-locked for the short move.
        assert_eq!(state.staff_member(AIDE).unwrap().busy_since, Some(state.now()));
    }

    #[test]
    fn only_from_awaiting_exit_transport() {
        let (mut state, _config) = dept();
        let pid = waiting_patient(&mut state, "P1", Severity::Jaune);

        let err = unit::return_to_waiting_room(&mut state, &pid, AIDE, None).unwrap_err();
        assert!(matches!(
            err,
            TransportError::Patient(ed_patient::PatientError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn explicit_room_is_honored() {
        let (mut state, config) = dept();
        let pid = post_consultation(&mut state, &config, "P1", Severity::Jaune, CARDIOLOGY);

        let room = unit::return_to_waiting_room(&mut state, &pid, AIDE, Some(RoomId(2))).unwrap();
        assert_eq!(room, RoomId(2));
    }

    /// Scenario C shape: saturated unit → dispatch fails → rescue succeeds.
    #[test]
    fn rescue_after_saturated_unit() {
        let (mut state, config) = dept();
        for i in 0..5 {
            let occupant = PatientId::new(format!("occupant{i}"));
            state.unit_mut(CRITICAL_CARE).unwrap().patients.push(occupant);
        }
        let pid = post_consultation(&mut state, &config, "P1", Severity::Rouge, CRITICAL_CARE);

        let err = unit::start_to_unit(&mut state, &config, &pid, AIDE).unwrap_err();
        assert_eq!(err, TransportError::UnitFull(CRITICAL_CARE));

        unit::return_to_waiting_room(&mut state, &pid, AIDE, None).unwrap();
        assert_eq!(state.patient(&pid).unwrap().status, PatientStatus::InWaitingRoom);
    }
}
