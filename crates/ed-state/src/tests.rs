//! Unit tests for the entity model.

use ed_core::{FlowConfig, Minute, Severity, StaffRole};

use crate::{Patient, PatientStatus, standard_department};

fn patient(id: &str, severity: Severity, arrived_at: u64) -> Patient {
    let mut p = Patient::new(id, "Test", "Patient", severity, "test", 40);
    p.arrived_at = Minute(arrived_at);
    p
}

#[cfg(test)]
mod state_machine {
    use super::*;
    use PatientStatus::*;

    const ALL: [PatientStatus; 7] = [
        AwaitingTriage,
        InWaitingRoom,
        InTransitToConsultation,
        InConsultation,
        AwaitingExitTransport,
        InTransitToUnit,
        Discharged,
    ];

    #[test]
    fn allowed_edges() {
        assert!(AwaitingTriage.can_transition(InWaitingRoom));
        assert!(InWaitingRoom.can_transition(InTransitToConsultation));
        assert!(InTransitToConsultation.can_transition(InConsultation));
        assert!(InConsultation.can_transition(AwaitingExitTransport));
        assert!(InConsultation.can_transition(Discharged));
        assert!(AwaitingExitTransport.can_transition(InTransitToUnit));
        assert!(AwaitingExitTransport.can_transition(InWaitingRoom));
        assert!(InTransitToUnit.can_transition(Discharged));
    }

    /// Totality: every pair not in the edge list is rejected, including
    /// self-loops and anything out of `Discharged`.
    #[test]
    fn every_other_pair_is_rejected() {
        let allowed = [
            (AwaitingTriage, InWaitingRoom),
            (InWaitingRoom, InTransitToConsultation),
            (InTransitToConsultation, InConsultation),
            (InConsultation, AwaitingExitTransport),
            (InConsultation, Discharged),
            (AwaitingExitTransport, InTransitToUnit),
            (AwaitingExitTransport, InWaitingRoom),
            (InTransitToUnit, Discharged),
        ];
        for from in ALL {
            for to in ALL {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    from.can_transition(to),
                    expected,
                    "transition {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn discharged_is_terminal() {
        assert!(Discharged.is_terminal());
        for to in ALL {
            assert!(!Discharged.can_transition(to));
        }
    }
}

#[cfg(test)]
mod priority {
    use super::*;

    const LONG_WAIT: u64 = 360;

    #[test]
    fn rouge_always_first() {
        let rouge = patient("R", Severity::Rouge, 500);
        let jaune = patient("J", Severity::Jaune, 0);
        let now = Minute(501);
        assert!(rouge.queue_priority(now, LONG_WAIT) < jaune.queue_priority(now, LONG_WAIT));
    }

    #[test]
    fn vert_over_threshold_beats_jaune() {
        let vert = patient("V", Severity::Vert, 0);
        let jaune = patient("J", Severity::Jaune, 0);
        let now = Minute(400);
        assert!(vert.queue_priority(now, LONG_WAIT) < jaune.queue_priority(now, LONG_WAIT));
    }

    #[test]
    fn vert_at_threshold_still_behind_jaune() {
        // Strictly greater than the threshold fires the exception; equality
        // does not.
        let vert = patient("V", Severity::Vert, 0);
        let jaune = patient("J", Severity::Jaune, 0);
        let now = Minute(360);
        assert!(jaune.queue_priority(now, LONG_WAIT) < vert.queue_priority(now, LONG_WAIT));
    }

    #[test]
    fn gris_always_last() {
        let gris = patient("G", Severity::Gris, 0);
        let vert = patient("V", Severity::Vert, 0);
        let now = Minute(10_000); // even a very long gris wait changes nothing
        assert!(vert.queue_priority(now, LONG_WAIT) < gris.queue_priority(now, LONG_WAIT));
    }

    #[test]
    fn ties_broken_by_arrival() {
        let early = patient("A", Severity::Jaune, 5);
        let late = patient("B", Severity::Jaune, 50);
        let now = Minute(100);
        assert!(early.queue_priority(now, LONG_WAIT) < late.queue_priority(now, LONG_WAIT));
    }
}

#[cfg(test)]
mod may_leave {
    use super::*;

    #[test]
    fn fixed_triage_nurse_never_leaves() {
        let state = standard_department();
        let config = FlowConfig::default();
        let nurse = state
            .staff
            .iter()
            .find(|s| s.role == StaffRole::FixedTriageNurse)
            .unwrap();
        assert!(!nurse.may_leave(Minute(0), &config));
        assert!(!nurse.may_leave(Minute(100_000), &config));
    }

    #[test]
    fn dwell_lock_holds_then_releases() {
        let state = standard_department();
        let config = FlowConfig::default();
        let mut aide = state
            .staff
            .iter()
            .find(|s| s.role == StaffRole::Aide)
            .unwrap()
            .clone();

        aide.busy_since = Some(Minute(100));
        assert!(!aide.may_leave(Minute(102), &config));
        assert!(aide.may_leave(Minute(105), &config));
    }

    #[test]
    fn unavailable_staff_cannot_leave() {
        let state = standard_department();
        let config = FlowConfig::default();
        let mut nurse = state
            .staff
            .iter()
            .find(|s| s.role == StaffRole::MobileNurse)
            .unwrap()
            .clone();

        assert!(nurse.may_leave(Minute(0), &config));
        nurse.available = false;
        assert!(!nurse.may_leave(Minute(0), &config));
    }

    #[test]
    fn remaining_leave_minutes_is_aide_only() {
        let state = standard_department();
        let mut nurse = state
            .staff
            .iter()
            .find(|s| s.role == StaffRole::MobileNurse)
            .unwrap()
            .clone();
        nurse.must_return_by = Some(Minute(60));
        assert_eq!(nurse.remaining_leave_minutes(Minute(0)), None);

        let mut aide = state
            .staff
            .iter()
            .find(|s| s.role == StaffRole::Aide)
            .unwrap()
            .clone();
        aide.must_return_by = Some(Minute(60));
        assert_eq!(aide.remaining_leave_minutes(Minute(15)), Some(45));
        assert_eq!(aide.remaining_leave_minutes(Minute(90)), Some(0));
    }
}

#[cfg(test)]
mod aggregate {
    use super::*;
    use ed_core::{RoomId, StaffId, UnitId};

    #[test]
    fn standard_layout() {
        let state = standard_department();
        assert_eq!(state.rooms.len(), 3);
        assert_eq!(state.rooms[1].capacity, 10);
        assert_eq!(state.units.len(), 5);
        assert!(state.units[0].critical_care);
        assert_eq!(state.staff.len(), 6);
        assert!(state.consultation.is_free());
        assert_eq!(state.now(), Minute(0));
    }

    #[test]
    fn dangling_ids_resolve_to_none() {
        let state = standard_department();
        assert!(state.room(RoomId(99)).is_none());
        assert!(state.unit(UnitId(99)).is_none());
        assert!(state.staff_member(StaffId(99)).is_none());
        assert!(state.patient(&"nobody".into()).is_none());
    }

    #[test]
    fn unit_lookup_by_name() {
        let state = standard_department();
        let unit = state.unit_by_name("Cardiology").unwrap();
        assert_eq!(unit.capacity, 10);
        assert!(!unit.critical_care);
    }

    #[test]
    fn inbound_transports_counts_only_matching_unit() {
        use crate::{ActiveTransport, TransportDest};

        let mut state = standard_department();
        state.staff[4].transport = Some(ActiveTransport {
            patient:          "P1".into(),
            destination:      TransportDest::Unit(UnitId(0)),
            expected_arrival: Minute(45),
        });
        state.staff[5].transport = Some(ActiveTransport {
            patient:          "P2".into(),
            destination:      TransportDest::Consultation,
            expected_arrival: Minute(5),
        });

        assert_eq!(state.inbound_transports(UnitId(0)), 1);
        assert_eq!(state.inbound_transports(UnitId(1)), 0);
        assert_eq!(state.transporter_of(&"P1".into()), Some(StaffId(4)));
        assert_eq!(state.transporter_of(&"P3".into()), None);
    }
}
