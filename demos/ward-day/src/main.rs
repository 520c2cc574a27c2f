//! ward-day — a scripted shift through the emergency-department flow engine.
//!
//! Admits a small mixed-severity cohort, escorts the critical case through
//! consultation and onto the critical-care expressway, exercises the rescue
//! path against a saturated unit, and prints the tick events and alerts a
//! dispatcher would watch.  Run with `RUST_LOG=info` to see the service-level
//! log lines alongside the event feed.

use anyhow::Result;

use ed_control::{Controller, Disposition, FlowConfig, Severity, StaffRole, TickReport};
use ed_core::PatientId;
use ed_state::{Patient, standard_department};

fn print_report(label: &str, report: &TickReport) {
    println!("-- {label} [{}]", report.now);
    for event in &report.events {
        println!("   {event}");
    }
    for alert in &report.alerts {
        println!("   ALERT: {alert}");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Standard layout, except Cardiology is already full today — that is
    // what will force the rescue path later.
    let mut state = standard_department();
    for unit in &mut state.units {
        if unit.name == "Cardiology" {
            while unit.patients.len() < unit.capacity {
                let occupant = PatientId::new(format!("ward-{}", unit.patients.len()));
                unit.patients.push(occupant);
            }
        }
    }
    let mut controller = Controller::new(state, FlowConfig::default());

    // ── Morning arrivals ──────────────────────────────────────────────────
    let cohort = [
        ("P-001", "Maria", "Castillo", Severity::Rouge, "chest pain, radiating", 67),
        ("P-002", "Jonah", "Reed", Severity::Jaune, "suspected wrist fracture", 34),
        ("P-003", "Ana", "Moreau", Severity::Vert, "persistent cough", 29),
        ("P-004", "Sam", "Oduya", Severity::Gris, "prescription renewal", 45),
    ];
    for (id, first, last, severity, symptoms, age) in cohort {
        let patient = Patient::new(id, first, last, severity, symptoms, age);
        controller.admit_patient(patient)?;
        let room = controller.assign_waiting_room(&PatientId::new(id), None)?;
        println!("admitted {id} ({severity}) -> {room}");
    }

    // Cover the occupied rooms before anything else happens.
    for event in controller.auto_cover() {
        println!("   {event}");
    }

    // ── The ROUGE patient goes first ──────────────────────────────────────
    let critical = PatientId::new("P-001");
    let head_of_queue = controller
        .consultation_queue()
        .first()
        .map(|p| p.id.clone())
        .expect("cohort is seated");
    assert_eq!(head_of_queue, critical);

    let escort = controller.available_staff(StaffRole::Aide)[0];
    controller.start_consultation_transport(&critical, escort)?;
    print_report("escort underway", &controller.tick(5));

    // Physician's decision: critical care.
    let critical_care = controller
        .state()
        .unit_by_name("Critical Care")
        .map(|u| u.id)
        .expect("standard layout");
    controller.end_consultation(&critical, Disposition::Unit(critical_care))?;

    let escort = controller.available_staff(StaffRole::MobileNurse)[0];
    controller.start_unit_transport(&critical, escort)?;
    print_report("expressway transfer", &controller.tick(5));

    // ── The saturated ward forces the rescue path ─────────────────────────
    let next = controller
        .consultation_queue()
        .first()
        .map(|p| p.id.clone())
        .expect("queue is not empty");
    let escort = controller.available_staff(StaffRole::Aide)[0];
    controller.start_consultation_transport(&next, escort)?;
    print_report("next consultation", &controller.tick(5));

    let cardiology = controller
        .state()
        .unit_by_name("Cardiology")
        .map(|u| u.id)
        .expect("standard layout");
    controller.end_consultation(&next, Disposition::Unit(cardiology))?;

    let escort = controller.available_staff(StaffRole::Aide)[0];
    match controller.start_unit_transport(&next, escort) {
        Err(e) => println!("transfer blocked as expected: {e}"),
        Ok(_) => unreachable!("cardiology was filled at startup"),
    }
    let room = controller.return_to_waiting_room(&next, escort, None)?;
    println!("rescue: {next} back in {room}");

    // ── Let the afternoon pass ────────────────────────────────────────────
    print_report("afternoon", &controller.tick(361));

    println!("\n{}", controller.snapshot().to_json()?);
    Ok(())
}
