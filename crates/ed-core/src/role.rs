//! Staff roles.

use std::fmt;

/// What a roster member is hired to do.
///
/// The two fixed roles never participate in transports or room supervision;
/// a `FixedTriageNurse` additionally never changes location at all.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StaffRole {
    /// The examining physician, permanently at the consultation slot.
    FixedDoctor,
    /// The triage nurse, permanently at intake.
    FixedTriageNurse,
    /// A nurse who can supervise rooms and escort transports.
    MobileNurse,
    /// An orderly who can supervise rooms and escort transports, subject to
    /// an absence cap when away on long transfers.
    Aide,
}

impl StaffRole {
    /// `true` for the roles eligible for supervision and transport duty.
    #[inline]
    pub fn is_mobile(self) -> bool {
        matches!(self, StaffRole::MobileNurse | StaffRole::Aide)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StaffRole::FixedDoctor => "fixed_doctor",
            StaffRole::FixedTriageNurse => "fixed_triage_nurse",
            StaffRole::MobileNurse => "mobile_nurse",
            StaffRole::Aide => "aide",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
