//! Triage severity tiers.
//!
//! The tier is assigned once at intake and never changed by this engine (an
//! external protocol-lookup layer may overwrite it, which is why the field on
//! `Patient` stays `pub`).  Queue ordering does NOT use the derived `Ord`
//! directly — the priority function has a long-wait exception for `Vert` —
//! but the derive keeps the tiers sortable for display purposes.

use std::fmt;

/// Patient severity, from immediately life-threatening down to
/// not-an-emergency.  Tier names are the triage vocabulary of the department.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Severity {
    /// Immediately life-threatening.
    Rouge,
    /// Urgent but not vital.
    Jaune,
    /// Non-urgent.
    Vert,
    /// Does not require emergency care.
    Gris,
}

impl Severity {
    /// Uppercase tag as used in triage paperwork and the snapshot.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Rouge => "ROUGE",
            Severity::Jaune => "JAUNE",
            Severity::Vert => "VERT",
            Severity::Gris => "GRIS",
        }
    }

    /// `true` for the tier that unlocks the critical-care expressway.
    #[inline]
    pub fn is_critical(self) -> bool {
        matches!(self, Severity::Rouge)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
