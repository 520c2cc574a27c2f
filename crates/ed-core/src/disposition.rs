//! Post-consultation orientation.

use std::fmt;

use crate::UnitId;

/// Where a patient goes when the physician ends their consultation.
///
/// Supplied by the caller (the protocol-lookup layer recommends it; the
/// engine only validates it — a `Rouge` patient may never be sent `Home`).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Disposition {
    /// Discharge home: the patient leaves the department immediately.
    Home,
    /// Transfer to a specialized care unit after an exit transport.
    Unit(UnitId),
}

impl Disposition {
    #[inline]
    pub fn is_home(self) -> bool {
        matches!(self, Disposition::Home)
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Home => f.write_str("home"),
            Disposition::Unit(u) => write!(f, "unit {u}"),
        }
    }
}
