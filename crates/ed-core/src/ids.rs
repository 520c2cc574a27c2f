//! Strongly typed identifier wrappers.
//!
//! Rooms, care units, and staff are created once at startup, so their ids are
//! zero-cost indices into the aggregate's `Vec`s (`Copy + Ord + Hash`, usable
//! as map keys and sort keys without ceremony).  Patients arrive dynamically
//! and their ids are minted by the intake layer, so [`PatientId`] owns a
//! string instead of an index.
//!
//! A dangling id is never a panic: all lookups go through the aggregate's
//! fallible accessors and surface as a `NotFound`-kind error.

use std::fmt;

/// Generate a typed roster-id wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a waiting room in the department layout (declaration order).
    pub struct RoomId(u16);
}

typed_id! {
    /// Index of a specialized care unit in the department layout.
    pub struct UnitId(u16);
}

typed_id! {
    /// Index of a staff member in the roster.
    pub struct StaffId(u16);
}

// ── PatientId ─────────────────────────────────────────────────────────────────

/// Caller-assigned patient identifier (e.g. `"P42-017"`).
///
/// The intake/chatbot layer mints these before calling `admit`; the engine
/// only requires uniqueness, which `admit` enforces.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatientId(pub String);

impl PatientId {
    pub fn new(id: impl Into<String>) -> Self {
        PatientId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatientId {
    fn from(id: &str) -> Self {
        PatientId(id.to_owned())
    }
}

impl From<String> for PatientId {
    fn from(id: String) -> Self {
        PatientId(id)
    }
}
