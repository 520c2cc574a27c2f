//! Simulated time model.
//!
//! # Design
//!
//! Time is a monotonically increasing minute counter.  Nothing in the engine
//! ever reads the wall clock: the "passage of time" is an explicit caller
//! input (`Controller::tick(minutes)`), which makes every run exactly
//! reproducible and lets tests jump hours ahead in one call.
//!
//! The mapping to wall-clock time is held in [`SimClock`]:
//!
//!   wall_time = start_unix_secs + minute * 60
//!
//! Using an integer minute as the canonical unit means all deadline
//! arithmetic is exact and comparisons are O(1).

use std::fmt;

// ── Minute ───────────────────────────────────────────────────────────────────

/// An absolute simulated minute since the department opened (minute 0).
///
/// Stored as `u64`: at 1-minute resolution a u64 lasts ~35 billion years,
/// far longer than any conceivable run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Minute(pub u64);

impl Minute {
    pub const ZERO: Minute = Minute(0);

    /// Return the minute `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Minute {
        Minute(self.0 + n)
    }

    /// Minutes elapsed from `earlier` to `self` (saturating at 0).
    ///
    /// Saturation keeps wait-time queries total even if a caller compares
    /// against a timestamp stamped later in the same tick.
    #[inline]
    pub fn since(self, earlier: Minute) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Minute {
    type Output = Minute;
    #[inline]
    fn add(self, rhs: u64) -> Minute {
        Minute(self.0 + rhs)
    }
}

impl std::ops::Sub for Minute {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Minute) -> u64 {
        self.0.saturating_sub(rhs.0)
    }
}

impl fmt::Display for Minute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T+{}m", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between the simulated minute counter and Unix wall-clock seconds.
///
/// The clock is monotonic by construction: the only mutator is
/// [`advance`](SimClock::advance), called exclusively by the controller's
/// `tick`.  `SimClock` is cheap to copy and holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of minute 0.
    pub start_unix_secs: i64,
    /// The current simulated minute.
    pub now: Minute,
}

impl SimClock {
    /// Create a clock at minute 0, anchored at `start_unix_secs`.
    pub fn new(start_unix_secs: i64) -> Self {
        Self {
            start_unix_secs,
            now: Minute::ZERO,
        }
    }

    /// Advance the clock by `minutes`.
    #[inline]
    pub fn advance(&mut self, minutes: u64) {
        self.now = Minute(self.now.0 + minutes);
    }

    /// Elapsed simulated minutes since minute 0.
    #[inline]
    pub fn elapsed_minutes(&self) -> u64 {
        self.now.0
    }

    /// Current Unix timestamp corresponding to `now`.
    #[inline]
    pub fn current_unix_secs(&self) -> i64 {
        self.start_unix_secs + self.now.0 as i64 * 60
    }

    /// Break elapsed time into (day, hour, minute) components from opening.
    /// Useful for human-readable logging without a datetime library.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total = self.now.0;
        let days = total / 1_440;
        let hours = ((total % 1_440) / 60) as u32;
        let minutes = (total % 60) as u32;
        (days, hours, minutes)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.now, d, h, m)
    }
}
