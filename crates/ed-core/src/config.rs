//! Flow configuration.
//!
//! Every duration and threshold the scheduling rules depend on lives here,
//! so departments with different transfer distances or safety policies tune
//! one struct instead of hunting for magic numbers.  All values are whole
//! simulated minutes.

/// Tunable durations and thresholds for the flow engine.
///
/// Typically constructed once via `Default` and passed to the controller;
/// tests override individual fields with struct-update syntax.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowConfig {
    /// Minimum dwell time after a staff member becomes busy somewhere before
    /// the may-leave predicate lets them be pulled away again.  Prevents
    /// thrashing reassignment the instant someone arrives at a post.  Also
    /// the length of the short rescue-path move: the escort's `busy_since`
    /// stamp holds them for this long.
    pub min_dwell_min: u64,

    /// Escorted move from a waiting room to the consultation slot.
    pub consult_transport_min: u64,

    /// Unit transfer when the patient is `Rouge` AND the destination unit is
    /// flagged `critical_care` (the triage-priority expressway).
    pub unit_transport_express_min: u64,

    /// Unit transfer for every other severity/unit pair.
    pub unit_transport_standard_min: u64,

    /// A waiting room holding patients and unchecked for longer than this
    /// raises a supervision-lapse alert.
    pub supervision_lapse_min: u64,

    /// Wait beyond this both raises a long-wait alert and promotes `Vert`
    /// patients ahead of `Jaune` in the consultation queue.
    pub long_wait_min: u64,

    /// Staffing quorum for unit transports: how many *other* leave-eligible
    /// mobile staff must remain in the department when one departs on a
    /// transfer.  0 disables the check, making the rescue path a pure
    /// fallback for failed preconditions.
    pub unit_transport_reserve: usize,

    /// How long an `Aide` may be away once dispatched on a unit transfer
    /// (stamps `must_return_by`; surfaced in the snapshot for dispatchers).
    pub aide_absence_cap_min: u64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            min_dwell_min:              5,
            consult_transport_min:      5,
            unit_transport_express_min: 5,
            unit_transport_standard_min: 45,
            supervision_lapse_min:      15,
            long_wait_min:              360,
            unit_transport_reserve:     0,
            aide_absence_cap_min:       60,
        }
    }
}
