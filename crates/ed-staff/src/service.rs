//! Staff operations.

use ed_core::{FlowConfig, FlowEvent, RoomId, StaffId, StaffRole};
use ed_state::{EdState, Location};

use crate::{StaffError, StaffResult};

/// Every staff member of `role` who could be dispatched right now.
///
/// Filters by the may-leave predicate; `exclude_in_transit` additionally
/// drops anyone mid-escort (kept as a parameter for callers that want to
/// count a returning escort as "almost available", though may-leave already
/// rejects them for actual dispatch).
pub fn find_available(
    state: &EdState,
    config: &FlowConfig,
    role: StaffRole,
    exclude_in_transit: bool,
) -> Vec<StaffId> {
    let now = state.now();
    state
        .staff
        .iter()
        .filter(|s| s.role == role)
        .filter(|s| !(exclude_in_transit && s.in_transit()))
        .filter(|s| s.may_leave(now, config))
        .map(|s| s.id)
        .collect()
}

/// Put `staff_id` in charge of watching `room_id`.
///
/// Only mobile roles qualify, and only when the may-leave predicate allows
/// it.  Any room the member previously watched is released first, and a
/// previous supervisor of the target room loses the post — both links stay
/// symmetric.  Stamps `busy_since` (starting the dwell lock) and the room's
/// `last_supervised`.
pub fn assign_supervision(
    state: &mut EdState,
    config: &FlowConfig,
    staff_id: StaffId,
    room_id: RoomId,
) -> StaffResult<()> {
    let now = state.now();

    let staff = state
        .staff_member(staff_id)
        .ok_or(StaffError::UnknownStaff(staff_id))?;
    if !staff.role.is_mobile() {
        return Err(StaffError::RoleNotEligible {
            staff: staff_id,
            role:  staff.role,
        });
    }
    if !staff.may_leave(now, config) {
        return Err(StaffError::CannotLeave(staff_id));
    }
    let previous_room = staff.watching;
    if state.room(room_id).is_none() {
        return Err(StaffError::UnknownRoom(room_id));
    }

    // Release the member's previous room.
    if let Some(prev) = previous_room
        && prev != room_id
        && let Some(room) = state.room_mut(prev)
        && room.supervisor == Some(staff_id)
    {
        room.supervisor = None;
    }

    // Displace the room's previous supervisor, if someone else held it.
    let displaced = state.room(room_id).and_then(|r| r.supervisor);
    if let Some(old) = displaced
        && old != staff_id
        && let Some(member) = state.staff_member_mut(old)
    {
        member.watching = None;
        member.location = Location::Idle;
    }

    if let Some(member) = state.staff_member_mut(staff_id) {
        member.location = Location::Room(room_id);
        member.watching = Some(room_id);
        member.busy_since = Some(now);
    }
    if let Some(room) = state.room_mut(room_id) {
        room.supervisor = Some(staff_id);
        room.last_supervised = now;
    }

    tracing::info!(staff = %staff_id, room = %room_id, "supervision assigned");
    Ok(())
}

/// Detach `staff_id` from whatever room they watch (both directions).
///
/// Called by the transport service before marking someone in transit — a
/// member is never simultaneously in transit and supervising.  Quiet no-op
/// when the member is unknown or watching nothing.
pub fn withdraw_supervision(state: &mut EdState, staff_id: StaffId) {
    let Some(room_id) = state.staff_member(staff_id).and_then(|s| s.watching) else {
        return;
    };
    if let Some(room) = state.room_mut(room_id)
        && room.supervisor == Some(staff_id)
    {
        room.supervisor = None;
    }
    if let Some(member) = state.staff_member_mut(staff_id) {
        member.watching = None;
    }
    tracing::debug!(staff = %staff_id, room = %room_id, "supervision withdrawn");
}

/// Best-effort sweep: give every occupied, unsupervised room an idle mobile
/// staff member.
///
/// Never fails — a room that cannot be covered (nobody idle, or the idle
/// candidate is still dwell-locked) is simply skipped until the next sweep.
/// Returns one event per successful assignment.
pub fn auto_cover_unsupervised_rooms(
    state: &mut EdState,
    config: &FlowConfig,
) -> Vec<FlowEvent> {
    let mut events = Vec::new();

    for index in 0..state.rooms.len() {
        let room_id = state.rooms[index].id;
        let needs_cover = {
            let room = &state.rooms[index];
            !room.patients.is_empty() && room.supervisor.is_none()
        };
        if !needs_cover {
            continue;
        }

        let candidate = state
            .staff
            .iter()
            .find(|s| {
                s.role.is_mobile()
                    && s.available
                    && !s.in_transit()
                    && s.location == Location::Idle
            })
            .map(|s| s.id);

        if let Some(staff_id) = candidate
            && assign_supervision(state, config, staff_id, room_id).is_ok()
        {
            events.push(FlowEvent::SupervisionAssigned {
                staff: staff_id,
                room:  room_id,
                auto:  true,
            });
        }
    }

    events
}

/// Return a staff member to duty after an escort or posting ends.
///
/// Clears the transport, occupancy, and deadline fields and places the
/// member at their watched room (if they still hold one) or the idle pool.
/// Quiet no-op for unknown ids — the roster is fixed, so an unknown id here
/// is a stale reference not worth failing a tick over.
pub fn release(state: &mut EdState, staff_id: StaffId) {
    let Some(member) = state.staff_member_mut(staff_id) else {
        return;
    };
    member.available = true;
    member.transport = None;
    member.busy_since = None;
    member.must_return_by = None;
    member.location = match member.watching {
        Some(room) => Location::Room(room),
        None => Location::Idle,
    };
    tracing::debug!(staff = %staff_id, "released");
}
