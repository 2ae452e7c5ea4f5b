// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking conflict detection.
//!
//! Intervals are half-open: a candidate conflicts with a booking when
//! `candidate_start < booking_end && candidate_end > booking_start`.
//! Back-to-back appointments therefore never conflict. Cancelled
//! bookings are ignored, and the booking being rescheduled can be
//! excluded so it does not conflict with itself.

use crate::types::{Booking, minutes_since_midnight};

/// Returns whether a candidate interval overlaps one booking.
///
/// Date and status are not consulted here; callers filter those first.
#[must_use]
pub fn overlaps(candidate_start_minutes: u32, candidate_end_minutes: u32, booking: &Booking) -> bool {
    let booking_start: u32 = u32::from(minutes_since_midnight(booking.start_time));
    let booking_end: u32 = u32::from(minutes_since_midnight(booking.end_time));

    candidate_start_minutes < booking_end && candidate_end_minutes > booking_start
}

/// Returns whether the candidate interval conflicts with any booking
/// in the list.
///
/// Only bookings on the same date whose status occupies a slot are
/// considered. `exclude_booking_id` removes one booking from
/// consideration, used when rescheduling so the booking does not
/// conflict with its own current slot.
#[must_use]
pub fn has_conflict(
    bookings: &[Booking],
    date: time::Date,
    start: time::Time,
    duration_minutes: u16,
    exclude_booking_id: Option<i64>,
) -> bool {
    let candidate_start: u32 = u32::from(minutes_since_midnight(start));
    let candidate_end: u32 = candidate_start + u32::from(duration_minutes);

    bookings
        .iter()
        .filter(|booking| booking.date == date)
        .filter(|booking| booking.status.occupies_slot())
        .filter(|booking| match (exclude_booking_id, booking.booking_id) {
            (Some(excluded), Some(id)) => id != excluded,
            _ => true,
        })
        .any(|booking| overlaps(candidate_start, candidate_end, booking))
}
