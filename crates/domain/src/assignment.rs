// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Automatic staff assignment.
//!
//! When a client books "any available", the roster is walked in order
//! and the first staff member passing every gate wins. The gate order
//! is fixed so assignment is deterministic for identical inputs:
//!
//! 1. Not absent on the date
//! 2. Has at least one shift for that day of week
//! 3. The requested interval fits entirely within one of those shifts
//! 4. The earliest-bookable-hour override, if any, is satisfied
//! 5. Can perform every requested service
//! 6. No conflicting booking (excluding the booking being rescheduled)

use crate::absence::is_absent_on;
use crate::conflict::has_conflict;
use crate::error::DomainError;
use crate::shift::{interval_fits_shift, shifts_for_weekday, weekday_index};
use crate::types::StaffMember;

/// The interval and services an assignment must cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRequest {
    /// The appointment date.
    pub date: time::Date,
    /// The appointment start time.
    pub start_time: time::Time,
    /// Total duration of the selected services, in minutes.
    pub duration_minutes: u16,
    /// The selected services.
    pub service_ids: Vec<i64>,
    /// When rescheduling, the booking to exclude from conflict checks.
    pub exclude_booking_id: Option<i64>,
}

impl AssignmentRequest {
    /// Creates a new `AssignmentRequest`.
    #[must_use]
    pub const fn new(
        date: time::Date,
        start_time: time::Time,
        duration_minutes: u16,
        service_ids: Vec<i64>,
        exclude_booking_id: Option<i64>,
    ) -> Self {
        Self {
            date,
            start_time,
            duration_minutes,
            service_ids,
            exclude_booking_id,
        }
    }
}

/// Walks the roster in order and returns the ID of the first staff
/// member who passes every gate for the requested interval.
///
/// # Errors
///
/// Returns `DomainError::NoStaffAvailable` when nobody qualifies.
pub fn assign_staff(
    roster: &[StaffMember],
    request: &AssignmentRequest,
) -> Result<i64, DomainError> {
    let day: u8 = weekday_index(request.date);

    for staff in roster {
        if is_absent_on(&staff.absences, request.date) {
            continue;
        }

        let shifts = shifts_for_weekday(&staff.shifts, day);
        if shifts.is_empty() {
            continue;
        }

        if !shifts
            .iter()
            .any(|shift| interval_fits_shift(shift, request.start_time, request.duration_minutes))
        {
            continue;
        }

        if let Some(earliest) = staff.earliest_bookable_hour
            && request.start_time.hour() < earliest
        {
            continue;
        }

        if !staff.can_perform_all(&request.service_ids) {
            continue;
        }

        if has_conflict(
            &staff.bookings,
            request.date,
            request.start_time,
            request.duration_minutes,
            request.exclude_booking_id,
        ) {
            continue;
        }

        return Ok(staff.staff_id);
    }

    Err(DomainError::NoStaffAvailable {
        date: request.date,
        start: request.start_time,
    })
}
