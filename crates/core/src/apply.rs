// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::{CoreError, PermissionReason};
use crate::state::{State, TransitionResult};
use salon_book_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use salon_book_domain::{
    AssignmentRequest, Booking, BookingStatus, DomainError, Service, StaffMember, StaffSelector,
    assign_staff, calculate_totals, has_conflict, interval_fits_shift, is_absent_on,
    minutes_since_midnight, shifts_for_weekday, validate_booking_fields, weekday_index,
};

/// Minimum notice for cancelling or rescheduling a booking, in hours.
pub const MUTATION_LEAD_TIME_HOURS: i64 = 24;

/// Applies a command to the current state, producing a new state, the
/// resulting booking, and an audit event.
///
/// The caller supplies `now`; the engine never reads a system clock.
/// All validation here is authoritative regardless of what any client
/// displayed before submitting.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `now` - The current wall-clock date and time
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state, booking, and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules (validation, shifts, absences,
///   capabilities, conflicts)
/// - The requester does not own the booking, or the booking is
///   cancelled, completed, past, or inside the lead-time window
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &State,
    command: Command,
    now: time::PrimitiveDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreateBooking {
            client_id,
            date,
            start_time,
            selector,
            service_ids,
            notes,
        } => {
            let services: Vec<Service> = resolve_services(state, &service_ids)?;
            let totals = calculate_totals(&services);
            validate_booking_fields(&service_ids, start_time, totals.total_duration_minutes)?;

            let staff_id: i64 = resolve_staff(
                state,
                selector,
                date,
                start_time,
                totals.total_duration_minutes,
                &service_ids,
                None,
            )?;

            let end_time: time::Time = end_time_for(start_time, totals.total_duration_minutes)?;
            let booking: Booking = Booking::new(
                staff_id,
                client_id,
                date,
                start_time,
                end_time,
                service_ids.clone(),
                BookingStatus::Pending,
                totals.total_price,
                totals.total_duration_minutes,
                notes,
            )
            .map_err(CoreError::DomainViolation)?;

            let before: StateSnapshot = state.to_snapshot();

            let mut new_state: State = state.clone();
            attach_booking(&mut new_state, staff_id, booking.clone())?;

            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("CreateBooking"),
                Some(format!(
                    "Booked {} service(s) with staff {staff_id} on {date} at {start_time}",
                    service_ids.len()
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);

            Ok(TransitionResult {
                new_state,
                booking,
                audit_event,
            })
        }
        Command::RescheduleBooking {
            booking_id,
            client_id,
            date,
            start_time,
            selector,
            service_ids,
            notes,
        } => {
            let existing: Booking = state
                .find_booking(booking_id)
                .cloned()
                .ok_or(CoreError::DomainViolation(DomainError::BookingNotFound(
                    booking_id,
                )))?;
            check_mutation_permitted(&existing, client_id, now)?;
            // Reschedule resets to pending; completed bookings are terminal
            if existing.status != BookingStatus::Pending
                && !existing.status.can_transition_to(BookingStatus::Pending)
            {
                return Err(CoreError::DomainViolation(
                    DomainError::InvalidStatusTransition {
                        from: existing.status,
                        to: BookingStatus::Pending,
                    },
                ));
            }

            let services: Vec<Service> = resolve_services(state, &service_ids)?;
            let totals = calculate_totals(&services);
            validate_booking_fields(&service_ids, start_time, totals.total_duration_minutes)?;

            let staff_id: i64 = resolve_staff(
                state,
                selector,
                date,
                start_time,
                totals.total_duration_minutes,
                &service_ids,
                Some(booking_id),
            )?;

            let end_time: time::Time = end_time_for(start_time, totals.total_duration_minutes)?;
            // Reschedule resets the status to pending
            let booking: Booking = Booking::with_id(
                booking_id,
                staff_id,
                client_id,
                date,
                start_time,
                end_time,
                service_ids,
                BookingStatus::Pending,
                totals.total_price,
                totals.total_duration_minutes,
                notes,
            )
            .map_err(CoreError::DomainViolation)?;

            let before: StateSnapshot = state.to_snapshot();

            let mut new_state: State = state.clone();
            detach_booking(&mut new_state, booking_id);
            attach_booking(&mut new_state, staff_id, booking.clone())?;

            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("RescheduleBooking"),
                Some(format!(
                    "Moved booking {booking_id} to {date} at {start_time} with staff {staff_id}"
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);

            Ok(TransitionResult {
                new_state,
                booking,
                audit_event,
            })
        }
        Command::CancelBooking {
            booking_id,
            client_id,
        } => {
            let existing: Booking = state
                .find_booking(booking_id)
                .cloned()
                .ok_or(CoreError::DomainViolation(DomainError::BookingNotFound(
                    booking_id,
                )))?;
            check_mutation_permitted(&existing, client_id, now)?;
            if !existing.status.can_transition_to(BookingStatus::Cancelled) {
                return Err(CoreError::DomainViolation(
                    DomainError::InvalidStatusTransition {
                        from: existing.status,
                        to: BookingStatus::Cancelled,
                    },
                ));
            }

            let mut cancelled: Booking = existing;
            cancelled.status = BookingStatus::Cancelled;

            let before: StateSnapshot = state.to_snapshot();

            let mut new_state: State = state.clone();
            for staff in &mut new_state.roster {
                for booking in &mut staff.bookings {
                    if booking.booking_id == Some(booking_id) {
                        booking.status = BookingStatus::Cancelled;
                    }
                }
            }

            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("CancelBooking"),
                Some(format!("Cancelled booking {booking_id}")),
            );
            let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);

            Ok(TransitionResult {
                new_state,
                booking: cancelled,
                audit_event,
            })
        }
    }
}

/// Resolves the selected services, preserving selection order.
fn resolve_services(state: &State, service_ids: &[i64]) -> Result<Vec<Service>, CoreError> {
    service_ids
        .iter()
        .map(|id| {
            state
                .find_service(*id)
                .cloned()
                .ok_or(CoreError::ServiceNotFound(*id))
        })
        .collect()
}

/// Resolves which staff member takes the booking.
///
/// A specific member is checked gate by gate so the caller learns the
/// first failing constraint. "Any available" walks the roster in order
/// and takes the first member passing every gate.
fn resolve_staff(
    state: &State,
    selector: StaffSelector,
    date: time::Date,
    start_time: time::Time,
    duration_minutes: u16,
    service_ids: &[i64],
    exclude_booking_id: Option<i64>,
) -> Result<i64, CoreError> {
    match selector {
        StaffSelector::Member(staff_id) => {
            let staff: &StaffMember = state
                .find_staff(staff_id)
                .ok_or(CoreError::DomainViolation(DomainError::StaffNotFound(
                    staff_id,
                )))?;
            check_staff_gates(
                staff,
                date,
                start_time,
                duration_minutes,
                service_ids,
                exclude_booking_id,
            )
            .map_err(CoreError::DomainViolation)?;
            Ok(staff_id)
        }
        StaffSelector::AnyAvailable => {
            let request: AssignmentRequest = AssignmentRequest::new(
                date,
                start_time,
                duration_minutes,
                service_ids.to_vec(),
                exclude_booking_id,
            );
            assign_staff(&state.roster, &request).map_err(CoreError::DomainViolation)
        }
    }
}

/// Checks every booking gate for one specific staff member, in the
/// same order the auto-assigner applies them.
fn check_staff_gates(
    staff: &StaffMember,
    date: time::Date,
    start_time: time::Time,
    duration_minutes: u16,
    service_ids: &[i64],
    exclude_booking_id: Option<i64>,
) -> Result<(), DomainError> {
    if is_absent_on(&staff.absences, date) {
        return Err(DomainError::StaffAbsent {
            staff_id: staff.staff_id,
            date,
        });
    }

    let shifts = shifts_for_weekday(&staff.shifts, weekday_index(date));
    if !shifts
        .iter()
        .any(|shift| interval_fits_shift(shift, start_time, duration_minutes))
    {
        return Err(DomainError::SlotOutsideShift {
            staff_id: staff.staff_id,
            date,
            start: start_time,
        });
    }

    if let Some(earliest) = staff.earliest_bookable_hour
        && start_time.hour() < earliest
    {
        return Err(DomainError::BeforeEarliestBookableHour {
            staff_id: staff.staff_id,
            earliest_hour: earliest,
        });
    }

    if let Some(missing) = service_ids
        .iter()
        .find(|id| !staff.service_ids.contains(id))
    {
        return Err(DomainError::MissingCapability {
            staff_id: staff.staff_id,
            service_id: *missing,
        });
    }

    if has_conflict(
        &staff.bookings,
        date,
        start_time,
        duration_minutes,
        exclude_booking_id,
    ) {
        return Err(DomainError::SlotConflict {
            staff_id: staff.staff_id,
            date,
            start: start_time,
        });
    }

    Ok(())
}

/// Checks ownership, status, and the lead-time window for a cancel or
/// reschedule request.
fn check_mutation_permitted(
    booking: &Booking,
    client_id: i64,
    now: time::PrimitiveDateTime,
) -> Result<(), CoreError> {
    if booking.client_id != client_id {
        return Err(CoreError::PermissionDenied(PermissionReason::NotOwner));
    }

    if booking.status == BookingStatus::Cancelled {
        return Err(CoreError::PermissionDenied(
            PermissionReason::AlreadyCancelled,
        ));
    }

    let start: time::PrimitiveDateTime =
        time::PrimitiveDateTime::new(booking.date, booking.start_time);
    if start <= now {
        return Err(CoreError::PermissionDenied(PermissionReason::InPast));
    }

    let hours_remaining: i64 = (start - now).whole_hours();
    if hours_remaining < MUTATION_LEAD_TIME_HOURS {
        return Err(CoreError::PermissionDenied(
            PermissionReason::TooCloseToStart { hours_remaining },
        ));
    }

    Ok(())
}

/// Computes the end time for an interval known to stay within the day.
fn end_time_for(start: time::Time, duration_minutes: u16) -> Result<time::Time, CoreError> {
    let total: u32 = u32::from(minutes_since_midnight(start)) + u32::from(duration_minutes);
    // cursor stays below 24h; validated before this point
    #[allow(clippy::cast_possible_truncation)]
    time::Time::from_hms((total / 60) as u8, (total % 60) as u8, 0).map_err(|_| {
        CoreError::DomainViolation(DomainError::IntervalCrossesMidnight {
            start,
            duration_minutes,
        })
    })
}

/// Adds a booking to the named staff member's calendar.
fn attach_booking(state: &mut State, staff_id: i64, booking: Booking) -> Result<(), CoreError> {
    let staff: &mut StaffMember = state
        .roster
        .iter_mut()
        .find(|staff| staff.staff_id == staff_id)
        .ok_or(CoreError::DomainViolation(DomainError::StaffNotFound(
            staff_id,
        )))?;
    staff.bookings.push(booking);
    Ok(())
}

/// Removes a booking from whichever staff member currently holds it.
fn detach_booking(state: &mut State, booking_id: i64) {
    for staff in &mut state.roster {
        staff
            .bookings
            .retain(|booking| booking.booking_id != Some(booking_id));
    }
}
