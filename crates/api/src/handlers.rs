// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers for availability queries and the booking lifecycle.
//!
//! Every handler receives `now` from the caller; nothing in this crate
//! reads a system clock. Mutating handlers drive the full pipeline:
//! policy checks, state load, core transition, persisted write.

use salon_book::{Command, State, apply};
use salon_book_audit::{Actor, Cause};
use salon_book_domain::{
    AssignmentRequest, Booking, Service, StaffSelector, available_slots, calculate_totals,
};
use salon_book_persistence::Persistence;

use crate::booking_policy::BookingPolicy;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AssignStaffRequest, AssignStaffResponse, BookingInfo, CancelBookingRequest,
    CancelBookingResponse, CreateBookingRequest, CreateBookingResponse, GetAvailableSlotsRequest,
    GetAvailableSlotsResponse, HasConflictRequest, HasConflictResponse, IsDateSelectableRequest,
    IsDateSelectableResponse, ListClientBookingsResponse, RescheduleBookingRequest,
    RescheduleBookingResponse,
};

const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    time::macros::format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    time::macros::format_description!("[hour]:[minute]");

fn parse_date(value: &str) -> Result<time::Date, ApiError> {
    time::Date::parse(value, DATE_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: String::from("date"),
        message: format!("Failed to parse date '{value}': {e}"),
    })
}

fn parse_time(field: &str, value: &str) -> Result<time::Time, ApiError> {
    time::Time::parse(value, TIME_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: String::from(field),
        message: format!("Failed to parse time '{value}': {e}"),
    })
}

fn render_date(date: time::Date) -> Result<String, ApiError> {
    date.format(DATE_FORMAT).map_err(|e| ApiError::Internal {
        message: format!("Failed to format date: {e}"),
    })
}

fn render_time(value: time::Time) -> String {
    format!("{:02}:{:02}", value.hour(), value.minute())
}

fn client_actor(client_id: i64) -> Actor {
    Actor::new(format!("client-{client_id}"), String::from("client"))
}

const fn selector_for(staff_id: Option<i64>) -> StaffSelector {
    match staff_id {
        Some(id) => StaffSelector::Member(id),
        None => StaffSelector::AnyAvailable,
    }
}

fn resolve_services(state: &State, service_ids: &[i64]) -> Result<Vec<Service>, ApiError> {
    service_ids
        .iter()
        .map(|service_id| {
            state
                .find_service(*service_id)
                .cloned()
                .ok_or_else(|| ApiError::ResourceNotFound {
                    resource_type: String::from("Service"),
                    message: format!("Service {service_id} does not exist"),
                })
        })
        .collect()
}

fn booking_info(booking: &Booking, booking_id: i64) -> Result<BookingInfo, ApiError> {
    Ok(BookingInfo {
        booking_id,
        staff_id: booking.staff_id,
        client_id: booking.client_id,
        date: render_date(booking.date)?,
        start_time: render_time(booking.start_time),
        end_time: render_time(booking.end_time),
        service_ids: booking.service_ids.clone(),
        status: String::from(booking.status.as_str()),
        total_price: booking.total_price.to_string(),
        total_duration_minutes: booking.total_duration_minutes,
        notes: booking.notes.clone(),
    })
}

/// Returns the bookable start times on a date for a service selection.
///
/// With a concrete `staff_id` the result is that staff member's
/// availability; without one it is the union across every capable,
/// non-absent staff member.
///
/// # Errors
///
/// Returns an error if the request is malformed, a service does not
/// exist, or state cannot be loaded.
pub fn get_available_slots(
    persistence: &mut Persistence,
    request: &GetAvailableSlotsRequest,
    now: time::PrimitiveDateTime,
) -> Result<GetAvailableSlotsResponse, ApiError> {
    BookingPolicy::validate_services(&request.service_ids)?;
    let date: time::Date = parse_date(&request.date)?;

    let state: State = persistence
        .load_state(now.date())
        .map_err(translate_persistence_error)?;
    let services: Vec<Service> = resolve_services(&state, &request.service_ids)?;
    let totals = calculate_totals(&services);

    let slots: Vec<String> = available_slots(
        &state.roster,
        date,
        totals.total_duration_minutes,
        selector_for(request.staff_id),
        &request.service_ids,
    )
    .into_iter()
    .map(render_time)
    .collect();

    Ok(GetAvailableSlotsResponse {
        date: request.date.clone(),
        duration_minutes: totals.total_duration_minutes,
        total_price: totals.total_price.to_string(),
        slots,
    })
}

/// Returns whether a date should be offered for selection at all.
///
/// A selectable date can still resolve to zero slots once existing
/// bookings are considered; this check only covers shifts, absences,
/// and capabilities.
///
/// # Errors
///
/// Returns an error if the request is malformed or state cannot be
/// loaded.
pub fn is_date_selectable(
    persistence: &mut Persistence,
    request: &IsDateSelectableRequest,
    now: time::PrimitiveDateTime,
) -> Result<IsDateSelectableResponse, ApiError> {
    BookingPolicy::validate_services(&request.service_ids)?;
    let date: time::Date = parse_date(&request.date)?;

    let state: State = persistence
        .load_state(now.date())
        .map_err(translate_persistence_error)?;

    let selectable: bool = salon_book_domain::is_date_selectable(
        &state.roster,
        date,
        selector_for(request.staff_id),
        &request.service_ids,
    );

    Ok(IsDateSelectableResponse {
        date: request.date.clone(),
        selectable,
    })
}

/// Auto-assigns a staff member for an interval and service selection.
///
/// The roster is walked in order and the first staff member passing
/// every gate wins, so the result is deterministic for identical
/// inputs. A client editing an existing booking can pass its ID in
/// `exclude_booking_id` so their own appointment does not count as a
/// conflict.
///
/// # Errors
///
/// Returns an error if the request is malformed, a service does not
/// exist, or nobody on the roster qualifies.
pub fn assign_staff(
    persistence: &mut Persistence,
    request: &AssignStaffRequest,
    now: time::PrimitiveDateTime,
) -> Result<AssignStaffResponse, ApiError> {
    BookingPolicy::validate_services(&request.service_ids)?;
    let date: time::Date = parse_date(&request.date)?;
    let start_time: time::Time = parse_time("start_time", &request.start_time)?;

    let state: State = persistence
        .load_state(now.date())
        .map_err(translate_persistence_error)?;
    let services: Vec<Service> = resolve_services(&state, &request.service_ids)?;
    let totals = calculate_totals(&services);

    let assignment = AssignmentRequest::new(
        date,
        start_time,
        totals.total_duration_minutes,
        request.service_ids.clone(),
        request.exclude_booking_id,
    );
    let staff_id: i64 =
        salon_book_domain::assign_staff(&state.roster, &assignment).map_err(translate_domain_error)?;
    let staff_name: String = state
        .find_staff(staff_id)
        .map(|staff| staff.name.clone())
        .ok_or_else(|| ApiError::Internal {
            message: format!("Assigned staff member {staff_id} is missing from the roster"),
        })?;

    Ok(AssignStaffResponse {
        staff_id,
        staff_name: staff_name.clone(),
        message: format!("{staff_name} is available at the requested time"),
    })
}

/// Checks one staff member's calendar for an overlap with a candidate
/// interval.
///
/// # Errors
///
/// Returns an error if the request is malformed, the staff member does
/// not exist, or state cannot be loaded.
pub fn has_conflict(
    persistence: &mut Persistence,
    request: &HasConflictRequest,
    now: time::PrimitiveDateTime,
) -> Result<HasConflictResponse, ApiError> {
    let date: time::Date = parse_date(&request.date)?;
    let start_time: time::Time = parse_time("start_time", &request.start_time)?;

    let state: State = persistence
        .load_state(now.date())
        .map_err(translate_persistence_error)?;
    let staff = state
        .find_staff(request.staff_id)
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Staff member"),
            message: format!("Staff member {} does not exist", request.staff_id),
        })?;

    let conflict: bool = salon_book_domain::has_conflict(
        &staff.bookings,
        date,
        start_time,
        request.duration_minutes,
        request.exclude_booking_id,
    );

    Ok(HasConflictResponse { conflict })
}

/// Creates a booking.
///
/// Validates the request, loads the current state, applies the create
/// command through the core engine, and persists the transition. The
/// slot conflict check is re-run inside the database transaction, so a
/// competing request that claimed the slot first surfaces as a
/// conflict here, not as a double booking.
///
/// # Errors
///
/// Returns an error if the request is malformed, a scheduling rule is
/// violated, or the write fails.
pub fn create_booking(
    persistence: &mut Persistence,
    request: &CreateBookingRequest,
    now: time::PrimitiveDateTime,
    cause: Cause,
) -> Result<CreateBookingResponse, ApiError> {
    BookingPolicy::validate_booking_request(
        request.client_id,
        &request.service_ids,
        request.notes.as_deref(),
    )?;
    let date: time::Date = parse_date(&request.date)?;
    let start_time: time::Time = parse_time("start_time", &request.start_time)?;

    let state: State = persistence
        .load_state(now.date())
        .map_err(translate_persistence_error)?;

    let command = Command::CreateBooking {
        client_id: request.client_id,
        date,
        start_time,
        selector: selector_for(request.staff_id),
        service_ids: request.service_ids.clone(),
        notes: request.notes.clone(),
    };
    let result = apply(&state, command, now, client_actor(request.client_id), cause)
        .map_err(translate_core_error)?;

    let booking_id: i64 = persistence
        .persist_transition(&result, now)
        .map_err(translate_persistence_error)?;
    let booking: BookingInfo = booking_info(&result.booking, booking_id)?;

    Ok(CreateBookingResponse {
        message: format!(
            "Booking {booking_id} created for {} at {}",
            booking.date, booking.start_time
        ),
        booking,
    })
}

/// Moves an existing booking to a new date, time, or service set.
///
/// The booking keeps its ID and its status resets to pending. Only the
/// owning client may reschedule, and only up to 24 hours before the
/// original start.
///
/// # Errors
///
/// Returns an error if the request is malformed, the client does not
/// own the booking, the lead-time window has closed, a scheduling rule
/// is violated, or the write fails.
pub fn reschedule_booking(
    persistence: &mut Persistence,
    request: &RescheduleBookingRequest,
    now: time::PrimitiveDateTime,
    cause: Cause,
) -> Result<RescheduleBookingResponse, ApiError> {
    BookingPolicy::validate_booking_request(
        request.client_id,
        &request.service_ids,
        request.notes.as_deref(),
    )?;
    let date: time::Date = parse_date(&request.date)?;
    let start_time: time::Time = parse_time("start_time", &request.start_time)?;

    let state: State = persistence
        .load_state(now.date())
        .map_err(translate_persistence_error)?;

    let command = Command::RescheduleBooking {
        booking_id: request.booking_id,
        client_id: request.client_id,
        date,
        start_time,
        selector: selector_for(request.staff_id),
        service_ids: request.service_ids.clone(),
        notes: request.notes.clone(),
    };
    let result = apply(&state, command, now, client_actor(request.client_id), cause)
        .map_err(translate_core_error)?;

    let booking_id: i64 = persistence
        .persist_transition(&result, now)
        .map_err(translate_persistence_error)?;
    let booking: BookingInfo = booking_info(&result.booking, booking_id)?;

    Ok(RescheduleBookingResponse {
        message: format!(
            "Booking {booking_id} moved to {} at {}",
            booking.date, booking.start_time
        ),
        booking,
    })
}

/// Cancels a booking.
///
/// The booking row is kept for history with a cancelled status; its
/// slot becomes available again immediately. Only the owning client
/// may cancel, and only up to 24 hours before the start.
///
/// # Errors
///
/// Returns an error if the request is malformed, the booking does not
/// exist, the client does not own it, the lead-time window has closed,
/// or the write fails.
pub fn cancel_booking(
    persistence: &mut Persistence,
    request: &CancelBookingRequest,
    now: time::PrimitiveDateTime,
    cause: Cause,
) -> Result<CancelBookingResponse, ApiError> {
    BookingPolicy::validate_client_id(request.client_id)?;

    let state: State = persistence
        .load_state(now.date())
        .map_err(translate_persistence_error)?;

    let command = Command::CancelBooking {
        booking_id: request.booking_id,
        client_id: request.client_id,
    };
    let result = apply(&state, command, now, client_actor(request.client_id), cause)
        .map_err(translate_core_error)?;

    let booking_id: i64 = persistence
        .persist_transition(&result, now)
        .map_err(translate_persistence_error)?;

    Ok(CancelBookingResponse {
        booking_id,
        status: String::from(result.booking.status.as_str()),
        message: format!("Booking {booking_id} cancelled"),
    })
}

/// Lists a client's bookings, ordered by date and start time.
///
/// Cancelled bookings are included; clients see their full history.
///
/// # Errors
///
/// Returns an error if the client ID is invalid or the query fails.
pub fn list_client_bookings(
    persistence: &mut Persistence,
    client_id: i64,
) -> Result<ListClientBookingsResponse, ApiError> {
    BookingPolicy::validate_client_id(client_id)?;

    let bookings: Vec<Booking> = persistence
        .list_client_bookings(client_id)
        .map_err(translate_persistence_error)?;

    let bookings: Vec<BookingInfo> = bookings
        .iter()
        .map(|booking| {
            let booking_id: i64 = booking.booking_id.ok_or_else(|| ApiError::Internal {
                message: String::from("Stored booking is missing its ID"),
            })?;
            booking_info(booking, booking_id)
        })
        .collect::<Result<Vec<BookingInfo>, ApiError>>()?;

    Ok(ListClientBookingsResponse {
        client_id,
        bookings,
    })
}
