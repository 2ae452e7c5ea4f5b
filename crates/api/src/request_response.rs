// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates travel as ISO 8601 text (`YYYY-MM-DD`) and times as `HH:MM` text.
//! A `staff_id` of `None` in a request means "any available staff member";
//! the engine then assigns one in roster order.

/// API request for the available slots on a date.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetAvailableSlotsRequest {
    /// The date to query (`YYYY-MM-DD`).
    pub date: String,
    /// The selected services.
    pub service_ids: Vec<i64>,
    /// The requested staff member, or `None` for any.
    pub staff_id: Option<i64>,
}

/// API response listing the bookable start times on a date.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetAvailableSlotsResponse {
    /// The queried date.
    pub date: String,
    /// Total appointment length for the selected services, in minutes.
    pub duration_minutes: u16,
    /// Total price for the selected services (e.g., `"80"` or `"80+"`).
    pub total_price: String,
    /// The bookable start times (`HH:MM`), sorted ascending.
    pub slots: Vec<String>,
}

/// API request asking whether a date is selectable at all.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IsDateSelectableRequest {
    /// The date to query (`YYYY-MM-DD`).
    pub date: String,
    /// The selected services.
    pub service_ids: Vec<i64>,
    /// The requested staff member, or `None` for any.
    pub staff_id: Option<i64>,
}

/// API response for date selectability.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IsDateSelectableResponse {
    /// The queried date.
    pub date: String,
    /// Whether the date can be offered in a date picker.
    pub selectable: bool,
}

/// API request to auto-assign a staff member for an interval.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssignStaffRequest {
    /// The date of the appointment (`YYYY-MM-DD`).
    pub date: String,
    /// The start time (`HH:MM`).
    pub start_time: String,
    /// The selected services.
    pub service_ids: Vec<i64>,
    /// A booking to ignore, for reschedule checks.
    pub exclude_booking_id: Option<i64>,
}

/// API response for a successful staff assignment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssignStaffResponse {
    /// The assigned staff member's ID.
    pub staff_id: i64,
    /// The assigned staff member's name.
    pub staff_name: String,
    /// A success message.
    pub message: String,
}

/// API request for a conflict check against one staff member's calendar.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HasConflictRequest {
    /// The staff member to check.
    pub staff_id: i64,
    /// The date of the candidate interval (`YYYY-MM-DD`).
    pub date: String,
    /// The start time of the candidate interval (`HH:MM`).
    pub start_time: String,
    /// The length of the candidate interval, in minutes.
    pub duration_minutes: u16,
    /// A booking to ignore, for reschedule checks.
    pub exclude_booking_id: Option<i64>,
}

/// API response for a conflict check.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HasConflictResponse {
    /// Whether the candidate interval overlaps an existing booking.
    pub conflict: bool,
}

/// API request to create a booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateBookingRequest {
    /// The booking client.
    pub client_id: i64,
    /// The date of the appointment (`YYYY-MM-DD`).
    pub date: String,
    /// The start time (`HH:MM`).
    pub start_time: String,
    /// The selected services.
    pub service_ids: Vec<i64>,
    /// The requested staff member, or `None` for any.
    pub staff_id: Option<i64>,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

/// API response for a successful booking creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateBookingResponse {
    /// The created booking.
    pub booking: BookingInfo,
    /// A success message.
    pub message: String,
}

/// API request to reschedule an existing booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RescheduleBookingRequest {
    /// The booking to move.
    pub booking_id: i64,
    /// The client making the request; must own the booking.
    pub client_id: i64,
    /// The new date (`YYYY-MM-DD`).
    pub date: String,
    /// The new start time (`HH:MM`).
    pub start_time: String,
    /// The new service selection.
    pub service_ids: Vec<i64>,
    /// The requested staff member, or `None` for any.
    pub staff_id: Option<i64>,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

/// API response for a successful reschedule.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RescheduleBookingResponse {
    /// The booking as it stands after the move.
    pub booking: BookingInfo,
    /// A success message.
    pub message: String,
}

/// API request to cancel a booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CancelBookingRequest {
    /// The booking to cancel.
    pub booking_id: i64,
    /// The client making the request; must own the booking.
    pub client_id: i64,
}

/// API response for a successful cancellation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CancelBookingResponse {
    /// The cancelled booking's ID.
    pub booking_id: i64,
    /// The booking status after cancellation (always `"cancelled"`).
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API response listing a client's booking history.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListClientBookingsResponse {
    /// The queried client.
    pub client_id: i64,
    /// The client's bookings, ordered by date and start time.
    pub bookings: Vec<BookingInfo>,
}

/// Booking information as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingInfo {
    /// The booking's ID.
    pub booking_id: i64,
    /// The staff member performing the appointment.
    pub staff_id: i64,
    /// The booking client.
    pub client_id: i64,
    /// The date of the appointment (`YYYY-MM-DD`).
    pub date: String,
    /// The start time (`HH:MM`).
    pub start_time: String,
    /// The end time (`HH:MM`).
    pub end_time: String,
    /// The booked services.
    pub service_ids: Vec<i64>,
    /// The booking status (`pending`, `confirmed`, `completed`, `cancelled`).
    pub status: String,
    /// Total price (e.g., `"80"` or `"80+"`).
    pub total_price: String,
    /// Total appointment length, in minutes.
    pub total_duration_minutes: u16,
    /// Optional free-text notes.
    pub notes: Option<String>,
}
