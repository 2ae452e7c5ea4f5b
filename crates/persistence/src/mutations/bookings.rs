// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking mutations.
//!
//! These functions are meant to run inside the immediate transaction opened
//! by the `Persistence` adapter, together with `ensure_slot_free`. The
//! re-check plus write inside one transaction is what closes the window
//! where two clients could claim the same slot.

use diesel::prelude::*;
use diesel::SqliteConnection;
use salon_book_domain::{Booking, Price};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{format_date, format_time};
use crate::diesel_schema;
use crate::error::PersistenceError;
use crate::queries::bookings::count_overlapping;

/// Verifies that no non-cancelled booking overlaps the candidate interval.
///
/// # Errors
///
/// Returns `BookingConflict` if another booking occupies the slot.
pub fn ensure_slot_free(
    conn: &mut SqliteConnection,
    staff_id: i64,
    date: &str,
    start_time: &str,
    end_time: &str,
    exclude_booking_id: Option<i64>,
) -> Result<(), PersistenceError> {
    let overlapping: i64 =
        count_overlapping(conn, staff_id, date, start_time, end_time, exclude_booking_id)?;

    if overlapping > 0 {
        return Err(PersistenceError::BookingConflict {
            staff_id,
            date: date.to_string(),
            start_time: start_time.to_string(),
        });
    }

    Ok(())
}

fn price_columns(price: Price) -> (i64, i32) {
    match price {
        Price::Fixed(amount) => (i64::from(amount), 0),
        Price::OpenEnded(amount) => (i64::from(amount), 1),
    }
}

/// Inserts a new booking row and returns the assigned ID.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_booking(
    conn: &mut SqliteConnection,
    booking: &Booking,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let date_text: String = format_date(booking.date)?;
    let start_text: String = format_time(booking.start_time)?;
    let end_text: String = format_time(booking.end_time)?;
    let service_ids_json: String = serde_json::to_string(&booking.service_ids)?;
    let (total_price, price_open_ended): (i64, i32) = price_columns(booking.total_price);

    diesel::insert_into(diesel_schema::bookings::table)
        .values((
            diesel_schema::bookings::staff_id.eq(booking.staff_id),
            diesel_schema::bookings::client_id.eq(booking.client_id),
            diesel_schema::bookings::booking_date.eq(date_text),
            diesel_schema::bookings::start_time.eq(start_text),
            diesel_schema::bookings::end_time.eq(end_text),
            diesel_schema::bookings::service_ids_json.eq(service_ids_json),
            diesel_schema::bookings::status.eq(booking.status.as_str()),
            diesel_schema::bookings::total_price.eq(total_price),
            diesel_schema::bookings::price_open_ended.eq(price_open_ended),
            diesel_schema::bookings::total_duration_minutes
                .eq(i32::from(booking.total_duration_minutes)),
            diesel_schema::bookings::notes.eq(booking.notes.as_deref()),
            diesel_schema::bookings::created_at.eq(created_at),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Rewrites an existing booking row in place, used for reschedules.
///
/// The status column is rewritten too, so a reschedule that resets the
/// booking to pending lands atomically with the new interval.
///
/// # Errors
///
/// Returns `BookingNotFound` if the row does not exist.
pub fn update_booking(
    conn: &mut SqliteConnection,
    booking: &Booking,
) -> Result<(), PersistenceError> {
    let booking_id: i64 = booking
        .booking_id
        .ok_or_else(|| PersistenceError::Other(String::from("update_booking: booking has no id")))?;

    let date_text: String = format_date(booking.date)?;
    let start_text: String = format_time(booking.start_time)?;
    let end_text: String = format_time(booking.end_time)?;
    let service_ids_json: String = serde_json::to_string(&booking.service_ids)?;
    let (total_price, price_open_ended): (i64, i32) = price_columns(booking.total_price);

    let updated: usize = diesel::update(
        diesel_schema::bookings::table.filter(diesel_schema::bookings::booking_id.eq(booking_id)),
    )
    .set((
        diesel_schema::bookings::staff_id.eq(booking.staff_id),
        diesel_schema::bookings::booking_date.eq(date_text),
        diesel_schema::bookings::start_time.eq(start_text),
        diesel_schema::bookings::end_time.eq(end_text),
        diesel_schema::bookings::service_ids_json.eq(service_ids_json),
        diesel_schema::bookings::status.eq(booking.status.as_str()),
        diesel_schema::bookings::total_price.eq(total_price),
        diesel_schema::bookings::price_open_ended.eq(price_open_ended),
        diesel_schema::bookings::total_duration_minutes
            .eq(i32::from(booking.total_duration_minutes)),
        diesel_schema::bookings::notes.eq(booking.notes.as_deref()),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::BookingNotFound(booking_id));
    }

    Ok(())
}

/// Marks a booking as cancelled, recording the cancellation timestamp.
///
/// The row is kept as a soft-cancelled record for the client's history
/// and the audit trail.
///
/// # Errors
///
/// Returns `BookingNotFound` if the row does not exist.
pub fn mark_booking_cancelled(
    conn: &mut SqliteConnection,
    booking_id: i64,
    cancelled_at: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        diesel_schema::bookings::table.filter(diesel_schema::bookings::booking_id.eq(booking_id)),
    )
    .set((
        diesel_schema::bookings::status.eq("cancelled"),
        diesel_schema::bookings::cancelled_at.eq(cancelled_at),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::BookingNotFound(booking_id));
    }

    Ok(())
}
