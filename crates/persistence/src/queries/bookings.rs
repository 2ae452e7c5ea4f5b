// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking queries.
//!
//! Times are stored as zero-padded `HH:MM` text, so the half-open overlap
//! predicate (`start < candidate_end AND end > candidate_start`) can be
//! evaluated with plain text comparison in SQL.

use std::str::FromStr;

use diesel::prelude::*;
use diesel::SqliteConnection;
use salon_book_domain::{Booking, BookingStatus, Price};
use tracing::warn;

use crate::data_models::{BookingRow, parse_date, parse_time};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Reconstructs a domain booking from its database row.
///
/// # Errors
///
/// Returns an error if any stored field cannot be parsed back into its
/// domain representation.
pub(crate) fn booking_from_row(row: &BookingRow) -> Result<Booking, PersistenceError> {
    let (
        booking_id,
        staff_id,
        client_id,
        booking_date,
        start_time,
        end_time,
        service_ids_json,
        status,
        total_price,
        price_open_ended,
        total_duration_minutes,
        notes,
        _created_at,
        _cancelled_at,
    ) = row;

    let date: time::Date = parse_date(booking_date)?;
    let start: time::Time = parse_time(start_time)?;
    let end: time::Time = parse_time(end_time)?;
    let service_ids: Vec<i64> = serde_json::from_str(service_ids_json)?;
    let status: BookingStatus = BookingStatus::from_str(status)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    let amount: u32 = u32::try_from(*total_price).map_err(|_| {
        PersistenceError::SerializationError(format!("total_price out of range: {total_price}"))
    })?;
    let price: Price = if *price_open_ended == 0 {
        Price::Fixed(amount)
    } else {
        Price::OpenEnded(amount)
    };
    let duration: u16 = u16::try_from(*total_duration_minutes).map_err(|_| {
        PersistenceError::SerializationError(format!(
            "total_duration_minutes out of range: {total_duration_minutes}"
        ))
    })?;

    Booking::with_id(
        *booking_id,
        *staff_id,
        *client_id,
        date,
        start,
        end,
        service_ids,
        status,
        price,
        duration,
        notes.clone(),
    )
    .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Fetches a single booking by ID.
///
/// # Errors
///
/// Returns `BookingNotFound` if no row exists, or a serialization error
/// if the stored row cannot be reconstructed.
pub fn get_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Booking, PersistenceError> {
    let row: Option<BookingRow> = diesel_schema::bookings::table
        .filter(diesel_schema::bookings::booking_id.eq(booking_id))
        .first::<BookingRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_booking: {e}")))?;

    row.map_or(
        Err(PersistenceError::BookingNotFound(booking_id)),
        |row| booking_from_row(&row),
    )
}

/// Lists all bookings belonging to a client, ordered by date and start time.
///
/// Rows that fail to parse are skipped with a warning so that one corrupt
/// record never hides the rest of the client's history.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_client_bookings(
    conn: &mut SqliteConnection,
    client_id: i64,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = diesel_schema::bookings::table
        .filter(diesel_schema::bookings::client_id.eq(client_id))
        .order((
            diesel_schema::bookings::booking_date.asc(),
            diesel_schema::bookings::start_time.asc(),
        ))
        .load::<BookingRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_client_bookings: {e}")))?;

    let mut bookings: Vec<Booking> = Vec::with_capacity(rows.len());
    for row in &rows {
        match booking_from_row(row) {
            Ok(booking) => bookings.push(booking),
            Err(e) => {
                warn!(booking_id = row.0, error = %e, "Skipping unparseable booking row");
            }
        }
    }

    Ok(bookings)
}

/// Counts bookings that overlap the candidate interval on a given day.
///
/// Cancelled bookings never count, and `exclude_booking_id` lets a
/// reschedule ignore the booking being moved. Used inside the write
/// transaction to close the read-then-write race on slot assignment.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_overlapping(
    conn: &mut SqliteConnection,
    staff_id: i64,
    date: &str,
    start_time: &str,
    end_time: &str,
    exclude_booking_id: Option<i64>,
) -> Result<i64, PersistenceError> {
    let mut query = diesel_schema::bookings::table
        .filter(diesel_schema::bookings::staff_id.eq(staff_id))
        .filter(diesel_schema::bookings::booking_date.eq(date))
        .filter(diesel_schema::bookings::status.ne("cancelled"))
        .filter(diesel_schema::bookings::start_time.lt(end_time))
        .filter(diesel_schema::bookings::end_time.gt(start_time))
        .into_boxed();

    if let Some(excluded) = exclude_booking_id {
        query = query.filter(diesel_schema::bookings::booking_id.ne(excluded));
    }

    query
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_overlapping: {e}")))
}
