// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff roster and service catalog assembly.
//!
//! The roster loader reconstructs the full in-memory scheduling state for
//! the core engine: each staff member with their weekly shifts, capability
//! set, absences inside the booking horizon, and bookings.
//!
//! Rows that fail to parse are skipped with a warning. One corrupt shift or
//! booking must never take the whole roster offline.

use diesel::prelude::*;
use diesel::SqliteConnection;
use salon_book_domain::{
    Price, Service, ShiftTemplate, StaffMember, absence_horizon_end,
};
use tracing::warn;

use crate::data_models::{
    BookingRow, ServiceRow, ShiftRow, StaffRow, format_date, parse_date, parse_time,
};
use crate::diesel_schema;
use crate::error::PersistenceError;
use crate::queries::bookings::booking_from_row;

/// Loads the service catalog, ordered by service ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_services(conn: &mut SqliteConnection) -> Result<Vec<Service>, PersistenceError> {
    let rows: Vec<ServiceRow> = diesel_schema::services::table
        .order(diesel_schema::services::service_id.asc())
        .load::<ServiceRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load_services: {e}")))?;

    let mut services: Vec<Service> = Vec::with_capacity(rows.len());
    for row in rows {
        match service_from_row(row) {
            Ok(service) => services.push(service),
            Err((service_id, e)) => {
                warn!(service_id, error = %e, "Skipping unparseable service row");
            }
        }
    }

    Ok(services)
}

fn service_from_row(row: ServiceRow) -> Result<Service, (i64, PersistenceError)> {
    let (service_id, name, duration_minutes, regular_price, price_open_ended, discount) = row;

    let convert = || -> Result<Service, PersistenceError> {
        let duration: u16 = u16::try_from(duration_minutes).map_err(|_| {
            PersistenceError::SerializationError(format!(
                "duration_minutes out of range: {duration_minutes}"
            ))
        })?;
        let amount: u32 = u32::try_from(regular_price).map_err(|_| {
            PersistenceError::SerializationError(format!(
                "regular_price out of range: {regular_price}"
            ))
        })?;
        let price: Price = if price_open_ended == 0 {
            Price::Fixed(amount)
        } else {
            Price::OpenEnded(amount)
        };
        let discount: u32 = u32::try_from(discount).map_err(|_| {
            PersistenceError::SerializationError(format!("discount out of range: {discount}"))
        })?;

        Service::with_id(service_id, name, duration, price, discount)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))
    };

    convert().map_err(|e| (service_id, e))
}

/// Loads the full staff roster as of `today`, in roster order.
///
/// Absences are restricted to the booking horizon starting at `today`;
/// anything outside it is irrelevant to slot computation and is not loaded.
/// Bookings are loaded regardless of status so the core engine can
/// distinguish an already-cancelled booking from a missing one.
///
/// # Errors
///
/// Returns an error if a query fails or the horizon cannot be computed.
pub fn load_roster(
    conn: &mut SqliteConnection,
    today: time::Date,
) -> Result<Vec<StaffMember>, PersistenceError> {
    let horizon_end: time::Date =
        absence_horizon_end(today).map_err(|e| PersistenceError::Other(e.to_string()))?;
    let today_text: String = format_date(today)?;
    let horizon_text: String = format_date(horizon_end)?;

    let staff_rows: Vec<StaffRow> = diesel_schema::staff::table
        .order(diesel_schema::staff::roster_order.asc())
        .load::<StaffRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load_roster: staff: {e}")))?;

    let mut roster: Vec<StaffMember> = Vec::with_capacity(staff_rows.len());
    for (staff_id, name, _roster_order, earliest_hour) in staff_rows {
        let shifts: Vec<ShiftTemplate> = load_shifts(conn, staff_id)?;
        let service_ids: Vec<i64> = diesel_schema::staff_services::table
            .filter(diesel_schema::staff_services::staff_id.eq(staff_id))
            .select(diesel_schema::staff_services::service_id)
            .order(diesel_schema::staff_services::service_id.asc())
            .load::<i64>(conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("load_roster: services: {e}")))?;

        let earliest_bookable_hour: Option<u8> = match earliest_hour {
            None => None,
            Some(hour) => match u8::try_from(hour) {
                Ok(hour) => Some(hour),
                Err(_) => {
                    warn!(staff_id, hour, "Skipping staff row with invalid earliest hour");
                    continue;
                }
            },
        };

        let mut member: StaffMember =
            match StaffMember::new(staff_id, name, shifts, service_ids, earliest_bookable_hour) {
                Ok(member) => member,
                Err(e) => {
                    warn!(staff_id, error = %e, "Skipping unparseable staff row");
                    continue;
                }
            };

        member.absences = load_absences(conn, staff_id, &today_text, &horizon_text)?;
        member.bookings = load_staff_bookings(conn, staff_id)?;
        roster.push(member);
    }

    Ok(roster)
}

fn load_shifts(
    conn: &mut SqliteConnection,
    staff_id: i64,
) -> Result<Vec<ShiftTemplate>, PersistenceError> {
    let rows: Vec<ShiftRow> = diesel_schema::staff_shifts::table
        .filter(diesel_schema::staff_shifts::staff_id.eq(staff_id))
        .order(diesel_schema::staff_shifts::shift_id.asc())
        .load::<ShiftRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load_shifts: {e}")))?;

    let mut shifts: Vec<ShiftTemplate> = Vec::with_capacity(rows.len());
    for (shift_id, _staff_id, day_of_week, start_time, end_time) in rows {
        let shift: Result<ShiftTemplate, PersistenceError> = shift_from_parts(
            day_of_week,
            &start_time,
            &end_time,
        );
        match shift {
            Ok(shift) => shifts.push(shift),
            Err(e) => {
                warn!(shift_id, staff_id, error = %e, "Skipping unparseable shift row");
            }
        }
    }

    Ok(shifts)
}

fn shift_from_parts(
    day_of_week: i32,
    start_time: &str,
    end_time: &str,
) -> Result<ShiftTemplate, PersistenceError> {
    let dow: u8 = u8::try_from(day_of_week).map_err(|_| {
        PersistenceError::SerializationError(format!("day_of_week out of range: {day_of_week}"))
    })?;
    let start: time::Time = parse_time(start_time)?;
    let end: time::Time = parse_time(end_time)?;

    ShiftTemplate::new(dow, start, end)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

fn load_absences(
    conn: &mut SqliteConnection,
    staff_id: i64,
    today_text: &str,
    horizon_text: &str,
) -> Result<Vec<time::Date>, PersistenceError> {
    let rows: Vec<String> = diesel_schema::staff_absences::table
        .filter(diesel_schema::staff_absences::staff_id.eq(staff_id))
        .filter(diesel_schema::staff_absences::absence_date.ge(today_text))
        .filter(diesel_schema::staff_absences::absence_date.le(horizon_text))
        .select(diesel_schema::staff_absences::absence_date)
        .order(diesel_schema::staff_absences::absence_date.asc())
        .load::<String>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load_absences: {e}")))?;

    let mut absences: Vec<time::Date> = Vec::with_capacity(rows.len());
    for value in rows {
        match parse_date(&value) {
            Ok(date) => absences.push(date),
            Err(e) => {
                warn!(staff_id, value, error = %e, "Skipping unparseable absence row");
            }
        }
    }

    Ok(absences)
}

fn load_staff_bookings(
    conn: &mut SqliteConnection,
    staff_id: i64,
) -> Result<Vec<salon_book_domain::Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = diesel_schema::bookings::table
        .filter(diesel_schema::bookings::staff_id.eq(staff_id))
        .order(diesel_schema::bookings::booking_id.asc())
        .load::<BookingRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load_staff_bookings: {e}")))?;

    let mut bookings: Vec<salon_book_domain::Booking> = Vec::with_capacity(rows.len());
    for row in &rows {
        match booking_from_row(row) {
            Ok(booking) => bookings.push(booking),
            Err(e) => {
                warn!(booking_id = row.0, staff_id, error = %e, "Skipping unparseable booking row");
            }
        }
    }

    Ok(bookings)
}
