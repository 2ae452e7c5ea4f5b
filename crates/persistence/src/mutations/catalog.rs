// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff, shift, service, capability, and absence mutations.
//!
//! These back the operator-facing catalog management: building the roster
//! and service list that the booking engine schedules against.

use diesel::prelude::*;
use diesel::SqliteConnection;
use salon_book_domain::{Price, Service, ShiftTemplate};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{format_date, format_time};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Inserts a staff member and returns the assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_staff(
    conn: &mut SqliteConnection,
    name: &str,
    roster_order: i64,
    earliest_bookable_hour: Option<u8>,
) -> Result<i64, PersistenceError> {
    let earliest: Option<i32> = earliest_bookable_hour.map(i32::from);

    diesel::insert_into(diesel_schema::staff::table)
        .values((
            diesel_schema::staff::name.eq(name),
            diesel_schema::staff::roster_order.eq(roster_order),
            diesel_schema::staff::earliest_bookable_hour.eq(earliest),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Inserts a service and returns the assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_service(
    conn: &mut SqliteConnection,
    service: &Service,
) -> Result<i64, PersistenceError> {
    let (regular_price, price_open_ended): (i64, i32) = match service.regular_price {
        Price::Fixed(amount) => (i64::from(amount), 0),
        Price::OpenEnded(amount) => (i64::from(amount), 1),
    };

    diesel::insert_into(diesel_schema::services::table)
        .values((
            diesel_schema::services::name.eq(&service.name),
            diesel_schema::services::duration_minutes.eq(i32::from(service.duration_minutes)),
            diesel_schema::services::regular_price.eq(regular_price),
            diesel_schema::services::price_open_ended.eq(price_open_ended),
            diesel_schema::services::discount.eq(i64::from(service.discount)),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Inserts a weekly shift for a staff member.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_shift(
    conn: &mut SqliteConnection,
    staff_id: i64,
    shift: &ShiftTemplate,
) -> Result<(), PersistenceError> {
    let start_text: String = format_time(shift.start_time())?;
    let end_text: String = format_time(shift.end_time())?;

    diesel::insert_into(diesel_schema::staff_shifts::table)
        .values((
            diesel_schema::staff_shifts::staff_id.eq(staff_id),
            diesel_schema::staff_shifts::day_of_week.eq(i32::from(shift.day_of_week())),
            diesel_schema::staff_shifts::start_time.eq(start_text),
            diesel_schema::staff_shifts::end_time.eq(end_text),
        ))
        .execute(conn)?;

    Ok(())
}

/// Grants a staff member the capability to perform a service.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_staff_service(
    conn: &mut SqliteConnection,
    staff_id: i64,
    service_id: i64,
) -> Result<(), PersistenceError> {
    diesel::insert_into(diesel_schema::staff_services::table)
        .values((
            diesel_schema::staff_services::staff_id.eq(staff_id),
            diesel_schema::staff_services::service_id.eq(service_id),
        ))
        .execute(conn)?;

    Ok(())
}

/// Records a calendar-date absence for a staff member.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_absence(
    conn: &mut SqliteConnection,
    staff_id: i64,
    date: time::Date,
) -> Result<(), PersistenceError> {
    let date_text: String = format_date(date)?;

    diesel::insert_into(diesel_schema::staff_absences::table)
        .values((
            diesel_schema::staff_absences::staff_id.eq(staff_id),
            diesel_schema::staff_absences::absence_date.eq(date_text),
        ))
        .execute(conn)?;

    Ok(())
}
