// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Serializable data models and text codecs for database persistence.
//!
//! The audit structs mirror the domain types in `salon-book-audit` but are
//! kept separate so the database representation can evolve independently.
//!
//! Dates and times are stored as ISO 8601 text. The formats here must stay
//! in sync with the schema comments in `diesel_schema`.

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::PersistenceError;

/// Serializable representation of an audit actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of an audit cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an audit action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a state snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// Row tuple for the `staff` table.
pub type StaffRow = (i64, String, i64, Option<i32>);

/// Row tuple for the `services` table.
pub type ServiceRow = (i64, String, i32, i64, i32, i64);

/// Row tuple for the `staff_shifts` table.
pub type ShiftRow = (i64, i64, i32, String, String);

/// Row tuple for the `bookings` table.
pub type BookingRow = (
    i64,            // booking_id
    i64,            // staff_id
    i64,            // client_id
    String,         // booking_date
    String,         // start_time
    String,         // end_time
    String,         // service_ids_json
    String,         // status
    i64,            // total_price
    i32,            // price_open_ended
    i32,            // total_duration_minutes
    Option<String>, // notes
    String,         // created_at
    Option<String>, // cancelled_at
);

/// Row tuple for the `audit_events` table.
pub type AuditEventRow = (i64, String, String, String, String, String, String);

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");
const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Formats a civil date as `YYYY-MM-DD` text.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn format_date(date: time::Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("format_date: {e}")))
}

/// Parses a `YYYY-MM-DD` text value into a civil date.
///
/// # Errors
///
/// Returns an error if the value does not match the expected format.
pub fn parse_date(value: &str) -> Result<time::Date, PersistenceError> {
    time::Date::parse(value, DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("parse_date({value}): {e}")))
}

/// Formats a time of day as zero-padded `HH:MM` text.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn format_time(t: time::Time) -> Result<String, PersistenceError> {
    t.format(TIME_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("format_time: {e}")))
}

/// Parses `HH:MM` text into a time of day.
///
/// # Errors
///
/// Returns an error if the value does not match the expected format.
pub fn parse_time(value: &str) -> Result<time::Time, PersistenceError> {
    time::Time::parse(value, TIME_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("parse_time({value}): {e}")))
}

/// Formats a civil datetime as `YYYY-MM-DD HH:MM:SS` text.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn format_datetime(dt: time::PrimitiveDateTime) -> Result<String, PersistenceError> {
    dt.format(DATETIME_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("format_datetime: {e}")))
}
