// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the salon booking engine.
//!
//! This crate stores the staff roster, service catalog, bookings, and the
//! audit trail in `SQLite` via Diesel, and reconstructs the in-memory
//! scheduling state the core engine works on.
//!
//! ## Write path
//!
//! The core engine decides on a snapshot of state that may be stale by the
//! time the write lands. To keep double bookings out of the database, every
//! booking write runs inside a single `SQLite` immediate transaction that
//! re-checks the slot overlap before inserting or updating. A competing
//! write that claimed the slot first surfaces as
//! [`PersistenceError::BookingConflict`].
//!
//! ## Testing
//!
//! Tests run against unique shared in-memory databases so they are fast,
//! deterministic, and isolated. File-based databases get WAL mode for
//! better read concurrency.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::{Connection, SqliteConnection};
use salon_book::{State, TransitionResult};
use salon_book_audit::AuditEvent;
use salon_book_domain::{Booking, BookingStatus, Service, ShiftTemplate, StaffMember};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use data_models::{format_date, format_datetime, format_time};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the booking engine.
///
/// Owns the database connection and exposes one method per operation the
/// rest of the system needs. Callers never see Diesel types.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared in-memory database name per call so tests are isolated.
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// Enables WAL mode for better read concurrency.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_with_file(path: &Path) -> Result<Self, PersistenceError> {
        let database_url: String = path.to_string_lossy().into_owned();

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&database_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    /// Adds a staff member to the roster and returns the assigned ID.
    ///
    /// Roster order determines the walk order of the auto-assigner.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_staff_member(
        &mut self,
        name: &str,
        roster_order: i64,
        earliest_bookable_hour: Option<u8>,
    ) -> Result<i64, PersistenceError> {
        mutations::insert_staff(&mut self.conn, name, roster_order, earliest_bookable_hour)
    }

    /// Adds a service to the catalog and returns the assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_service(&mut self, service: &Service) -> Result<i64, PersistenceError> {
        mutations::insert_service(&mut self.conn, service)
    }

    /// Adds a weekly shift to a staff member's calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_shift(
        &mut self,
        staff_id: i64,
        shift: &ShiftTemplate,
    ) -> Result<(), PersistenceError> {
        mutations::insert_shift(&mut self.conn, staff_id, shift)
    }

    /// Grants a staff member the capability to perform a service.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn grant_capability(
        &mut self,
        staff_id: i64,
        service_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::insert_staff_service(&mut self.conn, staff_id, service_id)
    }

    /// Records a calendar-date absence for a staff member.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_absence(&mut self, staff_id: i64, date: time::Date) -> Result<(), PersistenceError> {
        mutations::insert_absence(&mut self.conn, staff_id, date)
    }

    /// Loads the full scheduling state as of `today`.
    ///
    /// Absences are restricted to the booking horizon starting at `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn load_state(&mut self, today: time::Date) -> Result<State, PersistenceError> {
        let roster: Vec<StaffMember> = queries::load_roster(&mut self.conn, today)?;
        let services: Vec<Service> = queries::load_services(&mut self.conn)?;
        Ok(State::new(roster, services))
    }

    /// Persists a state transition decided by the core engine.
    ///
    /// Dispatches on the booking carried by the transition:
    /// - no ID yet: a new booking is inserted
    /// - existing ID, cancelled: the row is soft-cancelled
    /// - existing ID, otherwise: the row is rewritten (reschedule)
    ///
    /// The slot overlap is re-checked and the write applied inside one
    /// immediate transaction, together with the audit event. Returns the
    /// booking ID.
    ///
    /// # Errors
    ///
    /// Returns `BookingConflict` if a competing write claimed the slot
    /// first, or an error if serialization or a write fails.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
        now: time::PrimitiveDateTime,
    ) -> Result<i64, PersistenceError> {
        let booking: &Booking = &result.booking;
        let audit_event: &AuditEvent = &result.audit_event;
        let timestamp: String = format_datetime(now)?;
        let date_text: String = format_date(booking.date)?;
        let start_text: String = format_time(booking.start_time)?;
        let end_text: String = format_time(booking.end_time)?;

        match booking.booking_id {
            None => self.conn.immediate_transaction(|conn| {
                mutations::ensure_slot_free(
                    conn,
                    booking.staff_id,
                    &date_text,
                    &start_text,
                    &end_text,
                    None,
                )?;
                let booking_id: i64 = mutations::insert_booking(conn, booking, &timestamp)?;
                mutations::persist_audit_event(conn, audit_event, &timestamp)?;
                Ok(booking_id)
            }),
            Some(booking_id) if booking.status == BookingStatus::Cancelled => {
                self.conn.immediate_transaction(|conn| {
                    mutations::mark_booking_cancelled(conn, booking_id, &timestamp)?;
                    mutations::persist_audit_event(conn, audit_event, &timestamp)?;
                    Ok(booking_id)
                })
            }
            Some(booking_id) => self.conn.immediate_transaction(|conn| {
                mutations::ensure_slot_free(
                    conn,
                    booking.staff_id,
                    &date_text,
                    &start_text,
                    &end_text,
                    Some(booking_id),
                )?;
                mutations::update_booking(conn, booking)?;
                mutations::persist_audit_event(conn, audit_event, &timestamp)?;
                Ok(booking_id)
            }),
        }
    }

    /// Fetches a single booking by ID.
    ///
    /// # Errors
    ///
    /// Returns `BookingNotFound` if no such booking exists.
    pub fn get_booking(&mut self, booking_id: i64) -> Result<Booking, PersistenceError> {
        queries::get_booking(&mut self.conn, booking_id)
    }

    /// Lists all bookings belonging to a client, ordered by date and start.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_client_bookings(
        &mut self,
        client_id: i64,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::list_client_bookings(&mut self.conn, client_id)
    }

    /// Returns the full audit timeline in insertion order, with event IDs.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or an event cannot be deserialized.
    pub fn get_audit_timeline(&mut self) -> Result<Vec<(i64, AuditEvent)>, PersistenceError> {
        queries::get_audit_timeline(&mut self.conn)
    }
}
