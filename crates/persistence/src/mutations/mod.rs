// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for the persistence layer.
//!
//! This module contains all state-changing operations. Mutations use Diesel
//! DSL, with the `last_insert_rowid()` helper imported from the `backend`
//! module where an inserted ID is needed.
//!
//! ## Module Organization
//!
//! - `audit` - Audit event persistence
//! - `bookings` - Booking writes and the transactional conflict guard
//! - `catalog` - Staff, shift, service, capability, and absence seeding

pub mod audit;
pub mod bookings;
pub mod catalog;

pub use audit::persist_audit_event;
pub use bookings::{ensure_slot_free, insert_booking, mark_booking_cancelled, update_booking};
pub use catalog::{
    insert_absence, insert_service, insert_shift, insert_staff, insert_staff_service,
};
