// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for the persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `audit` - Audit event timeline queries
//! - `bookings` - Booking lookups and the overlap count used by the
//!   transactional conflict guard
//! - `roster` - Staff roster and service catalog assembly

pub mod audit;
pub mod bookings;
pub mod roster;

pub use audit::get_audit_timeline;
pub use bookings::{count_overlapping, get_booking, list_client_bookings};
pub use roster::{load_roster, load_services};
