// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod absence;
mod assignment;
mod availability;
mod conflict;
mod error;
mod pricing;
mod shift;
mod slots;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use absence::{ABSENCE_HORIZON_MONTHS, absence_horizon_end, is_absent_on};
pub use assignment::{AssignmentRequest, assign_staff};
pub use availability::{
    available_slots, available_slots_any, available_slots_for_staff, is_date_selectable,
};
pub use conflict::{has_conflict, overlaps};
pub use pricing::{BookingTotals, calculate_totals};
pub use shift::{interval_fits_shift, shifts_for_weekday, weekday_index};
pub use slots::{SLOT_STEP_MINUTES, generate_slots};

// Re-export public types
pub use error::DomainError;
pub use types::{
    Absence, Booking, BookingStatus, Price, Service, ShiftTemplate, SlotRequest, StaffMember,
    StaffSelector, minutes_since_midnight,
};
pub use validation::{
    validate_booking_fields, validate_duration, validate_interval, validate_service_selection,
};
