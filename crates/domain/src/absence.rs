// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Absence registry.
//!
//! Absences are full-day records compared by calendar-date equality,
//! never by timestamp. Lookups are served from a pre-fetched list
//! bounded to a rolling three-month horizon.

use crate::error::DomainError;

/// How far ahead absences are fetched, in calendar months.
pub const ABSENCE_HORIZON_MONTHS: u8 = 3;

/// Returns whether the given date appears in the absence list.
///
/// Comparison is calendar-date equality.
#[must_use]
pub fn is_absent_on(absences: &[time::Date], date: time::Date) -> bool {
    absences.contains(&date)
}

/// Returns the exclusive upper bound of the absence fetch horizon:
/// `today` plus [`ABSENCE_HORIZON_MONTHS`] calendar months, with the
/// day-of-month clamped to the target month's length.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the resulting date
/// cannot be represented.
pub fn absence_horizon_end(today: time::Date) -> Result<time::Date, DomainError> {
    let mut year: i32 = today.year();
    let mut month_number: u8 = today.month() as u8 + ABSENCE_HORIZON_MONTHS;
    if month_number > 12 {
        month_number -= 12;
        year += 1;
    }
    let month: time::Month =
        time::Month::try_from(month_number).map_err(|e| DomainError::DateArithmeticOverflow {
            operation: format!("advancing {today} by {ABSENCE_HORIZON_MONTHS} months: {e}"),
        })?;
    let day: u8 = today.day().min(month.length(year));

    time::Date::from_calendar_date(year, month, day).map_err(|e| {
        DomainError::DateArithmeticOverflow {
            operation: format!("advancing {today} by {ABSENCE_HORIZON_MONTHS} months: {e}"),
        }
    })
}
