// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift calendar lookups.
//!
//! Shift templates are weekly recurring windows keyed by day-of-week
//! (0 = Sunday through 6 = Saturday). A staff member may hold several
//! templates for the same day; a day with no template simply means
//! the staff member does not work that day.

use crate::types::{ShiftTemplate, minutes_since_midnight};

/// Returns the day-of-week index for a calendar date (0 = Sunday).
#[must_use]
pub fn weekday_index(date: time::Date) -> u8 {
    date.weekday().number_days_from_sunday()
}

/// Returns the shift templates covering a given day of week.
///
/// An empty result means the staff member does not work that day.
/// This is an ordinary outcome, not an error.
#[must_use]
pub fn shifts_for_weekday(shifts: &[ShiftTemplate], day_of_week: u8) -> Vec<&ShiftTemplate> {
    shifts
        .iter()
        .filter(|shift| shift.day_of_week() == day_of_week)
        .collect()
}

/// Returns whether an interval fits entirely within a shift window.
///
/// The interval must start at or after the shift start and end at or
/// before the shift end.
#[must_use]
pub fn interval_fits_shift(shift: &ShiftTemplate, start: time::Time, duration_minutes: u16) -> bool {
    let start_minutes: u32 = u32::from(minutes_since_midnight(start));
    let end_minutes: u32 = start_minutes + u32::from(duration_minutes);

    start_minutes >= u32::from(minutes_since_midnight(shift.start_time()))
        && end_minutes <= u32::from(minutes_since_midnight(shift.end_time()))
}
