// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Candidate slot generation.
//!
//! Slots step every 30 minutes anchored at the shift start, so a shift
//! starting at 09:15 yields 09:15, 09:45, and so on. A slot is emitted
//! while the full service duration still fits before the shift end:
//! `slot start + duration <= shift end`.

use crate::types::{ShiftTemplate, minutes_since_midnight};

/// The spacing between candidate slots, in minutes.
pub const SLOT_STEP_MINUTES: u16 = 30;

/// Generates candidate start times within one shift for a service of
/// the given total duration.
///
/// Returns an empty vector when the duration is zero or the service
/// does not fit in the shift at all.
#[must_use]
pub fn generate_slots(shift: &ShiftTemplate, duration_minutes: u16) -> Vec<time::Time> {
    if duration_minutes == 0 {
        return Vec::new();
    }

    let shift_end: u32 = u32::from(minutes_since_midnight(shift.end_time()));
    let duration: u32 = u32::from(duration_minutes);

    let mut slots: Vec<time::Time> = Vec::new();
    let mut cursor: u32 = u32::from(minutes_since_midnight(shift.start_time()));

    while cursor + duration <= shift_end {
        // cursor stays below 24h because shift_end comes from a Time
        #[allow(clippy::cast_possible_truncation)]
        let (hour, minute) = ((cursor / 60) as u8, (cursor % 60) as u8);
        if let Ok(slot) = time::Time::from_hms(hour, minute, 0) {
            slots.push(slot);
        }
        cursor += u32::from(SLOT_STEP_MINUTES);
    }

    slots
}
