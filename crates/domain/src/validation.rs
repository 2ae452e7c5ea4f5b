// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::minutes_since_midnight;

/// Minutes in a day; intervals must end at or before midnight.
const MINUTES_PER_DAY: u32 = 24 * 60;

/// Validates that at least one service was selected.
///
/// # Errors
///
/// Returns `DomainError::EmptyServiceSelection` for an empty selection.
pub const fn validate_service_selection(service_ids: &[i64]) -> Result<(), DomainError> {
    if service_ids.is_empty() {
        return Err(DomainError::EmptyServiceSelection);
    }
    Ok(())
}

/// Validates that a total duration is usable.
///
/// # Errors
///
/// Returns `DomainError::InvalidDuration` if the duration is zero.
pub const fn validate_duration(duration_minutes: u16) -> Result<(), DomainError> {
    if duration_minutes == 0 {
        return Err(DomainError::InvalidDuration {
            minutes: duration_minutes,
        });
    }
    Ok(())
}

/// Validates that an appointment interval stays within one calendar day.
///
/// # Errors
///
/// Returns `DomainError::IntervalCrossesMidnight` if the start plus the
/// duration passes midnight.
pub fn validate_interval(start: time::Time, duration_minutes: u16) -> Result<(), DomainError> {
    let end: u32 = u32::from(minutes_since_midnight(start)) + u32::from(duration_minutes);
    if end > MINUTES_PER_DAY {
        return Err(DomainError::IntervalCrossesMidnight {
            start,
            duration_minutes,
        });
    }
    Ok(())
}

/// Validates a complete booking submission: services, duration, and
/// interval bounds.
///
/// # Errors
///
/// Returns the first violated constraint.
pub fn validate_booking_fields(
    service_ids: &[i64],
    start: time::Time,
    duration_minutes: u16,
) -> Result<(), DomainError> {
    validate_service_selection(service_ids)?;
    validate_duration(duration_minutes)?;
    validate_interval(start, duration_minutes)?;
    Ok(())
}
