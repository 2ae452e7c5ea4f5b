// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and scheduling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Day-of-week index is outside 0 (Sunday) through 6 (Saturday).
    InvalidDayOfWeek {
        /// The invalid index.
        day: u8,
    },
    /// Shift end time is not after its start time.
    InvalidShiftTimes {
        /// The shift start time.
        start: time::Time,
        /// The shift end time.
        end: time::Time,
    },
    /// A booking was submitted with no services selected.
    EmptyServiceSelection,
    /// Service duration is zero or otherwise unusable.
    InvalidDuration {
        /// The invalid duration in minutes.
        minutes: u16,
    },
    /// The requested interval does not fit within a single calendar day.
    IntervalCrossesMidnight {
        /// The requested start time.
        start: time::Time,
        /// The requested duration in minutes.
        duration_minutes: u16,
    },
    /// Booking end time does not equal start time plus total duration.
    InconsistentBookingTimes {
        /// The booking start time.
        start: time::Time,
        /// The booking end time.
        end: time::Time,
        /// The stated total duration in minutes.
        duration_minutes: u16,
    },
    /// Earliest bookable hour is outside 0-23.
    InvalidEarliestHour {
        /// The invalid hour value.
        hour: u8,
    },
    /// Booking status string is not recognized.
    InvalidStatus(String),
    /// The requested status change is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: crate::types::BookingStatus,
        /// The requested status.
        to: crate::types::BookingStatus,
    },
    /// Staff member does not exist in the roster.
    StaffNotFound(i64),
    /// Booking does not exist.
    BookingNotFound(i64),
    /// Staff member is absent on the requested date.
    StaffAbsent {
        /// The staff member's identifier.
        staff_id: i64,
        /// The requested date.
        date: time::Date,
    },
    /// The requested interval falls outside every shift the staff member
    /// works on that day (including days with no shift at all).
    SlotOutsideShift {
        /// The staff member's identifier.
        staff_id: i64,
        /// The requested date.
        date: time::Date,
        /// The requested start time.
        start: time::Time,
    },
    /// The requested start is earlier than the staff member accepts.
    BeforeEarliestBookableHour {
        /// The staff member's identifier.
        staff_id: i64,
        /// The earliest hour this staff member accepts bookings.
        earliest_hour: u8,
    },
    /// Staff member cannot perform one of the requested services.
    MissingCapability {
        /// The staff member's identifier.
        staff_id: i64,
        /// The service the staff member cannot perform.
        service_id: i64,
    },
    /// The requested interval overlaps an existing booking.
    SlotConflict {
        /// The staff member's identifier.
        staff_id: i64,
        /// The requested date.
        date: time::Date,
        /// The requested start time.
        start: time::Time,
    },
    /// No staff member passed every assignment gate.
    NoStaffAvailable {
        /// The requested date.
        date: time::Date,
        /// The requested start time.
        start: time::Time,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDayOfWeek { day } => {
                write!(
                    f,
                    "Invalid day of week: {day}. Must be 0 (Sunday) through 6 (Saturday)"
                )
            }
            Self::InvalidShiftTimes { start, end } => {
                write!(f, "Shift end {end} must be after shift start {start}")
            }
            Self::EmptyServiceSelection => {
                write!(f, "At least one service must be selected")
            }
            Self::InvalidDuration { minutes } => {
                write!(f, "Invalid duration: {minutes} minutes")
            }
            Self::IntervalCrossesMidnight {
                start,
                duration_minutes,
            } => {
                write!(
                    f,
                    "A booking starting at {start} lasting {duration_minutes} minutes would cross midnight"
                )
            }
            Self::InconsistentBookingTimes {
                start,
                end,
                duration_minutes,
            } => {
                write!(
                    f,
                    "Booking times {start}-{end} do not match the stated duration of {duration_minutes} minutes"
                )
            }
            Self::InvalidEarliestHour { hour } => {
                write!(f, "Invalid earliest bookable hour: {hour}. Must be 0-23")
            }
            Self::InvalidStatus(s) => write!(f, "Invalid booking status: {s}"),
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Booking status cannot change from {from} to {to}")
            }
            Self::StaffNotFound(staff_id) => {
                write!(f, "Staff member {staff_id} not found")
            }
            Self::BookingNotFound(booking_id) => {
                write!(f, "Booking {booking_id} not found")
            }
            Self::StaffAbsent { staff_id, date } => {
                write!(f, "Staff member {staff_id} is absent on {date}")
            }
            Self::SlotOutsideShift {
                staff_id,
                date,
                start,
            } => {
                write!(
                    f,
                    "Staff member {staff_id} has no shift covering {start} on {date}"
                )
            }
            Self::BeforeEarliestBookableHour {
                staff_id,
                earliest_hour,
            } => {
                write!(
                    f,
                    "Staff member {staff_id} does not accept bookings before {earliest_hour}:00"
                )
            }
            Self::MissingCapability {
                staff_id,
                service_id,
            } => {
                write!(
                    f,
                    "Staff member {staff_id} cannot perform service {service_id}"
                )
            }
            Self::SlotConflict {
                staff_id,
                date,
                start,
            } => {
                write!(
                    f,
                    "Staff member {staff_id} already has a booking overlapping {start} on {date}"
                )
            }
            Self::NoStaffAvailable { date, start } => {
                write!(f, "No staff member is available at {start} on {date}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
