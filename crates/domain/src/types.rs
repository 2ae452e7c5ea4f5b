// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Minutes elapsed since midnight for a wall-clock time.
///
/// Slot arithmetic is done in whole minutes; seconds are never used.
#[must_use]
pub const fn minutes_since_midnight(t: time::Time) -> u16 {
    t.hour() as u16 * 60 + t.minute() as u16
}

/// Represents the lifecycle status of a booking.
///
/// Only non-cancelled bookings occupy a time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    /// Initial status after creation or reschedule.
    #[default]
    Pending,
    /// Confirmed by the salon.
    Confirmed,
    /// The appointment took place.
    Completed,
    /// Cancelled by the client or the salon. Frees the slot.
    Cancelled,
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl BookingStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether a booking in this status occupies its time slot.
    #[must_use]
    pub const fn occupies_slot(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Pending → Confirmed, Cancelled
    /// - Confirmed → Completed, Cancelled, Pending (reschedule resets)
    /// - Completed and Cancelled are terminal
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (
                    Self::Confirmed,
                    Self::Completed | Self::Cancelled | Self::Pending
                )
        )
    }
}

/// A price in whole currency units.
///
/// Open-ended prices ("from N") appear on services whose final cost
/// depends on work done in the chair. Summing any open-ended component
/// makes the total open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum Price {
    /// An exact price.
    Fixed(u32),
    /// A starting price; the final amount may be higher.
    OpenEnded(u32),
}

impl Price {
    /// Returns the base amount regardless of open-endedness.
    #[must_use]
    pub const fn base(&self) -> u32 {
        match self {
            Self::Fixed(amount) | Self::OpenEnded(amount) => *amount,
        }
    }

    /// Returns whether this price is open-ended.
    #[must_use]
    pub const fn is_open_ended(&self) -> bool {
        matches!(self, Self::OpenEnded(_))
    }

    /// Adds two prices. The result is open-ended if either operand is.
    #[must_use]
    pub const fn plus(self, other: Self) -> Self {
        let total: u32 = self.base().saturating_add(other.base());
        if self.is_open_ended() || other.is_open_ended() {
            Self::OpenEnded(total)
        } else {
            Self::Fixed(total)
        }
    }

    /// Subtracts a discount from the base amount, saturating at zero.
    /// Open-endedness is preserved.
    #[must_use]
    pub const fn minus_discount(self, discount: u32) -> Self {
        match self {
            Self::Fixed(amount) => Self::Fixed(amount.saturating_sub(discount)),
            Self::OpenEnded(amount) => Self::OpenEnded(amount.saturating_sub(discount)),
        }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(amount) => write!(f, "{amount}"),
            Self::OpenEnded(amount) => write!(f, "{amount}+"),
        }
    }
}

/// A recurring working window on one day of the week.
///
/// A staff member may hold several templates for the same day
/// (split shifts). Times are wall-clock values with no timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    /// Day of week, 0 = Sunday through 6 = Saturday.
    day_of_week: u8,
    /// Shift start time.
    start_time: time::Time,
    /// Shift end time. Always after the start time.
    end_time: time::Time,
}

impl ShiftTemplate {
    /// Creates a new `ShiftTemplate`.
    ///
    /// # Arguments
    ///
    /// * `day_of_week` - Day of week, 0 (Sunday) through 6 (Saturday)
    /// * `start_time` - Shift start time
    /// * `end_time` - Shift end time, must be after the start
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDayOfWeek` if the index exceeds 6, or
    /// `DomainError::InvalidShiftTimes` if the end is not after the start.
    pub fn new(
        day_of_week: u8,
        start_time: time::Time,
        end_time: time::Time,
    ) -> Result<Self, DomainError> {
        if day_of_week > 6 {
            return Err(DomainError::InvalidDayOfWeek { day: day_of_week });
        }
        if end_time <= start_time {
            return Err(DomainError::InvalidShiftTimes {
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            day_of_week,
            start_time,
            end_time,
        })
    }

    /// Returns the day-of-week index (0 = Sunday).
    #[must_use]
    pub const fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    /// Returns the shift start time.
    #[must_use]
    pub const fn start_time(&self) -> time::Time {
        self.start_time
    }

    /// Returns the shift end time.
    #[must_use]
    pub const fn end_time(&self) -> time::Time {
        self.end_time
    }
}

/// A full-day absence for one staff member on one calendar date.
///
/// Absence overrides every shift template for that date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    /// The absent staff member's identifier.
    pub staff_id: i64,
    /// The calendar date of the absence.
    pub date: time::Date,
}

impl Absence {
    /// Creates a new `Absence`.
    #[must_use]
    pub const fn new(staff_id: i64, date: time::Date) -> Self {
        Self { staff_id, date }
    }
}

/// A service offered by the salon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Canonical identifier assigned by the database.
    /// `None` indicates the service has not been persisted yet.
    pub service_id: Option<i64>,
    /// The service name (informational).
    pub name: String,
    /// How long the service takes, in minutes.
    pub duration_minutes: u16,
    /// The undiscounted price.
    pub regular_price: Price,
    /// Discount off the base amount, in whole currency units.
    pub discount: u32,
}

impl Service {
    /// Creates a new `Service` without a persisted ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDuration` if the duration is zero.
    pub fn new(
        name: String,
        duration_minutes: u16,
        regular_price: Price,
        discount: u32,
    ) -> Result<Self, DomainError> {
        if duration_minutes == 0 {
            return Err(DomainError::InvalidDuration { minutes: 0 });
        }
        Ok(Self {
            service_id: None,
            name,
            duration_minutes,
            regular_price,
            discount,
        })
    }

    /// Creates a `Service` with an existing persisted ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDuration` if the duration is zero.
    pub fn with_id(
        service_id: i64,
        name: String,
        duration_minutes: u16,
        regular_price: Price,
        discount: u32,
    ) -> Result<Self, DomainError> {
        let mut service: Self = Self::new(name, duration_minutes, regular_price, discount)?;
        service.service_id = Some(service_id);
        Ok(service)
    }

    /// Returns the price after the discount is applied.
    #[must_use]
    pub const fn effective_price(&self) -> Price {
        self.regular_price.minus_discount(self.discount)
    }
}

/// A booked appointment.
///
/// The interval is half-open: a booking ending at 10:00 does not
/// conflict with one starting at 10:00.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Canonical identifier assigned by the database.
    /// `None` indicates the booking has not been persisted yet.
    pub booking_id: Option<i64>,
    /// The staff member performing the services.
    pub staff_id: i64,
    /// The client who owns this booking.
    pub client_id: i64,
    /// The appointment date.
    pub date: time::Date,
    /// The appointment start time.
    pub start_time: time::Time,
    /// The appointment end time. Equals start plus total duration.
    pub end_time: time::Time,
    /// The selected services, in selection order.
    pub service_ids: Vec<i64>,
    /// The booking lifecycle status.
    pub status: BookingStatus,
    /// Total price across the selected services.
    pub total_price: Price,
    /// Total duration across the selected services, in minutes.
    pub total_duration_minutes: u16,
    /// Optional free-text notes from the client.
    pub notes: Option<String>,
}

impl Booking {
    /// Creates a new `Booking` without a persisted ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InconsistentBookingTimes` if the end time
    /// does not equal the start time plus the total duration, and
    /// `DomainError::EmptyServiceSelection` if no services are given.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        staff_id: i64,
        client_id: i64,
        date: time::Date,
        start_time: time::Time,
        end_time: time::Time,
        service_ids: Vec<i64>,
        status: BookingStatus,
        total_price: Price,
        total_duration_minutes: u16,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        if service_ids.is_empty() {
            return Err(DomainError::EmptyServiceSelection);
        }
        let expected_end: u32 =
            u32::from(minutes_since_midnight(start_time)) + u32::from(total_duration_minutes);
        if u32::from(minutes_since_midnight(end_time)) != expected_end {
            return Err(DomainError::InconsistentBookingTimes {
                start: start_time,
                end: end_time,
                duration_minutes: total_duration_minutes,
            });
        }
        Ok(Self {
            booking_id: None,
            staff_id,
            client_id,
            date,
            start_time,
            end_time,
            service_ids,
            status,
            total_price,
            total_duration_minutes,
            notes,
        })
    }

    /// Creates a `Booking` with an existing persisted ID.
    ///
    /// # Errors
    ///
    /// Same constraints as [`Booking::new`].
    #[allow(clippy::too_many_arguments)]
    pub fn with_id(
        booking_id: i64,
        staff_id: i64,
        client_id: i64,
        date: time::Date,
        start_time: time::Time,
        end_time: time::Time,
        service_ids: Vec<i64>,
        status: BookingStatus,
        total_price: Price,
        total_duration_minutes: u16,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        let mut booking: Self = Self::new(
            staff_id,
            client_id,
            date,
            start_time,
            end_time,
            service_ids,
            status,
            total_price,
            total_duration_minutes,
            notes,
        )?;
        booking.booking_id = Some(booking_id);
        Ok(booking)
    }
}

/// A staff member with everything needed to answer availability
/// questions: shift templates, capabilities, absences, and the
/// non-cancelled bookings already on their calendar.
///
/// Roster position (the order staff are loaded in) drives
/// auto-assignment priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Canonical identifier assigned by the database.
    pub staff_id: i64,
    /// The staff member's display name.
    pub name: String,
    /// Recurring weekly working windows.
    pub shifts: Vec<ShiftTemplate>,
    /// Services this staff member can perform.
    pub service_ids: Vec<i64>,
    /// Dates this staff member is absent, within the fetch horizon.
    pub absences: Vec<time::Date>,
    /// Existing bookings on this staff member's calendar.
    pub bookings: Vec<Booking>,
    /// If set, this staff member accepts no booking starting before
    /// this hour, regardless of shift times.
    pub earliest_bookable_hour: Option<u8>,
}

impl StaffMember {
    /// Creates a new `StaffMember` with an empty calendar.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEarliestHour` if the earliest
    /// bookable hour exceeds 23.
    pub fn new(
        staff_id: i64,
        name: String,
        shifts: Vec<ShiftTemplate>,
        service_ids: Vec<i64>,
        earliest_bookable_hour: Option<u8>,
    ) -> Result<Self, DomainError> {
        if let Some(hour) = earliest_bookable_hour
            && hour > 23
        {
            return Err(DomainError::InvalidEarliestHour { hour });
        }
        Ok(Self {
            staff_id,
            name,
            shifts,
            service_ids,
            absences: Vec::new(),
            bookings: Vec::new(),
            earliest_bookable_hour,
        })
    }

    /// Returns whether this staff member can perform every requested service.
    #[must_use]
    pub fn can_perform_all(&self, requested_service_ids: &[i64]) -> bool {
        requested_service_ids
            .iter()
            .all(|id| self.service_ids.contains(id))
    }
}

/// Identifies which staff member a slot request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffSelector {
    /// A specific staff member chosen by the client.
    Member(i64),
    /// Any staff member; the system assigns one at submission.
    AnyAvailable,
}

/// A transient request for slot availability or booking placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRequest {
    /// The requested appointment date.
    pub date: time::Date,
    /// Total duration of the selected services, in minutes.
    pub duration_minutes: u16,
    /// Which staff member the request targets.
    pub selector: StaffSelector,
    /// The selected services, used for capability filtering.
    pub service_ids: Vec<i64>,
}

impl SlotRequest {
    /// Creates a new `SlotRequest`.
    #[must_use]
    pub const fn new(
        date: time::Date,
        duration_minutes: u16,
        selector: StaffSelector,
        service_ids: Vec<i64>,
    ) -> Self {
        Self {
            date,
            duration_minutes,
            selector,
            service_ids,
        }
    }
}
