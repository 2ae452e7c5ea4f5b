// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use salon_book::{CoreError, PermissionReason};
use salon_book_domain::DomainError;
use salon_book_persistence::PersistenceError;

use crate::booking_policy::BookingPolicyError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The client is not permitted to perform this action.
    PermissionDenied {
        /// A human-readable description of why the action is denied.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::PermissionDenied { message } => {
                write!(f, "Permission denied: {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<BookingPolicyError> for ApiError {
    fn from(err: BookingPolicyError) -> Self {
        let field: &str = match err {
            BookingPolicyError::NonPositiveClientId => "client_id",
            BookingPolicyError::NoServicesSelected | BookingPolicyError::DuplicateService { .. } => {
                "service_ids"
            }
            BookingPolicyError::NotesTooLong { .. } => "notes",
        };
        Self::InvalidInput {
            field: String::from(field),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidDayOfWeek { day } => ApiError::InvalidInput {
            field: String::from("day_of_week"),
            message: format!("Invalid day of week: {day}. Must be 0 (Sunday) through 6 (Saturday)"),
        },
        DomainError::InvalidShiftTimes { start, end } => ApiError::InvalidInput {
            field: String::from("shift"),
            message: format!("Shift must end after it starts: {start} >= {end}"),
        },
        DomainError::EmptyServiceSelection => ApiError::InvalidInput {
            field: String::from("service_ids"),
            message: String::from("At least one service must be selected"),
        },
        DomainError::InvalidDuration { minutes } => ApiError::InvalidInput {
            field: String::from("duration_minutes"),
            message: format!("Invalid duration: {minutes} minutes"),
        },
        DomainError::IntervalCrossesMidnight {
            start,
            duration_minutes,
        } => ApiError::InvalidInput {
            field: String::from("start_time"),
            message: format!(
                "A {duration_minutes} minute appointment starting at {start} would cross midnight"
            ),
        },
        DomainError::InconsistentBookingTimes { .. } => ApiError::Internal {
            message: String::from("Booking interval does not match its duration"),
        },
        DomainError::InvalidEarliestHour { hour } => ApiError::InvalidInput {
            field: String::from("earliest_bookable_hour"),
            message: format!("Invalid earliest bookable hour: {hour}"),
        },
        DomainError::InvalidStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown booking status: '{value}'"),
        },
        DomainError::InvalidStatusTransition { from, to } => ApiError::DomainRuleViolation {
            rule: String::from("status_transition"),
            message: format!("A {from} booking cannot become {to}"),
        },
        DomainError::StaffNotFound(staff_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Staff member"),
            message: format!("Staff member {staff_id} does not exist"),
        },
        DomainError::BookingNotFound(booking_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking {booking_id} does not exist"),
        },
        DomainError::StaffAbsent { staff_id, date } => ApiError::DomainRuleViolation {
            rule: String::from("staff_absent"),
            message: format!("Staff member {staff_id} is absent on {date}"),
        },
        DomainError::SlotOutsideShift {
            staff_id,
            date,
            start,
        } => ApiError::DomainRuleViolation {
            rule: String::from("slot_outside_shift"),
            message: format!(
                "Staff member {staff_id} does not work at {start} on {date}"
            ),
        },
        DomainError::BeforeEarliestBookableHour {
            staff_id,
            earliest_hour,
        } => ApiError::DomainRuleViolation {
            rule: String::from("earliest_bookable_hour"),
            message: format!(
                "Staff member {staff_id} only takes bookings from {earliest_hour}:00"
            ),
        },
        DomainError::MissingCapability {
            staff_id,
            service_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("staff_capability"),
            message: format!("Staff member {staff_id} does not perform service {service_id}"),
        },
        DomainError::SlotConflict { date, start, .. } => ApiError::DomainRuleViolation {
            rule: String::from("slot_conflict"),
            message: format!("The slot on {date} at {start} is no longer available"),
        },
        DomainError::NoStaffAvailable { date, start } => ApiError::DomainRuleViolation {
            rule: String::from("no_staff_available"),
            message: format!("No staff member is available on {date} at {start}"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::PermissionDenied(reason) => {
            let message: String = match &reason {
                PermissionReason::TooCloseToStart { hours_remaining } => format!(
                    "Bookings can only be changed at least 24 hours in advance \
                     ({hours_remaining} hours remain)"
                ),
                other => other.to_string(),
            };
            ApiError::PermissionDenied { message }
        }
        CoreError::ServiceNotFound(service_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Service"),
            message: format!("Service {service_id} does not exist"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Slot conflicts and missing bookings map to their API equivalents.
/// Everything else is a storage fault; the details are logged here and a
/// generic internal error is returned so database internals never reach
/// clients.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::BookingConflict {
            date, start_time, ..
        } => ApiError::DomainRuleViolation {
            rule: String::from("slot_conflict"),
            message: format!("The slot on {date} at {start_time} was just booked"),
        },
        PersistenceError::BookingNotFound(booking_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking {booking_id} does not exist"),
        },
        other => {
            tracing::error!(error = %other, "Persistence failure");
            ApiError::Internal {
                message: String::from("A storage error occurred"),
            }
        }
    }
}
