// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use salon_book_domain::DomainError;

/// Why a booking mutation was refused on permission grounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionReason {
    /// The booking belongs to a different client.
    NotOwner,
    /// The booking is already cancelled.
    AlreadyCancelled,
    /// The booking start is already in the past.
    InPast,
    /// The booking starts too soon to be changed.
    TooCloseToStart {
        /// Whole hours remaining until the booking starts.
        hours_remaining: i64,
    },
}

impl std::fmt::Display for PermissionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotOwner => write!(f, "the booking belongs to another client"),
            Self::AlreadyCancelled => write!(f, "the booking is already cancelled"),
            Self::InPast => write!(f, "the booking is in the past"),
            Self::TooCloseToStart { hours_remaining } => {
                write!(
                    f,
                    "the booking starts in {hours_remaining} hours; changes require more notice"
                )
            }
        }
    }
}

/// Errors that can occur during booking state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The requester is not allowed to perform this change.
    PermissionDenied(PermissionReason),
    /// A selected service does not exist.
    ServiceNotFound(i64),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::PermissionDenied(reason) => write!(f, "Permission denied: {reason}"),
            Self::ServiceNotFound(service_id) => write!(f, "Service {service_id} not found"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
