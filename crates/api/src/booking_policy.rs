// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request-level booking policy validation.
//!
//! These checks apply to the shape of incoming requests, before any state
//! is loaded. Scheduling rules (shifts, conflicts, lead time) live in the
//! domain and core crates; this module only rejects requests that are
//! malformed regardless of state.

use thiserror::Error;

/// Maximum length of the free-text notes field, in characters.
pub const MAX_NOTES_LENGTH: usize = 500;

/// Booking request policy violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingPolicyError {
    /// Client IDs are positive integers.
    #[error("Client ID must be a positive integer")]
    NonPositiveClientId,
    /// A booking must cover at least one service.
    #[error("At least one service must be selected")]
    NoServicesSelected,
    /// The same service cannot be selected twice.
    #[error("Service {service_id} is selected more than once")]
    DuplicateService {
        /// The duplicated service ID.
        service_id: i64,
    },
    /// Notes are capped to keep rows bounded.
    #[error("Notes are limited to 500 characters, got {length}")]
    NotesTooLong {
        /// The length of the rejected notes value.
        length: usize,
    },
}

/// Policy checks for incoming booking requests.
pub struct BookingPolicy;

impl BookingPolicy {
    /// Validates a client identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is zero or negative.
    pub const fn validate_client_id(client_id: i64) -> Result<(), BookingPolicyError> {
        if client_id <= 0 {
            return Err(BookingPolicyError::NonPositiveClientId);
        }
        Ok(())
    }

    /// Validates a service selection: non-empty and free of duplicates.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection is empty or contains a duplicate.
    pub fn validate_services(service_ids: &[i64]) -> Result<(), BookingPolicyError> {
        if service_ids.is_empty() {
            return Err(BookingPolicyError::NoServicesSelected);
        }
        for (index, service_id) in service_ids.iter().enumerate() {
            if service_ids[..index].contains(service_id) {
                return Err(BookingPolicyError::DuplicateService {
                    service_id: *service_id,
                });
            }
        }
        Ok(())
    }

    /// Validates the optional notes field.
    ///
    /// # Errors
    ///
    /// Returns an error if the notes exceed [`MAX_NOTES_LENGTH`] characters.
    pub fn validate_notes(notes: Option<&str>) -> Result<(), BookingPolicyError> {
        if let Some(notes) = notes {
            let length: usize = notes.chars().count();
            if length > MAX_NOTES_LENGTH {
                return Err(BookingPolicyError::NotesTooLong { length });
            }
        }
        Ok(())
    }

    /// Validates everything a booking request carries.
    ///
    /// # Errors
    ///
    /// Returns the first policy violation found.
    pub fn validate_booking_request(
        client_id: i64,
        service_ids: &[i64],
        notes: Option<&str>,
    ) -> Result<(), BookingPolicyError> {
        Self::validate_client_id(client_id)?;
        Self::validate_services(service_ids)?;
        Self::validate_notes(notes)?;
        Ok(())
    }
}
