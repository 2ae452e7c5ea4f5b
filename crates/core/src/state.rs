// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use salon_book_audit::{AuditEvent, StateSnapshot};
use salon_book_domain::{Booking, Service, StaffMember};

/// The complete scheduling state the engine operates on.
///
/// Holds the staff roster (with embedded shifts, capabilities,
/// absences, and bookings) and the service catalog. Roster order
/// drives auto-assignment priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// All staff members, in assignment priority order.
    pub roster: Vec<StaffMember>,
    /// The service catalog.
    pub services: Vec<Service>,
}

impl State {
    /// Creates a new state from a roster and service catalog.
    #[must_use]
    pub const fn new(roster: Vec<StaffMember>, services: Vec<Service>) -> Self {
        Self { roster, services }
    }

    /// Looks up a staff member by ID.
    #[must_use]
    pub fn find_staff(&self, staff_id: i64) -> Option<&StaffMember> {
        self.roster.iter().find(|staff| staff.staff_id == staff_id)
    }

    /// Looks up a service by ID.
    #[must_use]
    pub fn find_service(&self, service_id: i64) -> Option<&Service> {
        self.services
            .iter()
            .find(|service| service.service_id == Some(service_id))
    }

    /// Looks up a booking by ID across the whole roster.
    #[must_use]
    pub fn find_booking(&self, booking_id: i64) -> Option<&Booking> {
        self.roster
            .iter()
            .flat_map(|staff| staff.bookings.iter())
            .find(|booking| booking.booking_id == Some(booking_id))
    }

    /// Total bookings across the roster, regardless of status.
    #[must_use]
    pub fn booking_count(&self) -> usize {
        self.roster.iter().map(|staff| staff.bookings.len()).sum()
    }

    /// Summarizes the state for audit purposes. The snapshot carries
    /// roster and booking counts, not the full calendar.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "staff_count={},bookings_count={}",
            self.roster.len(),
            self.booking_count()
        ))
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail
/// without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The booking as it stands after the transition.
    pub booking: Booking,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
