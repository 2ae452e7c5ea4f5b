// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use salon_book_domain::StaffSelector;

/// A command represents client or system intent as data only.
///
/// Commands are the only way to request booking state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new booking.
    CreateBooking {
        /// The client placing the booking.
        client_id: i64,
        /// The requested appointment date.
        date: time::Date,
        /// The requested start time.
        start_time: time::Time,
        /// The staff member, or any available.
        selector: StaffSelector,
        /// The selected services, in selection order.
        service_ids: Vec<i64>,
        /// Optional free-text notes.
        notes: Option<String>,
    },
    /// Move an existing booking to a new date, time, or service set.
    /// Resets the booking status to pending.
    RescheduleBooking {
        /// The booking to reschedule.
        booking_id: i64,
        /// The client requesting the change. Must own the booking.
        client_id: i64,
        /// The new appointment date.
        date: time::Date,
        /// The new start time.
        start_time: time::Time,
        /// The staff member, or any available.
        selector: StaffSelector,
        /// The new service selection.
        service_ids: Vec<i64>,
        /// Replacement notes, if any.
        notes: Option<String>,
    },
    /// Cancel an existing booking, freeing its slot.
    CancelBooking {
        /// The booking to cancel.
        booking_id: i64,
        /// The client requesting the cancellation. Must own the booking.
        client_id: i64,
    },
}
