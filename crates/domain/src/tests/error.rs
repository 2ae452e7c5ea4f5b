// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BookingStatus, DomainError};

fn hm(hour: u8, minute: u8) -> time::Time {
    time::Time::from_hms(hour, minute, 0).unwrap()
}

fn test_date() -> time::Date {
    time::Date::from_calendar_date(2026, time::Month::March, 2).unwrap()
}

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidDayOfWeek { day: 9 };
    assert_eq!(
        format!("{err}"),
        "Invalid day of week: 9. Must be 0 (Sunday) through 6 (Saturday)"
    );

    let err: DomainError = DomainError::EmptyServiceSelection;
    assert_eq!(format!("{err}"), "At least one service must be selected");

    let err: DomainError = DomainError::InvalidDuration { minutes: 0 };
    assert_eq!(format!("{err}"), "Invalid duration: 0 minutes");

    let err: DomainError = DomainError::InvalidStatus(String::from("tentative"));
    assert_eq!(format!("{err}"), "Invalid booking status: tentative");

    let err: DomainError = DomainError::InvalidStatusTransition {
        from: BookingStatus::Cancelled,
        to: BookingStatus::Pending,
    };
    assert_eq!(
        format!("{err}"),
        "Booking status cannot change from cancelled to pending"
    );

    let err: DomainError = DomainError::StaffNotFound(7);
    assert_eq!(format!("{err}"), "Staff member 7 not found");

    let err: DomainError = DomainError::BookingNotFound(12);
    assert_eq!(format!("{err}"), "Booking 12 not found");

    let err: DomainError = DomainError::StaffAbsent {
        staff_id: 3,
        date: test_date(),
    };
    assert_eq!(format!("{err}"), "Staff member 3 is absent on 2026-03-02");

    let err: DomainError = DomainError::BeforeEarliestBookableHour {
        staff_id: 3,
        earliest_hour: 12,
    };
    assert_eq!(
        format!("{err}"),
        "Staff member 3 does not accept bookings before 12:00"
    );

    let err: DomainError = DomainError::MissingCapability {
        staff_id: 3,
        service_id: 8,
    };
    assert_eq!(format!("{err}"), "Staff member 3 cannot perform service 8");

    let err: DomainError = DomainError::NoStaffAvailable {
        date: test_date(),
        start: hm(10, 0),
    };
    assert_eq!(
        format!("{err}"),
        "No staff member is available at 10:00:00.0 on 2026-03-02"
    );
}

#[test]
fn test_conflict_error_display() {
    let err: DomainError = DomainError::SlotConflict {
        staff_id: 2,
        date: test_date(),
        start: hm(14, 30),
    };
    assert_eq!(
        format!("{err}"),
        "Staff member 2 already has a booking overlapping 14:30:00.0 on 2026-03-02"
    );
}
