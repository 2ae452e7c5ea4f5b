// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use salon_book_audit::Cause;
use salon_book_domain::{Price, Service, ShiftTemplate};
use salon_book_persistence::Persistence;

use crate::handlers::create_booking;
use crate::request_response::{CreateBookingRequest, CreateBookingResponse};

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Client request"))
}

pub fn hm(hour: u8, minute: u8) -> time::Time {
    time::Time::from_hms(hour, minute, 0).unwrap()
}

/// 2026-03-02 is a Monday.
pub const MONDAY: &str = "2026-03-02";

/// Sunday 2026-03-01 08:00, the morning before the test bookings.
pub fn now() -> time::PrimitiveDateTime {
    let sunday: time::Date = time::Date::from_calendar_date(2026, time::Month::March, 1).unwrap();
    time::PrimitiveDateTime::new(sunday, hm(8, 0))
}

/// Seeds a fresh in-memory database with the standard test fixture:
/// two staff working Mondays 09:00-17:00, staff 1 performing service 1
/// only and staff 2 performing services 1 and 2.
pub fn seeded_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let ava: i64 = persistence.add_staff_member("Ava", 1, None).unwrap();
    let ben: i64 = persistence.add_staff_member("Ben", 2, None).unwrap();

    let haircut: i64 = persistence
        .add_service(&Service::new(String::from("Haircut"), 60, Price::Fixed(80), 0).unwrap())
        .unwrap();
    let beard: i64 = persistence
        .add_service(
            &Service::new(String::from("Beard trim"), 30, Price::OpenEnded(40), 0).unwrap(),
        )
        .unwrap();

    let monday_shift: ShiftTemplate = ShiftTemplate::new(1, hm(9, 0), hm(17, 0)).unwrap();
    persistence.add_shift(ava, &monday_shift).unwrap();
    persistence.add_shift(ben, &monday_shift).unwrap();

    persistence.grant_capability(ava, haircut).unwrap();
    persistence.grant_capability(ben, haircut).unwrap();
    persistence.grant_capability(ben, beard).unwrap();

    persistence
}

/// Books service 1 with staff 1 on the test Monday through the API and
/// returns the response.
pub fn book(
    persistence: &mut Persistence,
    client_id: i64,
    start_time: &str,
) -> CreateBookingResponse {
    let request = CreateBookingRequest {
        client_id,
        date: String::from(MONDAY),
        start_time: String::from(start_time),
        service_ids: vec![1],
        staff_id: Some(1),
        notes: None,
    };
    create_booking(persistence, &request, now(), create_test_cause()).unwrap()
}
