// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::State;
use salon_book_audit::{Actor, Cause};
use salon_book_domain::{Price, Service, ShiftTemplate, StaffMember};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("client-100"), String::from("client"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Client request"))
}

pub fn hm(hour: u8, minute: u8) -> time::Time {
    time::Time::from_hms(hour, minute, 0).unwrap()
}

/// 2026-03-02 is a Monday.
pub fn monday() -> time::Date {
    time::Date::from_calendar_date(2026, time::Month::March, 2).unwrap()
}

pub fn datetime(date: time::Date, hour: u8, minute: u8) -> time::PrimitiveDateTime {
    time::PrimitiveDateTime::new(date, hm(hour, minute))
}

pub fn weekday_shift(dow: u8, start: (u8, u8), end: (u8, u8)) -> ShiftTemplate {
    ShiftTemplate::new(dow, hm(start.0, start.1), hm(end.0, end.1)).unwrap()
}

pub fn create_test_staff(staff_id: i64, services: Vec<i64>) -> StaffMember {
    StaffMember::new(
        staff_id,
        format!("Artist {staff_id}"),
        vec![weekday_shift(1, (9, 0), (17, 0))],
        services,
        None,
    )
    .unwrap()
}

/// Two staff working Mondays 09:00-17:00. Staff 1 performs service 1
/// only; staff 2 performs services 1 and 2.
pub fn create_test_state() -> State {
    let roster: Vec<StaffMember> = vec![
        create_test_staff(1, vec![1]),
        create_test_staff(2, vec![1, 2]),
    ];
    let services: Vec<Service> = vec![
        Service::with_id(1, String::from("Haircut"), 60, Price::Fixed(80), 0).unwrap(),
        Service::with_id(2, String::from("Beard trim"), 30, Price::OpenEnded(40), 0).unwrap(),
    ];
    State::new(roster, services)
}
