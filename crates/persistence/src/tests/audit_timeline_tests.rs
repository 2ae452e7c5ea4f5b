// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use salon_book::{Command, apply};
use salon_book_audit::AuditEvent;

use crate::Persistence;
use crate::tests::helpers::{
    book, create_test_actor, create_test_cause, hm, now, seeded_persistence,
};

#[test]
fn test_audit_timeline_records_events_in_order() {
    let mut persistence: Persistence = seeded_persistence();

    book(&mut persistence, 100, hm(10, 0));
    book(&mut persistence, 101, hm(11, 0));

    let state = persistence.load_state(now().date()).unwrap();
    let cancelled = apply(
        &state,
        Command::CancelBooking {
            booking_id: 1,
            client_id: 100,
        },
        now(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence.persist_transition(&cancelled, now()).unwrap();

    let timeline: Vec<(i64, AuditEvent)> = persistence.get_audit_timeline().unwrap();
    assert_eq!(timeline.len(), 3);
    assert!(timeline.windows(2).all(|pair| pair[0].0 < pair[1].0));
    assert_eq!(timeline[0].1.action.name, "CreateBooking");
    assert_eq!(timeline[1].1.action.name, "CreateBooking");
    assert_eq!(timeline[2].1.action.name, "CancelBooking");
}

#[test]
fn test_audit_event_round_trips_actor_and_snapshots() {
    let mut persistence: Persistence = seeded_persistence();

    book(&mut persistence, 100, hm(10, 0));

    let timeline: Vec<(i64, AuditEvent)> = persistence.get_audit_timeline().unwrap();
    let event: &AuditEvent = &timeline[0].1;

    assert_eq!(event.actor.id, "client-100");
    assert_eq!(event.actor.actor_type, "client");
    assert_eq!(event.cause.description, "Client request");
    assert_eq!(event.before.data, "staff_count=2,bookings_count=0");
    assert_eq!(event.after.data, "staff_count=2,bookings_count=1");
}

#[test]
fn test_failed_write_leaves_no_audit_event() {
    let mut persistence: Persistence = seeded_persistence();

    let stale_state = persistence.load_state(now().date()).unwrap();
    let first = apply(
        &stale_state,
        Command::CreateBooking {
            client_id: 100,
            date: crate::tests::helpers::monday(),
            start_time: hm(10, 0),
            selector: salon_book_domain::StaffSelector::Member(1),
            service_ids: vec![1],
            notes: None,
        },
        now(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    let second = apply(
        &stale_state,
        Command::CreateBooking {
            client_id: 101,
            date: crate::tests::helpers::monday(),
            start_time: hm(10, 30),
            selector: salon_book_domain::StaffSelector::Member(1),
            service_ids: vec![1],
            notes: None,
        },
        now(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    persistence.persist_transition(&first, now()).unwrap();
    assert!(persistence.persist_transition(&second, now()).is_err());

    // The rejected write rolled back atomically: one event, not two.
    let timeline: Vec<(i64, AuditEvent)> = persistence.get_audit_timeline().unwrap();
    assert_eq!(timeline.len(), 1);
}
