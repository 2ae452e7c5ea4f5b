// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel schema definitions for the salon booking engine.
//!
//! Dates are stored as ISO 8601 text (`YYYY-MM-DD`) and times as zero-padded
//! `HH:MM` text, so lexicographic comparison in SQL matches chronological
//! order. The conversion helpers live in `data_models`.

diesel::table! {
    staff (staff_id) {
        staff_id -> BigInt,
        name -> Text,
        roster_order -> BigInt,
        earliest_bookable_hour -> Nullable<Integer>,
    }
}

diesel::table! {
    services (service_id) {
        service_id -> BigInt,
        name -> Text,
        duration_minutes -> Integer,
        regular_price -> BigInt,
        price_open_ended -> Integer,
        discount -> BigInt,
    }
}

diesel::table! {
    staff_shifts (shift_id) {
        shift_id -> BigInt,
        staff_id -> BigInt,
        day_of_week -> Integer,
        start_time -> Text,
        end_time -> Text,
    }
}

diesel::table! {
    staff_services (id) {
        id -> BigInt,
        staff_id -> BigInt,
        service_id -> BigInt,
    }
}

diesel::table! {
    staff_absences (absence_id) {
        absence_id -> BigInt,
        staff_id -> BigInt,
        absence_date -> Text,
    }
}

diesel::table! {
    bookings (booking_id) {
        booking_id -> BigInt,
        staff_id -> BigInt,
        client_id -> BigInt,
        booking_date -> Text,
        start_time -> Text,
        end_time -> Text,
        service_ids_json -> Text,
        status -> Text,
        total_price -> BigInt,
        price_open_ended -> Integer,
        total_duration_minutes -> Integer,
        notes -> Nullable<Text>,
        created_at -> Text,
        cancelled_at -> Nullable<Text>,
    }
}

diesel::table! {
    audit_events (event_id) {
        event_id -> BigInt,
        actor_json -> Text,
        cause_json -> Text,
        action_json -> Text,
        before_snapshot_json -> Text,
        after_snapshot_json -> Text,
        created_at -> Text,
    }
}

diesel::joinable!(staff_shifts -> staff (staff_id));
diesel::joinable!(staff_services -> staff (staff_id));
diesel::joinable!(staff_services -> services (service_id));
diesel::joinable!(staff_absences -> staff (staff_id));
diesel::joinable!(bookings -> staff (staff_id));

diesel::allow_tables_to_appear_in_same_query!(
    staff,
    services,
    staff_shifts,
    staff_services,
    staff_absences,
    bookings,
    audit_events,
);
