// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability resolution.
//!
//! Combines the shift calendar, absence registry, slot generator, and
//! conflict detector into the slot lists shown to clients. Per-staff
//! resolution unions slots across split shifts; "any available"
//! resolution unions across every capable, non-absent staff member.

use crate::absence::is_absent_on;
use crate::conflict::has_conflict;
use crate::shift::{shifts_for_weekday, weekday_index};
use crate::slots::generate_slots;
use crate::types::{StaffMember, StaffSelector};

/// Resolves the bookable start times for one staff member on one date.
///
/// Absence or a day off yields an empty list. Otherwise each shift's
/// candidate slots are filtered against the staff member's existing
/// bookings and their earliest-bookable-hour override, then unioned,
/// deduplicated, and sorted.
#[must_use]
pub fn available_slots_for_staff(
    staff: &StaffMember,
    date: time::Date,
    duration_minutes: u16,
) -> Vec<time::Time> {
    if is_absent_on(&staff.absences, date) {
        return Vec::new();
    }

    let mut slots: Vec<time::Time> = Vec::new();
    for shift in shifts_for_weekday(&staff.shifts, weekday_index(date)) {
        for slot in generate_slots(shift, duration_minutes) {
            if let Some(earliest) = staff.earliest_bookable_hour
                && slot.hour() < earliest
            {
                continue;
            }
            if has_conflict(&staff.bookings, date, slot, duration_minutes, None) {
                continue;
            }
            slots.push(slot);
        }
    }

    slots.sort_unstable();
    slots.dedup();
    slots
}

/// Resolves the bookable start times across every staff member who can
/// perform all of the requested services.
///
/// Absent staff contribute nothing. The result is the sorted,
/// deduplicated union of per-staff availability.
#[must_use]
pub fn available_slots_any(
    roster: &[StaffMember],
    date: time::Date,
    duration_minutes: u16,
    required_service_ids: &[i64],
) -> Vec<time::Time> {
    let mut slots: Vec<time::Time> = Vec::new();
    for staff in roster {
        if !staff.can_perform_all(required_service_ids) {
            continue;
        }
        slots.extend(available_slots_for_staff(staff, date, duration_minutes));
    }

    slots.sort_unstable();
    slots.dedup();
    slots
}

/// Resolves availability for a slot request against the roster.
///
/// A `Member` selector targeting a staff member not in the roster, or
/// one who cannot perform the requested services, resolves to an empty
/// list. This keeps slot lists consistent with [`is_date_selectable`].
#[must_use]
pub fn available_slots(
    roster: &[StaffMember],
    date: time::Date,
    duration_minutes: u16,
    selector: StaffSelector,
    required_service_ids: &[i64],
) -> Vec<time::Time> {
    match selector {
        StaffSelector::Member(staff_id) => roster
            .iter()
            .find(|staff| staff.staff_id == staff_id)
            .filter(|staff| staff.can_perform_all(required_service_ids))
            .map(|staff| available_slots_for_staff(staff, date, duration_minutes))
            .unwrap_or_default(),
        StaffSelector::AnyAvailable => {
            available_slots_any(roster, date, duration_minutes, required_service_ids)
        }
    }
}

/// Returns whether a date should be offered for selection at all.
///
/// A date is selectable when at least one staff member matching the
/// selector works that day of week, is not absent, and can perform the
/// requested services. A selectable date can still resolve to zero
/// slots once existing bookings are considered.
#[must_use]
pub fn is_date_selectable(
    roster: &[StaffMember],
    date: time::Date,
    selector: StaffSelector,
    required_service_ids: &[i64],
) -> bool {
    let day: u8 = weekday_index(date);
    let eligible = |staff: &StaffMember| {
        !is_absent_on(&staff.absences, date)
            && staff.can_perform_all(required_service_ids)
            && !shifts_for_weekday(&staff.shifts, day).is_empty()
    };

    match selector {
        StaffSelector::Member(staff_id) => roster
            .iter()
            .any(|staff| staff.staff_id == staff_id && eligible(staff)),
        StaffSelector::AnyAvailable => roster.iter().any(eligible),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Booking, BookingStatus, Price, ShiftTemplate, minutes_since_midnight};

    fn date_mon() -> time::Date {
        // 2026-03-02 is a Monday
        time::Date::from_calendar_date(2026, time::Month::March, 2).unwrap()
    }

    fn hm(hour: u8, minute: u8) -> time::Time {
        time::Time::from_hms(hour, minute, 0).unwrap()
    }

    fn shift(dow: u8, start: (u8, u8), end: (u8, u8)) -> ShiftTemplate {
        ShiftTemplate::new(dow, hm(start.0, start.1), hm(end.0, end.1)).unwrap()
    }

    fn staff(id: i64, shifts: Vec<ShiftTemplate>) -> StaffMember {
        StaffMember::new(id, format!("Artist {id}"), shifts, vec![1, 2], None).unwrap()
    }

    fn booking_at(staff_id: i64, start: (u8, u8), duration: u16) -> Booking {
        let start_time = hm(start.0, start.1);
        let end_minutes = u32::from(minutes_since_midnight(start_time)) + u32::from(duration);
        #[allow(clippy::cast_possible_truncation)]
        let end_time = hm((end_minutes / 60) as u8, (end_minutes % 60) as u8);
        Booking::with_id(
            1,
            staff_id,
            100,
            date_mon(),
            start_time,
            end_time,
            vec![1],
            BookingStatus::Pending,
            Price::Fixed(50),
            duration,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_absent_staff_has_no_slots() {
        let mut s = staff(1, vec![shift(1, (9, 0), (17, 0))]);
        s.absences.push(date_mon());
        assert!(available_slots_for_staff(&s, date_mon(), 60).is_empty());
    }

    #[test]
    fn test_day_off_has_no_slots() {
        let s = staff(1, vec![shift(3, (9, 0), (17, 0))]);
        assert!(available_slots_for_staff(&s, date_mon(), 60).is_empty());
    }

    #[test]
    fn test_existing_booking_removes_overlapping_slots() {
        let mut s = staff(1, vec![shift(1, (9, 0), (17, 0))]);
        s.bookings.push(booking_at(1, (10, 0), 60));

        let slots = available_slots_for_staff(&s, date_mon(), 60);

        // 09:30 and 10:30 would overlap 10:00-11:00; 09:00 and 11:00 stand
        assert!(slots.contains(&hm(9, 0)));
        assert!(!slots.contains(&hm(9, 30)));
        assert!(!slots.contains(&hm(10, 0)));
        assert!(!slots.contains(&hm(10, 30)));
        assert!(slots.contains(&hm(11, 0)));
    }

    #[test]
    fn test_split_shift_slots_are_unioned_and_sorted() {
        let s = staff(1, vec![shift(1, (14, 0), (16, 0)), shift(1, (9, 0), (11, 0))]);
        let slots = available_slots_for_staff(&s, date_mon(), 60);
        assert_eq!(slots, vec![hm(9, 0), hm(9, 30), hm(10, 0), hm(14, 0), hm(14, 30), hm(15, 0)]);
    }

    #[test]
    fn test_earliest_hour_filters_morning_slots() {
        let mut s = staff(1, vec![shift(1, (9, 0), (14, 0))]);
        s.earliest_bookable_hour = Some(12);
        let slots = available_slots_for_staff(&s, date_mon(), 60);
        assert_eq!(slots, vec![hm(12, 0), hm(12, 30), hm(13, 0)]);
    }

    #[test]
    fn test_any_unions_across_staff_excluding_absent() {
        let a = staff(1, vec![shift(1, (9, 0), (11, 0))]);
        let mut b = staff(2, vec![shift(1, (10, 0), (12, 0))]);
        b.absences.push(date_mon());
        let c = staff(3, vec![shift(1, (10, 30), (12, 30))]);

        let slots = available_slots_any(&[a, b, c], date_mon(), 60, &[1]);

        // b is absent; union of a (09:00, 09:30, 10:00) and c (10:30, 11:00, 11:30)
        assert_eq!(
            slots,
            vec![hm(9, 0), hm(9, 30), hm(10, 0), hm(10, 30), hm(11, 0), hm(11, 30)]
        );
    }

    #[test]
    fn test_any_skips_incapable_staff() {
        let mut a = staff(1, vec![shift(1, (9, 0), (11, 0))]);
        a.service_ids = vec![1];
        let b = staff(2, vec![shift(1, (14, 0), (16, 0))]);

        let slots = available_slots_any(&[a, b], date_mon(), 60, &[2]);

        // Only b can perform service 2
        assert_eq!(slots, vec![hm(14, 0), hm(14, 30), hm(15, 0)]);
    }

    #[test]
    fn test_duplicate_slots_deduplicated() {
        let a = staff(1, vec![shift(1, (9, 0), (11, 0))]);
        let b = staff(2, vec![shift(1, (9, 0), (11, 0))]);
        let slots = available_slots_any(&[a, b], date_mon(), 60, &[1]);
        assert_eq!(slots, vec![hm(9, 0), hm(9, 30), hm(10, 0)]);
    }

    #[test]
    fn test_unknown_member_selector_is_empty() {
        let roster = vec![staff(1, vec![shift(1, (9, 0), (17, 0))])];
        let slots = available_slots(&roster, date_mon(), 60, StaffSelector::Member(99), &[1]);
        assert!(slots.is_empty());
    }

    #[test]
    fn test_incapable_member_has_no_slots_and_no_selectable_date() {
        let mut s = staff(1, vec![shift(1, (9, 0), (17, 0))]);
        s.service_ids = vec![1];
        let roster = vec![s];

        // Both signals agree: nothing to book with this staff member
        assert!(
            available_slots(&roster, date_mon(), 60, StaffSelector::Member(1), &[2]).is_empty()
        );
        assert!(!is_date_selectable(
            &roster,
            date_mon(),
            StaffSelector::Member(1),
            &[2]
        ));
    }

    #[test]
    fn test_date_selectable_requires_shift_and_presence() {
        let mut s = staff(1, vec![shift(1, (9, 0), (17, 0))]);
        let roster_working = vec![s.clone()];
        assert!(is_date_selectable(
            &roster_working,
            date_mon(),
            StaffSelector::Member(1),
            &[1]
        ));

        s.absences.push(date_mon());
        let roster_absent = vec![s];
        assert!(!is_date_selectable(
            &roster_absent,
            date_mon(),
            StaffSelector::Member(1),
            &[1]
        ));
    }

    #[test]
    fn test_date_selectable_any_needs_one_eligible_staff() {
        let mut a = staff(1, vec![shift(1, (9, 0), (17, 0))]);
        a.absences.push(date_mon());
        let b = staff(2, vec![shift(1, (9, 0), (17, 0))]);

        assert!(is_date_selectable(
            &[a.clone(), b],
            date_mon(),
            StaffSelector::AnyAvailable,
            &[1]
        ));
        assert!(!is_date_selectable(
            &[a],
            date_mon(),
            StaffSelector::AnyAvailable,
            &[1]
        ));
    }

    #[test]
    fn test_selectable_date_can_still_have_zero_slots() {
        let mut s = staff(1, vec![shift(1, (9, 0), (10, 0))]);
        s.bookings.push(booking_at(1, (9, 0), 60));
        let roster = vec![s];

        assert!(is_date_selectable(
            &roster,
            date_mon(),
            StaffSelector::Member(1),
            &[1]
        ));
        assert!(
            available_slots(&roster, date_mon(), 60, StaffSelector::Member(1), &[1]).is_empty()
        );
    }
}
