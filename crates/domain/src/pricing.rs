// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking totals across a service selection.
//!
//! Durations sum in minutes. Prices sum after per-service discounts;
//! one open-ended component makes the whole total open-ended.

use crate::types::{Price, Service};

/// The combined duration and price of a service selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingTotals {
    /// Total duration across the selection, in minutes.
    pub total_duration_minutes: u16,
    /// Total price across the selection, after discounts.
    pub total_price: Price,
}

/// Computes the totals for a service selection.
///
/// An empty selection totals zero minutes at a fixed price of zero;
/// callers reject empty selections before booking.
#[must_use]
pub fn calculate_totals(services: &[Service]) -> BookingTotals {
    let mut total_duration_minutes: u16 = 0;
    let mut total_price: Price = Price::Fixed(0);

    for service in services {
        total_duration_minutes = total_duration_minutes.saturating_add(service.duration_minutes);
        total_price = total_price.plus(service.effective_price());
    }

    BookingTotals {
        total_duration_minutes,
        total_price,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service(duration: u16, price: Price, discount: u32) -> Service {
        Service::new(String::from("Service"), duration, price, discount).unwrap()
    }

    #[test]
    fn test_totals_sum_durations_and_prices() {
        let services = vec![
            service(60, Price::Fixed(80), 0),
            service(30, Price::Fixed(40), 0),
        ];
        let totals = calculate_totals(&services);
        assert_eq!(totals.total_duration_minutes, 90);
        assert_eq!(totals.total_price, Price::Fixed(120));
    }

    #[test]
    fn test_discount_applies_per_service() {
        let services = vec![service(60, Price::Fixed(80), 10)];
        assert_eq!(calculate_totals(&services).total_price, Price::Fixed(70));
    }

    #[test]
    fn test_open_ended_component_makes_total_open_ended() {
        let services = vec![
            service(60, Price::Fixed(50), 0),
            service(90, Price::OpenEnded(80), 0),
        ];
        let totals = calculate_totals(&services);
        assert_eq!(totals.total_duration_minutes, 150);
        assert_eq!(totals.total_price, Price::OpenEnded(130));
    }

    #[test]
    fn test_empty_selection_totals_zero() {
        let totals = calculate_totals(&[]);
        assert_eq!(totals.total_duration_minutes, 0);
        assert_eq!(totals.total_price, Price::Fixed(0));
    }

    #[test]
    fn test_discount_saturates_at_zero() {
        let services = vec![service(30, Price::Fixed(20), 50)];
        assert_eq!(calculate_totals(&services).total_price, Price::Fixed(0));
    }
}
