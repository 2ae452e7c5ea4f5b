// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the salon booking engine.
//!
//! This crate translates between the external API contract (string dates,
//! flat DTOs) and the domain types the core engine works on. Every
//! state-changing handler drives the full pipeline: validate the request,
//! load state, apply the command, persist the transition.
//!
//! Domain, core, and persistence errors never leak through this boundary;
//! they are translated into [`ApiError`] values that describe the API
//! contract instead of internal structure.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod booking_policy;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use booking_policy::{BookingPolicy, BookingPolicyError, MAX_NOTES_LENGTH};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    assign_staff, cancel_booking, create_booking, get_available_slots, has_conflict,
    is_date_selectable, list_client_bookings, reschedule_booking,
};
pub use request_response::{
    AssignStaffRequest, AssignStaffResponse, BookingInfo, CancelBookingRequest,
    CancelBookingResponse, CreateBookingRequest, CreateBookingResponse, GetAvailableSlotsRequest,
    GetAvailableSlotsResponse, HasConflictRequest, HasConflictResponse, IsDateSelectableRequest,
    IsDateSelectableResponse, ListClientBookingsResponse, RescheduleBookingRequest,
    RescheduleBookingResponse,
};
