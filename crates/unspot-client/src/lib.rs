//! HTTP client for the Unspot booking API.
//!
//! Covers the two calls the check-in daemon needs: fetching the list of
//! bookings eligible for check-in, and confirming a single booking.

mod client;
mod error;
mod types;

pub use client::UnspotClient;
pub use error::UnspotError;
pub use types::{Booking, Space};
