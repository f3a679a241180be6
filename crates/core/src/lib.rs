//! # Slotbook Core
//!
//! Domain model for the slotbook availability and booking-conflict engine:
//! canonical time and date keys, weekly patterns and per-date overrides,
//! bookings, calendar grid cells, and the engine's typed error kinds.
//!
//! Everything here is plain structured data (dates as `YYYY-MM-DD` keys,
//! times as `HH:MM` strings) so the engine can be embedded behind any
//! transport.

pub mod errors;
pub mod models;
