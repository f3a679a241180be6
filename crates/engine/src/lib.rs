//! # Slotbook Engine
//!
//! The availability and booking-conflict engine. Four components compose,
//! leaf first:
//!
//! - [`ScheduleStore`] owns each provider's recurring weekly pattern and
//!   date-keyed overrides, and answers the effective-schedule merge for any
//!   provider/date.
//! - [`BookingLedger`] owns the authoritative set of confirmed bookings and
//!   enforces the at-most-one-booking-per-slot invariant.
//! - [`AvailabilityResolver`] composes the two into the bookable-slot list
//!   for a provider/date.
//! - [`CalendarGridGenerator`] lays a month out as rows of seven cells,
//!   annotated per day from the store's effective-schedule query.
//!
//! [`BookingFlow`] drives the user-facing booking steps over the resolver
//! and ledger, including recovery when a confirmation loses a race.
//!
//! All state is in memory; callers own persistence and transport. Reads take
//! shared locks and run concurrently; writes are serialized per store, and
//! the ledger's conflict check and insert happen under a single lock
//! acquisition so no two confirmations can claim the same slot.

/// Month grid construction for calendar views
pub mod calendar;
/// The step-by-step booking flow state machine
pub mod flow;
/// Confirmed-booking ledger and conflict enforcement
pub mod ledger;
/// Bookable-slot resolution over store and ledger
pub mod resolver;
/// Weekly patterns and per-date overrides
pub mod schedule_store;

pub use calendar::CalendarGridGenerator;
pub use flow::{BookingFlow, ConfirmOutcome, FlowStep};
pub use ledger::BookingLedger;
pub use resolver::AvailabilityResolver;
pub use schedule_store::ScheduleStore;
