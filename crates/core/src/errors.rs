use thiserror::Error;

use crate::models::booking::BookingId;
use crate::models::provider::ProviderId;
use crate::models::time::{DateKey, TimeSlot};

/// Engine error kinds. All of these are recoverable: operations return them
/// through [`EngineResult`] and never leave partial state behind.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid slot format: {0:?}, expected zero-padded HH:MM")]
    InvalidSlotFormat(String),

    #[error("Duplicate slot: {0}")]
    DuplicateSlot(TimeSlot),

    #[error("Slot taken: {time} on {date} is already booked")]
    SlotTaken {
        provider_id: ProviderId,
        date: DateKey,
        time: TimeSlot,
    },

    #[error("Unknown provider: {0}")]
    UnknownProvider(ProviderId),

    #[error("Booking not found: {0}")]
    NotFound(BookingId),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
