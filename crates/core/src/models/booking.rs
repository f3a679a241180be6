use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::provider::ProviderId;
use crate::models::time::{DateKey, TimeSlot};

/// Monotonically increasing booking identifier, assigned by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub u64);

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
}

/// A confirmed appointment. Immutable after creation except for deletion.
///
/// `date` and `time` are always set on bookings the ledger creates itself;
/// they are optional only because restored records from caller-owned
/// persistence may be incomplete, and the ledger tolerates those rather than
/// discarding them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub provider_id: ProviderId,
    pub date: Option<DateKey>,
    pub time: Option<TimeSlot>,
    pub service_refs: Vec<String>,
    pub customer: CustomerInfo,
    pub created_at: DateTime<Utc>,
}

/// What the caller supplies when confirming; the ledger assigns the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub service_refs: Vec<String>,
    pub customer: CustomerInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub provider_id: ProviderId,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub service_refs: Vec<String>,
    pub customer: CustomerInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBookingsResponse {
    pub bookings: Vec<Booking>,
}
