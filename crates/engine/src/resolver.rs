use std::collections::HashSet;
use std::sync::Arc;

use slotbook_core::errors::EngineResult;
use slotbook_core::models::provider::ProviderId;
use slotbook_core::models::time::{DateKey, TimeSlot};

use crate::ledger::BookingLedger;
use crate::schedule_store::ScheduleStore;

/// Composes the schedule store's effective-day merge with the ledger's
/// booked set to produce the bookable slots for one provider/date.
///
/// Pure with respect to its two dependencies: repeated calls with unchanged
/// store and ledger state return identical results. Past dates and other
/// caller policy are not applied here.
pub struct AvailabilityResolver {
    schedules: Arc<ScheduleStore>,
    ledger: Arc<BookingLedger>,
}

impl AvailabilityResolver {
    pub fn new(schedules: Arc<ScheduleStore>, ledger: Arc<BookingLedger>) -> Self {
        Self { schedules, ledger }
    }

    /// The bookable slots for `(provider, date)`, unique and ascending.
    /// An unknown provider is an `UnknownProvider` error, not an empty list,
    /// so callers can tell "no schedule" from "fully booked".
    pub fn available_slots(
        &self,
        provider_id: ProviderId,
        date: DateKey,
    ) -> EngineResult<Vec<TimeSlot>> {
        let day = self.schedules.effective_day(provider_id, date)?;
        if !day.is_working {
            return Ok(Vec::new());
        }

        let booked: HashSet<TimeSlot> = self
            .ledger
            .list_for(provider_id, date)
            .into_iter()
            .filter_map(|booking| booking.time)
            .collect();

        Ok(day
            .slots
            .into_iter()
            .filter(|slot| !booked.contains(slot))
            .collect())
    }
}
