use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use slotbook_core::errors::{EngineError, EngineResult};
use slotbook_core::models::booking::{Booking, BookingDraft, BookingId};
use slotbook_core::models::provider::ProviderId;
use slotbook_core::models::time::{DateKey, TimeSlot};

/// Chronological index key: dated entries ascending by `(date, time)`,
/// entries missing either field after all dated ones, in insertion order
/// (booking ids are assigned monotonically).
type OrderKey = (bool, Option<DateKey>, Option<TimeSlot>, BookingId);

fn order_key(booking: &Booking) -> OrderKey {
    match (booking.date, &booking.time) {
        (Some(date), Some(time)) => (false, Some(date), Some(time.clone()), booking.id),
        _ => (true, None, None, booking.id),
    }
}

#[derive(Default)]
struct LedgerState {
    next_id: u64,
    bookings: HashMap<BookingId, Booking>,
    /// The at-most-one-booking-per-slot invariant lives in this map.
    occupied: HashMap<(ProviderId, DateKey, TimeSlot), BookingId>,
    /// Maintained incrementally on every insert and delete; `list_all` never
    /// re-sorts.
    ordered: BTreeMap<OrderKey, BookingId>,
}

/// The authoritative store of confirmed bookings.
///
/// `try_create` performs the slot-existence check and the insert under one
/// write-lock acquisition, so two concurrent confirmations for the same
/// `(provider, date, time)` leave exactly one booking: the loser gets
/// `SlotTaken`.
pub struct BookingLedger {
    inner: RwLock<LedgerState>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LedgerState::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Confirms a booking if the slot is free. The check and the insert are
    /// one atomic unit; on `SlotTaken` nothing is modified.
    pub fn try_create(
        &self,
        provider_id: ProviderId,
        date: DateKey,
        time: TimeSlot,
        draft: BookingDraft,
    ) -> EngineResult<Booking> {
        let mut state = self.write();

        let key = (provider_id, date, time.clone());
        if state.occupied.contains_key(&key) {
            return Err(EngineError::SlotTaken {
                provider_id,
                date,
                time,
            });
        }

        state.next_id += 1;
        let booking = Booking {
            id: BookingId(state.next_id),
            provider_id,
            date: Some(date),
            time: Some(time),
            service_refs: draft.service_refs,
            customer: draft.customer,
            created_at: Utc::now(),
        };

        tracing::debug!(
            "Booking confirmed: id={}, provider_id={}, date={}, time={}",
            booking.id,
            provider_id,
            date,
            booking.time.as_ref().map(TimeSlot::as_str).unwrap_or("-")
        );

        state.occupied.insert(key, booking.id);
        state.ordered.insert(order_key(&booking), booking.id);
        state.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    /// Removes a booking; the freed slot is visible to availability queries
    /// as soon as this returns.
    pub fn delete(&self, id: BookingId) -> EngineResult<Booking> {
        let mut state = self.write();

        let booking = state.bookings.remove(&id).ok_or(EngineError::NotFound(id))?;
        if let (Some(date), Some(time)) = (booking.date, booking.time.clone()) {
            state.occupied.remove(&(booking.provider_id, date, time));
        }
        state.ordered.remove(&order_key(&booking));

        tracing::debug!("Booking deleted: id={}", id);
        Ok(booking)
    }

    /// All non-deleted bookings for one provider/date, ascending by time.
    pub fn list_for(&self, provider_id: ProviderId, date: DateKey) -> Vec<Booking> {
        let state = self.read();
        state
            .ordered
            .values()
            .filter_map(|id| state.bookings.get(id))
            .filter(|booking| booking.provider_id == provider_id && booking.date == Some(date))
            .cloned()
            .collect()
    }

    /// Every booking, ascending by `(date, time)`. Records missing a date or
    /// time sort after all dated entries and keep their relative insertion
    /// order, so incomplete data is surfaced rather than dropped.
    pub fn list_all(&self) -> Vec<Booking> {
        let state = self.read();
        state
            .ordered
            .values()
            .filter_map(|id| state.bookings.get(id))
            .cloned()
            .collect()
    }

    /// Rehydrates bookings from caller-owned persistence, keeping their ids.
    ///
    /// All-or-nothing: an id collision fails `Validation` and an occupancy
    /// collision among complete records fails `SlotTaken`, in both cases
    /// before anything is inserted. Records missing a date or time are
    /// accepted without occupying a slot.
    pub fn restore(&self, records: Vec<Booking>) -> EngineResult<()> {
        let mut state = self.write();

        let mut incoming: HashMap<(ProviderId, DateKey, TimeSlot), BookingId> = HashMap::new();
        for record in &records {
            if state.bookings.contains_key(&record.id) {
                return Err(EngineError::Validation(format!(
                    "booking id {} already present in the ledger",
                    record.id
                )));
            }
            if let (Some(date), Some(time)) = (record.date, record.time.clone()) {
                let key = (record.provider_id, date, time.clone());
                if state.occupied.contains_key(&key) || incoming.contains_key(&key) {
                    return Err(EngineError::SlotTaken {
                        provider_id: record.provider_id,
                        date,
                        time,
                    });
                }
                incoming.insert(key, record.id);
            }
        }

        tracing::debug!("Restoring {} booking(s)", records.len());

        state.occupied.extend(incoming);
        for record in records {
            state.next_id = state.next_id.max(record.id.0);
            state.ordered.insert(order_key(&record), record.id);
            state.bookings.insert(record.id, record);
        }
        Ok(())
    }
}

impl Default for BookingLedger {
    fn default() -> Self {
        Self::new()
    }
}
