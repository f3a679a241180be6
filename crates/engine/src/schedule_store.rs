use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use slotbook_core::errors::{EngineError, EngineResult};
use slotbook_core::models::provider::ProviderId;
use slotbook_core::models::schedule::{DayOverride, EffectiveDay, Schedule, WeeklyPattern};
use slotbook_core::models::time::{normalize_slots, DateKey, TimeSlot};

/// Owns every provider's schedule: one weekly pattern plus date-keyed
/// overrides, created at provider onboarding.
///
/// Overrides are replaced wholesale per date (copy-on-write): mutations
/// insert a fresh entry and never touch data handed out earlier, so a
/// partially edited override is unrepresentable. Reads run concurrently
/// under a shared lock; mutations take the write lock.
pub struct ScheduleStore {
    schedules: RwLock<HashMap<ProviderId, Schedule>>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self {
            schedules: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<ProviderId, Schedule>> {
        self.schedules.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ProviderId, Schedule>> {
        self.schedules.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Onboards a provider with its default weekly pattern and returns the
    /// fresh provider id.
    pub fn register(&self, pattern: WeeklyPattern) -> EngineResult<ProviderId> {
        let pattern = WeeklyPattern::new(pattern.working_days, pattern.default_slots)?;
        let provider_id = ProviderId::new();

        tracing::debug!(
            "Registering provider: provider_id={}, working_days={:?}, default_slots={}",
            provider_id,
            pattern.working_days,
            pattern.default_slots.len()
        );

        self.write().insert(provider_id, Schedule::new(pattern));
        Ok(provider_id)
    }

    /// The single merge rule: the override for `(provider, date)` verbatim if
    /// one exists, otherwise the weekly default for that weekday. Both the
    /// resolver and the calendar grid go through here.
    pub fn effective_day(&self, provider_id: ProviderId, date: DateKey) -> EngineResult<EffectiveDay> {
        let schedules = self.read();
        let schedule = schedules
            .get(&provider_id)
            .ok_or(EngineError::UnknownProvider(provider_id))?;

        Ok(effective_for(schedule, date))
    }

    /// Replaces the override entry for `(provider, date)` wholesale. The slot
    /// list is sorted on the way in; duplicates fail `DuplicateSlot`.
    pub fn set_override(
        &self,
        provider_id: ProviderId,
        date: DateKey,
        day: DayOverride,
    ) -> EngineResult<()> {
        let slots = normalize_slots(day.slots)?;

        let mut schedules = self.write();
        let schedule = schedules
            .get_mut(&provider_id)
            .ok_or(EngineError::UnknownProvider(provider_id))?;

        tracing::debug!(
            "Setting override: provider_id={}, date={}, is_working={}, slots={}",
            provider_id,
            date,
            day.is_working,
            slots.len()
        );

        schedule.overrides.insert(
            date,
            DayOverride {
                is_working: day.is_working,
                slots,
            },
        );
        Ok(())
    }

    /// Adds one slot to the date's schedule, materializing an override from
    /// the effective day if none exists yet. Fails `DuplicateSlot` if the
    /// slot is already present.
    pub fn add_slot(&self, provider_id: ProviderId, date: DateKey, time: &str) -> EngineResult<()> {
        let time = TimeSlot::parse(time)?;

        let mut schedules = self.write();
        let schedule = schedules
            .get_mut(&provider_id)
            .ok_or(EngineError::UnknownProvider(provider_id))?;

        let mut day = effective_for(schedule, date);
        match day.slots.binary_search(&time) {
            Ok(_) => return Err(EngineError::DuplicateSlot(time)),
            Err(idx) => day.slots.insert(idx, time.clone()),
        }

        tracing::debug!(
            "Adding slot: provider_id={}, date={}, time={}",
            provider_id,
            date,
            time
        );

        schedule.overrides.insert(
            date,
            DayOverride {
                is_working: day.is_working,
                slots: day.slots,
            },
        );
        Ok(())
    }

    /// Removes one slot from the date's schedule, materializing an override
    /// if none exists yet. Removing the last slot leaves an empty-but-working
    /// day, which is distinct from a day off; removing an absent slot is a
    /// no-op.
    pub fn remove_slot(
        &self,
        provider_id: ProviderId,
        date: DateKey,
        time: &str,
    ) -> EngineResult<()> {
        let time = TimeSlot::parse(time)?;

        let mut schedules = self.write();
        let schedule = schedules
            .get_mut(&provider_id)
            .ok_or(EngineError::UnknownProvider(provider_id))?;

        let mut day = effective_for(schedule, date);
        day.slots.retain(|slot| *slot != time);

        tracing::debug!(
            "Removing slot: provider_id={}, date={}, time={}",
            provider_id,
            date,
            time
        );

        schedule.overrides.insert(
            date,
            DayOverride {
                is_working: day.is_working,
                slots: day.slots,
            },
        );
        Ok(())
    }

    /// Replaces the provider's default working days and slots. Existing
    /// overrides are not touched.
    pub fn set_weekly_pattern(
        &self,
        provider_id: ProviderId,
        pattern: WeeklyPattern,
    ) -> EngineResult<()> {
        let pattern = WeeklyPattern::new(pattern.working_days, pattern.default_slots)?;

        let mut schedules = self.write();
        let schedule = schedules
            .get_mut(&provider_id)
            .ok_or(EngineError::UnknownProvider(provider_id))?;

        tracing::debug!(
            "Setting weekly pattern: provider_id={}, working_days={:?}",
            provider_id,
            pattern.working_days
        );

        schedule.weekly_pattern = pattern;
        Ok(())
    }

    /// Snapshot of the provider's schedule in its persisted representation.
    pub fn schedule(&self, provider_id: ProviderId) -> EngineResult<Schedule> {
        self.read()
            .get(&provider_id)
            .cloned()
            .ok_or(EngineError::UnknownProvider(provider_id))
    }
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new()
    }
}

fn effective_for(schedule: &Schedule, date: DateKey) -> EffectiveDay {
    if let Some(day) = schedule.overrides.get(&date) {
        return EffectiveDay {
            is_working: day.is_working,
            slots: day.slots.clone(),
        };
    }

    EffectiveDay {
        is_working: schedule
            .weekly_pattern
            .working_days
            .contains(&date.weekday_index()),
        slots: schedule.weekly_pattern.default_slots.clone(),
    }
}
