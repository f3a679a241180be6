use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};
use crate::models::provider::ProviderId;
use crate::models::time::{normalize_slots, DateKey, TimeSlot};

/// Recurring weekly default: the weekday indices (0 = Sunday … 6 = Saturday)
/// that are working days, and the slot list that applies on any of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPattern {
    pub working_days: BTreeSet<u8>,
    pub default_slots: Vec<TimeSlot>,
}

impl WeeklyPattern {
    pub fn new(
        working_days: impl IntoIterator<Item = u8>,
        default_slots: Vec<TimeSlot>,
    ) -> EngineResult<Self> {
        let working_days: BTreeSet<u8> = working_days.into_iter().collect();
        if let Some(day) = working_days.iter().find(|day| **day > 6) {
            return Err(EngineError::Validation(format!(
                "invalid weekday index {day}, expected 0-6"
            )));
        }

        Ok(Self {
            working_days,
            default_slots: normalize_slots(default_slots)?,
        })
    }
}

/// Full replacement of the default schedule for a single date. Overrides are
/// never merged slot-by-slot with the weekly default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOverride {
    pub is_working: bool,
    pub slots: Vec<TimeSlot>,
}

/// The merge result for one provider/date: the override verbatim when one
/// exists, otherwise the weekly default. An empty slot list with
/// `is_working = true` is a valid working day with nothing bookable, distinct
/// from a day off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveDay {
    pub is_working: bool,
    pub slots: Vec<TimeSlot>,
}

/// A provider's full schedule in its persisted representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub weekly_pattern: WeeklyPattern,
    pub overrides: BTreeMap<DateKey, DayOverride>,
}

impl Schedule {
    pub fn new(weekly_pattern: WeeklyPattern) -> Self {
        Self {
            weekly_pattern,
            overrides: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterProviderRequest {
    pub working_days: Vec<u8>,
    pub default_slots: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterProviderResponse {
    pub provider_id: ProviderId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPatternRequest {
    pub working_days: Vec<u8>,
    pub default_slots: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetOverrideRequest {
    pub is_working: bool,
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSlotRequest {
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub provider_id: ProviderId,
    pub date: DateKey,
    pub slots: Vec<TimeSlot>,
}
