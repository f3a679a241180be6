use std::sync::Arc;

use chrono::Datelike;
use slotbook_core::errors::{EngineError, EngineResult};
use slotbook_core::models::calendar::{DayCell, MonthGrid};
use slotbook_core::models::provider::ProviderId;
use slotbook_core::models::time::DateKey;

use crate::schedule_store::ScheduleStore;

/// Lays a calendar month out as rows of seven cells for display, annotated
/// per day from the schedule store's effective-schedule query.
pub struct CalendarGridGenerator {
    schedules: Arc<ScheduleStore>,
}

impl CalendarGridGenerator {
    pub fn new(schedules: Arc<ScheduleStore>) -> Self {
        Self { schedules }
    }

    /// Builds the grid for `(year, month)`.
    ///
    /// `week_starts_on` is a weekday index (0 = Sunday … 6 = Saturday), so
    /// any week-start convention is representable; the leading blank count is
    /// `(first_weekday - week_starts_on + 7) mod 7`. `today` drives the
    /// date-only `is_past` flag on each cell.
    pub fn month_grid(
        &self,
        provider_id: ProviderId,
        year: i32,
        month: u32,
        week_starts_on: u8,
        today: DateKey,
    ) -> EngineResult<MonthGrid> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::Validation(format!(
                "invalid month {month}, expected 1-12"
            )));
        }
        if week_starts_on > 6 {
            return Err(EngineError::Validation(format!(
                "invalid week start {week_starts_on}, expected weekday index 0-6"
            )));
        }

        let first = DateKey::from_ymd(year, month, 1)?;
        let leading = ((first.weekday_index() + 7 - week_starts_on) % 7) as usize;

        let mut cells: Vec<Option<DayCell>> = vec![None; leading];
        let mut date = first.date();
        while date.month() == month {
            let key = DateKey::new(date);
            let day = self.schedules.effective_day(provider_id, key)?;
            cells.push(Some(DayCell {
                date: key,
                is_working: day.is_working,
                is_past: key < today,
            }));
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }

        // Right-pad the final week so every row is exactly seven cells.
        while cells.len() % 7 != 0 {
            cells.push(None);
        }

        Ok(MonthGrid {
            year,
            month,
            week_starts_on,
            weeks: cells.chunks(7).map(<[_]>::to_vec).collect(),
        })
    }
}
