use serde::{Deserialize, Serialize};

use crate::models::time::DateKey;

/// One non-blank cell of a month grid. Selection and highlight state are
/// caller-applied, not computed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: DateKey,
    pub is_working: bool,
    pub is_past: bool,
}

/// A calendar month laid out in rows of seven cells; `None` cells are the
/// leading and trailing padding around the month's days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub week_starts_on: u8,
    pub weeks: Vec<Vec<Option<DayCell>>>,
}
