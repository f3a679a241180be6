//! # Availability Handlers
//!
//! Read-side endpoints over the engine: the bookable-slot list for a
//! provider/date and the annotated month grid for calendar views. Both are
//! pure snapshot queries; neither applies past-date policy, which belongs to
//! the caller.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use slotbook_core::models::{
    calendar::MonthGrid,
    provider::ProviderId,
    schedule::AvailabilityResponse,
    time::DateKey,
};

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for the availability endpoint.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Date to resolve, as a `YYYY-MM-DD` key
    pub date: String,
}

/// Returns the bookable slots for one provider/date.
///
/// The result is the effective day's slot list minus already-booked times,
/// unique and ascending. An unknown provider is a 404, not an empty list,
/// so callers can tell "no schedule" from "fully booked".
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<ProviderId>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let date = DateKey::parse(&query.date)?;
    let slots = state.resolver.available_slots(id, date)?;

    Ok(Json(AvailabilityResponse {
        provider_id: id,
        date,
        slots,
    }))
}

/// Query parameters for the calendar grid endpoint.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,

    /// Week-start convention as a weekday index (0 = Sunday … 6 = Saturday);
    /// defaults to Sunday-first
    pub week_starts_on: Option<u8>,

    /// The "today" marker driving each cell's `is_past` flag; defaults to
    /// the server's current UTC day
    pub today: Option<String>,
}

/// Returns the month grid for a provider: rows of seven cells, each
/// non-blank cell annotated with its date, working status, and whether it is
/// in the past.
#[axum::debug_handler]
pub async fn get_calendar(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<ProviderId>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<MonthGrid>, AppError> {
    let today = match &query.today {
        Some(raw) => DateKey::parse(raw)?,
        None => DateKey::from_datetime(Utc::now()),
    };
    let week_starts_on = query.week_starts_on.unwrap_or(0);

    let grid = state
        .calendar
        .month_grid(id, query.year, query.month, week_starts_on, today)?;

    Ok(Json(grid))
}
