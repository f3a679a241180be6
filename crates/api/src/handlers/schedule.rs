use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use slotbook_core::{
    errors::EngineResult,
    models::{
        provider::ProviderId,
        schedule::{
            AddSlotRequest, DayOverride, RegisterProviderRequest, RegisterProviderResponse,
            Schedule, SetOverrideRequest, SetPatternRequest, WeeklyPattern,
        },
        time::{DateKey, TimeSlot},
    },
};

use crate::{middleware::error_handling::AppError, ApiState};

fn parse_pattern(working_days: Vec<u8>, default_slots: Vec<String>) -> EngineResult<WeeklyPattern> {
    let slots = default_slots
        .iter()
        .map(|raw| TimeSlot::parse(raw))
        .collect::<EngineResult<Vec<_>>>()?;
    WeeklyPattern::new(working_days, slots)
}

/// Onboards a provider with its default weekly pattern. The schedule store
/// creates the schedule and hands back the fresh provider id.
#[axum::debug_handler]
pub async fn register_provider(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterProviderRequest>,
) -> Result<Json<RegisterProviderResponse>, AppError> {
    let pattern = parse_pattern(payload.working_days, payload.default_slots)?;
    let provider_id = state.schedules.register(pattern)?;

    Ok(Json(RegisterProviderResponse { provider_id }))
}

/// Returns the provider's schedule in its persisted representation, for
/// admin views and caller-owned persistence.
#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<ProviderId>,
) -> Result<Json<Schedule>, AppError> {
    let schedule = state.schedules.schedule(id)?;
    Ok(Json(schedule))
}

/// Replaces the provider's default working days and slots. Existing
/// overrides are untouched.
#[axum::debug_handler]
pub async fn set_pattern(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<ProviderId>,
    Json(payload): Json<SetPatternRequest>,
) -> Result<Json<Schedule>, AppError> {
    let pattern = parse_pattern(payload.working_days, payload.default_slots)?;
    state.schedules.set_weekly_pattern(id, pattern)?;

    Ok(Json(state.schedules.schedule(id)?))
}

/// Replaces the override for one date wholesale.
#[axum::debug_handler]
pub async fn set_override(
    State(state): State<Arc<ApiState>>,
    Path((id, date)): Path<(ProviderId, String)>,
    Json(payload): Json<SetOverrideRequest>,
) -> Result<Json<Schedule>, AppError> {
    let date = DateKey::parse(&date)?;
    let slots = payload
        .slots
        .iter()
        .map(|raw| TimeSlot::parse(raw))
        .collect::<EngineResult<Vec<_>>>()?;

    state.schedules.set_override(
        id,
        date,
        DayOverride {
            is_working: payload.is_working,
            slots,
        },
    )?;

    Ok(Json(state.schedules.schedule(id)?))
}

/// Adds one slot to a date, materializing an override if none exists yet.
#[axum::debug_handler]
pub async fn add_slot(
    State(state): State<Arc<ApiState>>,
    Path((id, date)): Path<(ProviderId, String)>,
    Json(payload): Json<AddSlotRequest>,
) -> Result<Json<Schedule>, AppError> {
    let date = DateKey::parse(&date)?;
    state.schedules.add_slot(id, date, &payload.time)?;

    Ok(Json(state.schedules.schedule(id)?))
}

/// Removes one slot from a date. Removing the last slot leaves an
/// empty-but-working day.
#[axum::debug_handler]
pub async fn remove_slot(
    State(state): State<Arc<ApiState>>,
    Path((id, date, time)): Path<(ProviderId, String, String)>,
) -> Result<Json<Schedule>, AppError> {
    let date = DateKey::parse(&date)?;
    state.schedules.remove_slot(id, date, &time)?;

    Ok(Json(state.schedules.schedule(id)?))
}
