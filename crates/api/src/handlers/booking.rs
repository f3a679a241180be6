use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use slotbook_core::{
    errors::EngineError,
    models::{
        booking::{Booking, BookingDraft, BookingId, CreateBookingRequest, ListBookingsResponse},
        provider::ProviderId,
        time::{DateKey, TimeSlot},
    },
};

use crate::{middleware::error_handling::AppError, ApiState};

/// Confirms a booking. The ledger performs the slot-existence check and the
/// insert as one atomic step; a lost race against a concurrent booking comes
/// back as a 409.
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let date = DateKey::parse(&payload.date)?;
    let time = TimeSlot::parse(&payload.time)?;

    // Reject bookings for providers that were never onboarded.
    state.schedules.effective_day(payload.provider_id, date)?;

    let booking = state.ledger.try_create(
        payload.provider_id,
        date,
        time,
        BookingDraft {
            service_refs: payload.service_refs,
            customer: payload.customer,
        },
    )?;

    Ok(Json(booking))
}

/// Query parameters for the booking list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    pub provider_id: Option<ProviderId>,
    pub date: Option<String>,
}

/// Lists bookings: all of them in chronological order, or one
/// provider/date's worth when both filters are supplied.
#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<ListBookingsResponse>, AppError> {
    let bookings = match (query.provider_id, &query.date) {
        (Some(provider_id), Some(raw)) => state.ledger.list_for(provider_id, DateKey::parse(raw)?),
        (None, None) => state.ledger.list_all(),
        _ => {
            return Err(AppError(EngineError::Validation(
                "provider_id and date must be supplied together".to_string(),
            )))
        }
    };

    Ok(Json(ListBookingsResponse { bookings }))
}

/// Deletes a booking; the freed slot is immediately visible to availability
/// queries.
#[axum::debug_handler]
pub async fn delete_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<u64>,
) -> Result<Json<Booking>, AppError> {
    let booking = state.ledger.delete(BookingId(id))?;
    Ok(Json(booking))
}
