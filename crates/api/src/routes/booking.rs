use axum::{
    routing::{delete, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/bookings",
            post(handlers::booking::create_booking).get(handlers::booking::list_bookings),
        )
        .route(
            "/api/bookings/:id",
            delete(handlers::booking::delete_booking),
        )
}
