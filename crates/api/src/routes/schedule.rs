use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/providers", post(handlers::schedule::register_provider))
        .route(
            "/api/providers/:id/schedule",
            get(handlers::schedule::get_schedule),
        )
        .route(
            "/api/providers/:id/schedule/pattern",
            put(handlers::schedule::set_pattern),
        )
        .route(
            "/api/providers/:id/schedule/days/:date",
            put(handlers::schedule::set_override),
        )
        .route(
            "/api/providers/:id/schedule/days/:date/slots",
            post(handlers::schedule::add_slot),
        )
        .route(
            "/api/providers/:id/schedule/days/:date/slots/:time",
            delete(handlers::schedule::remove_slot),
        )
}
