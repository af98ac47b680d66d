use axum::{
    routing::{get, patch, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/subjects/:subject_id/schedule",
            get(handlers::schedule::get_template).delete(handlers::schedule::delete_template),
        )
        .route(
            "/api/subjects/:subject_id/schedule/duration",
            put(handlers::schedule::set_appointment_duration),
        )
        .route(
            "/api/subjects/:subject_id/schedule/days/:day",
            put(handlers::schedule::upsert_day_slots),
        )
        .route(
            "/api/subjects/:subject_id/schedule/days/:day/slots",
            post(handlers::schedule::add_slot),
        )
        .route(
            "/api/subjects/:subject_id/schedule/days/:day/slots/:slot_id",
            patch(handlers::schedule::update_slot)
                .delete(handlers::schedule::delete_slot),
        )
}
