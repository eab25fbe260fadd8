use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/rooms", get(handlers::rooms::list_rooms))
        .route("/api/rooms/:id/slots", get(handlers::rooms::list_slots))
        .route("/api/rooms/:id/bookings", get(handlers::rooms::room_bookings))
}
