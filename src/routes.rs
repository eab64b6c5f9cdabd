use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::api::{
    join_meeting, list_room_status, meeting_status, start_meeting, stop_meeting, AppState,
};
use crate::handlers::test::health_check;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/join", get(join_meeting))
        .route("/api/admin/meeting-status", get(meeting_status))
        .route("/api/admin/rooms", get(list_room_status))
        .route("/api/admin/start-meeting", post(start_meeting))
        .route("/api/admin/stop-meeting", post(stop_meeting))
        .with_state(app_state)
}
