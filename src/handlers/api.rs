use axum::{
    extract::{Json as ExtractJson, Query, State},
    http::StatusCode,
    response::Json,
};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::client::BbbClient;
use crate::error::{ErrorBody, GatewayError};
use crate::models::meeting::{
    JoinResponse, MeetingSnapshot, Role, StartMeetingRequest, StartMeetingResponse,
    StopMeetingRequest, StopMeetingResponse,
};
use crate::models::room::Room;

// AppState struct containing shared resources
pub struct AppState {
    pub client: BbbClient,
}

type HandlerError = (StatusCode, Json<ErrorBody>);

// Convert a gateway failure into the handler response, keeping the
// diagnostic detail in the log rather than the body
fn gateway_error(context: &str, err: GatewayError) -> HandlerError {
    error!(
        "{}: {} (detail: {})",
        context,
        err,
        err.detail.as_deref().unwrap_or("none")
    );
    (err.status_code(), Json(ErrorBody::from(&err)))
}

fn bad_request(message: &str) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.to_string(),
            error_key: "bad-request".to_string(),
        }),
    )
}

#[derive(Debug, Deserialize)]
pub struct JoinParams {
    pub name: Option<String>,
    pub level: Option<String>,
}

// Join endpoint: resolve the caller's level to a room, confirm the meeting
// exists, and hand back a signed join URL
pub async fn join_meeting(
    State(state): State<Arc<AppState>>,
    Query(params): Query<JoinParams>,
) -> Result<Json<JoinResponse>, HandlerError> {
    let full_name = match params.name.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => name,
        None => return Err(bad_request("Name is required")),
    };

    let rooms = &state.client.config().rooms;
    let room = rooms
        .room_for_level(params.level.as_deref())
        .ok_or_else(|| bad_request("No rooms configured"))?;
    let meeting_id = room.meeting_id.clone();

    info!(
        "Join request from {} for level {:?} -> meeting {}",
        full_name, params.level, meeting_id
    );

    match state
        .client
        .build_join_url(&meeting_id, full_name, Role::Viewer)
        .await
    {
        Ok(details) => Ok(Json(JoinResponse {
            join_url: details.join_url,
            meeting_id: details.meeting_id,
            full_name: details.full_name,
        })),
        Err(err) => Err(gateway_error("Failed to build join URL", err)),
    }
}

#[derive(Debug, Deserialize)]
pub struct MeetingStatusParams {
    #[serde(rename = "meetingID")]
    pub meeting_id: Option<String>,
}

// Single-room status endpoint for the admin dashboard
pub async fn meeting_status(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MeetingStatusParams>,
) -> Result<Json<MeetingSnapshot>, HandlerError> {
    let meeting_id = match params.meeting_id.as_deref().filter(|id| !id.is_empty()) {
        Some(meeting_id) => meeting_id,
        None => return Err(bad_request("Meeting ID is required")),
    };

    match state.client.get_meeting_info(meeting_id).await {
        Ok(snapshot) => {
            info!(
                "Meeting {} status: exists={}, running={}, participants={}",
                meeting_id, snapshot.exists, snapshot.running, snapshot.participant_count
            );
            Ok(Json(snapshot))
        }
        Err(err) => Err(gateway_error("Failed to check meeting status", err)),
    }
}

/// Catalogue entry with its freshly fetched status.
#[derive(Debug, Serialize)]
pub struct RoomStatus {
    #[serde(flatten)]
    pub room: Room,
    /// Dashboard state: "running", "idle" or "stopped".
    pub state: &'static str,
    pub snapshot: MeetingSnapshot,
}

// Whole-catalogue status endpoint. One independent remote query per room,
// issued concurrently; identical in-flight requests are not de-duplicated
pub async fn list_room_status(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<RoomStatus>> {
    let rooms = state.client.config().rooms.rooms().to_vec();

    let lookups = rooms.iter().map(|room| {
        let client = &state.client;
        async move { client.get_meeting_info(&room.meeting_id).await }
    });
    let results = join_all(lookups).await;

    let statuses = rooms
        .into_iter()
        .zip(results)
        .map(|(room, result)| {
            let snapshot = result.unwrap_or_else(|err| {
                error!("Failed to fetch status for room {}: {}", room.meeting_id, err);
                MeetingSnapshot {
                    error: Some(err.message),
                    ..MeetingSnapshot::absent()
                }
            });
            let room_state = if !snapshot.exists {
                "stopped"
            } else if snapshot.running {
                "running"
            } else {
                "idle"
            };
            RoomStatus {
                room,
                state: room_state,
                snapshot,
            }
        })
        .collect();

    Json(statuses)
}

// Start-meeting endpoint for the admin dashboard
pub async fn start_meeting(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<StartMeetingRequest>,
) -> Result<Json<StartMeetingResponse>, HandlerError> {
    if request.meeting_id.is_empty() {
        return Err(bad_request("Meeting ID is required"));
    }

    info!(
        "Received request to start meeting {} (recording: {})",
        request.meeting_id, request.enable_recording
    );

    match state
        .client
        .create_meeting(&request.meeting_id, request.enable_recording)
        .await
    {
        Ok(created) => {
            let message = format!(
                "Successfully created meeting: {} (ID: {}){}",
                created.meeting_name,
                created.meeting_id,
                if created.recording_enabled {
                    " with recording enabled"
                } else {
                    ""
                }
            );
            info!("{}", message);
            Ok(Json(StartMeetingResponse {
                success: true,
                message,
                meeting_id: created.meeting_id,
                meeting_name: created.meeting_name,
                recording_enabled: created.recording_enabled,
            }))
        }
        Err(err) => Err(gateway_error("Failed to create meeting", err)),
    }
}

// Stop-meeting endpoint for the admin dashboard
pub async fn stop_meeting(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<StopMeetingRequest>,
) -> Result<Json<StopMeetingResponse>, HandlerError> {
    if request.meeting_id.is_empty() {
        return Err(bad_request("Meeting ID is required"));
    }

    info!("Received request to stop meeting {}", request.meeting_id);

    match state.client.end_meeting(&request.meeting_id).await {
        Ok(()) => {
            let message = format!("Successfully ended meeting: {}", request.meeting_id);
            info!("{}", message);
            Ok(Json(StopMeetingResponse {
                success: true,
                message,
                meeting_id: request.meeting_id,
            }))
        }
        Err(err) => Err(gateway_error("Failed to end meeting", err)),
    }
}
