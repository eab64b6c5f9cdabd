use serde::{Deserialize, Serialize};

/// Recording state reported by the conferencing server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordingStatus {
    #[default]
    #[serde(rename = "not-recording")]
    NotRecording,
    #[serde(rename = "recording")]
    Recording,
    #[serde(rename = "processing")]
    Processing,
}

/// Role a participant joins a meeting with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Viewer,
    Moderator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Viewer => "VIEWER",
            Role::Moderator => "MODERATOR",
        }
    }
}

/// Point-in-time view of a meeting on the conferencing server.
///
/// Produced fresh on every status query and never cached; two concurrent
/// queries for the same meeting yield two independent snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetingSnapshot {
    pub exists: bool,
    #[serde(rename = "meetingID", default)]
    pub meeting_id: String,
    #[serde(rename = "meetingName", default)]
    pub meeting_name: String,
    #[serde(rename = "participantCount", default)]
    pub participant_count: u32,
    #[serde(default)]
    pub running: bool,
    #[serde(rename = "recordingStatus", default)]
    pub recording_status: RecordingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Raw server payload retained for diagnostics, never sent to clients.
    #[serde(skip)]
    pub raw_xml: String,
}

impl MeetingSnapshot {
    /// Snapshot for a meeting the server does not know about.
    pub fn absent() -> Self {
        Self {
            exists: false,
            error: Some("Meeting not found".to_string()),
            ..Self::default()
        }
    }
}

/// Response body for a successful join request.
#[derive(Debug, Serialize, Deserialize)]
pub struct JoinResponse {
    #[serde(rename = "joinUrl")]
    pub join_url: String,
    #[serde(rename = "meetingID")]
    pub meeting_id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
}

/// Request body for the start-meeting endpoint.
#[derive(Debug, Deserialize)]
pub struct StartMeetingRequest {
    #[serde(rename = "meetingID", default)]
    pub meeting_id: String,
    #[serde(rename = "enableRecording", default = "default_enable_recording")]
    pub enable_recording: bool,
}

fn default_enable_recording() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartMeetingResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "meetingID")]
    pub meeting_id: String,
    #[serde(rename = "meetingName")]
    pub meeting_name: String,
    #[serde(rename = "recordingEnabled")]
    pub recording_enabled: bool,
}

/// Request body for the stop-meeting endpoint.
#[derive(Debug, Deserialize)]
pub struct StopMeetingRequest {
    #[serde(rename = "meetingID", default)]
    pub meeting_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StopMeetingResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "meetingID")]
    pub meeting_id: String,
}
