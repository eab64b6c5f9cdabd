use serde::Serialize;
use std::env;

/// A pre-provisioned room on the conferencing server.
#[derive(Debug, Clone, Serialize)]
pub struct Room {
    pub level: String,
    #[serde(rename = "meetingID")]
    pub meeting_id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl Room {
    pub fn new(level: &str, meeting_id: &str, display_name: &str) -> Self {
        Self {
            level: level.to_string(),
            meeting_id: meeting_id.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

/// Static catalogue of well-known rooms, fixed at startup.
#[derive(Debug, Clone)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    /// Build the catalogue from environment overrides, falling back to the
    /// default room identifiers.
    pub fn from_env() -> Self {
        let room = |level: &str, id_var: &str, default_id: &str, name: &str| {
            let meeting_id = env::var(id_var).unwrap_or_else(|_| default_id.to_string());
            Room::new(level, &meeting_id, name)
        };

        Self {
            rooms: vec![
                room("general", "GENERAL_MEETING_ID", "general-room", "General Room"),
                room("beginner", "BEGINNER_MEETING_ID", "beginner-room", "Beginner Room"),
                room(
                    "intermediate",
                    "INTERMEDIATE_MEETING_ID",
                    "intermediate-room",
                    "Intermediate Room",
                ),
                room("elite", "ELITE_MEETING_ID", "elite-room", "Elite Room"),
            ],
        }
    }

    pub fn with_rooms(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Room for a dashboard level. Unknown or missing levels fall back to
    /// the general room.
    pub fn room_for_level(&self, level: Option<&str>) -> Option<&Room> {
        let general = self.rooms.iter().find(|r| r.level == "general");
        match level {
            Some(level) => self
                .rooms
                .iter()
                .find(|r| r.level == level)
                .or(general),
            None => general,
        }
        .or_else(|| self.rooms.first())
    }

    /// Display name for a meeting ID. Unknown IDs use the ID itself; this
    /// lookup never fails.
    pub fn display_name(&self, meeting_id: &str) -> String {
        self.rooms
            .iter()
            .find(|r| r.meeting_id == meeting_id)
            .map(|r| r.display_name.clone())
            .unwrap_or_else(|| meeting_id.to_string())
    }
}
