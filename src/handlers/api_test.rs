#[cfg(test)]
mod api_tests {
    use axum::http::StatusCode;
    use axum_test::{TestServer, TestServerConfig};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::BbbClient;
    use crate::config::GatewayConfig;
    use crate::handlers::api::AppState;
    use crate::models::room::{Room, RoomCatalog};
    use crate::routes::create_router;

    const RUNNING_MEETING_XML: &str = "<response><returncode>SUCCESS</returncode>\
        <meetingID>general-room</meetingID><meetingName>General Room</meetingName>\
        <participantCount>2</participantCount><running>true</running>\
        <recording>true</recording></response>";

    // Test server wired to a wiremock stand-in for the conferencing server
    fn setup_test_server(bbb_url: &str) -> TestServer {
        let rooms = RoomCatalog::with_rooms(vec![
            Room::new("general", "general-room", "General Room"),
            Room::new("beginner", "beginner-room", "Beginner Room"),
        ]);
        let config = Arc::new(GatewayConfig::new(
            Some(bbb_url.to_string()),
            Some("test-secret".to_string()),
            Some("superadmin".to_string()),
            rooms,
        ));
        let app_state = Arc::new(AppState {
            client: BbbClient::new(config),
        });

        let router = create_router(app_state);
        let config = TestServerConfig::builder().mock_transport().build();
        TestServer::new_with_config(router, config).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let bbb = MockServer::start().await;
        let server = setup_test_server(&bbb.uri());

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
    }

    #[tokio::test]
    async fn test_join_returns_signed_url() {
        let bbb = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getMeetingInfo"))
            .and(query_param("meetingID", "general-room"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RUNNING_MEETING_XML))
            .mount(&bbb)
            .await;

        let server = setup_test_server(&bbb.uri());
        let response = server
            .get("/api/join")
            .add_query_param("name", "Alice")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["meetingID"], "general-room");
        assert_eq!(body["fullName"], "Alice");
        let join_url = body["joinUrl"].as_str().unwrap();
        assert!(join_url.contains("/api/join?meetingID=general-room"));
        assert!(join_url.contains("role=VIEWER"));
        assert!(join_url.contains("&checksum="));
    }

    #[tokio::test]
    async fn test_join_resolves_level_to_room() {
        let bbb = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getMeetingInfo"))
            .and(query_param("meetingID", "beginner-room"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<response><meetingID>beginner-room</meetingID></response>",
            ))
            .expect(1)
            .mount(&bbb)
            .await;

        let server = setup_test_server(&bbb.uri());
        let response = server
            .get("/api/join")
            .add_query_param("name", "Alice")
            .add_query_param("level", "beginner")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["meetingID"], "beginner-room");
    }

    #[tokio::test]
    async fn test_join_elevates_admin() {
        let bbb = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getMeetingInfo"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RUNNING_MEETING_XML))
            .mount(&bbb)
            .await;

        let server = setup_test_server(&bbb.uri());
        let response = server
            .get("/api/join")
            .add_query_param("name", "superadmin")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["fullName"], "Admin");
        assert!(body["joinUrl"].as_str().unwrap().contains("role=MODERATOR"));
    }

    #[tokio::test]
    async fn test_join_without_live_meeting_is_400() {
        let bbb = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getMeetingInfo"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<response></response>"),
            )
            .mount(&bbb)
            .await;

        let server = setup_test_server(&bbb.uri());
        let response = server
            .get("/api/join")
            .add_query_param("name", "Alice")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["error"], "No meeting found");
        assert_eq!(body["errorKey"], "not-found");
    }

    #[tokio::test]
    async fn test_join_requires_name() {
        let bbb = MockServer::start().await;
        let server = setup_test_server(&bbb.uri());

        let response = server.get("/api/join").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_meeting_status_returns_snapshot() {
        let bbb = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getMeetingInfo"))
            .and(query_param("meetingID", "general-room"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RUNNING_MEETING_XML))
            .mount(&bbb)
            .await;

        let server = setup_test_server(&bbb.uri());
        let response = server
            .get("/api/admin/meeting-status")
            .add_query_param("meetingID", "general-room")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["exists"], true);
        assert_eq!(body["running"], true);
        assert_eq!(body["participantCount"], 2);
        assert_eq!(body["recordingStatus"], "recording");
    }

    #[tokio::test]
    async fn test_meeting_status_requires_meeting_id() {
        let bbb = MockServer::start().await;
        let server = setup_test_server(&bbb.uri());

        let response = server.get("/api/admin/meeting-status").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_configuration_maps_to_500() {
        let rooms = RoomCatalog::with_rooms(vec![Room::new(
            "general",
            "general-room",
            "General Room",
        )]);
        let config = Arc::new(GatewayConfig::new(None, None, None, rooms));
        let app_state = Arc::new(AppState {
            client: BbbClient::new(config),
        });
        let server = TestServer::new_with_config(
            create_router(app_state),
            TestServerConfig::builder().mock_transport().build(),
        )
        .unwrap();

        let response = server
            .get("/api/admin/meeting-status")
            .add_query_param("meetingID", "general-room")
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(body["error"], "BigBlueButton configuration missing");
        assert_eq!(body["errorKey"], "config-missing");
    }

    #[tokio::test]
    async fn test_list_room_status_covers_whole_catalogue() {
        let bbb = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getMeetingInfo"))
            .and(query_param("meetingID", "general-room"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RUNNING_MEETING_XML))
            .mount(&bbb)
            .await;
        // The beginner room has no meeting on the server
        Mock::given(method("GET"))
            .and(path("/api/getMeetingInfo"))
            .and(query_param("meetingID", "beginner-room"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<response></response>"),
            )
            .mount(&bbb)
            .await;

        let server = setup_test_server(&bbb.uri());
        let response = server.get("/api/admin/rooms").await;
        response.assert_status_ok();

        let body: Value = response.json();
        let rooms = body.as_array().unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0]["meetingID"], "general-room");
        assert_eq!(rooms[0]["state"], "running");
        assert_eq!(rooms[0]["snapshot"]["participantCount"], 2);
        assert_eq!(rooms[1]["meetingID"], "beginner-room");
        assert_eq!(rooms[1]["state"], "stopped");
    }

    #[tokio::test]
    async fn test_start_meeting_success() {
        let bbb = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/create"))
            .and(query_param("meetingID", "general-room"))
            .and(query_param("record", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<response><returncode>SUCCESS</returncode></response>",
            ))
            .expect(1)
            .mount(&bbb)
            .await;

        let server = setup_test_server(&bbb.uri());
        let response = server
            .post("/api/admin/start-meeting")
            .json(&json!({ "meetingID": "general-room", "enableRecording": true }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["meetingName"], "General Room");
        assert_eq!(body["recordingEnabled"], true);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("with recording enabled"));
    }

    #[tokio::test]
    async fn test_start_meeting_requires_meeting_id() {
        let bbb = MockServer::start().await;
        let server = setup_test_server(&bbb.uri());

        let response = server
            .post("/api/admin/start-meeting")
            .json(&json!({ "enableRecording": false }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_stop_meeting_success() {
        let bbb = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/end"))
            .and(query_param("meetingID", "general-room"))
            .and(query_param("password", "mp"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<response><returncode>SUCCESS</returncode></response>",
            ))
            .expect(1)
            .mount(&bbb)
            .await;

        let server = setup_test_server(&bbb.uri());
        let response = server
            .post("/api/admin/stop-meeting")
            .json(&json!({ "meetingID": "general-room" }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["meetingID"], "general-room");
    }

    #[tokio::test]
    async fn test_stop_meeting_upstream_failure_is_500() {
        let bbb = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/end"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&bbb)
            .await;

        let server = setup_test_server(&bbb.uri());
        let response = server
            .post("/api/admin/stop-meeting")
            .json(&json!({ "meetingID": "general-room" }))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(body["errorKey"], "end-failed");
    }
}
