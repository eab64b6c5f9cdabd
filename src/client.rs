use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info};
use url::form_urlencoded;

use crate::auth::BbbAuth;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::models::meeting::{MeetingSnapshot, Role};
use crate::xml;

/// Moderator password the remote protocol requires on `end` calls. Fixed by
/// room provisioning, not derived from the shared secret.
const MODERATOR_PASSWORD: &str = "mp";

/// Display name substituted when the configured administrator joins.
const ADMIN_DISPLAY_NAME: &str = "Admin";

/// Outcome of a create call.
#[derive(Debug, Clone)]
pub struct CreatedMeeting {
    pub meeting_id: String,
    pub meeting_name: String,
    pub recording_enabled: bool,
}

/// A fully qualified join URL; the gateway never fetches it, the client
/// navigates to it and the server issues its own session.
#[derive(Debug, Clone)]
pub struct JoinDetails {
    pub join_url: String,
    pub meeting_id: String,
    pub full_name: String,
}

/// Gateway client for the BigBlueButton API.
///
/// Operations hold no state across calls; concurrent calls are independent
/// and never coalesced. create/end/getMeetingInfo each issue one outbound
/// HTTP call. Building a join URL issues the existence check only; the URL
/// itself is handed back for the client to navigate to.
pub struct BbbClient {
    client: Client,
    config: Arc<GatewayConfig>,
}

impl BbbClient {
    pub fn new(config: Arc<GatewayConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Serialize `params` in the given order, sign the result, and append
    /// the checksum as the final query parameter. The serialized form is
    /// byte-for-byte the one transmitted; the signer never re-orders it.
    fn signed_url(&self, action: &str, params: &[(&str, &str)]) -> Result<String, GatewayError> {
        let (base_url, secret) = self.config.credentials()?;

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in params {
            serializer.append_pair(key, value);
        }
        let query_string = serializer.finish();

        let checksum = BbbAuth::generate_checksum(action, &query_string, secret);
        Ok(format!(
            "{base_url}/api/{action}?{query_string}&checksum={checksum}"
        ))
    }

    /// Create a meeting on the conferencing server.
    ///
    /// Unknown meeting IDs are not an error: the ID doubles as the display
    /// name. Recording parameters are all-or-nothing. Any 2xx is treated as
    /// success without inspecting the body for an embedded failure code;
    /// the raw body stays in the debug log.
    pub async fn create_meeting(
        &self,
        meeting_id: &str,
        enable_recording: bool,
    ) -> Result<CreatedMeeting, GatewayError> {
        let meeting_name = self.config.rooms.display_name(meeting_id);

        let mut params = vec![("meetingID", meeting_id), ("name", meeting_name.as_str())];
        if enable_recording {
            params.push(("record", "true"));
            params.push(("autoStartRecording", "true"));
            params.push(("allowStartStopRecording", "true"));
        }

        let url = self.signed_url("create", &params)?;
        info!("Creating meeting {} ({})", meeting_id, meeting_name);
        debug!("Create URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| GatewayError::transport(&err))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| GatewayError::transport(&err))?;
        debug!("Create response: {}", body);

        if !status.is_success() {
            return Err(GatewayError::remote(
                "create-failed",
                format!("Failed to create meeting: {status}"),
            )
            .with_detail(body));
        }

        Ok(CreatedMeeting {
            meeting_id: meeting_id.to_string(),
            meeting_name,
            recording_enabled: enable_recording,
        })
    }

    /// End a running meeting. Same 2xx-is-success interpretation as create.
    pub async fn end_meeting(&self, meeting_id: &str) -> Result<(), GatewayError> {
        let url = self.signed_url(
            "end",
            &[("meetingID", meeting_id), ("password", MODERATOR_PASSWORD)],
        )?;
        info!("Ending meeting {}", meeting_id);
        debug!("End URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| GatewayError::transport(&err))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| GatewayError::transport(&err))?;
        debug!("End response: {}", body);

        if !status.is_success() {
            return Err(GatewayError::remote(
                "end-failed",
                format!("Failed to end meeting: {status}"),
            )
            .with_detail(body));
        }

        Ok(())
    }

    /// Fresh snapshot of a meeting's status. Never cached; every call is an
    /// independent remote query.
    pub async fn get_meeting_info(
        &self,
        meeting_id: &str,
    ) -> Result<MeetingSnapshot, GatewayError> {
        let url = self.signed_url("getMeetingInfo", &[("meetingID", meeting_id)])?;
        debug!("Meeting info URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| GatewayError::transport(&err))?;
        let body = response
            .text()
            .await
            .map_err(|err| GatewayError::transport(&err))?;
        debug!("Meeting info response: {}", body);

        xml::parse_meeting_info(&body)
    }

    /// Build a signed join URL for a meeting that exists.
    ///
    /// The configured administrator joins under a fixed display name and is
    /// always a moderator, whatever role the caller supplied. A meeting the
    /// server does not know about yields `not-found` and no URL.
    pub async fn build_join_url(
        &self,
        meeting_id: &str,
        full_name: &str,
        role: Role,
    ) -> Result<JoinDetails, GatewayError> {
        let (full_name, role) = if self.config.is_admin(full_name) {
            (ADMIN_DISPLAY_NAME.to_string(), Role::Moderator)
        } else {
            (full_name.to_string(), role)
        };

        let snapshot = self.get_meeting_info(meeting_id).await?;
        if !snapshot.exists {
            return Err(GatewayError::not_found());
        }

        let join_url = self.signed_url(
            "join",
            &[
                ("meetingID", meeting_id),
                ("fullName", full_name.as_str()),
                ("role", role.as_str()),
            ],
        )?;
        info!(
            "Built join URL for {} as {} in meeting {}",
            full_name,
            role.as_str(),
            meeting_id
        );

        Ok(JoinDetails {
            join_url,
            meeting_id: meeting_id.to_string(),
            full_name,
        })
    }
}
