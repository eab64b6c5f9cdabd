use regex::Regex;
use tracing::debug;

use crate::error::GatewayError;
use crate::models::meeting::{MeetingSnapshot, RecordingStatus};

const FAILED_MARKER: &str = "<returncode>FAILED</returncode>";

/// Text of the first `<tag>...</tag>` pair, or None when the pair is absent.
///
/// Each extraction is independent of every other field and of document
/// order; duplicate tags resolve to the first occurrence.
fn extract_tag(xml: &str, tag: &str) -> Option<String> {
    let re = Regex::new(&format!("(?s)<{tag}>(.*?)</{tag}>")).ok()?;
    re.captures(xml).map(|captures| captures[1].to_string())
}

/// Interpret a getMeetingInfo payload into a snapshot.
///
/// Decision order, first match wins:
/// 1. failure return code -> `GatewayError` carrying the server's
///    messageKey/message,
/// 2. a `meetingID` tag -> the meeting exists; scrape its fields with
///    missing ones defaulting rather than failing,
/// 3. otherwise -> the meeting does not exist.
pub fn parse_meeting_info(xml: &str) -> Result<MeetingSnapshot, GatewayError> {
    if xml.contains(FAILED_MARKER) {
        let error_key =
            extract_tag(xml, "messageKey").unwrap_or_else(|| "unknown".to_string());
        let message =
            extract_tag(xml, "message").unwrap_or_else(|| "Unknown error".to_string());
        return Err(GatewayError::remote(error_key, message).with_detail(xml));
    }

    if xml.contains("<meetingID>") {
        // An opening tag with no matching close is the one payload shape we
        // cannot interpret at all
        let meeting_id = match extract_tag(xml, "meetingID") {
            Some(meeting_id) => meeting_id,
            None => return Err(GatewayError::parse(xml)),
        };

        let participant_count = extract_tag(xml, "participantCount")
            .and_then(|count| count.parse::<u32>().ok())
            .unwrap_or(0);

        let running = extract_tag(xml, "running").as_deref() == Some("true");

        let mut recording_status = match extract_tag(xml, "recording").as_deref() {
            Some("true") => RecordingStatus::Recording,
            _ => RecordingStatus::NotRecording,
        };
        // A recording in post-processing wins over the live recording flag
        if extract_tag(xml, "processing").as_deref() == Some("true") {
            recording_status = RecordingStatus::Processing;
        }

        return Ok(MeetingSnapshot {
            exists: true,
            meeting_id,
            meeting_name: extract_tag(xml, "meetingName").unwrap_or_default(),
            participant_count,
            running,
            recording_status,
            error: None,
            raw_xml: xml.to_string(),
        });
    }

    debug!("Payload has no failure marker and no meetingID tag; meeting is absent");
    Ok(MeetingSnapshot::absent())
}
