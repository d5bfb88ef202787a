//! Conferencing client — the single point of entry for all Zoom API calls.
//!
//! Two sequential blocking calls per booking: a client-credentials token
//! grant, then the meeting creation. No retry; each call carries a bounded
//! timeout so a dead provider surfaces as one `SchedulingError` instead of
//! a hang. An auth failure short-circuits — the meeting call is never made.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::scheduling::slots::InterviewSlot;

const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Zoom meeting type 2 = scheduled meeting.
const MEETING_TYPE_SCHEDULED: u8 = 2;

#[derive(Debug, Error)]
pub enum SchedulingError {
    /// Token acquisition failed (non-2xx, transport error, missing token).
    #[error("conferencing auth failed: {0}")]
    AuthFailure(String),

    /// Meeting creation failed (non-2xx, transport error, missing join URL).
    #[error("meeting booking failed: {0}")]
    BookingFailure(String),
}

/// What the workflow asks of a scheduler: book the slot, return a join URL.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    /// Meeting topic; the role description in practice.
    pub topic: String,
    pub slot: InterviewSlot,
}

/// Seam for meeting booking. Production uses `ZoomScheduler`; tests
/// substitute a fake through `Arc<dyn MeetingScheduler>` in `AppState`.
#[async_trait]
pub trait MeetingScheduler: Send + Sync {
    async fn book(&self, request: &BookingRequest) -> Result<String, SchedulingError>;
}

pub struct ZoomScheduler {
    client: Client,
    oauth_base: String,
    api_base: String,
    account_id: String,
    client_id: String,
    client_secret: String,
    /// Offset the slot times are expressed in; converted to UTC on the wire.
    source_offset: FixedOffset,
}

impl ZoomScheduler {
    pub fn new(
        oauth_base: String,
        api_base: String,
        account_id: String,
        client_id: String,
        client_secret: String,
        source_offset: FixedOffset,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            oauth_base,
            api_base,
            account_id,
            client_id,
            client_secret,
            source_offset,
        }
    }

    /// Client-credentials grant against the provider's OAuth endpoint.
    async fn fetch_token(&self) -> Result<String, SchedulingError> {
        let response = self
            .client
            .post(format!("{}/oauth/token", self.oauth_base))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "account_credentials"),
                ("account_id", self.account_id.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SchedulingError::AuthFailure(format!("token request failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        parse_token_response(status, &body)
    }

    async fn create_meeting(
        &self,
        token: &str,
        request: &BookingRequest,
    ) -> Result<String, SchedulingError> {
        let body = MeetingCreateRequest {
            topic: &request.topic,
            meeting_type: MEETING_TYPE_SCHEDULED,
            start_time: slot_start_utc(&request.slot, self.source_offset)
                .format("%Y-%m-%dT%H:%M:%SZ")
                .to_string(),
            duration: request.slot.duration_minutes,
            timezone: "UTC",
            settings: MeetingSettings {
                join_before_host: true,
                waiting_room: false,
            },
        };

        let response = self
            .client
            .post(format!("{}/meetings", self.api_base))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SchedulingError::BookingFailure(format!("meeting request failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        parse_meeting_response(status, &body)
    }
}

#[async_trait]
impl MeetingScheduler for ZoomScheduler {
    async fn book(&self, request: &BookingRequest) -> Result<String, SchedulingError> {
        let token = self.fetch_token().await.map_err(|e| {
            warn!("token acquisition failed, skipping meeting creation");
            e
        })?;
        let join_url = self.create_meeting(&token, request).await?;
        debug!("meeting booked for {}", request.slot.start_time);
        Ok(join_url)
    }
}

/// Converts a slot's local start time to UTC using the configured source
/// offset. Fixed offsets are never ambiguous; the fallback arm treats the
/// naive time as UTC and cannot be reached in practice.
pub fn slot_start_utc(slot: &InterviewSlot, source_offset: FixedOffset) -> DateTime<Utc> {
    match source_offset.from_local_datetime(&slot.start_time).single() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&slot.start_time),
    }
}

#[derive(Debug, Serialize)]
struct MeetingCreateRequest<'a> {
    topic: &'a str,
    #[serde(rename = "type")]
    meeting_type: u8,
    start_time: String,
    duration: u32,
    timezone: &'a str,
    settings: MeetingSettings,
}

#[derive(Debug, Serialize)]
struct MeetingSettings {
    join_before_host: bool,
    waiting_room: bool,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MeetingResponse {
    join_url: Option<String>,
}

fn parse_token_response(status: u16, body: &str) -> Result<String, SchedulingError> {
    if !(200..300).contains(&status) {
        return Err(SchedulingError::AuthFailure(format!(
            "token endpoint returned status {status}"
        )));
    }
    let parsed: TokenResponse = serde_json::from_str(body)
        .map_err(|e| SchedulingError::AuthFailure(format!("unreadable token response: {e}")))?;
    parsed
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SchedulingError::AuthFailure("token response had no access_token".into()))
}

fn parse_meeting_response(status: u16, body: &str) -> Result<String, SchedulingError> {
    if !(200..300).contains(&status) {
        return Err(SchedulingError::BookingFailure(format!(
            "meeting endpoint returned status {status}"
        )));
    }
    let parsed: MeetingResponse = serde_json::from_str(body)
        .map_err(|e| SchedulingError::BookingFailure(format!("unreadable meeting response: {e}")))?;
    parsed
        .join_url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| SchedulingError::BookingFailure("meeting response had no join_url".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn slot(hour: u32) -> InterviewSlot {
        InterviewSlot {
            start_time: NaiveDate::from_ymd_opt(2026, 9, 7)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            duration_minutes: 45,
        }
    }

    #[test]
    fn test_token_non_2xx_is_auth_failure() {
        let result = parse_token_response(401, r#"{"reason":"bad credentials"}"#);
        assert!(matches!(result, Err(SchedulingError::AuthFailure(_))));
    }

    #[test]
    fn test_token_missing_field_is_auth_failure() {
        let result = parse_token_response(200, r#"{"token_type":"bearer"}"#);
        assert!(matches!(result, Err(SchedulingError::AuthFailure(_))));
    }

    #[test]
    fn test_token_success() {
        let token = parse_token_response(200, r#"{"access_token":"abc123"}"#).unwrap();
        assert_eq!(token, "abc123");
    }

    #[test]
    fn test_meeting_non_2xx_is_booking_failure() {
        let result = parse_meeting_response(500, "oops");
        assert!(matches!(result, Err(SchedulingError::BookingFailure(_))));
    }

    #[test]
    fn test_meeting_success_returns_join_url() {
        let url =
            parse_meeting_response(201, r#"{"id":1,"join_url":"https://zoom.us/j/42"}"#).unwrap();
        assert_eq!(url, "https://zoom.us/j/42");
    }

    #[test]
    fn test_error_text_never_echoes_credentials() {
        // Parsers only ever see status + body; assert the message shape stays
        // free of anything resembling a secret.
        let err = parse_token_response(403, r#"{"secret":"should-not-appear"}"#).unwrap_err();
        assert!(!err.to_string().contains("should-not-appear"));
    }

    #[test]
    fn test_slot_start_converted_to_utc() {
        let offset = "+05:30".parse::<FixedOffset>().unwrap();
        let utc = slot_start_utc(&slot(9), offset);
        // 09:00 at +05:30 is 03:30 UTC.
        assert_eq!(utc.format("%Y-%m-%dT%H:%M:%SZ").to_string(), "2026-09-07T03:30:00Z");
    }

    #[test]
    fn test_zero_offset_reproduces_reference_behavior() {
        let offset = "+00:00".parse::<FixedOffset>().unwrap();
        let utc = slot_start_utc(&slot(13), offset);
        assert_eq!(utc.format("%H:%M").to_string(), "13:00");
    }

    #[test]
    fn test_meeting_request_body_shape() {
        let body = MeetingCreateRequest {
            topic: "Backend Engineer interview",
            meeting_type: MEETING_TYPE_SCHEDULED,
            start_time: "2026-09-07T09:00:00Z".to_string(),
            duration: 45,
            timezone: "UTC",
            settings: MeetingSettings {
                join_before_host: true,
                waiting_room: false,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["type"], 2);
        assert_eq!(json["timezone"], "UTC");
        assert_eq!(json["settings"]["join_before_host"], true);
        assert_eq!(json["settings"]["waiting_room"], false);
    }
}
