//! Scheduling endpoints: slot listing, interview booking, and the ledger view.

use std::sync::Mutex;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::metrics::MetricsAggregator;
use crate::notification::{
    dispatch_logged, Mailer, NotificationContext, NotificationKind, NotificationStatus,
};
use crate::scheduling::ledger::{InterviewLedger, ScheduledInterview};
use crate::scheduling::slots::{
    earliest_interview_date, is_valid_slot_start, slots_for_date, InterviewSlot,
    DEFAULT_SLOT_MINUTES,
};
use crate::scheduling::zoom::{BookingRequest, MeetingScheduler};
use crate::screening::catalog::RoleProfile;
use crate::state::{lock, AppState};

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub date: NaiveDate,
    pub slots: Vec<InterviewSlot>,
}

/// GET /api/v1/interviews/slots?date=YYYY-MM-DD
///
/// Enforces the minimum-notice rule before generating anything: the slot
/// generator itself is a pure function of the date.
pub async fn handle_list_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let today = Utc::now()
        .with_timezone(&state.config.interview_tz_offset)
        .date_naive();
    let earliest = earliest_interview_date(today);
    if query.date < earliest {
        return Err(AppError::Validation(format!(
            "interviews need {} days notice; earliest available date is {earliest}",
            crate::scheduling::slots::MIN_NOTICE_DAYS
        )));
    }

    Ok(Json(SlotsResponse {
        date: query.date,
        slots: slots_for_date(query.date, DEFAULT_SLOT_MINUTES),
    }))
}

#[derive(Debug, Deserialize)]
pub struct BookInterviewRequest {
    pub candidate_email: String,
    pub role: String,
    pub start_time: NaiveDateTime,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct BookInterviewResponse {
    pub booked: bool,
    pub interview: Option<ScheduledInterview>,
    /// Set when booking failed; the candidate stays accepted but unscheduled.
    pub scheduling_error: Option<String>,
    pub notifications: Vec<NotificationStatus>,
}

/// POST /api/v1/interviews
pub async fn handle_book_interview(
    State(state): State<AppState>,
    Json(request): Json<BookInterviewRequest>,
) -> Result<Json<BookInterviewResponse>, AppError> {
    if !request.candidate_email.contains('@') {
        return Err(AppError::Validation(format!(
            "'{}' is not a valid email address",
            request.candidate_email
        )));
    }

    let profile = state.catalog.get(&request.role)?.clone();

    let today = Utc::now()
        .with_timezone(&state.config.interview_tz_offset)
        .date_naive();
    if request.start_time.date() < earliest_interview_date(today) {
        return Err(AppError::Validation(format!(
            "interview date {} violates the minimum-notice rule (earliest {})",
            request.start_time.date(),
            earliest_interview_date(today)
        )));
    }
    if !is_valid_slot_start(request.start_time) {
        return Err(AppError::Validation(format!(
            "{} is not a valid interview slot; slots start on the hour between 09:00 and 16:00",
            request.start_time
        )));
    }

    let slot = InterviewSlot {
        start_time: request.start_time,
        duration_minutes: request.duration_minutes.unwrap_or(DEFAULT_SLOT_MINUTES),
    };

    let outcome = run_booking(
        state.scheduler.as_ref(),
        state.mailer.as_ref(),
        &state.metrics,
        &state.ledger,
        &state.config.company_name,
        &profile,
        &request.candidate_email,
        slot,
    )
    .await?;

    Ok(Json(outcome))
}

/// GET /api/v1/interviews
pub async fn handle_list_interviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScheduledInterview>>, AppError> {
    let ledger = lock(&state.ledger)?;
    Ok(Json(ledger.snapshot()))
}

/// The booking workflow for an accepted candidate: book the meeting, append
/// the ledger entry, send the selection and interview-details emails, and
/// record the completed evaluation exactly once.
///
/// A booking failure is an outcome, not an early return — the candidate
/// stays accepted, no interview is counted, and the failure is reported.
#[allow(clippy::too_many_arguments)]
pub async fn run_booking(
    scheduler: &dyn MeetingScheduler,
    mailer: &dyn Mailer,
    metrics: &Mutex<MetricsAggregator>,
    ledger: &Mutex<InterviewLedger>,
    company_name: &str,
    profile: &RoleProfile,
    candidate_email: &str,
    slot: InterviewSlot,
) -> Result<BookInterviewResponse, AppError> {
    let booking = BookingRequest {
        topic: profile.description.clone(),
        slot: slot.clone(),
    };

    match scheduler.book(&booking).await {
        Ok(meeting_link) => {
            let interview = ScheduledInterview {
                id: Uuid::new_v4(),
                candidate_email: candidate_email.to_string(),
                role_id: profile.role_id.clone(),
                slot: slot.clone(),
                meeting_link: Some(meeting_link.clone()),
                booked_at: Utc::now(),
            };
            lock(ledger)?.append(interview.clone());

            let ctx = NotificationContext {
                role_id: &profile.role_id,
                company_name,
                interview: Some((&slot, meeting_link.as_str())),
            };
            let selection =
                dispatch_logged(mailer, NotificationKind::Selection, candidate_email, &ctx).await;
            let details = dispatch_logged(
                mailer,
                NotificationKind::InterviewDetails,
                candidate_email,
                &ctx,
            )
            .await;

            lock(metrics)?.record(&profile.role_id, true, true);
            info!(
                role = profile.role_id.as_str(),
                start = %slot.start_time,
                "interview booked"
            );

            Ok(BookInterviewResponse {
                booked: true,
                interview: Some(interview),
                scheduling_error: None,
                notifications: vec![selection, details],
            })
        }
        Err(e) => {
            warn!("booking failed, candidate remains accepted but unscheduled: {e}");
            lock(metrics)?.record(&profile.role_id, true, false);
            Ok(BookInterviewResponse {
                booked: false,
                interview: None,
                scheduling_error: Some(e.to_string()),
                notifications: Vec::new(),
            })
        }
    }
}
