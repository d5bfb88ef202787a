//! Interview slot generation — one slot per whole business hour.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

pub const BUSINESS_START_HOUR: u32 = 9;
pub const BUSINESS_END_HOUR: u32 = 17;
/// Interview length quoted to candidates.
pub const DEFAULT_SLOT_MINUTES: u32 = 45;
/// Candidates get at least this much notice before an interview.
pub const MIN_NOTICE_DAYS: u64 = 3;

/// A bookable interview start time, expressed in the operator's configured
/// interview timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSlot {
    pub start_time: NaiveDateTime,
    pub duration_minutes: u32,
}

/// All slots for a calendar date: one per whole hour in [9:00, 17:00),
/// strictly increasing. Pure function of the date — callers enforce the
/// minimum-notice rule before offering these to a candidate.
pub fn slots_for_date(date: NaiveDate, duration_minutes: u32) -> Vec<InterviewSlot> {
    (BUSINESS_START_HOUR..BUSINESS_END_HOUR)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .map(|start_time| InterviewSlot {
            start_time,
            duration_minutes,
        })
        .collect()
}

/// Earliest date an interview may be scheduled for.
pub fn earliest_interview_date(today: NaiveDate) -> NaiveDate {
    today + chrono::Days::new(MIN_NOTICE_DAYS)
}

/// A start time is valid iff it is exactly one of the generated slots for
/// its date.
pub fn is_valid_slot_start(start_time: NaiveDateTime) -> bool {
    let hour = start_time.time().hour();
    (BUSINESS_START_HOUR..BUSINESS_END_HOUR).contains(&hour)
        && start_time.time().minute() == 0
        && start_time.time().second() == 0
}
