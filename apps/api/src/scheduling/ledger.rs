//! Interview ledger — append-only record of confirmed bookings.
//!
//! Entries are never mutated or removed; unbounded growth over a process
//! lifetime is a known characteristic, not something to silently cap.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::scheduling::slots::InterviewSlot;

/// Created only on a successful booking.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledInterview {
    pub id: Uuid,
    pub candidate_email: String,
    pub role_id: String,
    pub slot: InterviewSlot,
    pub meeting_link: Option<String>,
    pub booked_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct InterviewLedger {
    entries: Vec<ScheduledInterview>,
}

impl InterviewLedger {
    pub fn append(&mut self, interview: ScheduledInterview) {
        self.entries.push(interview);
    }

    pub fn snapshot(&self) -> Vec<ScheduledInterview> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
