//! Fixed email templates. Three kinds, interpolating role and company name,
//! plus interview details for the scheduling email. No other variation.

use serde::Serialize;

use crate::scheduling::slots::InterviewSlot;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Selection,
    Rejection,
    InterviewDetails,
}

#[derive(Debug, Clone)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

pub fn selection(role_id: &str, company_name: &str) -> EmailContent {
    EmailContent {
        subject: "Congratulations! You are Selected for the Next Stage".to_string(),
        body: format!(
            "Dear Candidate,\n\n\
             Congratulations! You meet the requirements for the {role_id} role at {company_name}.\n\
             We are excited to invite you to the next stage of the interview process.\n\n\
             Best Regards,\n\
             {company_name}\n"
        ),
    }
}

pub fn rejection(role_id: &str, company_name: &str) -> EmailContent {
    EmailContent {
        subject: format!("Update on Your Application for the {role_id} Role"),
        body: format!(
            "Dear Candidate,\n\n\
             Thank you for applying for the {role_id} role at {company_name}.\n\
             Unfortunately, your skills do not match our current requirements for this role.\n\
             We encourage you to apply again in the future. Better luck next time!\n\n\
             Best Regards,\n\
             {company_name}\n"
        ),
    }
}

pub fn interview_details(
    role_id: &str,
    company_name: &str,
    slot: &InterviewSlot,
    meeting_link: &str,
) -> EmailContent {
    EmailContent {
        subject: format!("Interview Scheduled for {role_id} Role"),
        body: format!(
            "Dear Candidate,\n\n\
             Congratulations! You have been selected for an interview for the {role_id} role at {company_name}.\n\n\
             Interview Details:\n\
             - Date: {date}\n\
             - Time: {time} (Your Time Zone)\n\
             - Duration: {duration} minutes\n\
             - Interview Format: Technical interview followed by Q&A\n\n\
             Meeting Link:\n\
             {meeting_link}\n\n\
             Preparation Instructions:\n\
             1. Please ensure you have a stable internet connection.\n\
             2. Join the interview 5 minutes early.\n\
             3. Be prepared to discuss your experience, skills, and problem-solving abilities.\n\n\
             We look forward to meeting you soon!\n\n\
             Best Regards,\n\
             {company_name}\n",
            date = slot.start_time.format("%Y-%m-%d"),
            time = slot.start_time.format("%H:%M:%S"),
            duration = slot.duration_minutes,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn slot() -> InterviewSlot {
        InterviewSlot {
            start_time: NaiveDate::from_ymd_opt(2026, 9, 7)
                .unwrap()
                .and_hms_opt(11, 0, 0)
                .unwrap(),
            duration_minutes: 45,
        }
    }

    #[test]
    fn test_selection_interpolates_role_and_company() {
        let email = selection("backend_engineer", "Acme");
        assert!(email.body.contains("backend_engineer"));
        assert!(email.body.contains("Acme"));
    }

    #[test]
    fn test_interview_details_contains_slot_and_link() {
        let email = interview_details("backend_engineer", "Acme", &slot(), "https://zoom.us/j/42");
        assert!(email.subject.contains("backend_engineer"));
        assert!(email.body.contains("2026-09-07"));
        assert!(email.body.contains("11:00:00"));
        assert!(email.body.contains("45 minutes"));
        assert!(email.body.contains("https://zoom.us/j/42"));
    }

    #[test]
    fn test_rejection_mentions_company() {
        let email = rejection("frontend_engineer", "Acme");
        assert!(email.body.contains("Acme"));
        assert!(email.body.contains("frontend_engineer"));
    }
}
