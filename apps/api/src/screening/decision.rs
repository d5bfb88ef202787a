//! Decision engine — turns a résumé/role pair into an accept/reject decision.
//!
//! Two policies exist because the screening flow historically oscillated
//! between them; they are one configurable policy here, not two behaviors.

use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::screening::catalog::RoleProfile;
use crate::screening::matcher::{self, ScoreResult};

pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.5;

/// Accept/reject policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecisionPolicy {
    /// Accept iff the literal role id appears in the résumé text
    /// (case-sensitive). Intentionally coarse — kept for compatibility with
    /// the original screening flow, where it was the runtime default. Its
    /// accept condition has no relation to actual skill content; prefer
    /// `Score` for meaningful screening.
    Membership,
    /// Accept iff the weighted match score reaches the threshold.
    Score { threshold: f64 },
}

impl DecisionPolicy {
    pub fn from_config(mode: &str, threshold: f64) -> anyhow::Result<Self> {
        match mode {
            "membership" => Ok(DecisionPolicy::Membership),
            "score" => {
                if !(0.0..=1.0).contains(&threshold) {
                    bail!("decision threshold {threshold} is outside [0,1]");
                }
                Ok(DecisionPolicy::Score { threshold })
            }
            other => bail!("unknown decision mode '{other}' (expected 'membership' or 'score')"),
        }
    }
}

/// One accept/reject outcome. Immutable once created; recording it in the
/// metrics is the caller's responsibility.
#[derive(Debug, Clone, Serialize)]
pub struct Decision {
    pub id: Uuid,
    pub candidate_email: String,
    pub role_id: String,
    pub accepted: bool,
    pub feedback_text: String,
    pub score: ScoreResult,
    pub decided_at: DateTime<Utc>,
}

/// Evaluates the résumé under the given policy. Pure apart from the clock.
pub fn decide(
    resume_text: &str,
    profile: &RoleProfile,
    policy: DecisionPolicy,
    candidate_email: &str,
) -> Result<Decision, AppError> {
    let score = matcher::score(resume_text, profile)?;

    let accepted = match policy {
        DecisionPolicy::Membership => resume_text.contains(&profile.role_id),
        DecisionPolicy::Score { threshold } => score.total_score >= threshold,
    };

    let feedback_text = if accepted {
        format!(
            "Your resume matches the requirements for the {} role.",
            profile.role_id
        )
    } else {
        // TODO: derive the mismatch narrative from the missing-skill set
        // instead of this fixed text.
        format!(
            "The candidate shows relevant technical background, but the resume does not \
             demonstrate the core skills and experience required for the {} role.",
            profile.role_id
        )
    };

    Ok(Decision {
        id: Uuid::new_v4(),
        candidate_email: candidate_email.to_string(),
        role_id: profile.role_id.clone(),
        accepted,
        feedback_text,
        score,
        decided_at: Utc::now(),
    })
}
