//! Skill matcher — scores a résumé against a role profile.
//!
//! Matching is case-insensitive substring containment: no tokenization, no
//! stemming, no word-boundary check. A skill name that happens to appear
//! inside an unrelated word will false-positive. That is a known limitation
//! of the heuristic and is kept for compatibility; the tests pin it down.

use serde::Serialize;

use crate::errors::AppError;
use crate::screening::catalog::RoleProfile;

pub const SKILL_WEIGHT: f64 = 0.7;
pub const EXPERIENCE_WEIGHT: f64 = 0.3;

/// Per-evaluation match score. Not persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    pub role_id: String,
    /// Fraction of required skills found in the résumé, in [0,1].
    pub skill_score: f64,
    /// Fraction of experience keywords found in the résumé, in [0,1].
    pub experience_score: f64,
    /// 0.7 * skill_score + 0.3 * experience_score.
    pub total_score: f64,
}

/// Scores `resume_text` against a role profile. Pure; no side effects.
///
/// Fails with a configuration error if either requirement set is empty —
/// the division below must never be masked into a zero score.
pub fn score(resume_text: &str, profile: &RoleProfile) -> Result<ScoreResult, AppError> {
    if profile.required_skills.is_empty() {
        return Err(AppError::Configuration(format!(
            "role '{}' has no required skills to score against",
            profile.role_id
        )));
    }
    if profile.experience_keywords.is_empty() {
        return Err(AppError::Configuration(format!(
            "role '{}' has no experience keywords to score against",
            profile.role_id
        )));
    }

    let haystack = resume_text.to_lowercase();

    let skill_score = containment_ratio(&haystack, profile.required_skills.iter());
    let experience_score = containment_ratio(&haystack, profile.experience_keywords.iter());

    Ok(ScoreResult {
        role_id: profile.role_id.clone(),
        skill_score,
        experience_score,
        total_score: SKILL_WEIGHT * skill_score + EXPERIENCE_WEIGHT * experience_score,
    })
}

fn containment_ratio<'a>(haystack: &str, needles: impl Iterator<Item = &'a String>) -> f64 {
    let mut total = 0usize;
    let mut hits = 0usize;
    for needle in needles {
        total += 1;
        if haystack.contains(&needle.to_lowercase()) {
            hits += 1;
        }
    }
    hits as f64 / total as f64
}
