use super::domain::{AgeRestrictions, Cohort, SafetyLevel, UserAge};
use serde::Serialize;

const CHILD_LIMIT: &str = "Children should follow stricter limits - consult pediatric nutrition guidelines and healthcare providers";
const OLDER_ADULT_LIMIT: &str = "Older adults may need reduced intake - consult healthcare provider for personalized recommendations";
const ADULT_LIMIT: &str =
    "Follow standard adult serving recommendations and monitor individual tolerance";

/// Outcome of adjusting a base classification for the user's age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Personalized {
    pub effective_safety_level: SafetyLevel,
    pub message: String,
    pub daily_limit_text: String,
}

/// Generic intake guidance used when no record-specific limit exists.
pub fn generic_daily_limit(age: Option<UserAge>) -> &'static str {
    match age {
        Some(age) if age.is_child() => CHILD_LIMIT,
        Some(age) if age.is_older_adult() => OLDER_ADULT_LIMIT,
        _ => ADULT_LIMIT,
    }
}

/// Applies age-based escalation and messaging. Risk only ever moves up: a
/// child cohort lifts caution to warning, every other path keeps the level.
/// Child guidance carries an age prefix; only escalations add the marker.
pub fn personalize(
    base_safety_level: SafetyLevel,
    age_restrictions: Option<&AgeRestrictions>,
    health_impact: &str,
    daily_limit: Option<&str>,
    age: Option<UserAge>,
) -> Personalized {
    let cohort = Cohort::for_age(age);
    let cohort_override = age_restrictions.and_then(|restrictions| restrictions.for_cohort(cohort));

    let (effective_safety_level, message) = match (cohort, age) {
        (Cohort::Child, Some(age)) if base_safety_level == SafetyLevel::Caution => {
            let detail = cohort_override.unwrap_or(health_impact);
            (
                SafetyLevel::Warning,
                format!("\u{26a0}\u{fe0f} For your age ({age}): {detail}"),
            )
        }
        (Cohort::Child, Some(age)) => match cohort_override {
            Some(guidance) => (base_safety_level, format!("For your age ({age}): {guidance}")),
            None => (base_safety_level, health_impact.to_string()),
        },
        _ => (
            base_safety_level,
            cohort_override.unwrap_or(health_impact).to_string(),
        ),
    };

    Personalized {
        effective_safety_level,
        message,
        daily_limit_text: daily_limit
            .map(str::to_string)
            .unwrap_or_else(|| generic_daily_limit(age).to_string()),
    }
}
