use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal risk scale shared by records, heuristics, and session verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyLevel {
    Safe,
    Caution,
    Warning,
}

impl SafetyLevel {
    pub const fn ordered() -> [Self; 3] {
        [Self::Safe, Self::Caution, Self::Warning]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Caution => "caution",
            Self::Warning => "warning",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "safe" => Some(Self::Safe),
            "caution" => Some(Self::Caution),
            "warning" => Some(Self::Warning),
            _ => None,
        }
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
    Preservative,
    Sweetener,
    Coloring,
    Flavor,
    Thickener,
    Emulsifier,
    Natural,
    Vitamin,
    Mineral,
    Other,
}

impl IngredientCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Preservative => "Preservative",
            Self::Sweetener => "Sweetener",
            Self::Coloring => "Coloring",
            Self::Flavor => "Flavor",
            Self::Thickener => "Thickener",
            Self::Emulsifier => "Emulsifier",
            Self::Natural => "Natural",
            Self::Vitamin => "Vitamin",
            Self::Mineral => "Mineral",
            Self::Other => "Other",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "preservative" => Some(Self::Preservative),
            "sweetener" => Some(Self::Sweetener),
            "coloring" => Some(Self::Coloring),
            "flavor" => Some(Self::Flavor),
            "thickener" => Some(Self::Thickener),
            "emulsifier" => Some(Self::Emulsifier),
            "natural" => Some(Self::Natural),
            "vitamin" => Some(Self::Vitamin),
            "mineral" => Some(Self::Mineral),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Cohort-specific guidance overriding a record's default health message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRestrictions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adults: Option<String>,
}

impl AgeRestrictions {
    pub fn for_cohort(&self, cohort: Cohort) -> Option<&str> {
        match cohort {
            Cohort::Child => self.children.as_deref(),
            Cohort::Adult => self.adults.as_deref(),
        }
    }
}

/// Immutable reference entry describing one known ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientRecord {
    pub id: String,
    pub key: String,
    pub canonical_name: String,
    pub aliases: Vec<String>,
    pub category: IngredientCategory,
    pub base_safety_level: SafetyLevel,
    pub description: String,
    pub health_impact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_restrictions: Option<AgeRestrictions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergen_notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

const MAX_PLAUSIBLE_AGE: i64 = 130;
const ADULT_AGE: u8 = 18;
const OLDER_ADULT_AGE: u8 = 65;

/// A validated user age in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserAge(u8);

impl UserAge {
    /// Negative and implausibly large ages are discarded so the caller falls
    /// back to the adult cohort.
    pub fn from_input(raw: i64) -> Option<Self> {
        if (0..=MAX_PLAUSIBLE_AGE).contains(&raw) {
            Some(Self(raw as u8))
        } else {
            tracing::debug!(age = raw, "ignoring invalid age input");
            None
        }
    }

    pub const fn years(self) -> u8 {
        self.0
    }

    pub const fn is_child(self) -> bool {
        self.0 < ADULT_AGE
    }

    pub const fn is_older_adult(self) -> bool {
        self.0 > OLDER_ADULT_AGE
    }
}

impl fmt::Display for UserAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cohort {
    Child,
    Adult,
}

impl Cohort {
    pub fn for_age(age: Option<UserAge>) -> Self {
        match age {
            Some(age) if age.is_child() => Self::Child,
            _ => Self::Adult,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Child => "child",
            Self::Adult => "adult",
        }
    }
}

/// Final per-ingredient outcome shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIngredient {
    pub source_text: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_record_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<IngredientCategory>,
    pub effective_safety_level: SafetyLevel,
    pub description: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_limit_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergen_notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    pub is_heuristic: bool,
}

pub(crate) const DEGRADED_DESCRIPTION: &str =
    "Ingredient not found in our database. Please research independently or consult a nutritionist.";
pub(crate) const DEGRADED_MESSAGE: &str =
    "Unknown ingredient - requires further research. Exercise caution if you have health concerns.";
pub(crate) const DEGRADED_DAILY_LIMIT: &str = "Follow product serving recommendations";

impl ResolvedIngredient {
    /// Conservative entry used when the research step is unavailable.
    pub fn degraded(source_text: &str) -> Self {
        Self {
            source_text: source_text.to_string(),
            display_name: source_text.trim().to_string(),
            matched_record_id: None,
            category: None,
            effective_safety_level: SafetyLevel::Caution,
            description: DEGRADED_DESCRIPTION.to_string(),
            message: DEGRADED_MESSAGE.to_string(),
            daily_limit_text: Some(DEGRADED_DAILY_LIMIT.to_string()),
            alternatives_text: None,
            allergen_notes: Vec::new(),
            sources: Vec::new(),
            is_heuristic: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_levels_order_by_severity() {
        assert!(SafetyLevel::Safe < SafetyLevel::Caution);
        assert!(SafetyLevel::Caution < SafetyLevel::Warning);
        assert_eq!(SafetyLevel::parse(" Warning "), Some(SafetyLevel::Warning));
        assert_eq!(SafetyLevel::parse("unknown"), None);
    }

    #[test]
    fn invalid_ages_are_treated_as_absent() {
        assert_eq!(UserAge::from_input(-4), None);
        assert_eq!(UserAge::from_input(412), None);
        assert_eq!(UserAge::from_input(0).map(UserAge::years), Some(0));
        assert_eq!(Cohort::for_age(UserAge::from_input(-1)), Cohort::Adult);
    }

    #[test]
    fn cohort_boundaries() {
        assert_eq!(Cohort::for_age(UserAge::from_input(17)), Cohort::Child);
        assert_eq!(Cohort::for_age(UserAge::from_input(18)), Cohort::Adult);
        assert_eq!(Cohort::for_age(None), Cohort::Adult);

        let senior = UserAge::from_input(66).expect("valid age");
        assert!(senior.is_older_adult());
        assert!(!UserAge::from_input(65).expect("valid age").is_older_adult());
    }

    #[test]
    fn degraded_entries_are_conservative() {
        let degraded = ResolvedIngredient::degraded("  mystery gum ");
        assert_eq!(degraded.effective_safety_level, SafetyLevel::Caution);
        assert!(degraded.is_heuristic);
        assert!(degraded.message.contains("requires further research"));
        assert_eq!(degraded.source_text, "  mystery gum ");
        assert_eq!(degraded.display_name, "mystery gum");
    }
}
