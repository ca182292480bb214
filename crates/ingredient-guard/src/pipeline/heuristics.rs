use super::domain::{Cohort, SafetyLevel, UserAge};
use super::personalization::generic_daily_limit;
use super::research::ResearchedIngredient;
use regex::Regex;
use std::sync::OnceLock;

static COLOR_CODE: OnceLock<Regex> = OnceLock::new();

fn color_code_pattern() -> &'static Regex {
    COLOR_CODE.get_or_init(|| {
        Regex::new(r"fd&c|\be1\d{2}\b|\b(?:red|yellow|blue|green|orange|citrus red)\s*(?:dye\s*)?(?:no\.?\s*)?\d+\b")
            .expect("color code pattern is valid")
    })
}

const GENERAL_SOURCES: &[&str] = &["General food safety guidelines"];

/// One lexical rule of the fallback classifier.
pub(crate) struct HeuristicRule {
    pub(crate) name: &'static str,
    pub(crate) level: SafetyLevel,
    pub(crate) applies: fn(&str) -> bool,
    pub(crate) note: &'static str,
    pub(crate) health_impact: Option<&'static str>,
    pub(crate) sources: &'static [&'static str],
}

/// First applicable rule wins. The final rule always applies.
pub(crate) static HEURISTIC_RULES: [HeuristicRule; 7] = [
    HeuristicRule {
        name: "natural",
        level: SafetyLevel::Safe,
        applies: |key| key.contains("natural") || key.contains("organic"),
        note: "This appears to be a natural ingredient.",
        health_impact: Some(
            "Natural ingredients are generally safer but individual sensitivities may still occur.",
        ),
        sources: GENERAL_SOURCES,
    },
    HeuristicRule {
        name: "artificial",
        level: SafetyLevel::Caution,
        applies: |key| key.contains("artificial") || key.contains("synthetic"),
        note: "This appears to be an artificial ingredient.",
        health_impact: Some(
            "Artificial ingredients require individual assessment for safety and potential sensitivities.",
        ),
        sources: GENERAL_SOURCES,
    },
    HeuristicRule {
        name: "coloring",
        level: SafetyLevel::Caution,
        applies: |key| {
            key.contains("color") || key.contains("dye") || color_code_pattern().is_match(key)
        },
        note: "This appears to be a food coloring agent.",
        health_impact: Some(
            "Food colorings may cause allergic reactions or hyperactivity in sensitive individuals, especially children.",
        ),
        sources: &["FDA Color Additives", "European Food Safety Authority"],
    },
    HeuristicRule {
        name: "preservative",
        level: SafetyLevel::Caution,
        applies: |key| key.contains("preservative") || key.contains("acid"),
        note: "This appears to be a preservative or acidifying agent.",
        health_impact: Some(
            "Preservatives help food safety but some individuals may have sensitivities.",
        ),
        sources: GENERAL_SOURCES,
    },
    HeuristicRule {
        name: "micronutrient",
        level: SafetyLevel::Safe,
        applies: |key| key.contains("vitamin") || key.contains("mineral"),
        note: "This appears to be a vitamin or mineral supplement.",
        health_impact: Some(
            "Vitamins and minerals are generally beneficial when consumed in appropriate amounts.",
        ),
        sources: GENERAL_SOURCES,
    },
    HeuristicRule {
        name: "extract",
        level: SafetyLevel::Safe,
        applies: |key| key.contains("extract") || key.contains("essence"),
        note: "This appears to be a natural extract or essence.",
        health_impact: Some(
            "Natural extracts are generally safe but may cause allergies in sensitive individuals.",
        ),
        sources: GENERAL_SOURCES,
    },
    HeuristicRule {
        name: "unrecognized",
        level: SafetyLevel::Caution,
        applies: |_| true,
        note: "",
        health_impact: None,
        sources: GENERAL_SOURCES,
    },
];

pub(crate) fn matching_rule(normalized_key: &str) -> &'static HeuristicRule {
    let index = HEURISTIC_RULES
        .iter()
        .position(|rule| (rule.applies)(normalized_key))
        .unwrap_or(HEURISTIC_RULES.len() - 1);
    &HEURISTIC_RULES[index]
}

/// Categorizes an ingredient the reference store does not know. Total for any
/// input, including the empty string.
pub fn classify_unknown(
    normalized_key: &str,
    original_text: &str,
    age: Option<UserAge>,
) -> ResearchedIngredient {
    let rule = matching_rule(normalized_key);
    let name = original_text.trim();

    let mut definition = format!("{name} is a food ingredient.");
    if !rule.note.is_empty() {
        definition.push(' ');
        definition.push_str(rule.note);
    }

    let mut health_impacts = match rule.health_impact {
        Some(impact) => impact.to_string(),
        None => basic_health_impact(name, rule.level, age),
    };
    if let Some(caveat) = age_caveat(age) {
        health_impacts.push(' ');
        health_impacts.push_str(caveat);
    }

    ResearchedIngredient {
        name: name.to_string(),
        definition,
        health_impacts,
        safety_level: rule.level,
        daily_limit: Some(generic_daily_limit(age).to_string()),
        sources: rule.sources.iter().map(|source| source.to_string()).collect(),
    }
}

fn age_caveat(age: Option<UserAge>) -> Option<&'static str> {
    match age {
        Some(age) if age.is_child() => Some(
            "Children may be more sensitive to food additives and should consume processed foods in moderation.",
        ),
        Some(age) if age.is_older_adult() => Some(
            "Older adults may want to limit processed food additives and focus on whole foods.",
        ),
        _ => None,
    }
}

fn audience(age: Option<UserAge>) -> &'static str {
    match (Cohort::for_age(age), age) {
        (Cohort::Child, _) => "children and adolescents",
        (Cohort::Adult, Some(age)) if age.is_older_adult() => "older adults",
        (Cohort::Adult, _) => "adults",
    }
}

fn basic_health_impact(name: &str, level: SafetyLevel, age: Option<UserAge>) -> String {
    let audience = audience(age);
    match level {
        SafetyLevel::Safe => format!(
            "{name} is generally considered safe for consumption by {audience} when used in normal food quantities. Monitor for any individual sensitivities."
        ),
        SafetyLevel::Warning => format!(
            "{name} has been associated with potential health concerns and should be consumed with caution or avoided, especially by {audience}. Consider consulting a healthcare provider."
        ),
        SafetyLevel::Caution => format!(
            "{name} requires moderate caution. Individual sensitivities may vary, and {audience} should monitor their response to this ingredient."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn age(years: i64) -> Option<UserAge> {
        UserAge::from_input(years)
    }

    #[test]
    fn rules_apply_in_priority_order() {
        assert_eq!(matching_rule("natural artificial flavor").name, "natural");
        assert_eq!(matching_rule("artificial color").name, "artificial");
        assert_eq!(matching_rule("caramel color").name, "coloring");
        assert_eq!(matching_rule("citric acid").name, "preservative");
        assert_eq!(matching_rule("vitamin d3").name, "micronutrient");
        assert_eq!(matching_rule("rosemary extract").name, "extract");
        assert_eq!(matching_rule("maltodextrin").name, "unrecognized");
    }

    #[test]
    fn color_codes_are_recognized() {
        assert_eq!(matching_rule("blue 1").name, "coloring");
        assert_eq!(matching_rule("red no. 3").name, "coloring");
        assert_eq!(matching_rule("fd&c green 3 lake").name, "coloring");
        assert_eq!(matching_rule("e133").name, "coloring");
        assert_eq!(matching_rule("e415").name, "unrecognized");
    }

    #[test]
    fn preservative_keyword_yields_caution() {
        let result = classify_unknown(
            "xyzatolinepreservativeblend",
            "Xyzatolinepreservativeblend",
            age(30),
        );
        assert_eq!(result.safety_level, SafetyLevel::Caution);
        assert!(result.definition.contains("preservative or acidifying agent"));
        assert_eq!(
            result.daily_limit.as_deref(),
            Some(generic_daily_limit(age(30)))
        );
    }

    #[test]
    fn empty_input_falls_through_to_conservative_default() {
        let result = classify_unknown("", "", None);
        assert_eq!(result.safety_level, SafetyLevel::Caution);
        assert!(result.health_impacts.contains("requires moderate caution"));
        assert!(result.daily_limit.is_some());
    }

    #[test]
    fn age_caveats_follow_cohort() {
        let child = classify_unknown("organic quinoa", "Organic quinoa", age(9));
        assert_eq!(child.safety_level, SafetyLevel::Safe);
        assert!(child.health_impacts.ends_with("consume processed foods in moderation."));

        let senior = classify_unknown("organic quinoa", "Organic quinoa", age(72));
        assert!(senior.health_impacts.contains("Older adults may want to limit"));

        let adult = classify_unknown("organic quinoa", "Organic quinoa", age(40));
        assert!(!adult.health_impacts.contains("Children"));
        assert!(!adult.health_impacts.contains("Older adults"));
    }

    #[test]
    fn default_message_names_the_audience() {
        let result = classify_unknown("maltodextrin", "Maltodextrin", age(12));
        assert!(result
            .health_impacts
            .starts_with("Maltodextrin requires moderate caution"));
        assert!(result.health_impacts.contains("children and adolescents"));
    }
}
