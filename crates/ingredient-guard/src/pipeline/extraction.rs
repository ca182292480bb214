use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

const MIN_FRAGMENT_LEN: usize = 2;
const MAX_FRAGMENT_LEN: usize = 200;
const MIN_SECTION_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedText {
    pub text: String,
    pub confidence: f32,
}

impl ExtractedText {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };

        Self {
            text: text.into(),
            confidence,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ExtractionError {
    #[error("image could not be decoded: {0}")]
    InvalidImage(String),
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// OCR engine seam. Implementations own whatever worker state they need and
/// release it in `shutdown`.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn recognize(&self, image: &[u8]) -> Result<ExtractedText, ExtractionError>;

    async fn shutdown(&self) {}
}

static INGREDIENTS_SECTION: OnceLock<Regex> = OnceLock::new();
static CONTAINS_SECTION: OnceLock<Regex> = OnceLock::new();
static LIST_NUMBERING: OnceLock<Regex> = OnceLock::new();

fn ingredients_section() -> &'static Regex {
    INGREDIENTS_SECTION.get_or_init(|| {
        Regex::new(r"(?is)ingredients?\s*:\s*(.*?)(?:nutrition|allergen|contains|$)")
            .expect("ingredients section pattern is valid")
    })
}

fn contains_section() -> &'static Regex {
    CONTAINS_SECTION.get_or_init(|| {
        Regex::new(r"(?is)contains\s*:\s*(.*?)(?:nutrition|allergen|$)")
            .expect("contains section pattern is valid")
    })
}

fn list_numbering() -> &'static Regex {
    LIST_NUMBERING.get_or_init(|| {
        Regex::new(r"^\d+[.)]?\s*").expect("list numbering pattern is valid")
    })
}

fn labelled_section(text: &str) -> Option<&str> {
    [ingredients_section(), contains_section()]
        .into_iter()
        .filter_map(|pattern| pattern.captures(text))
        .filter_map(|captures| captures.get(1))
        .map(|section| section.as_str())
        .find(|section| section.trim().chars().count() > MIN_SECTION_LEN)
}

/// Turns raw label text into candidate ingredient fragments, in label order.
pub fn split_ingredient_text(text: &str) -> Vec<String> {
    let section = labelled_section(text).unwrap_or(text);

    section
        .split([',', ';', '\n'])
        .map(clean_fragment)
        .filter(|fragment| {
            let len = fragment.chars().count();
            (MIN_FRAGMENT_LEN..MAX_FRAGMENT_LEN).contains(&len)
        })
        .collect()
}

fn clean_fragment(raw: &str) -> String {
    let trimmed = raw.trim();
    let unnumbered = list_numbering().replace(trimmed, "");
    unnumbered.trim_end_matches('.').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_labelled_section_and_stops_at_nutrition() {
        let text = "ACME CRUNCH\nIngredients: Sugar, BHT (preservative), Yellow 5.\nNutrition Facts: 120 kcal";
        assert_eq!(
            split_ingredient_text(text),
            vec!["Sugar", "BHT (preservative)", "Yellow 5"]
        );
    }

    #[test]
    fn ingredients_section_stops_at_contains_statement() {
        let text = "INGREDIENTS: wheat flour; water; salt Contains: wheat";
        assert_eq!(
            split_ingredient_text(text),
            vec!["wheat flour", "water", "salt"]
        );
    }

    #[test]
    fn periods_do_not_end_the_ingredients_section() {
        let text = "Ingredients: sugar, FD&C Yellow No. 5, salt";
        assert_eq!(
            split_ingredient_text(text),
            vec!["sugar", "FD&C Yellow No. 5", "salt"]
        );

        let trailing = "Ingredients: sugar, salt. Distributed by ACME, Springfield";
        assert_eq!(
            split_ingredient_text(trailing),
            vec!["sugar", "salt. Distributed by ACME", "Springfield"]
        );
    }

    #[test]
    fn short_sections_fall_back_to_the_whole_text() {
        let text = "Fresh bread\nIngredients: oats\nNutrition: 5g fiber, honey";
        let fragments = split_ingredient_text(text);
        assert!(fragments.contains(&"Fresh bread".to_string()));
        assert!(fragments.contains(&"honey".to_string()));
    }

    #[test]
    fn strips_numbering_and_drops_noise() {
        let text = "1. Water\n2) Salt\nx\n,,\n";
        assert_eq!(split_ingredient_text(text), vec!["Water", "Salt"]);
    }

    #[test]
    fn drops_overlong_fragments() {
        let long = "a".repeat(250);
        let text = format!("{long}, vinegar");
        assert_eq!(split_ingredient_text(&text), vec!["vinegar"]);
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(ExtractedText::new("x", 1.7).confidence, 1.0);
        assert_eq!(ExtractedText::new("x", -0.2).confidence, 0.0);
        assert_eq!(ExtractedText::new("x", f32::NAN).confidence, 0.0);
    }
}
