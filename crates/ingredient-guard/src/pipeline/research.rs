use super::domain::{ResolvedIngredient, SafetyLevel, UserAge};
use super::heuristics::classify_unknown;
use super::normalizer::normalize_ingredient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Findings returned by a research provider for an unmatched ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchedIngredient {
    pub name: String,
    pub definition: String,
    pub health_impacts: String,
    pub safety_level: SafetyLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_limit: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl ResearchedIngredient {
    pub(crate) fn into_resolved(self, source_text: &str) -> ResolvedIngredient {
        ResolvedIngredient {
            source_text: source_text.to_string(),
            display_name: self.name,
            matched_record_id: None,
            category: None,
            effective_safety_level: self.safety_level,
            description: self.definition,
            message: self.health_impacts,
            daily_limit_text: self.daily_limit,
            alternatives_text: None,
            allergen_notes: Vec::new(),
            sources: self.sources,
            is_heuristic: true,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ResearchError {
    #[error("research timed out after {0:?}")]
    Timeout(Duration),
    #[error("research provider unavailable: {0}")]
    Unavailable(String),
    #[error("research transport failure: {0}")]
    Transport(String),
}

/// Fallback lookup consulted for ingredients missing from the reference store.
#[async_trait]
pub trait ResearchProvider: Send + Sync {
    async fn research(
        &self,
        ingredient_text: &str,
        age: Option<UserAge>,
    ) -> Result<ResearchedIngredient, ResearchError>;
}

/// Offline provider backed by the lexical classifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalResearchProvider;

#[async_trait]
impl ResearchProvider for LocalResearchProvider {
    async fn research(
        &self,
        ingredient_text: &str,
        age: Option<UserAge>,
    ) -> Result<ResearchedIngredient, ResearchError> {
        let key = normalize_ingredient(ingredient_text);
        Ok(classify_unknown(&key, ingredient_text, age))
    }
}
