//! Ingredient resolution and personalized risk scoring.
//!
//! Raw label fragments flow through normalization, the reference match
//! cascade, age personalization, and a research fallback for anything the
//! reference store does not know. Batches fan out concurrently and report
//! an overall verdict per session.

pub mod domain;
pub mod extraction;
pub(crate) mod heuristics;
pub mod normalizer;
pub mod orchestrator;
pub mod personalization;
pub mod reference;
pub mod research;
pub mod router;
pub mod scanner;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    AgeRestrictions, Cohort, IngredientCategory, IngredientRecord, ResolvedIngredient,
    SafetyLevel, UserAge,
};
pub use extraction::{split_ingredient_text, ExtractedText, ExtractionError, TextExtractor};
pub use heuristics::classify_unknown;
pub use normalizer::normalize_ingredient;
pub use orchestrator::{
    aggregate_verdict, AnalysisError, AnalysisSession, IngredientResolver, ResolutionProgress,
    CAUTION_VERDICT_THRESHOLD, DEFAULT_RESEARCH_TIMEOUT,
};
pub use personalization::{generic_daily_limit, personalize, Personalized};
pub use reference::{MatchKind, ReferenceImportError, ReferenceStore, StoreMatch};
pub use research::{LocalResearchProvider, ResearchError, ResearchProvider, ResearchedIngredient};
pub use router::{analysis_router, AnalysisRequest, AnalysisResponse};
pub use scanner::{LabelScanner, ScanError};
pub use views::{LevelCountEntry, SessionSummary};
