use super::domain::{IngredientRecord, ResolvedIngredient, SafetyLevel, UserAge};
use super::normalizer::normalize_ingredient;
use super::personalization::personalize;
use super::reference::ReferenceStore;
use super::research::{ResearchError, ResearchProvider, ResearchedIngredient};
use super::views::{verdict_detail, verdict_headline, LevelCountEntry, SessionSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use uuid::Uuid;

/// More than this many caution entries turns the overall verdict to caution.
pub const CAUTION_VERDICT_THRESHOLD: usize = 2;

pub const DEFAULT_RESEARCH_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("no ingredients could be extracted")]
    NoIngredientsExtracted,
}

/// One finished ingredient, reported as soon as it resolves.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionProgress {
    pub index: usize,
    pub completed: usize,
    pub total: usize,
    pub resolved: ResolvedIngredient,
}

/// Results of a single scan. `resolved[i]` always corresponds to
/// `input_ingredients[i]`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSession {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub input_ingredients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_age: Option<UserAge>,
    pub resolved: Vec<ResolvedIngredient>,
    pub overall_verdict: SafetyLevel,
}

impl AnalysisSession {
    pub fn count(&self, level: SafetyLevel) -> usize {
        count_level(&self.resolved, level)
    }

    pub fn summary(&self) -> SessionSummary {
        let level_counts = SafetyLevel::ordered()
            .into_iter()
            .map(|level| LevelCountEntry {
                level,
                level_label: level.label(),
                count: self.count(level),
            })
            .collect();

        SessionSummary {
            overall_verdict: self.overall_verdict,
            headline: verdict_headline(self.overall_verdict),
            detail: verdict_detail(self.overall_verdict),
            level_counts,
            heuristic_count: self
                .resolved
                .iter()
                .filter(|ingredient| ingredient.is_heuristic)
                .count(),
            total: self.resolved.len(),
        }
    }
}

fn count_level(resolved: &[ResolvedIngredient], level: SafetyLevel) -> usize {
    resolved
        .iter()
        .filter(|ingredient| ingredient.effective_safety_level == level)
        .count()
}

pub fn aggregate_verdict(resolved: &[ResolvedIngredient]) -> SafetyLevel {
    if count_level(resolved, SafetyLevel::Warning) > 0 {
        SafetyLevel::Warning
    } else if count_level(resolved, SafetyLevel::Caution) > CAUTION_VERDICT_THRESHOLD {
        SafetyLevel::Caution
    } else {
        SafetyLevel::Safe
    }
}

/// Drives normalization, lookup, personalization and research fallback for
/// whole ingredient lists.
pub struct IngredientResolver<P> {
    store: Arc<ReferenceStore>,
    research: Arc<P>,
    research_timeout: Duration,
}

impl<P> Clone for IngredientResolver<P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            research: Arc::clone(&self.research),
            research_timeout: self.research_timeout,
        }
    }
}

impl<P> IngredientResolver<P>
where
    P: ResearchProvider + 'static,
{
    pub fn new(store: Arc<ReferenceStore>, research: Arc<P>) -> Self {
        Self {
            store,
            research,
            research_timeout: DEFAULT_RESEARCH_TIMEOUT,
        }
    }

    pub fn with_research_timeout(mut self, timeout: Duration) -> Self {
        self.research_timeout = timeout;
        self
    }

    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    /// Resolves one raw fragment. Never fails: research problems degrade the
    /// entry to a conservative caution result.
    pub async fn resolve(&self, source_text: &str, age: Option<UserAge>) -> ResolvedIngredient {
        let key = normalize_ingredient(source_text);

        if let Some(record) = self.store.find_ingredient(&key) {
            return resolve_from_record(source_text, record, age);
        }

        debug!(ingredient = %key, "no reference match, consulting research provider");
        match self.research_with_timeout(source_text, age).await {
            Ok(findings) => findings.into_resolved(source_text),
            Err(err) => {
                warn!(ingredient = %key, error = %err, "research failed, degrading to caution");
                ResolvedIngredient::degraded(source_text)
            }
        }
    }

    async fn research_with_timeout(
        &self,
        source_text: &str,
        age: Option<UserAge>,
    ) -> Result<ResearchedIngredient, ResearchError> {
        match tokio::time::timeout(
            self.research_timeout,
            self.research.research(source_text, age),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ResearchError::Timeout(self.research_timeout)),
        }
    }

    pub async fn analyze(
        &self,
        inputs: Vec<String>,
        age: Option<UserAge>,
    ) -> Result<AnalysisSession, AnalysisError> {
        self.run_batch(inputs, age, None).await
    }

    pub async fn analyze_with_progress(
        &self,
        inputs: Vec<String>,
        age: Option<UserAge>,
        progress: UnboundedSender<ResolutionProgress>,
    ) -> Result<AnalysisSession, AnalysisError> {
        self.run_batch(inputs, age, Some(progress)).await
    }

    /// Fans out one task per ingredient. Dropping the returned future drops
    /// the join set, which aborts every in-flight resolution.
    async fn run_batch(
        &self,
        inputs: Vec<String>,
        age: Option<UserAge>,
        progress: Option<UnboundedSender<ResolutionProgress>>,
    ) -> Result<AnalysisSession, AnalysisError> {
        if inputs.is_empty() {
            return Err(AnalysisError::NoIngredientsExtracted);
        }

        let total = inputs.len();
        let mut tasks = JoinSet::new();
        let mut task_slots = HashMap::with_capacity(total);
        for (index, source_text) in inputs.iter().cloned().enumerate() {
            let resolver = self.clone();
            let handle =
                tasks.spawn(async move { resolver.resolve(&source_text, age).await });
            task_slots.insert(handle.id(), index);
        }

        let mut slots: Vec<Option<ResolvedIngredient>> = vec![None; total];
        let mut completed = 0;
        while let Some(joined) = tasks.join_next_with_id().await {
            let (task_id, outcome) = match joined {
                Ok((task_id, resolved)) => (task_id, Some(resolved)),
                Err(err) => {
                    warn!(error = %err, "ingredient resolution task failed");
                    (err.id(), None)
                }
            };
            let Some(index) = task_slots.remove(&task_id) else {
                continue;
            };
            let resolved =
                outcome.unwrap_or_else(|| ResolvedIngredient::degraded(&inputs[index]));

            completed += 1;
            if let Some(sender) = &progress {
                let _ = sender.send(ResolutionProgress {
                    index,
                    completed,
                    total,
                    resolved: resolved.clone(),
                });
            }
            slots[index] = Some(resolved);
        }

        let resolved: Vec<ResolvedIngredient> = slots
            .into_iter()
            .zip(&inputs)
            .map(|(slot, source_text)| {
                slot.unwrap_or_else(|| ResolvedIngredient::degraded(source_text))
            })
            .collect();
        let overall_verdict = aggregate_verdict(&resolved);

        Ok(AnalysisSession {
            session_id: Uuid::new_v4(),
            created_at: Utc::now(),
            input_ingredients: inputs,
            user_age: age,
            resolved,
            overall_verdict,
        })
    }
}

fn resolve_from_record(
    source_text: &str,
    record: &IngredientRecord,
    age: Option<UserAge>,
) -> ResolvedIngredient {
    let personalized = personalize(
        record.base_safety_level,
        record.age_restrictions.as_ref(),
        &record.health_impact,
        record.daily_limit.as_deref(),
        age,
    );

    ResolvedIngredient {
        source_text: source_text.to_string(),
        display_name: record.canonical_name.clone(),
        matched_record_id: Some(record.id.clone()),
        category: Some(record.category),
        effective_safety_level: personalized.effective_safety_level,
        description: record.description.clone(),
        message: personalized.message,
        daily_limit_text: Some(personalized.daily_limit_text),
        alternatives_text: record.alternatives.clone(),
        allergen_notes: record.allergen_notes.clone(),
        sources: record.sources.clone(),
        is_heuristic: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: SafetyLevel) -> ResolvedIngredient {
        let mut resolved = ResolvedIngredient::degraded("x");
        resolved.effective_safety_level = level;
        resolved
    }

    #[test]
    fn verdict_threshold_is_more_than_two_cautions() {
        let two = vec![
            entry(SafetyLevel::Caution),
            entry(SafetyLevel::Caution),
            entry(SafetyLevel::Safe),
        ];
        assert_eq!(aggregate_verdict(&two), SafetyLevel::Safe);

        let three = vec![
            entry(SafetyLevel::Caution),
            entry(SafetyLevel::Caution),
            entry(SafetyLevel::Caution),
        ];
        assert_eq!(aggregate_verdict(&three), SafetyLevel::Caution);

        let warning = vec![entry(SafetyLevel::Safe), entry(SafetyLevel::Warning)];
        assert_eq!(aggregate_verdict(&warning), SafetyLevel::Warning);

        assert_eq!(aggregate_verdict(&[]), SafetyLevel::Safe);
    }
}
