use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::pipeline::domain::{SafetyLevel, UserAge};
use crate::pipeline::extraction::{ExtractedText, ExtractionError, TextExtractor};
use crate::pipeline::orchestrator::IngredientResolver;
use crate::pipeline::reference::ReferenceStore;
use crate::pipeline::research::{
    LocalResearchProvider, ResearchError, ResearchProvider, ResearchedIngredient,
};

pub(super) fn local_resolver() -> IngredientResolver<LocalResearchProvider> {
    IngredientResolver::new(
        Arc::new(ReferenceStore::standard()),
        Arc::new(LocalResearchProvider),
    )
}

pub(super) fn resolver_with<P>(provider: P) -> IngredientResolver<P>
where
    P: ResearchProvider + 'static,
{
    IngredientResolver::new(Arc::new(ReferenceStore::standard()), Arc::new(provider))
        .with_research_timeout(Duration::from_millis(50))
}

pub(super) fn inputs(fragments: &[&str]) -> Vec<String> {
    fragments.iter().map(|fragment| fragment.to_string()).collect()
}

pub(super) fn age(years: i64) -> Option<UserAge> {
    UserAge::from_input(years)
}

pub(super) fn levels(resolved: &[crate::pipeline::ResolvedIngredient]) -> Vec<SafetyLevel> {
    resolved
        .iter()
        .map(|ingredient| ingredient.effective_safety_level)
        .collect()
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Provider that is always down.
#[derive(Debug, Default)]
pub(super) struct FailingProvider;

#[async_trait]
impl ResearchProvider for FailingProvider {
    async fn research(
        &self,
        _ingredient_text: &str,
        _age: Option<UserAge>,
    ) -> Result<ResearchedIngredient, ResearchError> {
        Err(ResearchError::Unavailable("offline".to_string()))
    }
}

/// Provider whose research task panics.
#[derive(Debug, Default)]
pub(super) struct PanickingProvider;

#[async_trait]
impl ResearchProvider for PanickingProvider {
    async fn research(
        &self,
        ingredient_text: &str,
        _age: Option<UserAge>,
    ) -> Result<ResearchedIngredient, ResearchError> {
        panic!("research backend crashed on {ingredient_text}");
    }
}

/// Provider that answers slowly for inputs containing "slow" and immediately
/// for everything else.
#[derive(Debug)]
pub(super) struct SlowProvider {
    pub(super) delay: Duration,
}

#[async_trait]
impl ResearchProvider for SlowProvider {
    async fn research(
        &self,
        ingredient_text: &str,
        age: Option<UserAge>,
    ) -> Result<ResearchedIngredient, ResearchError> {
        if ingredient_text.contains("slow") {
            tokio::time::sleep(self.delay).await;
        }
        LocalResearchProvider.research(ingredient_text, age).await
    }
}

/// Provider that never answers and counts how many of its calls were dropped.
#[derive(Debug, Default)]
pub(super) struct HangingProvider {
    pub(super) started: Arc<AtomicUsize>,
    pub(super) dropped: Arc<AtomicUsize>,
}

struct DropCounter(Arc<AtomicUsize>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResearchProvider for HangingProvider {
    async fn research(
        &self,
        _ingredient_text: &str,
        _age: Option<UserAge>,
    ) -> Result<ResearchedIngredient, ResearchError> {
        let _guard = DropCounter(Arc::clone(&self.dropped));
        self.started.fetch_add(1, Ordering::SeqCst);
        std::future::pending::<()>().await;
        Err(ResearchError::Transport("unreachable".to_string()))
    }
}

/// Extractor returning canned label text and recording shutdown.
#[derive(Debug, Default)]
pub(super) struct CannedExtractor {
    pub(super) text: String,
    pub(super) shutdowns: Arc<AtomicUsize>,
}

impl CannedExtractor {
    pub(super) fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            shutdowns: Arc::default(),
        }
    }
}

#[async_trait]
impl TextExtractor for CannedExtractor {
    async fn recognize(&self, image: &[u8]) -> Result<ExtractedText, ExtractionError> {
        if image.is_empty() {
            return Err(ExtractionError::InvalidImage("empty image".to_string()));
        }
        Ok(ExtractedText::new(self.text.clone(), 0.92))
    }

    async fn shutdown(&self) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
    }
}
