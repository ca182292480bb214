use super::domain::UserAge;
use super::extraction::{split_ingredient_text, ExtractionError, TextExtractor};
use super::orchestrator::{AnalysisError, AnalysisSession, IngredientResolver};
use super::research::ResearchProvider;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("no ingredients could be extracted")]
    NoIngredientsExtracted,
}

impl From<AnalysisError> for ScanError {
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::NoIngredientsExtracted => Self::NoIngredientsExtracted,
        }
    }
}

/// An open OCR session bound to a resolver. The extractor lives exactly as
/// long as the scanner; `close` hands it back its shutdown hook.
pub struct LabelScanner<E, P> {
    extractor: E,
    resolver: IngredientResolver<P>,
}

impl<E, P> LabelScanner<E, P>
where
    E: TextExtractor,
    P: ResearchProvider + 'static,
{
    pub fn open(extractor: E, resolver: IngredientResolver<P>) -> Self {
        Self {
            extractor,
            resolver,
        }
    }

    pub fn resolver(&self) -> &IngredientResolver<P> {
        &self.resolver
    }

    pub async fn scan(
        &self,
        image: &[u8],
        age: Option<UserAge>,
    ) -> Result<AnalysisSession, ScanError> {
        let extracted = self.extractor.recognize(image).await?;
        let fragments = split_ingredient_text(&extracted.text);
        debug!(
            confidence = extracted.confidence,
            fragments = fragments.len(),
            "label text extracted"
        );

        let session = self.resolver.analyze(fragments, age).await?;
        info!(
            session_id = %session.session_id,
            ingredients = session.resolved.len(),
            verdict = session.overall_verdict.label(),
            "label scan analyzed"
        );
        Ok(session)
    }

    pub async fn close(self) {
        self.extractor.shutdown().await;
    }
}
