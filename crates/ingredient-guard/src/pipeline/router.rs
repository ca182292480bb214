use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::UserAge;
use super::extraction::split_ingredient_text;
use super::normalizer::normalize_ingredient;
use super::orchestrator::{AnalysisError, AnalysisSession, IngredientResolver};
use super::research::ResearchProvider;
use super::views::SessionSummary;

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
}

impl AnalysisRequest {
    /// An explicit list wins over raw label text.
    pub fn into_inputs(self) -> (Vec<String>, Option<UserAge>) {
        let age = self.age.and_then(UserAge::from_input);
        let inputs = match (self.ingredients, self.text) {
            (Some(ingredients), _) => ingredients,
            (None, Some(text)) => split_ingredient_text(&text),
            (None, None) => Vec::new(),
        };
        (inputs, age)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub session: AnalysisSession,
    pub summary: SessionSummary,
}

/// Router builder exposing the analysis and reference lookup endpoints.
pub fn analysis_router<P>(resolver: Arc<IngredientResolver<P>>) -> Router
where
    P: ResearchProvider + 'static,
{
    Router::new()
        .route("/api/v1/analysis", post(analyze_handler::<P>))
        .route("/api/v1/ingredients/:name", get(lookup_handler::<P>))
        .with_state(resolver)
}

pub(crate) async fn analyze_handler<P>(
    State(resolver): State<Arc<IngredientResolver<P>>>,
    axum::Json(request): axum::Json<AnalysisRequest>,
) -> Response
where
    P: ResearchProvider + 'static,
{
    let (inputs, age) = request.into_inputs();
    match resolver.analyze(inputs, age).await {
        Ok(session) => {
            let summary = session.summary();
            (
                StatusCode::OK,
                axum::Json(AnalysisResponse { session, summary }),
            )
                .into_response()
        }
        Err(error @ AnalysisError::NoIngredientsExtracted) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn lookup_handler<P>(
    State(resolver): State<Arc<IngredientResolver<P>>>,
    Path(name): Path<String>,
) -> Response
where
    P: ResearchProvider + 'static,
{
    let key = normalize_ingredient(&name);
    match resolver.store().lookup(&key) {
        Some(found) => {
            let payload = json!({
                "record": found.record,
                "match_kind": found.kind,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        None => {
            let payload = json!({
                "error": "ingredient not found",
                "key": key,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}
