use ingredient_guard::config::AnalysisConfig;
use ingredient_guard::error::AppError;
use ingredient_guard::pipeline::{
    IngredientResolver, LocalResearchProvider, ReferenceStore, UserAge,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

pub(crate) type LocalResolver = IngredientResolver<LocalResearchProvider>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the shared reference store, layering any configured CSV records
/// after the built-in catalog.
pub(crate) fn load_reference_store(config: &AnalysisConfig) -> Result<ReferenceStore, AppError> {
    let store = ReferenceStore::standard();
    match &config.reference_csv {
        Some(path) => {
            let additional = ReferenceStore::from_csv_path(path)?;
            info!(
                path = %path.display(),
                records = additional.len(),
                "loaded additional reference records"
            );
            Ok(store.with_additional(additional))
        }
        None => Ok(store),
    }
}

pub(crate) fn build_resolver(config: &AnalysisConfig) -> Result<LocalResolver, AppError> {
    let store = load_reference_store(config)?;
    Ok(
        IngredientResolver::new(Arc::new(store), Arc::new(LocalResearchProvider))
            .with_research_timeout(config.research_timeout),
    )
}

pub(crate) fn parse_age(raw: &str) -> Result<UserAge, String> {
    let years = raw
        .trim()
        .parse::<i64>()
        .map_err(|err| format!("failed to parse '{raw}' as an age in years ({err})"))?;
    UserAge::from_input(years).ok_or_else(|| format!("age {years} is outside 0-130"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_age_accepts_plausible_years() {
        assert_eq!(parse_age(" 42 ").map(UserAge::years), Ok(42));
        assert!(parse_age("-1").is_err());
        assert!(parse_age("131").is_err());
        assert!(parse_age("ten").is_err());
    }

    #[test]
    fn missing_csv_surfaces_as_reference_error() {
        let config = AnalysisConfig {
            reference_csv: Some("does/not/exist.csv".into()),
            ..AnalysisConfig::default()
        };
        let error = build_resolver(&config).err().expect("load fails");
        assert!(matches!(error, AppError::Reference(_)));
    }
}
