use super::domain::SafetyLevel;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LevelCountEntry {
    pub level: SafetyLevel,
    pub level_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub overall_verdict: SafetyLevel,
    pub headline: &'static str,
    pub detail: &'static str,
    pub level_counts: Vec<LevelCountEntry>,
    pub heuristic_count: usize,
    pub total: usize,
}

pub(crate) const fn verdict_headline(verdict: SafetyLevel) -> &'static str {
    match verdict {
        SafetyLevel::Safe => "Generally Safe",
        SafetyLevel::Caution => "Use with Caution",
        SafetyLevel::Warning => "Health Concerns",
    }
}

pub(crate) const fn verdict_detail(verdict: SafetyLevel) -> &'static str {
    match verdict {
        SafetyLevel::Safe => "This product has mostly safe ingredients",
        SafetyLevel::Caution => "Some ingredients need attention",
        SafetyLevel::Warning => "Several concerning ingredients found",
    }
}
