use super::super::domain::{AgeRestrictions, IngredientCategory, IngredientRecord, SafetyLevel};
use super::ReferenceStore;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

const LIST_SEPARATOR: char = '|';

#[derive(Debug, thiserror::Error)]
pub enum ReferenceImportError {
    #[error("failed to read reference data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid reference CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("record '{id}' has unknown category '{value}'")]
    UnknownCategory { id: String, value: String },
    #[error("record '{id}' has unknown safety level '{value}'")]
    UnknownSafetyLevel { id: String, value: String },
}

impl ReferenceStore {
    pub fn from_csv_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<IngredientRecord>, ReferenceImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<IngredientRecord>, ReferenceImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for row in csv_reader.deserialize::<ReferenceRow>() {
            records.push(row?.into_record()?);
        }

        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    key: Option<String>,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    aliases: Option<String>,
    category: String,
    safety_level: String,
    description: String,
    health_impact: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    alternatives: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    daily_limit: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    child_guidance: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    adult_guidance: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    allergens: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sources: Option<String>,
}

impl ReferenceRow {
    fn into_record(self) -> Result<IngredientRecord, ReferenceImportError> {
        let category = IngredientCategory::parse(&self.category).ok_or_else(|| {
            ReferenceImportError::UnknownCategory {
                id: self.id.clone(),
                value: self.category.clone(),
            }
        })?;
        let base_safety_level = SafetyLevel::parse(&self.safety_level).ok_or_else(|| {
            ReferenceImportError::UnknownSafetyLevel {
                id: self.id.clone(),
                value: self.safety_level.clone(),
            }
        })?;

        let key = self
            .key
            .unwrap_or_else(|| self.name.to_lowercase())
            .to_lowercase();
        let mut aliases = split_list(self.aliases.as_deref());
        if !aliases.contains(&key) {
            aliases.insert(0, key.clone());
        }

        let age_restrictions = match (self.child_guidance, self.adult_guidance) {
            (None, None) => None,
            (children, adults) => Some(AgeRestrictions { children, adults }),
        };

        Ok(IngredientRecord {
            id: self.id,
            key,
            canonical_name: self.name,
            aliases,
            category,
            base_safety_level,
            description: self.description,
            health_impact: self.health_impact,
            alternatives: self.alternatives,
            daily_limit: self.daily_limit,
            age_restrictions,
            allergen_notes: split_list(self.allergens.as_deref()),
            sources: split_list(self.sources.as_deref()),
        })
    }
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(LIST_SEPARATOR)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
