mod catalog;
mod import;

pub use import::ReferenceImportError;

use super::domain::IngredientRecord;
use serde::Serialize;

/// Which step of the match cascade resolved a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    PrimaryKey,
    CanonicalName,
    Alias,
    AliasContainment,
    NameContainment,
}

impl MatchKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PrimaryKey => "primary key",
            Self::CanonicalName => "canonical name",
            Self::Alias => "alias",
            Self::AliasContainment => "alias containment",
            Self::NameContainment => "name containment",
        }
    }
}

/// Record with its comparison forms lower-cased once at load time.
#[derive(Debug)]
pub(crate) struct IndexedRecord {
    record: IngredientRecord,
    key: String,
    name: String,
    aliases: Vec<String>,
}

impl IndexedRecord {
    fn new(record: IngredientRecord) -> Self {
        let key = record.key.to_lowercase();
        let name = record.canonical_name.to_lowercase();
        let aliases = record
            .aliases
            .iter()
            .map(|alias| alias.trim().to_lowercase())
            .filter(|alias| !alias.is_empty())
            .collect();

        Self {
            record,
            key,
            name,
            aliases,
        }
    }
}

pub(crate) struct MatchRule {
    pub(crate) kind: MatchKind,
    pub(crate) matches: fn(&IndexedRecord, &str) -> bool,
}

/// Evaluated top to bottom; each rule scans the whole store before the next
/// one runs, and within a rule the first record in store order wins.
pub(crate) static MATCH_RULES: [MatchRule; 5] = [
    MatchRule {
        kind: MatchKind::PrimaryKey,
        matches: |entry, key| entry.key == key || entry.record.id == key,
    },
    MatchRule {
        kind: MatchKind::CanonicalName,
        matches: |entry, key| entry.name == key,
    },
    MatchRule {
        kind: MatchKind::Alias,
        matches: |entry, key| entry.aliases.iter().any(|alias| alias == key),
    },
    MatchRule {
        kind: MatchKind::AliasContainment,
        matches: |entry, key| {
            entry
                .aliases
                .iter()
                .any(|alias| key.contains(alias.as_str()) || alias.contains(key))
        },
    },
    MatchRule {
        kind: MatchKind::NameContainment,
        matches: |entry, key| key.contains(entry.name.as_str()) || entry.name.contains(key),
    },
];

#[derive(Debug, Clone, Copy)]
pub struct StoreMatch<'a> {
    pub record: &'a IngredientRecord,
    pub kind: MatchKind,
}

/// Read-only ingredient reference data, built once and shared across sessions.
#[derive(Debug)]
pub struct ReferenceStore {
    entries: Vec<IndexedRecord>,
}

impl ReferenceStore {
    pub fn new(records: Vec<IngredientRecord>) -> Self {
        Self {
            entries: records.into_iter().map(IndexedRecord::new).collect(),
        }
    }

    pub fn standard() -> Self {
        Self::new(catalog::standard_records())
    }

    /// Appends records after the existing ones, so existing records keep
    /// winning containment ties.
    pub fn with_additional(mut self, records: Vec<IngredientRecord>) -> Self {
        self.entries
            .extend(records.into_iter().map(IndexedRecord::new));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &IngredientRecord> {
        self.entries.iter().map(|entry| &entry.record)
    }

    pub fn lookup(&self, key: &str) -> Option<StoreMatch<'_>> {
        if key.is_empty() {
            return None;
        }

        MATCH_RULES.iter().find_map(|rule| {
            self.entries
                .iter()
                .find(|entry| (rule.matches)(entry, key))
                .map(|entry| StoreMatch {
                    record: &entry.record,
                    kind: rule.kind,
                })
        })
    }

    pub fn find_ingredient(&self, key: &str) -> Option<&IngredientRecord> {
        self.lookup(key).map(|found| found.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::domain::{IngredientCategory, SafetyLevel};
    use crate::pipeline::normalizer::normalize_ingredient;

    fn record(id: &str, name: &str, aliases: &[&str]) -> IngredientRecord {
        IngredientRecord {
            id: id.to_string(),
            key: id.to_string(),
            canonical_name: name.to_string(),
            aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
            category: IngredientCategory::Coloring,
            base_safety_level: SafetyLevel::Caution,
            description: String::new(),
            health_impact: String::new(),
            alternatives: None,
            daily_limit: None,
            age_restrictions: None,
            allergen_notes: Vec::new(),
            sources: Vec::new(),
        }
    }

    #[test]
    fn exact_alias_beats_containment_by_longer_alias() {
        let store = ReferenceStore::new(vec![
            record("lake", "Red Lake Pigment", &["red 40 lake"]),
            record("red", "Allura", &["red 40"]),
        ]);

        let found = store.lookup("red 40").expect("match");
        assert_eq!(found.record.id, "red");
        assert_eq!(found.kind, MatchKind::Alias);
    }

    #[test]
    fn containment_tie_goes_to_first_record_in_store_order() {
        let store = ReferenceStore::new(vec![
            record("first", "First", &["gum"]),
            record("second", "Second", &["guar gum"]),
        ]);

        let found = store.lookup("guar gum thickener").expect("match");
        assert_eq!(found.record.id, "first");
        assert_eq!(found.kind, MatchKind::AliasContainment);
    }

    #[test]
    fn canonical_name_is_matched_case_insensitively() {
        let store = ReferenceStore::new(vec![record("x1", "Xanthan Gum", &["e415"])]);

        let found = store.lookup("xanthan gum").expect("match");
        assert_eq!(found.kind, MatchKind::CanonicalName);

        let partial = store.lookup("organic xanthan gum blend").expect("match");
        assert_eq!(partial.kind, MatchKind::NameContainment);
    }

    #[test]
    fn empty_key_never_matches() {
        let store = ReferenceStore::standard();
        assert!(store.lookup("").is_none());
        assert!(store.find_ingredient(&normalize_ingredient("   ")).is_none());
    }

    #[test]
    fn standard_store_resolves_noisy_fragments() {
        let store = ReferenceStore::standard();

        let bht = store
            .lookup(&normalize_ingredient("BHT (preservative)"))
            .expect("bht resolves");
        assert_eq!(bht.record.id, "bht");
        assert_eq!(bht.kind, MatchKind::AliasContainment);

        let salt = store.lookup("sea salt").expect("salt resolves");
        assert_eq!(salt.record.id, "salt");
        assert_eq!(salt.kind, MatchKind::Alias);

        let hfcs = store.lookup("hfcs").expect("id resolves");
        assert_eq!(hfcs.kind, MatchKind::PrimaryKey);

        assert!(store.lookup("xyzatolinepreservativeblend").is_none());
    }

    #[test]
    fn additional_records_follow_the_standard_catalog() {
        let store = ReferenceStore::standard()
            .with_additional(vec![record("sugar_blend", "Sugar Blend", &["sugar"])]);

        assert_eq!(
            store.find_ingredient("sugar").map(|found| found.id.as_str()),
            Some("sugar")
        );
        assert_eq!(
            store
                .find_ingredient("sugar blend")
                .map(|found| found.id.as_str()),
            Some("sugar_blend")
        );
    }
}
