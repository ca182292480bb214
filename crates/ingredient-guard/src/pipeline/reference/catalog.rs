use super::super::domain::{AgeRestrictions, IngredientCategory, IngredientRecord, SafetyLevel};
use IngredientCategory::*;
use SafetyLevel::*;

struct CatalogEntry {
    id: &'static str,
    key: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
    category: IngredientCategory,
    level: SafetyLevel,
    description: &'static str,
    health_impact: &'static str,
    alternatives: Option<&'static str>,
    daily_limit: Option<&'static str>,
    children: Option<&'static str>,
    adults: Option<&'static str>,
    allergens: &'static [&'static str],
    sources: &'static [&'static str],
}

impl CatalogEntry {
    fn to_record(&self) -> IngredientRecord {
        let age_restrictions = if self.children.is_some() || self.adults.is_some() {
            Some(AgeRestrictions {
                children: self.children.map(str::to_string),
                adults: self.adults.map(str::to_string),
            })
        } else {
            None
        };

        IngredientRecord {
            id: self.id.to_string(),
            key: self.key.to_string(),
            canonical_name: self.name.to_string(),
            aliases: self.aliases.iter().map(|alias| alias.to_string()).collect(),
            category: self.category,
            base_safety_level: self.level,
            description: self.description.to_string(),
            health_impact: self.health_impact.to_string(),
            alternatives: self.alternatives.map(str::to_string),
            daily_limit: self.daily_limit.map(str::to_string),
            age_restrictions,
            allergen_notes: self.allergens.iter().map(|note| note.to_string()).collect(),
            sources: self.sources.iter().map(|source| source.to_string()).collect(),
        }
    }
}

/// Built-in records in store iteration order. Order decides substring ties.
pub(crate) fn standard_records() -> Vec<IngredientRecord> {
    CATALOG.iter().map(CatalogEntry::to_record).collect()
}

const CATALOG: &[CatalogEntry] = &[
    // Sweeteners
    CatalogEntry {
        id: "sugar",
        key: "sugar",
        name: "Sugar",
        aliases: &["sugar", "sucrose", "cane sugar", "table sugar", "white sugar"],
        category: Sweetener,
        level: Caution,
        description: "Simple carbohydrate that provides quick energy but lacks nutritional value.",
        health_impact: "High intake linked to obesity, dental issues, and blood sugar spikes. Contributes to empty calories.",
        alternatives: Some("Stevia, monk fruit, or reduce overall sweetness gradually"),
        daily_limit: Some("25g recommended daily maximum (WHO guidelines)"),
        children: Some("Limit to 12g per day for children under 12"),
        adults: Some("WHO recommends less than 25g per day"),
        allergens: &[],
        sources: &[],
    },
    CatalogEntry {
        id: "hfcs",
        key: "high fructose corn syrup",
        name: "High Fructose Corn Syrup",
        aliases: &[
            "high fructose corn syrup",
            "hfcs",
            "corn syrup",
            "fructose corn syrup",
            "high-fructose corn syrup",
        ],
        category: Sweetener,
        level: Warning,
        description: "Highly processed sweetener made from corn starch, cheaper alternative to sugar.",
        health_impact: "Linked to obesity, diabetes, fatty liver disease. Body processes it differently than regular sugar, bypassing normal satiety signals.",
        alternatives: Some("Natural sweeteners like honey, maple syrup, or fruit"),
        daily_limit: Some("Avoid when possible - no safe daily limit established"),
        children: Some("Should be avoided in children under 2 years"),
        adults: Some("Limit consumption as much as possible"),
        allergens: &[],
        sources: &[],
    },
    CatalogEntry {
        id: "aspartame",
        key: "aspartame",
        name: "Aspartame",
        aliases: &["aspartame", "nutrasweet", "equal", "aspartame acesulfame salt"],
        category: Sweetener,
        level: Caution,
        description: "Artificial sweetener that is 200 times sweeter than sugar.",
        health_impact: "Generally recognized as safe by FDA, but some studies suggest potential links to headaches and mood changes in sensitive individuals. Not recommended for people with phenylketonuria (PKU).",
        alternatives: Some("Stevia, monk fruit, or small amounts of natural sugars"),
        daily_limit: Some("40mg/kg body weight per day (FDA acceptable daily intake)"),
        children: Some("Safe in normal amounts, but should be limited"),
        adults: Some("Generally safe within daily limits"),
        allergens: &["contains phenylalanine"],
        sources: &["FDA.gov", "WHO/FAO Expert Committee"],
    },
    // Artificial colors
    CatalogEntry {
        id: "yellow5",
        key: "yellow 5",
        name: "Yellow 5 (Tartrazine)",
        aliases: &["yellow 5", "tartrazine", "fd&c yellow no. 5", "yellow dye 5", "e102"],
        category: Coloring,
        level: Warning,
        description: "Artificial food coloring derived from petroleum, used to create yellow color.",
        health_impact: "May cause hyperactivity in children, allergic reactions, and asthma. Linked to behavioral issues in sensitive children.",
        alternatives: Some("Natural colorings like turmeric, annatto, or beta-carotene"),
        daily_limit: Some("7.5mg/kg body weight per day (FDA acceptable daily intake)"),
        children: Some("Avoid in children with ADHD or hyperactivity"),
        adults: Some("Generally safe but may cause allergic reactions"),
        allergens: &["may cause allergic reactions in sensitive individuals"],
        sources: &["FDA.gov", "European Food Safety Authority"],
    },
    CatalogEntry {
        id: "red40",
        key: "red 40",
        name: "Red 40 (Allura Red)",
        aliases: &["red 40", "allura red", "fd&c red no. 40", "red dye 40", "e129"],
        category: Coloring,
        level: Warning,
        description: "Most commonly used artificial red food coloring in the United States.",
        health_impact: "May cause hyperactivity in children, allergic reactions. Some studies suggest links to behavioral problems.",
        alternatives: Some("Natural red colorings like beet juice, paprika extract, or lycopene"),
        daily_limit: Some("7mg/kg body weight per day"),
        children: Some("Avoid in children under 3, limit in others"),
        adults: Some("Generally safe within limits but may cause reactions"),
        allergens: &[],
        sources: &["FDA.gov", "Journal of Pediatrics"],
    },
    // Preservatives
    CatalogEntry {
        id: "bht",
        key: "bht",
        name: "BHT (Butylated Hydroxytoluene)",
        aliases: &["bht", "butylated hydroxytoluene", "butylhydroxytoluene", "e321"],
        category: Preservative,
        level: Warning,
        description: "Synthetic antioxidant used to prevent fats from becoming rancid.",
        health_impact: "Possible carcinogen, may cause liver and kidney damage. Linked to behavioral problems in children.",
        alternatives: Some("Natural preservatives like vitamin E (tocopherols), rosemary extract"),
        daily_limit: Some("0.5mg/kg body weight per day"),
        children: Some("Should be avoided in children when possible"),
        adults: Some("Limit consumption, avoid regular intake"),
        allergens: &[],
        sources: &["FDA.gov", "Environmental Working Group"],
    },
    CatalogEntry {
        id: "sodium_benzoate",
        key: "sodium benzoate",
        name: "Sodium Benzoate",
        aliases: &["sodium benzoate", "benzoate of soda", "e211"],
        category: Preservative,
        level: Caution,
        description: "Common preservative that prevents growth of bacteria, yeast, and fungi.",
        health_impact: "Generally safe, but may form benzene (carcinogen) when combined with vitamin C. May worsen ADHD symptoms.",
        alternatives: Some("Natural preservation methods, vitamin E, or citric acid"),
        daily_limit: Some("5mg/kg body weight per day"),
        children: Some("Monitor intake, especially with vitamin C foods"),
        adults: Some("Safe in normal food amounts"),
        allergens: &[],
        sources: &["FDA.gov", "European Food Safety Authority"],
    },
    // Natural ingredients
    CatalogEntry {
        id: "vanilla",
        key: "natural vanilla flavor",
        name: "Natural Vanilla Flavor",
        aliases: &[
            "natural vanilla flavor",
            "vanilla extract",
            "natural vanilla",
            "vanilla flavoring",
        ],
        category: Flavor,
        level: Safe,
        description: "Flavoring derived from vanilla beans, generally recognized as safe.",
        health_impact: "Minimal health impact, provides pleasant taste without significant nutritional concerns.",
        alternatives: Some("Pure vanilla extract for more authentic flavor"),
        daily_limit: Some("No specific limit established - generally safe"),
        children: Some("Safe for all ages"),
        adults: Some("Safe for all ages"),
        allergens: &[],
        sources: &[],
    },
    CatalogEntry {
        id: "oats",
        key: "organic whole grain oats",
        name: "Organic Whole Grain Oats",
        aliases: &[
            "organic whole grain oats",
            "oats",
            "whole oats",
            "oat flour",
            "rolled oats",
        ],
        category: Natural,
        level: Safe,
        description: "Nutrient-rich whole grain providing fiber, protein, and essential minerals.",
        health_impact: "Supports heart health, digestive health, and provides sustained energy. Excellent source of beta-glucan fiber.",
        alternatives: Some("Other whole grains like quinoa, brown rice, or barley"),
        daily_limit: Some("No upper limit - encouraged as part of healthy diet"),
        children: Some("Excellent choice for children over 6 months"),
        adults: Some("Highly recommended for all adults"),
        allergens: &["may contain gluten from shared processing"],
        sources: &[],
    },
    // Common additives
    CatalogEntry {
        id: "msg",
        key: "monosodium glutamate",
        name: "Monosodium Glutamate (MSG)",
        aliases: &["monosodium glutamate", "msg", "sodium glutamate", "e621", "glutamate"],
        category: Flavor,
        level: Caution,
        description: "Flavor enhancer that adds umami (savory) taste to foods.",
        health_impact: "Generally recognized as safe by FDA, but some people report headaches, nausea, or flushing after consumption.",
        alternatives: Some("Natural umami sources like mushrooms, tomatoes, or soy sauce"),
        daily_limit: Some("No specific limit, but sensitive individuals should limit intake"),
        children: Some("Safe in normal food amounts, monitor for sensitivity"),
        adults: Some("Safe for most people, avoid if sensitive"),
        allergens: &[],
        sources: &[],
    },
    CatalogEntry {
        id: "sodium_nitrite",
        key: "sodium nitrite",
        name: "Sodium Nitrite",
        aliases: &["sodium nitrite", "nitrite", "e250"],
        category: Preservative,
        level: Warning,
        description: "Preservative used in processed meats to maintain color and prevent bacterial growth.",
        health_impact: "Can form nitrosamines (potential carcinogens) when cooked at high temperatures. Linked to increased cancer risk.",
        alternatives: Some("Uncured meats, celery powder, or fresh meats without preservatives"),
        daily_limit: Some("0.07mg/kg body weight per day"),
        children: Some("Limit processed meats containing nitrites"),
        adults: Some("Minimize consumption of processed meats"),
        allergens: &[],
        sources: &[],
    },
    CatalogEntry {
        id: "phosphoric_acid",
        key: "phosphoric acid",
        name: "Phosphoric Acid",
        aliases: &["phosphoric acid", "e338", "orthophosphoric acid"],
        category: Other,
        level: Caution,
        description: "Acid used to add tart flavor to sodas and processed foods.",
        health_impact: "May interfere with calcium absorption, potentially weakening bones. Can erode tooth enamel.",
        alternatives: Some("Citric acid or natural fruit acids"),
        daily_limit: Some("70mg/kg body weight per day"),
        children: Some("Limit sodas and foods containing phosphoric acid"),
        adults: Some("Moderate consumption, especially if at risk for osteoporosis"),
        allergens: &[],
        sources: &[],
    },
    // Knowledge-base additions
    CatalogEntry {
        id: "sucralose",
        key: "sucralose",
        name: "Sucralose",
        aliases: &["sucralose", "splenda", "e955"],
        category: Sweetener,
        level: Safe,
        description: "Non-caloric artificial sweetener made from sugar.",
        health_impact: "Generally recognized as safe with no known adverse effects in normal consumption.",
        alternatives: None,
        daily_limit: Some("ADI: 5mg/kg body weight per day"),
        children: None,
        adults: None,
        allergens: &[],
        sources: &["FDA.gov", "Health Canada"],
    },
    CatalogEntry {
        id: "stevia",
        key: "stevia",
        name: "Stevia",
        aliases: &["stevia", "steviol glycosides", "rebaudioside a", "e960"],
        category: Sweetener,
        level: Safe,
        description: "Natural sweetener derived from the stevia plant.",
        health_impact: "Generally safe with potential blood sugar benefits.",
        alternatives: None,
        daily_limit: Some("ADI: 4mg/kg body weight per day (as steviol equivalents)"),
        children: None,
        adults: None,
        allergens: &[],
        sources: &["FDA.gov", "American Diabetes Association"],
    },
    CatalogEntry {
        id: "potassium_sorbate",
        key: "potassium sorbate",
        name: "Potassium Sorbate",
        aliases: &["potassium sorbate", "e202"],
        category: Preservative,
        level: Safe,
        description: "Preservative that inhibits mold and yeast growth.",
        health_impact: "Generally recognized as safe with minimal health concerns.",
        alternatives: None,
        daily_limit: None,
        children: None,
        adults: None,
        allergens: &[],
        sources: &["FDA.gov", "WHO"],
    },
    CatalogEntry {
        id: "bha",
        key: "bha",
        name: "BHA (Butylated Hydroxyanisole)",
        aliases: &["bha", "butylated hydroxyanisole", "e320"],
        category: Preservative,
        level: Warning,
        description: "Butylated hydroxyanisole, synthetic antioxidant preservative.",
        health_impact: "Classified as reasonably anticipated to be a human carcinogen by some agencies.",
        alternatives: Some("Rosemary extract or mixed tocopherols"),
        daily_limit: Some("Minimize consumption"),
        children: Some("Should be avoided in children when possible"),
        adults: None,
        allergens: &[],
        sources: &["National Toxicology Program", "FDA.gov"],
    },
    CatalogEntry {
        id: "palm_oil",
        key: "palm oil",
        name: "Palm Oil",
        aliases: &["palm oil", "palm kernel oil", "palm fat"],
        category: Other,
        level: Caution,
        description: "Vegetable oil derived from palm fruit.",
        health_impact: "High in saturated fat. Environmental concerns about production practices.",
        alternatives: Some("Olive oil, canola oil, or sunflower oil"),
        daily_limit: Some("Limit saturated fat intake"),
        children: None,
        adults: None,
        allergens: &[],
        sources: &["American Heart Association", "World Health Organization"],
    },
    CatalogEntry {
        id: "hydrogenated_oil",
        key: "hydrogenated oil",
        name: "Hydrogenated Oil",
        aliases: &[
            "hydrogenated oil",
            "partially hydrogenated oil",
            "hydrogenated vegetable oil",
            "trans fat",
        ],
        category: Other,
        level: Warning,
        description: "Oil processed to be solid at room temperature.",
        health_impact: "Often contains trans fats, which raise bad cholesterol and are linked to cardiovascular disease.",
        alternatives: Some("Butter in moderation or unhydrogenated vegetable oils"),
        daily_limit: Some("Avoid or minimize"),
        children: None,
        adults: None,
        allergens: &[],
        sources: &["FDA.gov", "Harvard T.H. Chan School of Public Health"],
    },
    CatalogEntry {
        id: "water",
        key: "water",
        name: "Water",
        aliases: &["water", "filtered water", "purified water"],
        category: Natural,
        level: Safe,
        description: "H2O, essential for life.",
        health_impact: "No health concerns.",
        alternatives: None,
        daily_limit: None,
        children: None,
        adults: None,
        allergens: &[],
        sources: &[],
    },
    CatalogEntry {
        id: "salt",
        key: "salt",
        name: "Salt",
        aliases: &["salt", "sea salt", "table salt", "sodium chloride", "iodized salt"],
        category: Mineral,
        level: Safe,
        description: "Sodium chloride, essential mineral.",
        health_impact: "Safe in normal amounts; excess sodium is associated with high blood pressure.",
        alternatives: Some("Herbs and spices for flavor"),
        daily_limit: Some("Less than 2,300mg sodium per day"),
        children: None,
        adults: None,
        allergens: &[],
        sources: &[],
    },
    CatalogEntry {
        id: "flour",
        key: "flour",
        name: "Flour",
        aliases: &["flour", "wheat flour", "enriched flour", "all-purpose flour"],
        category: Natural,
        level: Safe,
        description: "Ground grain, typically wheat.",
        health_impact: "Staple ingredient; refined flour offers less fiber than whole grain flour.",
        alternatives: Some("Whole grain flour"),
        daily_limit: None,
        children: None,
        adults: None,
        allergens: &["contains gluten"],
        sources: &[],
    },
    CatalogEntry {
        id: "yeast",
        key: "yeast",
        name: "Yeast",
        aliases: &["yeast", "baker's yeast", "yeast extract"],
        category: Natural,
        level: Safe,
        description: "Microorganism used for fermentation.",
        health_impact: "No health concerns for most people.",
        alternatives: None,
        daily_limit: None,
        children: None,
        adults: None,
        allergens: &[],
        sources: &[],
    },
    CatalogEntry {
        id: "baking_soda",
        key: "baking soda",
        name: "Baking Soda",
        aliases: &["baking soda", "sodium bicarbonate", "bicarbonate of soda", "e500"],
        category: Other,
        level: Safe,
        description: "Sodium bicarbonate, leavening agent.",
        health_impact: "Safe in the small amounts used for baking.",
        alternatives: None,
        daily_limit: None,
        children: None,
        adults: None,
        allergens: &[],
        sources: &[],
    },
    CatalogEntry {
        id: "lemon_juice",
        key: "lemon juice",
        name: "Lemon Juice",
        aliases: &["lemon juice", "lemon juice concentrate"],
        category: Natural,
        level: Safe,
        description: "Natural citric acid from lemons.",
        health_impact: "No health concerns; provides a small amount of vitamin C.",
        alternatives: None,
        daily_limit: None,
        children: None,
        adults: None,
        allergens: &[],
        sources: &[],
    },
    CatalogEntry {
        id: "olive_oil",
        key: "olive oil",
        name: "Olive Oil",
        aliases: &["olive oil", "extra virgin olive oil"],
        category: Natural,
        level: Safe,
        description: "Healthy monounsaturated fat from olives.",
        health_impact: "Associated with heart health benefits as part of a balanced diet.",
        alternatives: None,
        daily_limit: None,
        children: None,
        adults: None,
        allergens: &[],
        sources: &[],
    },
    CatalogEntry {
        id: "vinegar",
        key: "vinegar",
        name: "Vinegar",
        aliases: &["vinegar", "distilled vinegar", "white vinegar", "apple cider vinegar"],
        category: Natural,
        level: Safe,
        description: "Acetic acid, natural preservative.",
        health_impact: "No health concerns in food quantities.",
        alternatives: None,
        daily_limit: None,
        children: None,
        adults: None,
        allergens: &[],
        sources: &[],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn record_ids_and_keys_are_unique() {
        let records = standard_records();
        let ids: HashSet<_> = records.iter().map(|record| record.id.as_str()).collect();
        let keys: HashSet<_> = records.iter().map(|record| record.key.as_str()).collect();
        assert_eq!(ids.len(), records.len());
        assert_eq!(keys.len(), records.len());
    }

    #[test]
    fn every_key_is_also_an_alias() {
        for record in standard_records() {
            assert!(
                record.aliases.contains(&record.key),
                "{} missing its key among aliases",
                record.id
            );
            assert_eq!(record.key, record.key.to_lowercase());
        }
    }

    #[test]
    fn optional_fields_stay_absent_when_not_provided() {
        let records = standard_records();
        let water = records
            .iter()
            .find(|record| record.id == "water")
            .expect("water present");
        assert!(water.age_restrictions.is_none());
        assert!(water.daily_limit.is_none());
        assert!(water.alternatives.is_none());

        let bha = records
            .iter()
            .find(|record| record.id == "bha")
            .expect("bha present");
        let restrictions = bha.age_restrictions.as_ref().expect("child guidance");
        assert!(restrictions.children.is_some());
        assert!(restrictions.adults.is_none());
    }
}
