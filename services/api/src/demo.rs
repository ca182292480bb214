use crate::infra::{build_resolver, load_reference_store, parse_age};
use clap::Args;
use ingredient_guard::config::AppConfig;
use ingredient_guard::error::AppError;
use ingredient_guard::pipeline::{
    normalize_ingredient, split_ingredient_text, AnalysisRequest, AnalysisSession, SafetyLevel,
    UserAge,
};

#[derive(Args, Debug, Default)]
pub(crate) struct AnalyzeArgs {
    /// Ingredient names, one per argument
    pub(crate) ingredients: Vec<String>,
    /// Raw label text to split into ingredients instead of listing them
    #[arg(long, conflicts_with = "ingredients")]
    pub(crate) text: Option<String>,
    /// User age in years; omit for general adult guidance
    #[arg(long, value_parser = parse_age)]
    pub(crate) age: Option<UserAge>,
    /// Print the full session as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct LookupArgs {
    /// Ingredient name as it appears on a label
    pub(crate) name: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Age used for the sample labels (defaults to 10)
    #[arg(long, value_parser = parse_age)]
    pub(crate) age: Option<UserAge>,
}

const SAMPLE_LABELS: &[(&str, &str)] = &[
    (
        "Breakfast cereal",
        "Ingredients: Sugar, BHT (preservative), Yellow 5, Natural vanilla flavor.",
    ),
    (
        "Granola",
        "Ingredients: Organic whole grain oats, Sea salt, Natural vanilla flavor.",
    ),
    (
        "Snack bar",
        "Ingredients: Xyzatolinepreservativeblend, Citric acid, Stevia, Palm oil.",
    ),
];

pub(crate) async fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        ingredients,
        text,
        age,
        json,
    } = args;

    let config = AppConfig::load()?;
    let resolver = build_resolver(&config.analysis)?;

    let inputs = match text {
        Some(text) => split_ingredient_text(&text),
        None => ingredients,
    };
    let session = resolver.analyze(inputs, age).await?;

    if json {
        let summary = session.summary();
        let payload = serde_json::json!({ "session": session, "summary": summary });
        match serde_json::to_string_pretty(&payload) {
            Ok(body) => println!("{body}"),
            Err(err) => println!("Session payload unavailable: {err}"),
        }
    } else {
        render_session(&session);
    }

    Ok(())
}

pub(crate) fn run_lookup(args: LookupArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let store = load_reference_store(&config.analysis)?;
    let key = normalize_ingredient(&args.name);

    match store.lookup(&key) {
        Some(found) => {
            let record = found.record;
            println!("{} [{}]", record.canonical_name, record.id);
            println!("  Matched by: {}", found.kind.label());
            println!("  Category: {}", record.category.label());
            println!("  Base safety: {}", record.base_safety_level.label());
            println!("  {}", record.description);
            if let Some(limit) = &record.daily_limit {
                println!("  Daily limit: {limit}");
            }
            if let Some(alternatives) = &record.alternatives {
                println!("  Alternatives: {alternatives}");
            }
        }
        None => println!("No reference record matches '{key}'"),
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let age = args.age.or_else(|| UserAge::from_input(10));
    let config = AppConfig::load()?;
    let resolver = build_resolver(&config.analysis)?;

    println!("Ingredient analysis demo");
    if let Some(age) = age {
        println!("Personalized for age {age}");
    }

    for (label, text) in SAMPLE_LABELS {
        println!("\n== {label} ==");
        let request = AnalysisRequest {
            ingredients: None,
            text: Some(text.to_string()),
            age: age.map(|age| i64::from(age.years())),
        };
        let (inputs, age) = request.into_inputs();
        match resolver.analyze(inputs, age).await {
            Ok(session) => render_session(&session),
            Err(err) => println!("  Analysis unavailable: {err}"),
        }
    }

    Ok(())
}

fn level_marker(level: SafetyLevel) -> &'static str {
    match level {
        SafetyLevel::Safe => "[ok]",
        SafetyLevel::Caution => "[!!]",
        SafetyLevel::Warning => "[XX]",
    }
}

pub(crate) fn render_session(session: &AnalysisSession) {
    let summary = session.summary();
    println!("{} - {}", summary.headline, summary.detail);
    let counts: Vec<String> = summary
        .level_counts
        .iter()
        .map(|entry| format!("{} {}", entry.count, entry.level_label))
        .collect();
    println!("  {}", counts.join(", "));

    for ingredient in &session.resolved {
        let origin = if ingredient.is_heuristic {
            "estimated"
        } else {
            "reference"
        };
        println!(
            "  {} {} ({}, {})",
            level_marker(ingredient.effective_safety_level),
            ingredient.display_name,
            ingredient.effective_safety_level.label(),
            origin
        );
        println!("      {}", ingredient.message);
        if let Some(limit) = &ingredient.daily_limit_text {
            println!("      Daily limit: {limit}");
        }
        if let Some(alternatives) = &ingredient.alternatives_text {
            println!("      Alternatives: {alternatives}");
        }
        for note in &ingredient.allergen_notes {
            println!("      Allergen: {note}");
        }
    }
}
