use anyhow::Result;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use translatable_fields::config::Config;
use translatable_fields::i18n::TranslationMetrics;
use translatable_fields::{Entity, GroupId, Locale, TranslationTable};

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translatable_fields=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        "Locale: {} (fallback: {})",
        config.locale, config.fallback_locale
    );

    // Seed the side table with one day name
    let table = TranslationTable::new();
    table.insert(GroupId::Int(1), Locale::new("en")?, "Monday")?;
    table.insert(GroupId::Int(1), Locale::new("es")?, "Lunes")?;

    let mut day = Entity::from_json(json!({"id": 1, "key": "monday", "_name": 1}), config)?
        .with_source(Arc::new(table.clone()));

    let name = day.get_attribute("name")?.and_then(|v| v.as_text().map(str::to_string));
    info!("name = {:?}", name);

    day.set_attribute("name", format!("{} (edited)", name.unwrap_or_default()))?;
    let saved = day.save_translations()?;
    info!("Saved {} group(s); table now holds {} row(s)", saved, table.row_count()?);

    let report = TranslationMetrics::global().report();
    info!("Metrics: {}", serde_json::to_string(&report)?);

    Ok(())
}
