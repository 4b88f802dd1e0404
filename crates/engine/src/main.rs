//! Charforge - Main entry point.
//!
//! `charforge <selection.json>` checks a saved guided-creation selection against
//! the reference data and, when it is complete, builds and stores the character.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use charforge_domain::{GuidedSelection, Severity};
use charforge_engine::infrastructure::{
    config::AppConfig, json_store::JsonFileRecordStore, ports::ReferenceDataProvider,
    reference_data::JsonReferenceData,
};
use charforge_engine::use_cases::guided_creation::{
    compute_steps, validate_all, GuidedCreation, GuidedCreationError, Loadable, ReferenceStreams,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root so `cargo run` works from `crates/engine`.
    load_dotenv_from_repo_root();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let selection_path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: charforge <selection.json>")?;

    let raw = tokio::fs::read_to_string(&selection_path)
        .await
        .with_context(|| format!("Failed to read {}", selection_path.display()))?;
    let selection: GuidedSelection = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid selection in {}", selection_path.display()))?;

    tracing::info!(
        reference_data = %config.reference_data.display(),
        records_dir = %config.records_dir.display(),
        "Starting Charforge"
    );

    let provider = JsonReferenceData::new(&config.reference_data);
    let streams = ReferenceStreams::from_load(provider.load().await);
    let catalogs = match streams.combine() {
        Loadable::Ready(catalogs) => catalogs,
        Loadable::Failed(message) => anyhow::bail!("Reference data unavailable: {}", message),
        Loadable::Pending => anyhow::bail!("Reference data is still loading"),
    };

    let steps: Vec<String> = compute_steps(&selection, &catalogs)
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("Steps: {}", steps.join(" > "));

    let report = validate_all(&selection, &catalogs);
    for issue in &report.issues {
        let level = match issue.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        println!("{}: {}", level, issue.message);
    }

    let store = Arc::new(JsonFileRecordStore::new(&config.records_dir));
    let mut creation = GuidedCreation::with_selection(selection, store);

    match creation.create(&catalogs).await {
        Ok(record) => {
            println!(
                "Created {} ({} {}, HP {}, AC {}) as {}",
                record.name,
                record.race,
                record.class_name,
                record.hit_points,
                record.armor_class,
                config.records_dir.join(format!("{}.json", record.id)).display()
            );
            Ok(())
        }
        Err(GuidedCreationError::Incomplete(_)) => {
            println!("Character is not complete yet; nothing was saved");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
