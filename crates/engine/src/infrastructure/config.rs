//! Engine configuration.
//!
//! Layered lowest to highest: built-in defaults, an optional `charforge`
//! config file in the working directory, then `CHARFORGE_*` environment
//! variables (e.g. `CHARFORGE_RECORDS_DIR`).

use std::path::{Path, PathBuf};

use serde::Deserialize;

const DEFAULT_REFERENCE_DATA: &str = "data/reference.json";
const DEFAULT_RECORDS_DIR: &str = "characters";
const DEFAULT_LOG_FILTER: &str = "charforge_engine=info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// JSON document with every reference catalog
    pub reference_data: PathBuf,
    /// Directory the JSON record store writes to
    pub records_dir: PathBuf,
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl AppConfig {
    /// Load from `./charforge.{toml,json,...}` if present, then the environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::with_name("charforge").required(false))
            .add_source(config::Environment::with_prefix("CHARFORGE"))
            .build()?
            .try_deserialize()
    }

    /// Load from an explicit file only, skipping the environment.
    pub fn from_file(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = Self::builder()?;
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }
        builder.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError>
    {
        config::Config::builder()
            .set_default("reference_data", DEFAULT_REFERENCE_DATA)?
            .set_default("records_dir", DEFAULT_RECORDS_DIR)?
            .set_default("log_filter", DEFAULT_LOG_FILTER)
    }
}
