//! Configuration file support.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. `$XDG_CONFIG_HOME/archivist/config.toml`
//! 2. `./archivist.toml`
//! 3. `ARCHIVIST_*` environment variables
//!
//! Everything has a sensible default, so all layers are optional.

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

use archivist::sync::DEFAULT_HISTORY_LIMIT;

/// Top-level configuration.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) database: DatabaseSection,
    pub(crate) sync: SyncSection,
}

/// `[database]` section.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct DatabaseSection {
    /// Connection URL. Defaults to a SQLite file in the XDG state
    /// directory when unset.
    pub(crate) url: Option<String>,
}

/// `[sync]` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct SyncSection {
    /// Default discovery window for new builds per job.
    pub(crate) history_limit: usize,
}

impl Default for SyncSection {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from all layers. Unreadable or invalid sources
    /// degrade to the defaults with a warning rather than aborting.
    pub(crate) fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = Self::default_config_path() {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }
        builder = builder.add_source(
            File::with_name("archivist")
                .format(FileFormat::Toml)
                .required(false),
        );
        builder = builder.add_source(Environment::with_prefix("ARCHIVIST").separator("_"));

        match builder.build().and_then(ConfigBuilder::try_deserialize) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load configuration, using defaults");
                Self::default()
            }
        }
    }

    /// `config.toml` under the XDG config directory.
    pub(crate) fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "archivist").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Resolved database URL: the configured one, or a SQLite file in the
    /// XDG state directory.
    pub(crate) fn database_url(&self) -> Option<String> {
        if let Some(url) = &self.database.url {
            return Some(url.clone());
        }
        let dirs = ProjectDirs::from("", "", "archivist")?;
        let state = dirs
            .state_dir()
            .unwrap_or_else(|| dirs.data_local_dir())
            .to_path_buf();
        Some(format!(
            "sqlite://{}/archivist.db?mode=rwc",
            state.display()
        ))
    }
}
