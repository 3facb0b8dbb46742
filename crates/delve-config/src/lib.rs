//! # delve-config
//!
//! Layered configuration loading for Delve using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DELVE_*` prefix, `__` as separator)
//! 2. Project-level `.delve/config.toml`
//! 3. User-level `~/.config/delve/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DELVE_WORKFLOW__MAX_SUBQUESTIONS` -> `workflow.max_subquestions`,
//! `DELVE_SERVER__NAME` -> `server.name`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use delve_config::DelveConfig;
//!
//! let config = DelveConfig::load_with_dotenv().expect("config");
//! println!("subquestions: {}..={}", config.workflow.min_subquestions, config.workflow.max_subquestions);
//! ```

mod error;
mod server;
mod workflow;

pub use error::ConfigError;
pub use server::ServerConfig;
pub use workflow::WorkflowConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config path, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".delve/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DelveConfig {
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl DelveConfig {
    /// Load and validate configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading `.env` from the working directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("DELVE_").split("__"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.workflow.validate()
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("delve").join("config.toml"))
    }
}
