//! Config loading facade: layered sources into a validated [`ToolsConfig`].

use super::merge::merge_policy::builder_with_defaults;
use super::sources::{environment, global_file};
use super::ToolsConfig;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`ToolsConfig`] from defaults, file and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global config file, then the environment.
    pub fn load() -> Result<ToolsConfig, config::ConfigError> {
        let builder = global_file::add_to_builder(builder_with_defaults()?);
        let config: ToolsConfig = environment::add_to_builder(builder)
            .build()?
            .try_deserialize()?;
        debug!("Configuration loaded");
        Ok(config)
    }

    /// Defaults, then `path` (which must exist), then the environment.
    /// The global config file is not read.
    pub fn load_from_file(path: &Path) -> Result<ToolsConfig, config::ConfigError> {
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let config: ToolsConfig = environment::add_to_builder(builder)
            .build()?
            .try_deserialize()?;
        debug!(config_path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Explicit path when given, otherwise the layered default lookup.
    pub fn load_optional(path: Option<&Path>) -> Result<ToolsConfig, config::ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Location of the global config file.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
