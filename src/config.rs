use crate::error::{Result as ShResult, ShellError};
use crate::store::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "OZSH_CONFIG";

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "ozsh.toml";

pub const DEFAULT_CATALOG_FILE: &str = "volumes.json";

/// Shell configuration read from `ozsh.toml`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// JSON catalog backing the volume listing
    pub catalog: PathBuf,
    /// Volumes requested from the backend per page
    pub page_size: usize,
    /// Owner used when `--user` is not given
    pub default_user: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            catalog: PathBuf::from(DEFAULT_CATALOG_FILE),
            page_size: DEFAULT_PAGE_SIZE,
            default_user: None,
        }
    }
}

impl ShellConfig {
    /// Load the config following the usual lookup order
    ///
    /// `explicit` (from `--config`) wins, then `$OZSH_CONFIG`, then
    /// `./ozsh.toml` when it exists. With none of them, defaults apply.
    pub fn load(explicit: Option<&Path>) -> ShResult<Self> {
        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        let cwd = std::env::current_dir()?;
        Self::discover(explicit, from_env.as_deref(), &cwd)
    }

    pub fn discover(
        explicit: Option<&Path>,
        from_env: Option<&Path>,
        cwd: &Path,
    ) -> ShResult<Self> {
        if let Some(path) = explicit.or(from_env) {
            return Self::from_file(path);
        }

        let local = cwd.join(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::from_file(&local);
        }

        log::debug!("no config file found, using defaults");
        let defaults = ShellConfig::default();
        Ok(ShellConfig {
            catalog: cwd.join(&defaults.catalog),
            ..defaults
        })
    }

    /// Read a TOML config file; a relative `catalog` is resolved against the
    /// file's directory
    pub fn from_file(path: &Path) -> ShResult<Self> {
        log::debug!("loading config from {}", path.display());
        let raw = fs::read_to_string(path).map_err(|e| {
            ShellError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        let mut config = Self::parse(&raw)
            .map_err(|e| ShellError::ConfigError(format!("{}: {e}", path.display())))?;

        if config.catalog.is_relative() {
            if let Some(dir) = path.parent() {
                config.catalog = dir.join(&config.catalog);
            }
        }
        Ok(config)
    }

    pub fn parse(raw: &str) -> ShResult<Self> {
        let config: ShellConfig =
            toml::from_str(raw).map_err(|e| ShellError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ShResult<()> {
        if self.page_size == 0 {
            return Err(ShellError::ConfigError(
                "page_size must be greater than 0".to_string(),
            ));
        }
        if self.default_user.as_deref().is_some_and(str::is_empty) {
            return Err(ShellError::ConfigError(
                "default_user must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
