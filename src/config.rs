//! Configuration loaded from a `suitewatch.toml` file.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::WatchError;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "suitewatch.toml";

/// Template used when the configuration doesn't provide one. `{color}` is
/// replaced with the running or failed color of the suite.
pub const DEFAULT_TEMPLATE: &str =
    "\n{prefix:.magenta}\n {bar:40.{color}} {pos}/{len} ({percent}%)\n{msg}";

/// Configuration for a single suitewatch run.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Version of suitewatch this configuration is compatible with.
    pub ver: Option<String>,
    /// Directory screenshots are written under.
    pub screenshots_dir: Option<PathBuf>,
    /// Progress bar template.
    pub template: Option<String>,
    /// Bar color while a suite is running.
    pub running_color: Option<String>,
    /// Bar color once a suite has failed.
    pub failed_color: Option<String>,
    /// Ports exposed by a line-oriented worker.
    #[serde(default)]
    pub ports: Vec<String>,
}

impl Config {
    /// Load the configuration.
    /// An explicitly requested file must exist. Without one, `suitewatch.toml`
    /// in the current directory is used when present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, WatchError> {
        match path {
            Some(path) => Self::from_path(path),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::from_path(path)
                } else {
                    debug!("no {} found, using defaults", CONFIG_FILE);
                    Ok(Config::default())
                }
            }
        }
    }

    /// Read and validate a configuration file.
    /// Ensures that the version number, when specified, matches the version
    /// of the installed binary.
    pub fn from_path(path: &Path) -> Result<Self, WatchError> {
        let contents = std::fs::read_to_string(path).map_err(|_| {
            WatchError(format!("{} is missing.", path.display()))
        })?;
        let conf = Self::parse(&contents)
            .map_err(|err| err.context(format!("Failed to parse {}", path.display())))?;
        debug!("loaded configuration from {}", path.display());
        Ok(conf)
    }

    /// Parse a configuration from its TOML source.
    pub fn parse(contents: &str) -> Result<Self, WatchError> {
        let conf: Config = toml::from_str(contents)?;

        if let Some(ver) = &conf.ver {
            if env!("CARGO_PKG_VERSION") != ver {
                return Err(WatchError(format!(
                    "suitewatch version mismatch. Configuration requires: {}, tool version: {}.",
                    ver,
                    env!("CARGO_PKG_VERSION")
                )));
            }
        }

        Ok(conf)
    }

    pub fn screenshots_dir(&self) -> PathBuf {
        self.screenshots_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("screenshots"))
    }

    pub fn template(&self) -> &str {
        self.template.as_deref().unwrap_or(DEFAULT_TEMPLATE)
    }

    pub fn running_color(&self) -> &str {
        self.running_color.as_deref().unwrap_or("green")
    }

    pub fn failed_color(&self) -> &str {
        self.failed_color.as_deref().unwrap_or("red")
    }

    /// Ports of the line worker. A single `events` port when none are listed.
    pub fn ports(&self) -> Vec<String> {
        if self.ports.is_empty() {
            vec!["events".to_string()]
        } else {
            self.ports.clone()
        }
    }
}
