//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Print human-readable reports.
    pub human: bool,
    /// Print JSON reports.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            human: true,
            json: false,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (QL_*)
        figment = figment.merge(Env::prefixed("QL_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for ql.
///
/// On Linux: `~/.config/ql`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ql"))
}
