//! Optional TOML configuration for the `locbundle` command.
//!
//! ```toml
//! bundle = "assets/localization.zip"
//! culture = "fr-CA"
//! format = "json"
//!
//! [load]
//! acquire_timeout_ms = 5000
//! default_segment = "default"
//! ```
//!
//! Every value can be overridden on the command line.

use std::fs;
use std::path::Path;

use locbundle::LoadOptions;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub bundle: Option<String>,
    pub culture: Option<String>,
    pub format: Option<String>,
    pub load: LoadOptions,
}

impl CliConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Invalid config: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
        Self::from_toml_str(&content)
    }

    /// Reads `path` when given, otherwise returns the defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, String> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
