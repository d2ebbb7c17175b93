//! Configuration system for Crosswalk.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment -> overrides.
//! Configuration is loaded from `~/.config/crosswalk/config.toml` and/or
//! `.crosswalk/config.toml` in the workspace directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::embeddings::EmbeddingConfig;
use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrosswalkConfig {
    #[serde(default)]
    pub similarity: EmbeddingConfig,
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Where the reference taxonomy comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Custom taxonomy TOML file. The built-in framework is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Defaults for report export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default export format: "json" or "csv".
    #[serde(default = "default_format")]
    pub format: String,
    /// Separator used to join shared terms in CSV rows.
    #[serde(default = "default_term_delimiter")]
    pub term_delimiter: String,
}

fn default_format() -> String {
    "json".into()
}

fn default_term_delimiter() -> String {
    ", ".into()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            term_delimiter: default_term_delimiter(),
        }
    }
}

impl CrosswalkConfig {
    /// Reject settings that would make a run meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.export.term_delimiter.is_empty() {
            return Err(ConfigError::Invalid {
                message: "export.term_delimiter must not be empty".into(),
            });
        }
        if self.similarity.batch_size == 0 {
            return Err(ConfigError::Invalid {
                message: "similarity.batch_size must be at least 1".into(),
            });
        }
        Ok(())
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("dev", "crosswalk", "crosswalk")
}

/// Path of the user-level config file, if a home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.toml"))
}

/// Path of the workspace-level config file.
pub fn workspace_config_path(workspace: &Path) -> PathBuf {
    workspace.join(".crosswalk").join("config.toml")
}

/// Directory for log files, if a home directory is known.
pub fn log_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.data_dir().join("logs"))
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `CROSSWALK_`)
/// 3. Workspace-local config (`.crosswalk/config.toml`)
/// 4. User config (`~/.config/crosswalk/config.toml`)
/// 5. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    overrides: Option<&CrosswalkConfig>,
) -> Result<CrosswalkConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(CrosswalkConfig::default()));

    if let Some(user_config) = user_config_path()
        && user_config.exists()
    {
        figment = figment.merge(Toml::file(&user_config));
    }

    if let Some(ws) = workspace {
        let ws_config = workspace_config_path(ws);
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    // CROSSWALK_SIMILARITY__PROVIDER, CROSSWALK_EXPORT__FORMAT, etc.
    figment = figment.merge(Env::prefixed("CROSSWALK_").split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    let config: CrosswalkConfig = figment.extract().map_err(|e| ConfigError::ParseError {
        message: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// Check whether any Crosswalk configuration file exists (user-level or workspace-level).
pub fn config_exists(workspace: Option<&Path>) -> bool {
    if user_config_path().is_some_and(|p| p.exists()) {
        return true;
    }
    workspace.is_some_and(|ws| workspace_config_path(ws).exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CrosswalkConfig::default();
        assert_eq!(config.similarity.provider, "lexical");
        assert!(config.taxonomy.path.is_none());
        assert_eq!(config.export.format, "json");
        assert_eq!(config.export.term_delimiter, ", ");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = CrosswalkConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: CrosswalkConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_partial_toml() {
        let parsed: CrosswalkConfig = toml::from_str(
            r#"
[similarity]
provider = "fastembed"
model = "all-MiniLM-L6-v2"
"#,
        )
        .unwrap();
        assert_eq!(parsed.similarity.provider, "fastembed");
        assert_eq!(parsed.similarity.batch_size, 32);
        assert_eq!(parsed.export, ExportConfig::default());
    }

    #[test]
    fn test_validate_rejects_empty_delimiter() {
        let mut config = CrosswalkConfig::default();
        config.export.term_delimiter.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_batch() {
        let mut config = CrosswalkConfig::default();
        config.similarity.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_from_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(".crosswalk");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "[export]\nformat = \"csv\"\nterm_delimiter = \"; \"\n",
        )
        .unwrap();

        let config = load_config(Some(dir.path()), None).unwrap();
        assert_eq!(config.export.format, "csv");
        assert_eq!(config.export.term_delimiter, "; ");
        assert!(config_exists(Some(dir.path())));
    }

    #[test]
    fn test_load_config_overrides_win() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = CrosswalkConfig {
            similarity: EmbeddingConfig {
                provider: "hashing".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let config = load_config(Some(dir.path()), Some(&overrides)).unwrap();
        assert_eq!(config.similarity.provider, "hashing");
    }
}
