//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// How exports are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Header plus one delimited line per action.
    #[default]
    Delimited,
    /// One JSON object per action.
    Json,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Field delimiter for delimited exports.
    pub delimiter: String,
    /// Export rendition.
    pub format: ExportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: "\t".to_string(),
            format: ExportFormat::default(),
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

        // Load from environment variables (TT_*)
        figment = figment.merge(Env::prefixed("TT_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for tt.
///
/// On Linux: `~/.config/tt`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use figment::Jail;

    #[test]
    fn test_default_config_uses_tab_delimiter() {
        let config = Config::default();
        assert_eq!(config.delimiter, "\t");
        assert_eq!(config.format, ExportFormat::Delimited);
    }

    #[test]
    fn test_dirs_config_path_ends_with_tt() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "tt");
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("tt.toml", "delimiter = \";\"\nformat = \"json\"\n")?;
            let config = Config::load_from(Some(Path::new("tt.toml")))?;
            assert_eq!(config.delimiter, ";");
            assert_eq!(config.format, ExportFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("tt.toml", "delimiter = \";\"\n")?;
            jail.set_env("TT_DELIMITER", ",");
            let config = Config::load_from(Some(Path::new("tt.toml")))?;
            assert_eq!(config.delimiter, ",");
            assert_eq!(config.format, ExportFormat::Delimited);
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load_from(Some(Path::new("absent.toml")))?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }
}
