//! `AppConfig` struct, TOML persistence and credential selection.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use cinescope_api::tmdb::{Credential, DEFAULT_LANGUAGE};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB access settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// TMDB access settings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbConfig {
    /// v3 API key (primary search transport).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// v4 read access token (fallback search transport).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Response language for catalog requests.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    String::from(DEFAULT_LANGUAGE)
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            access_token: None,
            language: default_language(),
        }
    }
}

/// Treats empty strings as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TmdbConfig {
    /// Credentials for the two search transports: `(primary, fallback)`.
    ///
    /// With both secrets configured the API key goes first and the access
    /// token second. With only one, it serves both rungs.
    ///
    /// # Errors
    ///
    /// Returns an error if neither an API key nor an access token is set.
    pub fn search_credentials(&self) -> Result<(Credential, Credential)> {
        match (&self.api_key, &self.access_token) {
            (Some(key), Some(token)) => Ok((
                Credential::ApiKey(key.clone()),
                Credential::AccessToken(token.clone()),
            )),
            (Some(key), None) => Ok((
                Credential::ApiKey(key.clone()),
                Credential::ApiKey(key.clone()),
            )),
            (None, Some(token)) => Ok((
                Credential::AccessToken(token.clone()),
                Credential::AccessToken(token.clone()),
            )),
            (None, None) => bail!(
                "TMDB credentials are required: set TMDB_API_KEY or TMDB_ACCESS_TOKEN, \
                 or run `cinescope config set-api-key`"
            ),
        }
    }

    /// Credential for plain catalog reads; prefers the access token.
    ///
    /// # Errors
    ///
    /// Returns an error if neither an API key nor an access token is set.
    pub fn catalog_credential(&self) -> Result<Credential> {
        let (primary, fallback) = self.search_credentials()?;
        Ok(match fallback {
            Credential::AccessToken(_) => fallback,
            Credential::ApiKey(_) => primary,
        })
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// Empty credential values in the file count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.tmdb.api_key = non_empty(config.tmdb.api_key.take());
        config.tmdb.access_token = non_empty(config.tmdb.access_token.take());
        Ok(config)
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Applies credential overrides (e.g. from `TMDB_API_KEY` /
    /// `TMDB_ACCESS_TOKEN`). Empty values are ignored.
    #[must_use]
    pub fn with_credential_overrides(
        mut self,
        api_key: Option<String>,
        access_token: Option<String>,
    ) -> Self {
        if let Some(key) = non_empty(api_key) {
            self.tmdb.api_key = Some(key);
        }
        if let Some(token) = non_empty(access_token) {
            self.tmdb.access_token = Some(token);
        }
        self
    }
}

/// Picks the config file location from the relevant environment values.
fn config_path_from(xdg_config_home: Option<String>, home: Option<String>) -> Result<PathBuf> {
    let base = match (non_empty(xdg_config_home), home) {
        (Some(xdg), _) => PathBuf::from(xdg),
        (None, Some(home)) => PathBuf::from(home).join(".config"),
        (None, None) => bail!("neither XDG_CONFIG_HOME nor HOME is set"),
    };
    Ok(base.join("cinescope").join("config.toml"))
}

/// Resolves the config file path.
///
/// - `{dir}/config.toml` when `dir` is given;
/// - else `$XDG_CONFIG_HOME/cinescope/config.toml`;
/// - else `~/.config/cinescope/config.toml`.
///
/// # Errors
///
/// Returns an error if no directory is given and neither `XDG_CONFIG_HOME`
/// nor `HOME` is set.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join("config.toml"));
    }
    config_path_from(
        std::env::var("XDG_CONFIG_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn config_with(api_key: Option<&str>, access_token: Option<&str>) -> TmdbConfig {
        TmdbConfig {
            api_key: api_key.map(String::from),
            access_token: access_token.map(String::from),
            ..TmdbConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.tmdb.api_key.is_none());
        assert!(config.tmdb.access_token.is_none());
        assert_eq!(config.tmdb.language, "it-IT");
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            tmdb: config_with(Some("key-123"), Some("token-456")),
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config_keeps_language_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb]\napi_key = \"abc\"\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.tmdb.api_key.as_deref(), Some("abc"));
        assert_eq!(config.tmdb.language, "it-IT");
    }

    #[test]
    fn test_load_treats_empty_credentials_as_unset() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb]\napi_key = \"\"\naccess_token = \"  \"\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert!(config.tmdb.api_key.is_none());
        assert!(config.tmdb.access_token.is_none());
        assert!(
            config
                .tmdb
                .search_credentials()
                .unwrap_err()
                .to_string()
                .contains("TMDB credentials are required")
        );
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_credential_overrides_replace_file_values() {
        // Arrange
        let config = AppConfig {
            tmdb: config_with(Some("file-key"), None),
        };

        // Act
        let config = config
            .with_credential_overrides(Some(String::from("env-key")), Some(String::new()));

        // Assert
        assert_eq!(config.tmdb.api_key.as_deref(), Some("env-key"));
        assert!(config.tmdb.access_token.is_none());
    }

    #[test]
    fn test_search_credentials_with_both() {
        // Arrange
        let config = config_with(Some("k"), Some("t"));

        // Act
        let (primary, fallback) = config.search_credentials().unwrap();

        // Assert
        assert_eq!(primary, Credential::ApiKey(String::from("k")));
        assert_eq!(fallback, Credential::AccessToken(String::from("t")));
    }

    #[test]
    fn test_search_credentials_single_secret_serves_both_rungs() {
        // Arrange
        let key_only = config_with(Some("k"), None);
        let token_only = config_with(None, Some("t"));

        // Act
        let (kp, kf) = key_only.search_credentials().unwrap();
        let (tp, tf) = token_only.search_credentials().unwrap();

        // Assert
        assert_eq!(kp, kf);
        assert_eq!(tp, Credential::AccessToken(String::from("t")));
        assert_eq!(tp, tf);
    }

    #[test]
    fn test_search_credentials_requires_a_secret() {
        // Arrange
        let config = TmdbConfig::default();

        // Act
        let result = config.search_credentials();

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("TMDB credentials are required")
        );
    }

    #[test]
    fn test_catalog_credential_prefers_access_token() {
        // Arrange
        let both = config_with(Some("k"), Some("t"));
        let key_only = config_with(Some("k"), None);

        // Act & Assert
        assert_eq!(
            both.catalog_credential().unwrap(),
            Credential::AccessToken(String::from("t"))
        );
        assert_eq!(
            key_only.catalog_credential().unwrap(),
            Credential::ApiKey(String::from("k"))
        );
    }

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/cinescope-test");

        // Act
        let path = resolve_config_path(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/cinescope-test/config.toml"));
    }

    #[test]
    fn test_config_path_prefers_xdg() {
        // Arrange & Act
        let path = config_path_from(
            Some(String::from("/xdg")),
            Some(String::from("/home/user")),
        )
        .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/xdg/cinescope/config.toml"));
    }

    #[test]
    fn test_config_path_falls_back_to_home() {
        // Arrange & Act
        let path = config_path_from(None, Some(String::from("/home/user"))).unwrap();

        // Assert
        assert_eq!(
            path,
            PathBuf::from("/home/user/.config/cinescope/config.toml")
        );
    }

    #[test]
    fn test_config_path_without_env_fails() {
        // Arrange & Act
        let result = config_path_from(None, None);

        // Assert
        assert!(result.is_err());
    }
}
