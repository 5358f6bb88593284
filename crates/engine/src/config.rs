// Local configuration for CollabWrite.
//
// Global config: `~/.collabwrite/config.toml` (or `$COLLABWRITE_CONFIG`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use collabwrite_common::types::PageLayout;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "COLLABWRITE_CONFIG";

/// Root directory for CollabWrite global state: `~/.collabwrite/`.
pub fn global_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".collabwrite"))
}

/// Path to the global config file, honoring `$COLLABWRITE_CONFIG`.
pub fn global_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    global_dir().map(|d| d.join("config.toml"))
}

/// Default location of the local storage database.
pub fn default_storage_path() -> Option<PathBuf> {
    global_dir().map(|d| d.join("local-storage.db"))
}

// ── Global config ──────────────────────────────────────────────────

/// Global configuration at `~/.collabwrite/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Override for the local storage database file.
    pub storage_path: Option<PathBuf>,
    /// Suggestion service settings.
    pub ai: AiConfig,
    /// Editor defaults.
    pub editor: EditorConfig,
}

impl GlobalConfig {
    /// Load from the global config path. Returns defaults if the file
    /// doesn't exist or can't be parsed.
    pub fn load() -> Self {
        global_config_path().and_then(|p| Self::load_from(&p).ok()).unwrap_or_default()
    }

    /// Load from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        config.ai.validate()?;
        Ok(config)
    }

    /// Save to a specific path (creates parent directories).
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }

    /// Resolved storage database path.
    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage_path.clone().or_else(default_storage_path)
    }
}

/// Suggestion service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AiConfig {
    /// Base URL of an Anthropic-compatible Messages API.
    pub endpoint: String,
    /// Model to use (e.g. `claude-3-5-haiku-latest`).
    pub model: String,
    pub max_tokens: u32,
    /// API keys are never stored in config files; this names the
    /// environment variable that holds it.
    pub api_key_env: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.anthropic.com".into(),
            model: "claude-3-5-haiku-latest".into(),
            max_tokens: 1024,
            api_key_env: "COLLABWRITE_API_KEY".into(),
        }
    }
}

impl AiConfig {
    /// Parsed endpoint; must be an absolute http(s) URL.
    pub fn endpoint_url(&self) -> Result<url::Url, ConfigError> {
        let parsed = url::Url::parse(&self.endpoint)
            .map_err(|error| ConfigError::InvalidEndpoint(format!("{}: {error}", self.endpoint)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            other => Err(ConfigError::InvalidEndpoint(format!(
                "{}: unsupported scheme `{other}`",
                self.endpoint
            ))),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint_url().map(|_| ())
    }
}

/// Editor defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct EditorConfig {
    /// Page layout new document sessions start with.
    pub default_layout: PageLayout,
}

// ── Errors ─────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    InvalidEndpoint(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Parse(e) => write!(f, "config parse error: {e}"),
            Self::Serialize(e) => write!(f, "config serialize error: {e}"),
            Self::InvalidEndpoint(e) => write!(f, "invalid suggestion endpoint: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn global_config_defaults() {
        let cfg = GlobalConfig::default();
        assert!(cfg.storage_path.is_none());
        assert_eq!(cfg.ai.endpoint, "https://api.anthropic.com");
        assert_eq!(cfg.ai.api_key_env, "COLLABWRITE_API_KEY");
        assert_eq!(cfg.ai.max_tokens, 1024);
        assert_eq!(cfg.editor.default_layout, PageLayout::Auto);
    }

    #[test]
    fn global_config_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = GlobalConfig {
            storage_path: Some(dir.path().join("store.db")),
            ai: AiConfig {
                endpoint: "http://localhost:8080".into(),
                model: "local-model".into(),
                max_tokens: 256,
                api_key_env: "LOCAL_KEY".into(),
            },
            editor: EditorConfig { default_layout: PageLayout::A4 },
        };
        cfg.save_to(&path).unwrap();
        let loaded = GlobalConfig::load_from(&path).unwrap();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn global_config_parse_from_toml() {
        let toml_str = r#"
storage_path = "/tmp/collabwrite.db"

[ai]
model = "claude-3-5-sonnet-latest"

[editor]
default_layout = "A5"
"#;
        let cfg: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.storage_path, Some(PathBuf::from("/tmp/collabwrite.db")));
        assert_eq!(cfg.ai.model, "claude-3-5-sonnet-latest");
        assert_eq!(cfg.ai.endpoint, "https://api.anthropic.com");
        assert_eq!(cfg.editor.default_layout, PageLayout::A5);
    }

    #[test]
    fn global_config_rejects_plaintext_api_key() {
        let toml_str = r#"
[ai]
api_key = "sk-prod"
"#;
        let error = toml::from_str::<GlobalConfig>(toml_str).expect_err("parse should fail");
        assert!(error.to_string().contains("unknown field `api_key`"));
    }

    #[test]
    fn global_config_missing_fields_use_defaults() {
        let cfg: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, GlobalConfig::default());
    }

    #[test]
    fn global_config_load_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = GlobalConfig::load_from(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_rejects_non_http_endpoint() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ai]\nendpoint = \"ftp://example.com\"\n").unwrap();
        let result = GlobalConfig::load_from(&path);
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint(_))));
    }

    #[test]
    fn storage_path_override_wins() {
        let cfg = GlobalConfig {
            storage_path: Some(PathBuf::from("/data/x.db")),
            ..GlobalConfig::default()
        };
        assert_eq!(cfg.storage_path(), Some(PathBuf::from("/data/x.db")));
    }

    #[test]
    fn global_config_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deep").join("nested").join("config.toml");

        GlobalConfig::default().save_to(&path).unwrap();
        assert!(path.exists());
    }
}
