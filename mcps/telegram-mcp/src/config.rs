//! Configuration loading for telegram-mcp
//!
//! Configuration is resolved once at startup, from lowest to highest priority:
//! 1. Defaults (`telegram.session`, open allowlist)
//! 2. TOML file: `TELEGRAM_MCP_CONFIG_PATH`, `~/.binks/telegram.toml`, or `./telegram-mcp.toml`
//! 3. `.env.local` in the working directory (never overrides the real environment)
//! 4. Environment variables `TELEGRAM_API_ID`, `TELEGRAM_API_HASH`,
//!    `TELEGRAM_SESSION_PATH`, `ALLOWLIST_SOURCES`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::policy::Allowlist;
use crate::types::ConfigError;

pub const ENV_FILE: &str = ".env.local";

const API_ID_VAR: &str = "TELEGRAM_API_ID";
const API_HASH_VAR: &str = "TELEGRAM_API_HASH";
const SESSION_PATH_VAR: &str = "TELEGRAM_SESSION_PATH";
const ALLOWLIST_VAR: &str = "ALLOWLIST_SOURCES";
const CONFIG_PATH_VAR: &str = "TELEGRAM_MCP_CONFIG_PATH";

/// Resolved, immutable process configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_id: i32,
    pub api_hash: String,
    pub session_path: PathBuf,
    pub allowlist: Allowlist,
}

/// Optional on-disk configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub telegram: TelegramSection,
    #[serde(default)]
    pub allowlist: AllowlistSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramSection {
    pub api_id: Option<i32>,
    pub api_hash: Option<String>,
    pub session_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllowlistSection {
    #[serde(default)]
    pub sources: Vec<String>,
}

fn default_session_path() -> PathBuf {
    PathBuf::from("telegram.session")
}

impl Config {
    /// Load configuration from the env file, config file and environment
    pub fn load() -> Result<Self, ConfigError> {
        load_env_file(Path::new(ENV_FILE))?;
        let file = FileConfig::load()?;
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge a config file with variables from `env`
    pub fn resolve<F>(file: Option<FileConfig>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();
        let non_empty = |key: &str| env(key).filter(|value| !value.is_empty());

        let api_id_raw = non_empty(API_ID_VAR)
            .or_else(|| file.telegram.api_id.map(|id| id.to_string()));
        let api_hash = non_empty(API_HASH_VAR)
            .or_else(|| file.telegram.api_hash.clone().filter(|hash| !hash.is_empty()));

        let mut missing = Vec::new();
        if api_id_raw.is_none() {
            missing.push(API_ID_VAR);
        }
        if api_hash.is_none() {
            missing.push(API_HASH_VAR);
        }

        let (Some(api_id_raw), Some(api_hash)) = (api_id_raw, api_hash) else {
            return Err(ConfigError::MissingVars(missing));
        };

        let api_id = api_id_raw
            .trim()
            .parse::<i32>()
            .map_err(|_| ConfigError::InvalidApiId(api_id_raw.clone()))?;

        let session_path = non_empty(SESSION_PATH_VAR)
            .map(PathBuf::from)
            .or(file.telegram.session_path)
            .unwrap_or_else(default_session_path);

        // A variable that is set, even to "", replaces the file's list.
        let allowlist = match env(ALLOWLIST_VAR) {
            Some(csv) => Allowlist::parse_csv(&csv),
            None => Allowlist::new(
                file.allowlist
                    .sources
                    .iter()
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        };

        Ok(Self {
            api_id,
            api_hash,
            session_path,
            allowlist,
        })
    }
}

impl FileConfig {
    /// Load the first config file found, or `None`
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match Self::find_config_path() {
            Some(path) => Self::from_path(&path).map(Some),
            None => Ok(None),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn find_config_path() -> Option<PathBuf> {
        // 1. Explicit path
        if let Ok(env_path) = std::env::var(CONFIG_PATH_VAR) {
            let path = PathBuf::from(&env_path);
            if path.exists() {
                return Some(path);
            }
            tracing::warn!("{}={} does not exist", CONFIG_PATH_VAR, env_path);
        }

        // 2. ~/.binks/telegram.toml (project convention)
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".binks").join("telegram.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. ./telegram-mcp.toml (local override)
        let local = PathBuf::from("telegram-mcp.toml");
        local.exists().then_some(local)
    }
}

/// Read `path` as an env file and export keys not already set
pub fn load_env_file(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Ok(());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::EnvFile {
        path: path.to_path_buf(),
        source,
    })?;

    for (key, value) in parse_env_file(&content) {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(&key, value);
        }
    }
    tracing::debug!("Loaded env file {}", path.display());
    Ok(())
}

/// Parse `KEY=VALUE` lines; first occurrence wins
pub fn parse_env_file(content: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() || pairs.iter().any(|(existing, _)| existing == key) {
            continue;
        }
        pairs.push((key.to_string(), unquote(value.trim()).to_string()));
    }

    pairs
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
