//! Runtime configuration, read from the environment (and `.env` via dotenv in `main`).

use std::path::PathBuf;
use std::time::Duration;

use crate::api::history::HistoryClient;
use crate::utils::errors::ConfigError;
use crate::utils::page::DEFAULT_PAGE_SIZE;

pub const ENV_API_URL: &str = "HISTORY_API_URL";
pub const ENV_PAGE_SIZE: &str = "HISTORY_PAGE_SIZE";
pub const ENV_TIMEOUT_SECS: &str = "HISTORY_TIMEOUT_SECS";
pub const ENV_EXPLORER_TABLE: &str = "EXPLORER_TABLE_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub page_size: u32,
    /// `None` means requests never time out
    pub timeout: Option<Duration>,
    pub explorer_table_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: HistoryClient::DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: None,
            explorer_table_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Config::default();

        if let Some(url) = get(ENV_API_URL) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid {
                    key: ENV_API_URL,
                    value: url,
                });
            }
            config.api_url = url;
        }

        if let Some(raw) = get(ENV_PAGE_SIZE) {
            config.page_size = match raw.parse::<u32>() {
                Ok(size) if size >= 1 => size,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: ENV_PAGE_SIZE,
                        value: raw,
                    })
                }
            };
        }

        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs = raw.parse::<u64>().map_err(|_| ConfigError::Invalid {
                key: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        config.explorer_table_path = get(ENV_EXPLORER_TABLE).map(PathBuf::from);

        Ok(config)
    }
}
