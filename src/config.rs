use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsoleConfig {
    /// Base URL of the backing service. Empty means same-origin paths.
    pub api_base_url: String,
    /// League the console session operates on.
    pub league_name: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            league_name: "league".to_string(),
        }
    }
}

pub fn config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config.json")
}

pub fn env_default(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn apply_env_defaults(mut config: ConsoleConfig) -> ConsoleConfig {
    if config.api_base_url.trim().is_empty() {
        if let Some(value) = env_default("LEAGUE_API_BASE_URL") {
            config.api_base_url = value;
        }
    }
    if config.league_name.trim().is_empty() {
        if let Some(value) = env_default("LEAGUE_NAME") {
            config.league_name = value;
        }
    }
    config
}

pub fn load_config() -> Result<ConsoleConfig, String> {
    let path = config_path();
    if !path.is_file() {
        return Ok(apply_env_defaults(ConsoleConfig::default()));
    }
    let data = fs::read_to_string(&path).map_err(|e| format!("read config {}: {e}", path.display()))?;
    let config = serde_json::from_str::<ConsoleConfig>(&data)
        .map_err(|e| format!("parse config {}: {e}", path.display()))?;
    Ok(apply_env_defaults(config))
}

pub fn save_config(config: ConsoleConfig) -> Result<ConsoleConfig, String> {
    let path = config_path();
    let payload = serde_json::to_string_pretty(&config).map_err(|e| e.to_string())?;
    fs::write(&path, payload).map_err(|e| format!("write config {}: {e}", path.display()))?;
    Ok(config)
}
