//! Environment configuration.

use std::env;
use std::path::PathBuf;

pub const AGENT_ID_ENV_VAR: &str = "ECHO_REPLY_AGENT_ID";
pub const HISTORY_DIR_ENV_VAR: &str = "ECHO_REPLY_HISTORY_DIR";
pub const HISTORY_KEY_ENV_VAR: &str = "ECHO_REPLY_HISTORY_KEY";
pub const LOG_FILTER_ENV_VAR: &str = "ECHO_REPLY_LOG";
pub const LOG_JSON_ENV_VAR: &str = "ECHO_REPLY_LOG_JSON";

pub const DEFAULT_AGENT_ID: &str = "69996a0682d9195c9e524bc5";
pub const DEFAULT_HISTORY_KEY: &str = "echoai_reply_history";
pub const DEFAULT_LOG_FILTER: &str = "warn,echo_reply=info,reply_composer=info,history_store=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub agent_id: String,
    pub history_dir: Option<PathBuf>,
    pub history_key: String,
    pub log_filter: String,
    pub log_json: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            agent_id: DEFAULT_AGENT_ID.to_string(),
            history_dir: None,
            history_key: DEFAULT_HISTORY_KEY.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_json: false,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            agent_id: env_string_opt(AGENT_ID_ENV_VAR).unwrap_or(defaults.agent_id),
            history_dir: env_string_opt(HISTORY_DIR_ENV_VAR).map(PathBuf::from),
            history_key: env_string_opt(HISTORY_KEY_ENV_VAR).unwrap_or(defaults.history_key),
            log_filter: env_string_opt(LOG_FILTER_ENV_VAR).unwrap_or(defaults.log_filter),
            log_json: env_flag(LOG_JSON_ENV_VAR),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
