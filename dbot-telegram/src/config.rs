//! Framework config: token, API URL, log path, database, admins, per-command settings.
//! Loaded from environment variables (BOT_TOKEN, TELEGRAM_API_URL, LOG_FILE, DATABASE_URL,
//! ADMIN_USER_IDS, BOT_USERNAME, COMMAND_CONFIG_FILE, POLL_TIMEOUT_SECS).

use std::collections::HashMap;
use std::env;

use anyhow::{Context, Result};
use dbot_command::CommandConfig;
use serde_json::Value;

/// Bot API base URL used when TELEGRAM_API_URL is not set.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Runtime configuration of the bot process.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL; points requests at a mock server in tests.
    pub telegram_api_url: Option<String>,
    pub log_file: String,
    /// Enables persistence when set (SQLite file path or `sqlite:` URL).
    pub database_url: Option<String>,
    pub admin_user_ids: Vec<i64>,
    /// Known username; otherwise learned from getMe at startup.
    pub bot_username: Option<String>,
    /// JSON file mapping command name to its config object.
    pub command_config_file: Option<String>,
    pub poll_timeout_secs: u32,
}

impl TelegramConfig {
    /// Loads from environment variables. `token` overrides BOT_TOKEN when given.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/dbot.log".to_string());
        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        let admin_user_ids = match env::var("ADMIN_USER_IDS") {
            Ok(raw) => parse_admin_ids(&raw)?,
            Err(_) => Vec::new(),
        };
        let bot_username = env::var("BOT_USERNAME").ok().filter(|s| !s.is_empty());
        let command_config_file = env::var("COMMAND_CONFIG_FILE").ok().filter(|s| !s.is_empty());
        let poll_timeout_secs = env::var("POLL_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            database_url,
            admin_user_ids,
            bot_username,
            command_config_file,
            poll_timeout_secs,
        })
    }

    /// Uses the given token; everything else at defaults.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: "logs/dbot.log".to_string(),
            database_url: None,
            admin_user_ids: Vec::new(),
            bot_username: None,
            command_config_file: None,
            poll_timeout_secs: 30,
        }
    }

    /// Validates config (telegram_api_url must be a valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }

    pub fn api_url(&self) -> &str {
        self.telegram_api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Reads COMMAND_CONFIG_FILE: `{"start": {"greeting": "..."}, ...}`. Empty when unset.
    pub fn load_command_config(&self) -> Result<HashMap<String, CommandConfig>> {
        let Some(path) = &self.command_config_file else {
            return Ok(HashMap::new());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read command config file {}", path))?;
        parse_command_config(&raw).with_context(|| format!("Invalid command config file {}", path))
    }
}

fn parse_admin_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("ADMIN_USER_IDS contains a non-numeric id: {}", s))
        })
        .collect()
}

fn parse_command_config(raw: &str) -> Result<HashMap<String, CommandConfig>> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(commands) = value else {
        anyhow::bail!("expected a JSON object keyed by command name");
    };
    commands
        .into_iter()
        .map(|(name, config)| match config {
            Value::Object(config) => Ok((name.to_lowercase(), config)),
            _ => anyhow::bail!("config of command {} must be a JSON object", name),
        })
        .collect()
}
