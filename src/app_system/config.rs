use std::{env, fmt::Display, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

use crate::concierge::Language;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Without a key the concierge runs on canned replies.
    pub api_key: Option<String>,
    pub chat_model: String,
    pub image_model: String,
    pub auto_confirm_delay: Duration,
    pub actor_buffer: usize,
    pub language: Language,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            chat_model: "gemini-2.5-flash".to_string(),
            image_model: "imagen-3.0-generate-002".to_string(),
            auto_confirm_delay: Duration::from_millis(2000),
            actor_buffer: 32,
            language: Language::English,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let actor_buffer: usize = try_load("ACTOR_BUFFER", "32")?;
        if actor_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "ACTOR_BUFFER",
                value: "0".to_string(),
                reason: "channel capacity must be positive".to_string(),
            });
        }

        Ok(Self {
            api_key: api_key(),
            chat_model: try_load("CHAT_MODEL", &defaults.chat_model)?,
            image_model: try_load("IMAGE_MODEL", &defaults.image_model)?,
            auto_confirm_delay: Duration::from_millis(try_load("AUTO_CONFIRM_MS", "2000")?),
            actor_buffer,
            language: try_load("LANGUAGE", "en")?,
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn api_key() -> Option<String> {
    let key = var("GEMINI_API_KEY").or_else(|| var("API_KEY"));
    if key.is_none() {
        warn!("GEMINI_API_KEY not set, AI concierge disabled");
    }
    key
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: value.clone(),
            reason: e.to_string(),
        }
    })
}
