//! # rc-configs
//!
//! Layered application configuration: built-in defaults, an optional
//! `config/rusty-comments.*` file, then `RC__`-prefixed environment variables
//! (`RC__LIMITS__MAX_COMMENT_LEN=500`). A `.env` file is read first if present.

pub mod telemetry;

use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE: &str = "config/rusty-comments";
const ENV_PREFIX: &str = "RC";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub limits: LimitsConfig,
    pub comments: CommentsConfig,
    pub notifier: NotifierConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive; `RUST_LOG` wins when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Content limits, counted in characters, and the deepest accepted reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_post_len: usize,
    pub max_comment_len: usize,
    /// Root comments are at depth 1.
    pub max_reply_depth: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_post_len: 10_000,
            max_comment_len: 2_000,
            max_reply_depth: 256,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// When true, a failed post lookup does not block a new comment.
    pub allow_on_missing_post: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    pub mailbox_capacity: usize,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self { mailbox_capacity: 1 }
    }
}

impl AppConfig {
    /// Loads `.env`, the optional config file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_builder(builder)
    }

    /// Parses a TOML document on top of the defaults.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml));
        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let cfg: AppConfig = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_post_len == 0 || self.limits.max_comment_len == 0 {
            return Err(ConfigError::Invalid("content limits must be positive".into()));
        }
        if self.limits.max_reply_depth == 0 {
            return Err(ConfigError::Invalid("limits.max_reply_depth must be at least 1".into()));
        }
        if self.notifier.mailbox_capacity == 0 {
            return Err(ConfigError::Invalid("notifier.mailbox_capacity must be at least 1".into()));
        }
        Ok(())
    }
}
