//! Application configuration structs
//!
//! Loads configuration from environment variables (with `.env` support).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub invitations: InvitationConfig,
    pub attendance: AttendanceConfig,
    pub mail: MailConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Invitation settings
#[derive(Debug, Clone, Deserialize)]
pub struct InvitationConfig {
    /// Seconds an issued invitation stays valid
    #[serde(default = "default_invite_ttl")]
    pub ttl_secs: i64,
    /// Base URL the join link is built from
    #[serde(default = "default_join_base_url")]
    pub join_base_url: String,
}

/// Attendance timer settings
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceConfig {
    /// Tick cadence for worked-time accrual, in seconds
    #[serde(default = "default_tick_interval")]
    pub tick_interval_secs: u64,
}

/// Outbound mail settings
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_mail_from")]
    pub from_address: String,
    /// When false, invitation mails are skipped and only the join link is
    /// surfaced
    #[serde(default = "default_mail_enabled")]
    pub enabled: bool,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "huddle".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_invite_ttl() -> i64 {
    604_800 // 7 days
}

fn default_join_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_tick_interval() -> u64 {
    1
}

fn default_mail_from() -> String {
    "noreply@huddle.local".to_string()
}

fn default_mail_enabled() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Every value has a sensible default; the engine runs with an empty
    /// environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            invitations: InvitationConfig {
                ttl_secs: env::var("INVITE_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|ttl| *ttl > 0)
                    .unwrap_or_else(default_invite_ttl),
                join_base_url: env::var("INVITE_JOIN_BASE_URL")
                    .unwrap_or_else(|_| default_join_base_url()),
            },
            attendance: AttendanceConfig {
                tick_interval_secs: env::var("ATTENDANCE_TICK_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or_else(default_tick_interval),
            },
            mail: MailConfig {
                from_address: env::var("MAIL_FROM").unwrap_or_else(|_| default_mail_from()),
                enabled: env::var("MAIL_ENABLED")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_mail_enabled),
            },
            snowflake: SnowflakeConfig {
                worker_id: env::var("WORKER_ID")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0),
            },
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: default_env(),
            },
            invitations: InvitationConfig {
                ttl_secs: default_invite_ttl(),
                join_base_url: default_join_base_url(),
            },
            attendance: AttendanceConfig {
                tick_interval_secs: default_tick_interval(),
            },
            mail: MailConfig {
                from_address: default_mail_from(),
                enabled: default_mail_enabled(),
            },
            snowflake: SnowflakeConfig { worker_id: 0 },
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
