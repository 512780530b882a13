//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, AttendanceConfig, ConfigError, Environment, InvitationConfig,
    MailConfig, SnowflakeConfig,
};
