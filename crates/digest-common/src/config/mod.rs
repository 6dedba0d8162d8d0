//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CounterConfig, DatabaseConfig, DigestConfig, Environment,
    LogFormat, ServerConfig,
};
