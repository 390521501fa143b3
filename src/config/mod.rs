//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, DrawConfig, LogFormat, LoggingConfig, MediaConfig, ServerConfig,
};
