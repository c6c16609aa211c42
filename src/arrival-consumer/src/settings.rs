use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::Deserialize;
use strum::{AsRefStr, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum Environment {
    Local,
    Development,
    Production,
    Test,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub log_level: LogLevel,
    pub environment: Environment,
    /// Reads from stdin when unset.
    pub input: Option<PathBuf>,
    pub max_line_length: usize,
    #[serde(with = "humantime_serde")]
    pub time_threshold: std::time::Duration,
}

impl Settings {
    pub fn new() -> Result<Settings, ConfigError> {
        let environment: Environment = match std::env::var("APP_ENVIRONMENT") {
            Ok(v) => v.parse().map_err(|_| {
                ConfigError::Message(format!("invalid APP_ENVIRONMENT '{v}'"))
            })?,
            Err(_) => Environment::Local,
        };

        let config = Config::builder()
            .add_source(
                File::with_name(&format!("config/{}", environment.as_ref().to_lowercase()))
                    .required(true),
            )
            .add_source(config::Environment::with_prefix("ARRIVAL_CONSUMER").separator("__"))
            .set_override("environment", environment.as_ref())?
            .build()?;

        config.try_deserialize()
    }
}
