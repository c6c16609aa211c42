#![deny(warnings)]
#![deny(rust_2018_idioms)]

use arrival_consumer::settings::Settings;
use config::{Config, File};

pub mod consumer;
pub mod helper;

fn settings(path: &str, environment: &str) -> Settings {
    Config::builder()
        .add_source(File::with_name(path).required(true))
        .set_override("environment", environment)
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize::<Settings>()
        .unwrap()
}

#[test]
fn test_local_settings_are_valid() {
    let settings = settings("config/local.yml", "Local");
    assert_eq!(std::time::Duration::from_secs(2 * 3600), settings.time_threshold);
    assert!(settings.input.is_none());
}

#[test]
fn test_development_settings_are_valid() {
    settings("config/development.yml", "Development");
}

#[test]
fn test_production_settings_are_valid() {
    settings("config/production.yml", "Production");
}

#[test]
fn test_test_settings_are_valid() {
    let settings = settings("config/test.yml", "Test");
    assert_eq!(4096, settings.max_line_length);
}
