mod support;

use callback_harness::error::{ConfigError, Error};
use callback_harness::infrastructure::config::delivery::DeliveryKind;
use callback_harness::infrastructure::config::settings::Config;
use callback_harness::testkit;

use support::config::write_temp_config;

#[test]
fn config_loads_every_section() {
    let (_dir, path) = write_temp_config(
        r#"
[logging]
level = "debug"
format = "json"

[wait]
timeout_ms = 1500
silence_ms = 75

[delivery]
kind = "tokio"
thread_name = "Deliveries"
"#,
    );

    let config = Config::load(&path).expect("config should load");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.wait.silence_ms, 75);
    assert_eq!(config.delivery.kind, DeliveryKind::Tokio);
    assert_eq!(config.delivery.thread_name, "Deliveries");
}

#[test]
fn config_rejects_zero_silence() {
    let (_dir, path) = write_temp_config("[wait]\nsilence_ms = 0\n");

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "wait.silence_ms",
            ..
        })
    ));
}

#[test]
fn config_reports_malformed_toml() {
    let (_dir, path) = write_temp_config("[wait\ntimeout_ms = ");

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn config_missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn load_or_default_accepts_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.delivery, Config::default().delivery);
}

#[test]
fn testkit_configs_are_valid() {
    testkit::config::fast().validate().unwrap();
    for kind in [DeliveryKind::Worker, DeliveryKind::Inline, DeliveryKind::Tokio] {
        let config = testkit::config::with_delivery(kind);
        config.validate().unwrap();
        assert_eq!(config.delivery.kind, kind);
    }
}
