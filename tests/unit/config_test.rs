//! Unit tests for configuration loading

use media_relay::config::settings::{DEFAULT_IMAGE_ENDPOINT, DEFAULT_VIDEO_ENDPOINT};
use media_relay::config::Settings;
use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_defaults_without_any_source() {
    let settings = Settings::load_with_env("missing.toml", env(&[])).unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 3001);
    assert_eq!(settings.provider.image_endpoint, DEFAULT_IMAGE_ENDPOINT);
    assert_eq!(settings.provider.video_endpoint, DEFAULT_VIDEO_ENDPOINT);
    assert_eq!(settings.storage.output_dir, "./output");
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.logging.format, "json");
}

#[test]
fn test_missing_key_aborts() {
    let settings = Settings::load_with_env("missing.toml", env(&[])).unwrap();
    assert!(settings.validate().is_err());

    let settings = Settings::load_with_env("missing.toml", env(&[("FAL_KEY", "")])).unwrap();
    assert!(settings.validate().is_err());
}

#[test]
fn test_short_names_beat_prefixed_names() {
    let settings = Settings::load_with_env(
        "missing.toml",
        env(&[
            ("FAL_KEY", "short"),
            ("MEDIA_RELAY__PROVIDER__API_KEY", "prefixed"),
            ("HOST", "127.0.0.1"),
        ]),
    )
    .unwrap();

    assert_eq!(settings.provider.api_key(), "short");
    assert_eq!(settings.server.host, "127.0.0.1");
    assert!(settings.validate().is_ok());
}

#[test]
fn test_zero_timeout_rejected() {
    let settings = Settings::load_with_env(
        "missing.toml",
        env(&[
            ("FAL_KEY", "k"),
            ("MEDIA_RELAY__PROVIDER__IMAGE_TIMEOUT_SECS", "0"),
        ]),
    )
    .unwrap();

    assert_eq!(settings.provider.image_timeout_secs, 0);
    assert!(settings.validate().is_err());
}
