// File: tests/config_tests.rs
use sprout::config::Config;
use sprout::context::{AppContext, TestContext};
use std::fs;

#[test]
fn test_missing_file_yields_defaults() {
    let ctx = TestContext::new();

    assert!(Config::load(&ctx).is_err());

    let cfg = Config::load_or_default(&ctx).unwrap();
    assert_eq!(cfg.default_watering_frequency_days, 7);
    assert_eq!(cfg.attention_limit, 3);
    assert_eq!(cfg.recent_activity_limit, 4);
    assert!(!cfg.show_completed_tasks);
}

#[test]
fn test_save_load_roundtrip() {
    let ctx = TestContext::new();
    let cfg = Config {
        default_watering_frequency_days: 10,
        attention_limit: 5,
        recent_activity_limit: 8,
        show_completed_tasks: true,
    };
    cfg.save(&ctx).unwrap();

    let loaded = Config::load(&ctx).unwrap();
    assert_eq!(loaded.default_watering_frequency_days, 10);
    assert_eq!(loaded.attention_limit, 5);
    assert_eq!(loaded.recent_activity_limit, 8);
    assert!(loaded.show_completed_tasks);
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    fs::write(&path, "attention_limit = 6\n").unwrap();

    let cfg = Config::load(&ctx).unwrap();
    assert_eq!(cfg.attention_limit, 6);
    assert_eq!(cfg.default_watering_frequency_days, 7);
}

#[test]
fn test_malformed_file_is_an_error_even_with_defaults() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    fs::write(&path, "attention_limit = [not toml").unwrap();

    assert!(Config::load(&ctx).is_err());
    // A broken file must not silently degrade to defaults.
    assert!(Config::load_or_default(&ctx).is_err());
}

#[test]
fn test_zero_frequency_is_rejected() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    fs::write(&path, "default_watering_frequency_days = 0\n").unwrap();

    let err = Config::load(&ctx).unwrap_err();
    assert!(err.to_string().contains("at least 1"));
}
