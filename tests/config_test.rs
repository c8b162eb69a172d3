use chartboard::config::{AppConfig, ConfigManager, Theme};
use chartboard::Args;
use std::fs;
use tempfile::TempDir;

// Helper to create a temporary config directory for testing
fn setup_test_config_dir() -> (TempDir, ConfigManager) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_manager = ConfigManager::with_dir(temp_dir.path().to_path_buf());
    (temp_dir, config_manager)
}

#[test]
fn test_default_config() {
    let config = AppConfig::default();

    assert_eq!(config.version, "0.1");
    assert!(config.dataset.path.is_none());

    assert_eq!(config.display.charts_per_row, 2);
    assert_eq!(config.display.chart_height, 14);
    assert!(config.display.show_legend);

    assert_eq!(config.performance.event_poll_interval_ms, 25);

    assert_eq!(config.theme.color_mode, "auto");
    assert_eq!(config.theme.colors.primary, "cyan");
    assert_eq!(config.theme.colors.controls_bg, "indexed(236)");
    assert_eq!(config.theme.colors.chart_series, "#ff6384");

    assert_eq!(config.logging.level, "info");
    assert!(config.logging.file.is_none());
    assert!(!config.debug.enabled);
}

#[test]
fn test_default_config_validates() {
    assert!(AppConfig::default().validate().is_ok());
}

#[test]
fn test_template_parses_to_defaults() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    let template = config_manager.generate_default_config();
    let parsed: AppConfig = toml::from_str(&template).expect("template should parse");

    let defaults = AppConfig::default();
    assert_eq!(parsed.version, defaults.version);
    assert_eq!(parsed.display.charts_per_row, defaults.display.charts_per_row);
    assert_eq!(parsed.display.chart_height, defaults.display.chart_height);
    assert_eq!(
        parsed.performance.event_poll_interval_ms,
        defaults.performance.event_poll_interval_ms
    );
    assert_eq!(parsed.theme.colors.primary, defaults.theme.colors.primary);
    assert_eq!(parsed.logging.level, defaults.logging.level);
}

#[test]
fn test_write_default_config() {
    let (_temp_dir, config_manager) = setup_test_config_dir();

    let path = config_manager
        .write_default_config(false)
        .expect("Failed to write config");
    assert!(path.exists());
    assert_eq!(path, config_manager.config_path("config.toml"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("[display]"));
    assert!(content.contains("[theme.colors]"));
}

#[test]
fn test_write_default_config_refuses_overwrite_without_force() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    let path = config_manager.config_path("config.toml");
    fs::write(&path, "# my settings\n").unwrap();

    let err = config_manager.write_default_config(false).unwrap_err();
    assert!(err.to_string().contains("--force"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "# my settings\n");

    config_manager
        .write_default_config(true)
        .expect("force should overwrite");
    assert!(fs::read_to_string(&path).unwrap().contains("[display]"));
}

#[test]
fn test_write_default_config_creates_missing_dir() {
    let temp_dir = TempDir::new().unwrap();
    let config_manager = ConfigManager::with_dir(temp_dir.path().join("nested").join("chartboard"));

    let path = config_manager.write_default_config(false).unwrap();
    assert!(path.exists());
    assert!(config_manager.config_dir().is_dir());
}

#[test]
fn test_load_without_file_uses_defaults() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    let config = AppConfig::load_from(&config_manager).unwrap();
    assert_eq!(config.display.charts_per_row, 2);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_load_partial_user_config() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    fs::write(
        config_manager.config_path("config.toml"),
        r##"
[display]
charts_per_row = 3

[theme.colors]
primary = "#00ff00"

[logging]
level = "debug"
"##,
    )
    .unwrap();

    let config = AppConfig::load_from(&config_manager).unwrap();
    assert_eq!(config.display.charts_per_row, 3);
    // Untouched settings keep their defaults
    assert_eq!(config.display.chart_height, 14);
    assert_eq!(config.theme.colors.primary, "#00ff00");
    assert_eq!(config.theme.colors.error, "red");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_load_invalid_toml_reports_path() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    fs::write(config_manager.config_path("config.toml"), "[display\n").unwrap();

    let err = AppConfig::load_from(&config_manager).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_load_rejects_invalid_values() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    fs::write(
        config_manager.config_path("config.toml"),
        "[display]\ncharts_per_row = 0\n",
    )
    .unwrap();

    assert!(AppConfig::load_from(&config_manager).is_err());
}

#[test]
fn test_merge_prefers_non_default_values() {
    let mut base = AppConfig::default();
    base.display.chart_height = 20;

    let mut other = AppConfig::default();
    other.display.charts_per_row = 4;
    other.dataset.path = Some("sales.json".into());

    base.merge(other);
    assert_eq!(base.display.charts_per_row, 4);
    // Default values in `other` do not reset what `base` already has
    assert_eq!(base.display.chart_height, 20);
    assert_eq!(
        base.dataset.path.as_deref(),
        Some(std::path::Path::new("sales.json"))
    );
}

#[test]
fn test_apply_args_overrides_config() {
    let mut config = AppConfig::default();
    config.logging.level = "warn".to_string();

    let args = Args {
        charts_per_row: Some(1),
        log_level: Some("trace".to_string()),
        log_file: Some("/tmp/chartboard.log".into()),
        debug: true,
        ..Default::default()
    };
    config.apply_args(&args);

    assert_eq!(config.display.charts_per_row, 1);
    assert_eq!(config.logging.level, "trace");
    assert!(config.logging.file.is_some());
    assert!(config.debug.enabled);
}

#[test]
fn test_validation_failures() {
    let mut config = AppConfig::default();
    config.version = "2.0".to_string();
    assert!(config
        .validate()
        .unwrap_err()
        .to_string()
        .contains("Unsupported config version"));

    let mut config = AppConfig::default();
    config.display.chart_height = 3;
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.performance.event_poll_interval_ms = 0;
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.theme.color_mode = "sepia".to_string();
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.logging.level = "chartboard=loud".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_invalid_color_is_rejected() {
    if std::env::var("NO_COLOR").is_ok() {
        // every color parses to Reset under NO_COLOR
        return;
    }
    let mut config = AppConfig::default();
    config.theme.colors.chart_series = "not-a-color".to_string();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("chart_series"));
    assert!(Theme::from_config(&config.theme).is_err());
}

#[test]
fn test_theme_has_every_configured_color() {
    let config = AppConfig::default();
    let theme = Theme::from_config(&config.theme).unwrap();
    for (name, _) in config.theme.colors.entries() {
        assert!(theme.colors.contains_key(name), "missing {}", name);
    }
    assert_eq!(theme.get("no_such_color"), ratatui::style::Color::Reset);
}
