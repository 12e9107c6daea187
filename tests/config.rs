use electricity_cost_calculator::config::{self, Config, ConfigError};
use std::path::PathBuf;

#[test]
fn empty_file_uses_defaults() {
    let cfg = Config::from_toml_str("").expect("empty config");
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.tariff.rate_per_unit, 6.0);
    assert_eq!(cfg.tariff.currency_symbol, "₹");
    assert_eq!(cfg.interface.quick_hours, vec![1.0, 2.0, 5.0, 10.0]);
    assert_eq!(cfg.devices.len(), 8);
}

#[test]
fn partial_tables_keep_other_defaults() {
    let cfg = Config::from_toml_str(
        r#"
[tariff]
rate_per_unit = 0.15
currency_code = "USD"
currency_symbol = "$"

[[devices]]
name = "Kettle"
watts = 1800.0

[[devices]]
name = "Laptop"
watts = 65.0
icon = "💻"
"#,
    )
    .expect("config");
    assert_eq!(cfg.tariff.rate_per_unit, 0.15);
    assert_eq!(cfg.tariff.currency_code, "USD");
    assert_eq!(cfg.interface.splash_duration_ms, 2000);
    assert_eq!(cfg.devices.len(), 2);
    assert_eq!(cfg.devices[0].icon, "🔌");
    assert_eq!(cfg.devices[1].icon, "💻");
}

#[test]
fn invalid_values_are_rejected() {
    let negative_rate = "[tariff]\nrate_per_unit = -1.0\n";
    assert!(matches!(
        Config::from_toml_str(negative_rate),
        Err(ConfigError::Invalid(_))
    ));

    let zero_watts = "[[devices]]\nname = \"Ghost\"\nwatts = 0.0\n";
    assert!(matches!(
        Config::from_toml_str(zero_watts),
        Err(ConfigError::Invalid(_))
    ));

    let duplicate = "[[devices]]\nname = \"Fan\"\nwatts = 75.0\n\n[[devices]]\nname = \"fan\"\nwatts = 60.0\n";
    assert!(matches!(
        Config::from_toml_str(duplicate),
        Err(ConfigError::Invalid(_))
    ));

    let long_day = "[interface]\nquick_hours = [1.0, 30.0]\n";
    assert!(matches!(
        Config::from_toml_str(long_day),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    assert!(matches!(
        Config::from_toml_str("[tariff\nrate_per_unit = 6"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn printed_config_reads_back() {
    let text = Config::default().to_toml_string().expect("serialize");
    assert!(text.contains("rate_per_unit = 6.0"), "{text}");
    let back = Config::from_toml_str(&text).expect("parse back");
    assert_eq!(back, Config::default());
}

#[test]
fn missing_file_falls_back_without_creating_it() {
    let path: PathBuf = std::env::temp_dir().join(format!(
        "electricity_cost_missing_{}.toml",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    let cfg = config::load_or_default(Some(&path)).expect("defaults");
    assert_eq!(cfg, Config::default());
    assert!(!path.exists());
}

#[test]
fn existing_file_is_loaded() {
    let path: PathBuf = std::env::temp_dir().join(format!(
        "electricity_cost_present_{}.toml",
        std::process::id()
    ));
    std::fs::write(&path, "[tariff]\nrate_per_unit = 9.5\n").expect("write temp config");
    let cfg = config::load_or_default(Some(&path)).expect("load");
    assert_eq!(cfg.tariff.rate_per_unit, 9.5);
    let _ = std::fs::remove_file(&path);
}
