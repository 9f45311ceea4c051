use gacha_ev::config::Config;
use gacha_ev::preferences::Theme;

#[test]
fn parse_full_toml() {
    let toml_str = r#"
[api]
base_url = "https://api.example.com/v1"
timeout_ms = 2500

[report]
tiers = ["Starter", "Premium", "Starter"]

[server]
bind_addr = "0.0.0.0:9090"

[ui]
refresh_rate_ms = 100
default_theme = "light"

[preferences]
path = "/tmp/prefs.json"

[logging]
level = "debug"
"#;
    let config = Config::load_from_str(toml_str).unwrap();
    assert_eq!(config.api.base_url, "https://api.example.com/v1");
    assert_eq!(config.api.timeout().as_millis(), 2500);
    assert_eq!(
        config.report.report_tiers(),
        vec!["Starter".to_string(), "Premium".to_string()]
    );
    assert_eq!(config.server.socket_addr().unwrap().port(), 9090);
    assert_eq!(config.ui.default_theme, Theme::Light);
    assert_eq!(config.preferences.path.to_str(), Some("/tmp/prefs.json"));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn shipped_default_config_is_valid() {
    let toml_str = include_str!("../config/default.toml");
    let config = Config::load_from_str(toml_str).unwrap();
    assert_eq!(config.report.report_tiers().len(), 2);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(Config::load_from_str("[api]\nbase_url = \"\"\n").is_err());
    assert!(Config::load_from_str("[api]\nbase_url = \"http://x\"\ntimeout_ms = 0\n").is_err());
    assert!(Config::load_from_str(
        "[api]\nbase_url = \"http://x\"\n[server]\nbind_addr = \"nowhere\"\n"
    )
    .is_err());
    assert!(Config::load_from_str("[logging]\nlevel = \"info\"\n").is_err());
}
