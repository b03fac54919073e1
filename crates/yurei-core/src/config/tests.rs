use super::*;
use std::collections::HashMap;

fn full_env() -> HashMap<&'static str, String> {
    HashMap::from([
        (ENV_LINE_CHANNEL_SECRET, "secret".to_string()),
        (ENV_LINE_CHANNEL_ACCESS_TOKEN, "token".to_string()),
        (ENV_AZURE_OPENAI_ENDPOINT, "https://example.openai.azure.com".to_string()),
        (ENV_AZURE_OPENAI_API_KEY, "key".to_string()),
        (ENV_AZURE_OPENAI_API_VERSION, "2024-02-01".to_string()),
        (ENV_AZURE_OPENAI_MODEL, "gpt-4o".to_string()),
    ])
}

#[test]
fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.port, 8000);
    assert_eq!(cfg.broadcast.interval_hours, 10);
    assert!(cfg.broadcast.enabled);
    assert_eq!(cfg.broadcast.recipient, "U0ff87ac4e0bdf60194f7e65fa98bb31c");
    assert_eq!(cfg.line.api_base, "https://api.line.me/v2/bot");
    assert_eq!(cfg.azure_openai.timeout_secs, 60);
}

#[test]
fn test_empty_toml_uses_defaults() {
    let cfg = from_toml("").unwrap();
    assert_eq!(cfg.bot.log_level, "info");
    assert_eq!(cfg.server.port, 8000);
}

#[test]
fn test_toml_sections() {
    let toml_str = r#"
        [bot]
        log_level = "debug"

        [server]
        port = 9000

        [broadcast]
        enabled = false
        interval_hours = 2
        recipient = "Uabc"

        [azure_openai]
        model = "gpt-35-turbo"
        timeout_secs = 15
    "#;
    let cfg = from_toml(toml_str).unwrap();
    assert_eq!(cfg.bot.log_level, "debug");
    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert!(!cfg.broadcast.enabled);
    assert_eq!(cfg.broadcast.interval_hours, 2);
    assert_eq!(cfg.broadcast.recipient, "Uabc");
    assert_eq!(cfg.azure_openai.model, "gpt-35-turbo");
    assert_eq!(cfg.azure_openai.timeout_secs, 15);
}

#[test]
fn test_invalid_toml_is_config_error() {
    let err = from_toml("[server]\nport = \"not a number\"").unwrap_err();
    assert!(matches!(err, YureiError::Config(_)));
}

#[test]
fn test_env_overrides_file_values() {
    let mut cfg = from_toml("[azure_openai]\nmodel = \"from-file\"").unwrap();
    let env = full_env();
    cfg.apply_env(|k| env.get(k).cloned());
    assert_eq!(cfg.azure_openai.model, "gpt-4o");
    assert_eq!(cfg.line.channel_secret, "secret");
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_blank_env_value_ignored() {
    let mut cfg = from_toml("[line]\nchannel_secret = \"kept\"").unwrap();
    cfg.apply_env(|k| (k == ENV_LINE_CHANNEL_SECRET).then(|| "  ".to_string()));
    assert_eq!(cfg.line.channel_secret, "kept");
}

#[test]
fn test_validate_reports_missing() {
    let mut env = full_env();
    env.remove(ENV_LINE_CHANNEL_ACCESS_TOKEN);
    env.remove(ENV_AZURE_OPENAI_MODEL);

    let mut cfg = Config::default();
    cfg.apply_env(|k| env.get(k).cloned());

    assert_eq!(
        cfg.missing(),
        vec![ENV_LINE_CHANNEL_ACCESS_TOKEN, ENV_AZURE_OPENAI_MODEL]
    );
    match cfg.validate() {
        Err(YureiError::ConfigurationMissing(msg)) => {
            assert!(msg.contains("LINE_CHANNEL_ACCESS_TOKEN"));
            assert!(msg.contains("AZURE_OPENAI_MODEL"));
        }
        other => panic!("expected ConfigurationMissing, got {other:?}"),
    }
}

#[test]
fn test_load_missing_file_falls_back() {
    let path = std::env::temp_dir().join("__yurei_no_such_config__.toml");
    let _ = std::fs::remove_file(&path);
    let cfg = load(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.server.port, 8000);
}

#[test]
fn test_load_reads_file() {
    let dir = std::env::temp_dir().join(format!("__yurei_cfg_{}__", std::process::id()));
    let _ = std::fs::create_dir_all(&dir);
    let path = dir.join("config.toml");
    std::fs::write(&path, "[server]\nport = 8123\n").unwrap();

    let cfg = load(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.server.port, 8123);

    let _ = std::fs::remove_dir_all(&dir);
}
