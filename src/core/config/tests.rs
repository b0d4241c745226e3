use super::data::{Config, ServerConfig, DEFAULT_ENDPOINT, DEFAULT_SERVER_PORT};
use super::io::ConfigError;
use super::keys::ConfigKey;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
    assert_eq!(config.server.port(), DEFAULT_SERVER_PORT);
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config
        .set_value(ConfigKey::Endpoint, "http://localhost:8080/chat")
        .expect("endpoint should be accepted");
    config
        .set_value(ConfigKey::ServerPort, "8080")
        .expect("port should be accepted");
    config.save_to_path(&config_path).expect("Failed to save config");

    let loaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(loaded.endpoint(), "http://localhost:8080/chat");
    assert_eq!(loaded.server.port(), 8080);
    assert_eq!(loaded.server.host(), "127.0.0.1");

    let mut loaded = loaded;
    loaded.unset_value(ConfigKey::Endpoint);
    loaded.save_to_path(&config_path).expect("Failed to save config");

    let reloaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(reloaded.endpoint, None);
    assert_eq!(reloaded.server.port, Some(8080));
}

#[test]
fn parses_server_table_from_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "endpoint = \"http://10.0.0.2:5000/chat\"\n\n[server]\nmodel = \"deepseek-reasoner\"\nsystem_prompt = \"Be brief\"\n",
    )
    .expect("write config");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(config.endpoint(), "http://10.0.0.2:5000/chat");
    assert_eq!(
        config.server,
        ServerConfig {
            model: Some("deepseek-reasoner".to_string()),
            system_prompt: Some("Be brief".to_string()),
            ..ServerConfig::default()
        }
    );
    assert_eq!(config.server.base_url(), "https://api.deepseek.com");
}

#[test]
fn invalid_toml_reports_parse_error_with_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "endpoint = [").expect("write config");

    let err = Config::load_from_path(&config_path).expect_err("parse should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse config at"));
}

#[test]
fn set_value_rejects_bad_input() {
    let mut config = Config::default();
    assert!(config.set_value(ConfigKey::ServerPort, "seventy").is_err());
    assert!(config.set_value(ConfigKey::Endpoint, "not a url").is_err());
    assert!(config.set_value(ConfigKey::ServerModel, "   ").is_err());
    assert_eq!(config, Config::default());
}

#[test]
fn config_keys_parse_case_insensitively() {
    assert_eq!(ConfigKey::parse("Server.Base-URL"), Ok(ConfigKey::ServerBaseUrl));
    let err = ConfigKey::parse("theme").expect_err("unknown key");
    assert!(err.contains("endpoint"));
}

#[test]
fn write_all_marks_defaults() {
    let config = Config {
        endpoint: Some("http://example.test/chat".to_string()),
        ..Config::default()
    };
    let mut out = Vec::new();
    config.write_all(&mut out).expect("write");
    let text = String::from_utf8(out).expect("utf8");

    assert!(text.contains("  endpoint: http://example.test/chat\n"));
    assert!(text.contains("  server.port: 5000 (default)\n"));
    assert!(text.contains("  server.model: deepseek-chat (default)\n"));
}
