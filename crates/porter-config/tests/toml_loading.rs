//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use porter_config::PorterConfig;

#[test]
fn loads_api_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://api.maple-court.example"
timeout_secs = 30
user_agent = "porter-test"
"#,
        )?;

        let config: PorterConfig = Figment::from(Serialized::defaults(PorterConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.base_url, "https://api.maple-court.example");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.user_agent, "porter-test");
        assert!(config.api.validate().is_ok());
        Ok(())
    });
}

#[test]
fn loads_general_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[general]
example_mode = true
default_building_id = 42
default_limit = 5
",
        )?;

        let config: PorterConfig = Figment::from(Serialized::defaults(PorterConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.general.example_mode);
        assert_eq!(config.general.default_building_id, Some(42));
        assert_eq!(config.general.default_limit, 5);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".porter")?;
        jail.create_file(
            ".porter/config.toml",
            r#"
[auth]
session_file = "session-under-test.json"
file_only = true
"#,
        )?;

        let config = PorterConfig::load().expect("config loads");
        assert_eq!(
            config.auth.session_file.as_deref(),
            Some("session-under-test.json")
        );
        assert!(config.auth.file_only);
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "http://127.0.0.1:9000"
"#,
        )?;

        let config: PorterConfig = Figment::from(Serialized::defaults(PorterConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.timeout_secs, 15);
        assert!(!config.general.example_mode);
        Ok(())
    });
}

#[test]
fn invalid_base_url_fails_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".porter")?;
        jail.create_file(
            ".porter/config.toml",
            r#"
[api]
base_url = "localhost:8080"
"#,
        )?;

        let err = PorterConfig::load().expect_err("should reject base url");
        assert!(err.to_string().contains("api.base_url"));
        Ok(())
    });
}
