//! Integration tests for TOML and environment configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use wh_config::{ConfigError, WhConfig};

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/warehouse/stock.db"
mutation_timeout_ms = 250

[general]
default_limit = 10
default_actor = "alice"

[log]
level = "wh_db=debug"
"#,
        )?;

        let config: WhConfig = Figment::from(Serialized::defaults(WhConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/var/lib/warehouse/stock.db");
        assert_eq!(config.database.mutation_timeout_ms, 250);
        assert_eq!(config.general.default_limit, 10);
        assert_eq!(config.general.default_actor(), Some("alice"));
        assert_eq!(config.log.level(), Some("wh_db=debug"));
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[general]\ndefault_actor = \"bob\"\n")?;

        let config: WhConfig = Figment::from(Serialized::defaults(WhConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.default_actor, "bob");
        assert_eq!(config.general.default_limit, 50);
        assert_eq!(config.database.path, ".warehouse/warehouse.db");
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".warehouse")?;
        jail.create_file(
            ".warehouse/config.toml",
            "[database]\npath = \"project.db\"\n",
        )?;

        let config = WhConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.database.path, "project.db");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".warehouse")?;
        jail.create_file(
            ".warehouse/config.toml",
            "[database]\nmutation_timeout_ms = 100\n",
        )?;
        jail.set_env("WAREHOUSE_DATABASE__MUTATION_TIMEOUT_MS", "0");
        jail.set_env("WAREHOUSE_GENERAL__DEFAULT_ACTOR", "carol");

        let config = WhConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.database.mutation_timeout(), None);
        assert_eq!(config.general.default_actor(), Some("carol"));
        Ok(())
    });
}

#[test]
fn log_filter_env_var_is_not_a_config_key() {
    Jail::expect_with(|jail| {
        jail.set_env("WAREHOUSE_LOG", "trace");

        let config = WhConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.log.level(), None);
        Ok(())
    });
}

#[test]
fn empty_database_path_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("WAREHOUSE_DATABASE__PATH", "");

        match WhConfig::load() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "database.path"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
        Ok(())
    });
}
