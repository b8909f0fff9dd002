use mhs_kernel::config::{ConfigError, load_config_with_env};
use mhs_kernel::domain::config::ApiConfig;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
    Some(pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect())
}

#[test]
fn missing_file_falls_back_to_defaults() -> Result<(), ConfigError> {
    let dir = tempfile::tempdir().expect("tempdir");

    let cfg: ApiConfig = load_config_with_env(Some(dir.path().join("absent")), env(&[]))?;

    assert_eq!(cfg.server.port, 8000);
    assert_eq!(cfg.storage.static_dir, PathBuf::from("static"));
    assert_eq!(cfg.logging.level, "info");
    Ok(())
}

#[test]
fn file_values_are_loaded() -> Result<(), ConfigError> {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("server.toml"),
        "[server]\nport = 9100\n\n[storage]\nstatic_dir = \"public\"\n\n[logging]\nlevel = \"debug\"\n",
    )
    .expect("write config");

    let cfg: ApiConfig = load_config_with_env(Some(dir.path().join("server")), env(&[]))?;

    assert_eq!(cfg.server.port, 9100);
    assert_eq!(cfg.storage.static_dir, PathBuf::from("public"));
    assert_eq!(cfg.logging.level, "debug");
    Ok(())
}

#[test]
fn environment_overrides_the_file() -> Result<(), ConfigError> {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("server.toml"), "[server]\nport = 9100\n").expect("write config");

    let cfg: ApiConfig = load_config_with_env(
        Some(dir.path().join("server")),
        env(&[("MHS__SERVER__PORT", "9200"), ("MHS__STORAGE__STATIC_DIR", "/srv/static")]),
    )?;

    assert_eq!(cfg.server.port, 9200);
    assert_eq!(cfg.storage.static_dir, PathBuf::from("/srv/static"));
    Ok(())
}

#[test]
fn malformed_file_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("server.toml"), "[server\nport = ").expect("write config");

    let err = load_config_with_env::<ApiConfig>(Some(dir.path().join("server")), env(&[]))
        .expect_err("parse failure");

    assert!(err.to_string().contains("Failed to build config"));
}

#[test]
fn environment_values_are_parsed_into_typed_fields() -> Result<(), ConfigError> {
    let dir = tempfile::tempdir().expect("tempdir");

    let cfg: ApiConfig = load_config_with_env(
        Some(dir.path().join("absent")),
        env(&[
            ("MHS__SERVER__ADDRESS", "127.0.0.1"),
            ("MHS__SERVER__PORT", "8080"),
            ("MHS__LOGGING__JSON", "true"),
            ("MHS__LOGGING__FILTER", "tower_http=debug"),
        ]),
    )?;

    assert!(cfg.server.address.is_loopback());
    assert_eq!(cfg.server.port, 8080);
    assert!(cfg.logging.json);
    assert_eq!(cfg.logging.filter.as_deref(), Some("tower_http=debug"));
    assert_eq!(cfg.logging.level, "info");
    Ok(())
}
