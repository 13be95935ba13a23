use std::fs;
use std::path::PathBuf;

use apk_factory::config::{get_config, FactoryConfig};
use apk_factory::error::Error;
use tempfile::TempDir;

#[test]
fn test_defaults_without_config_file() {
    let temp = TempDir::new().unwrap();
    assert_eq!(get_config(temp.path(), None).unwrap(), FactoryConfig::default());
}

#[test]
fn test_json_file_preferred_over_yaml() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("apk-factory.json"), r#"{"key_dir": "json-keys"}"#).unwrap();
    fs::write(temp.path().join("apk-factory.yml"), "key_dir: yaml-keys\n").unwrap();

    let config = get_config(temp.path(), None).unwrap();
    assert_eq!(config.key_dir, PathBuf::from("json-keys"));
}

#[test]
fn test_yaml_file_discovered() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("apk-factory.yaml"),
        "package_extension: aab\nsigning:\n  store_password: s3cret\n",
    )
    .unwrap();

    let config = get_config(temp.path(), None).unwrap();
    assert_eq!(config.package_extension, "aab");
    assert_eq!(config.signing.store_password, "s3cret");
    assert_eq!(config.signing.alias, "alias");
}

#[test]
fn test_explicit_config_path() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("apk-factory.yml"), "key_dir: ignored\n").unwrap();
    let explicit = temp.path().join("custom.yml");
    fs::write(&explicit, "key_dir: chosen\n").unwrap();

    let config = get_config(temp.path(), Some(explicit.as_path())).unwrap();
    assert_eq!(config.key_dir, PathBuf::from("chosen"));

    let missing = temp.path().join("missing.yml");
    assert!(matches!(get_config(temp.path(), Some(missing.as_path())), Err(Error::ConfigError(_))));
}
