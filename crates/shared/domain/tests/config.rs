use modkit_domain::config::{HostConfig, LogConfig, OptionsConfig};
use modkit_domain::side::Sides;
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let options = OptionsConfig::default();
    assert_eq!(options.dir, std::path::PathBuf::from("config"));
    assert!(options.env_prefix.is_none());

    let log = LogConfig::default();
    assert_eq!(log.level, "info");
    assert!(log.console);
    assert!(log.dir.is_none());

    let host = HostConfig::default();
    assert_eq!(host.id, "modkit");
    assert!(host.name.is_none());
    assert_eq!(host.sides, Sides::CLIENT_RUNTIME);
}

#[test]
fn host_config_deserializes() {
    let raw = json!({
        "id": "charmony",
        "sides": ["common", "server"],
        "options": { "dir": "/tmp/opts", "env_prefix": "CHARMONY" },
        "log": { "level": "debug", "json": true }
    });

    let cfg: HostConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.id, "charmony");
    assert_eq!(cfg.sides, Sides::SERVER_RUNTIME);
    assert_eq!(cfg.options.dir, std::path::PathBuf::from("/tmp/opts"));
    assert_eq!(cfg.options.env_prefix.as_deref(), Some("CHARMONY"));
    assert_eq!(cfg.log.level, "debug");
    assert!(cfg.log.json);
    assert!(cfg.log.console, "unspecified fields keep their defaults");
}

#[test]
fn host_config_clones_share_until_mutated() {
    let original = HostConfig::default();
    let mut copy = original.clone();
    copy.log.level = "trace".to_owned();

    assert_eq!(original.log.level, "info");
    assert_eq!(copy.log.level, "trace");
}
