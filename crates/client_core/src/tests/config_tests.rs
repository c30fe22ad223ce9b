use super::*;
use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_point_at_local_api() {
    let config = ConsoleConfig::default();
    assert_eq!(config.api_base_url, "http://127.0.0.1:5000/api");
    assert_eq!(config.metrics_limit, 1000);
    assert_eq!(config.page_size, None);
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
}

#[test]
fn file_values_override_defaults() {
    let mut config = ConsoleConfig::default();
    apply_file(
        &mut config,
        r#"
api_base_url = "https://admin.example.com/api"
page_size = 25
request_timeout_secs = 0
"#,
    )
    .expect("valid toml");

    assert_eq!(config.api_base_url, "https://admin.example.com/api");
    assert_eq!(config.page_size, Some(25));
    assert_eq!(config.metrics_limit, DEFAULT_METRICS_LIMIT);
    assert_eq!(config.request_timeout(), Duration::from_secs(1));
}

#[test]
fn malformed_file_is_an_error() {
    let mut config = ConsoleConfig::default();
    assert!(apply_file(&mut config, "page_size = \"many\"").is_err());
}

#[test]
fn env_overrides_win_and_bad_numbers_are_ignored() {
    let mut config = ConsoleConfig::default();
    apply_env(
        &mut config,
        env(&[
            ("ADMIN_API_URL", "http://legacy/api"),
            ("APP__API_BASE_URL", "http://preferred/api"),
            ("APP__CREDENTIALS_PATH", "/tmp/creds.json"),
            ("APP__PAGE_SIZE", "0"),
            ("APP__METRICS_LIMIT", "lots"),
            ("APP__REQUEST_TIMEOUT_SECS", "5"),
        ]),
    );

    assert_eq!(config.api_base_url, "http://preferred/api");
    assert_eq!(config.credentials_path, PathBuf::from("/tmp/creds.json"));
    assert_eq!(config.page_size, None);
    assert_eq!(config.metrics_limit, DEFAULT_METRICS_LIMIT);
    assert_eq!(config.request_timeout_secs, 5);
}

#[test]
fn explicit_config_file_must_exist() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("absent.toml");
    assert!(load_config(Some(missing.as_path())).is_err());

    let present = dir.path().join("console.toml");
    fs::write(&present, "metrics_limit = 250\n").expect("write");
    let config = load_config(Some(present.as_path())).expect("load");
    assert_eq!(config.metrics_limit, 250);
}
