use std::path::PathBuf;
use std::time::Duration;

use backoffice_console::models::config::ConsoleConfig;
use tempfile::tempdir;

#[test]
fn loads_defaults_and_profile_overrides() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("default.yaml"),
        "api_base_url: \"http://localhost:8080/api/v1\"\n\
         app_id: \"backoffice-console\"\n\
         app_version: \"0.1.0\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("staging.yaml"),
        "api_base_url: \"https://staging.bank.example/api/v1\"\n\
         token_path: \"/tmp/backoffice/session.json\"\n\
         page_size: 50\n\
         default_sort: \"createdAt,desc\"\n\
         request_timeout_secs: 5\n",
    )
    .unwrap();

    let local = ConsoleConfig::load(dir.path(), "local").unwrap();
    assert_eq!(local.api_base_url, "http://localhost:8080/api/v1");
    assert_eq!(local.page_size.get(), 20);
    assert_eq!(local.default_sort.to_string(), "id,desc");
    assert_eq!(local.token_path, None);
    assert_eq!(local.request_timeout(), Duration::from_secs(30));

    let staging = ConsoleConfig::load(dir.path(), "staging").unwrap();
    assert_eq!(staging.api_base_url, "https://staging.bank.example/api/v1");
    assert_eq!(staging.app_id, "backoffice-console");
    assert_eq!(staging.page_size.get(), 50);
    assert_eq!(staging.default_sort.to_string(), "createdAt,desc");
    assert_eq!(
        staging.token_path,
        Some(PathBuf::from("/tmp/backoffice/session.json"))
    );
    assert_eq!(staging.identity().app_version, "0.1.0");
}

#[test]
fn invalid_values_are_rejected() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("default.yaml"),
        "api_base_url: \"http://localhost\"\n\
         app_id: \"console\"\n\
         app_version: \"0.1.0\"\n\
         page_size: 0\n",
    )
    .unwrap();

    assert!(ConsoleConfig::load(dir.path(), "local").is_err());
}

#[test]
fn missing_default_file_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(ConsoleConfig::load(dir.path(), "local").is_err());
}
