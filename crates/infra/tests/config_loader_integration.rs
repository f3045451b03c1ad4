//! Integration tests for configuration loading from files.

use std::io::Write;

use labtrack_infra::config;
use tempfile::NamedTempFile;

#[test]
fn loads_config_from_toml_file() {
    let toml_content = r#"
[database]
path = "/tmp/labtrack-test.db"
pool_size = 4

[sharepoint]
tenant_id = "contoso-tenant"
client_id = "app-id"
client_secret = "app-secret"
drive_id = "d1"
sample_info_drive_id = "d2"
archive_folder = "_Archive"

[reconcile]
page_size = 100
"#;

    let mut temp_file = NamedTempFile::new().expect("temp file should be created");
    temp_file.write_all(toml_content.as_bytes()).expect("write should succeed");

    let path = temp_file.path().with_extension("toml");
    std::fs::copy(temp_file.path(), &path).expect("copy should succeed");

    let config = config::load_from_file(Some(path.clone())).expect("config should load");

    assert_eq!(config.database.path, "/tmp/labtrack-test.db");
    assert_eq!(config.database.pool_size, 4);
    assert_eq!(config.sharepoint.tenant_id, "contoso-tenant");
    assert_eq!(config.sharepoint.client_secret.as_deref(), Some("app-secret"));
    assert_eq!(config.sharepoint.sample_info_drive_id.as_deref(), Some("d2"));
    assert_eq!(config.sharepoint.archive_folder, "_Archive");
    assert_eq!(config.reconcile.page_size, 100);

    std::fs::remove_file(path).ok();
}

#[test]
fn loads_config_from_json_file() {
    let json_content = r#"{
        "database": { "path": "/tmp/labtrack-test.db", "pool_size": 8 },
        "sharepoint": {
            "tenant_id": "contoso-tenant",
            "client_id": "app-id",
            "drive_id": "d1",
            "sample_info_drive_id": null,
            "archive_folder": "Archived Projects"
        },
        "reconcile": { "page_size": 200 }
    }"#;

    let mut temp_file = NamedTempFile::new().expect("temp file should be created");
    temp_file.write_all(json_content.as_bytes()).expect("write should succeed");

    let path = temp_file.path().with_extension("json");
    std::fs::copy(temp_file.path(), &path).expect("copy should succeed");

    let config = config::load_from_file(Some(path.clone())).expect("config should load");

    assert_eq!(config.database.pool_size, 8);
    assert!(config.sharepoint.client_secret.is_none());
    assert_eq!(config.sharepoint.archive_folder, "Archived Projects");

    std::fs::remove_file(path).ok();
}

#[test]
fn missing_file_is_a_config_error() {
    let result = config::load_from_file(Some("/nonexistent/labtrack.toml".into()));
    let err = result.expect_err("loading a missing file should fail");
    assert!(err.to_string().contains("not found"));
}

#[test]
fn malformed_toml_is_a_config_error() {
    let mut temp_file = NamedTempFile::new().expect("temp file should be created");
    temp_file.write_all(b"[database\npath = ").expect("write should succeed");

    let path = temp_file.path().with_extension("toml");
    std::fs::copy(temp_file.path(), &path).expect("copy should succeed");

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_err());

    std::fs::remove_file(path).ok();
}
