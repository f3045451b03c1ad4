//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `LABTRACK_DB_PATH`: Database file path
//! - `LABTRACK_DB_POOL_SIZE`: Connection pool size
//! - `LABTRACK_TENANT_ID`: Azure AD tenant id
//! - `LABTRACK_CLIENT_ID`: App registration client id
//! - `LABTRACK_CLIENT_SECRET`: App registration client secret
//! - `LABTRACK_DRIVE_ID`: Drive id of the main document library
//! - `LABTRACK_SAMPLE_INFO_DRIVE_ID`: Drive id of the Sample Info library
//!   (optional)
//! - `LABTRACK_ARCHIVE_FOLDER`: Archive subtree name (default `_Archive`)
//! - `LABTRACK_PAGE_SIZE`: Remote listing page size (default 200)
//!
//! ## File Locations
//! The loader probes `./config.{toml,json}` and `./labtrack.{toml,json}` in
//! the working directory and up to two parent directories.

use std::path::{Path, PathBuf};

use labtrack_domain::constants::{DEFAULT_ARCHIVE_FOLDER, DEFAULT_LIST_PAGE_SIZE};
use labtrack_domain::{
    Config, DatabaseConfig, LabTrackError, ReconcileConfig, Result, SharePointConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `LabTrackError::Config` if configuration cannot be loaded from
/// either source.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Errors
/// Returns `LabTrackError::Config` if required variables are missing or
/// have invalid values.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("LABTRACK_DB_PATH")?;
    let db_pool_size = env_var("LABTRACK_DB_POOL_SIZE").and_then(|s| {
        s.parse::<u32>().map_err(|e| LabTrackError::Config(format!("Invalid pool size: {}", e)))
    })?;

    let tenant_id = env_var("LABTRACK_TENANT_ID")?;
    let client_id = env_var("LABTRACK_CLIENT_ID")?;
    let client_secret = std::env::var("LABTRACK_CLIENT_SECRET").ok();
    let drive_id = env_var("LABTRACK_DRIVE_ID")?;
    let sample_info_drive_id = std::env::var("LABTRACK_SAMPLE_INFO_DRIVE_ID").ok();
    let archive_folder = std::env::var("LABTRACK_ARCHIVE_FOLDER")
        .unwrap_or_else(|_| DEFAULT_ARCHIVE_FOLDER.to_string());

    let page_size = match std::env::var("LABTRACK_PAGE_SIZE") {
        Ok(s) => s
            .parse::<u32>()
            .map_err(|e| LabTrackError::Config(format!("Invalid page size: {}", e)))?,
        Err(_) => DEFAULT_LIST_PAGE_SIZE,
    };

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size: db_pool_size },
        sharepoint: SharePointConfig {
            tenant_id,
            client_id,
            client_secret,
            drive_id,
            sample_info_drive_id,
            archive_folder,
        },
        reconcile: ReconcileConfig { page_size },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `LabTrackError::Config` if the file is missing, no file can be
/// found, or the contents fail to parse.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(LabTrackError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            LabTrackError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| LabTrackError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| LabTrackError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| LabTrackError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(LabTrackError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the standard locations for a configuration file, returning the
/// first that exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        for dir in [cwd.clone(), cwd.join(".."), cwd.join("../..")] {
            candidates.extend([
                dir.join("config.toml"),
                dir.join("config.json"),
                dir.join("labtrack.toml"),
                dir.join("labtrack.json"),
            ]);
        }
    }

    candidates.into_iter().find(|p| p.exists())
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| LabTrackError::Config(format!("Missing environment variable: {}", name)))
}
