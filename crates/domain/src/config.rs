//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ARCHIVE_FOLDER, DEFAULT_LIST_PAGE_SIZE};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub sharepoint: SharePointConfig,
    pub reconcile: ReconcileConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

/// SharePoint / Graph drive configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharePointConfig {
    pub tenant_id: String,
    pub client_id: String,
    #[serde(default, skip_serializing)]
    pub client_secret: Option<String>,
    /// Drive holding the active-opportunities library.
    pub drive_id: String,
    /// Drive holding the Sample Info destination library.
    #[serde(default)]
    pub sample_info_drive_id: Option<String>,
    /// Name of the archive subtree under the main library root.
    pub archive_folder: String,
}

/// Reconciliation behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Page size used when listing remote folder children.
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig { path: "labtrack.db".to_string(), pool_size: 8 },
            sharepoint: SharePointConfig {
                tenant_id: String::new(),
                client_id: String::new(),
                client_secret: None,
                drive_id: String::new(),
                sample_info_drive_id: None,
                archive_folder: DEFAULT_ARCHIVE_FOLDER.to_string(),
            },
            reconcile: ReconcileConfig { page_size: DEFAULT_LIST_PAGE_SIZE },
        }
    }
}
