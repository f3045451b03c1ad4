//! Remote document-store types
//!
//! These model the slice of a SharePoint drive the reconciliation logic
//! cares about: folder nodes addressed by opaque ids plus human-readable
//! paths, and paged listings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A folder (or file) node in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFolderItem {
    /// Opaque item id assigned by the remote store.
    pub id: String,
    pub name: String,
    /// Path of the parent, relative to the drive root (e.g. `/_Archive`).
    pub parent_path: Option<String>,
    pub is_folder: bool,
    pub web_url: Option<String>,
}

/// One page of a folder listing, with the continuation token (if any)
/// needed to fetch the next page.
#[derive(Debug, Clone, Default)]
pub struct FolderPage {
    pub items: Vec<RemoteFolderItem>,
    pub next_page_token: Option<String>,
}

/// The two root areas an opportunity folder may legitimately live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderArea {
    Main,
    Archive,
}

impl fmt::Display for FolderArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Archive => write!(f, "archive"),
        }
    }
}

/// Addressing for a folder to list: either the drive root or a child
/// folder by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderRef {
    Root,
    Id(String),
    /// A path relative to the drive root, e.g. `/_Archive`.
    Path(String),
}
