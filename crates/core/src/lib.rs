//! # LabTrack Core
//!
//! Core business logic for LabTrack: folder naming, consistency checking,
//! and reconciliation against the remote document store.
//!
//! This crate contains:
//! - Name sanitization and canonical folder-name resolution
//! - The consistency checker (diagnostic, side-effect free)
//! - The reconciler and legacy-name migration driver
//! - Port traits implemented by infrastructure adapters
//!
//! ## Architecture
//! - Depends only on `labtrack-domain`
//! - All I/O goes through port traits (`RemoteFileStore`,
//!   `OpportunityRepository`, `SampleRepository`, `DocumentationSync`)
//! - No direct HTTP or database access

pub mod consistency;
pub mod naming;
pub mod reconcile;
pub mod samples;

// Re-export commonly used items
pub use consistency::{ConsistencyChecker, IssueReport};
pub use naming::{extract_opportunity_number, resolve_folder_name, sanitize_folder_name};
pub use reconcile::{
    BatchSummary, DocumentationSync, MigrationDriver, OpportunityRepository, Reconciler,
    RemoteFileStore,
};
pub use samples::{SampleRepository, SampleService};
