//! # LabTrack Infrastructure
//!
//! Adapter implementations for LabTrack's core ports.
//!
//! This crate contains:
//! - SQLite repositories for opportunities and samples
//! - The Microsoft Graph drive client implementing `RemoteFileStore`
//! - Token acquisition for the Graph API
//! - Configuration loading
//!
//! ## Architecture
//! - Implements the port traits defined in `labtrack-core`
//! - All transport errors are mapped into `labtrack_domain::LabTrackError`

pub mod config;
pub mod database;
pub mod sharepoint;

// Re-export commonly used items
pub use database::{DbManager, SqliteOpportunityRepository, SqliteSampleRepository};
pub use sharepoint::{
    AccessTokenProvider, ClientCredentialsTokenProvider, GraphFileStore,
    LoggingDocumentationSync,
};
