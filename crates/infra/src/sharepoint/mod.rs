//! Microsoft Graph drive integration
//!
//! Adapters implementing the core `RemoteFileStore` and
//! `DocumentationSync` ports against SharePoint document libraries,
//! plus token acquisition.

pub mod auth;
pub mod client;
pub mod docs;
pub mod types;

pub use auth::{AccessTokenProvider, ClientCredentialsTokenProvider, StaticTokenProvider};
pub use client::GraphFileStore;
pub use docs::LoggingDocumentationSync;
