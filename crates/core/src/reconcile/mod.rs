//! Reconciliation of database state against the remote folder tree

pub mod batch;
pub mod migration;
pub mod ports;
pub mod service;

pub use batch::{ActionKind, BatchSummary, ItemOutcome, ItemStatus};
pub use migration::MigrationDriver;
pub use ports::{
    list_all_children, DocumentationSync, OpportunityRepository, RemoteFileStore,
};
pub use service::{Reconciler, RenameOutcome};
