//! Consistency checking between the database and the remote store

pub mod checker;
pub mod report;

pub use checker::ConsistencyChecker;
pub use report::{IssueReport, PlacementIssue, SampleCountMismatch, UnknownFolder};
