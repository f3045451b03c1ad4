//! Structured consistency report
//!
//! The checker classifies drift into five named lists. Each entry carries
//! enough context to drive the reconciler or to print for an operator.

use labtrack_domain::{FolderArea, RemoteFolderItem};
use serde::Serialize;

/// The `sample_ids` mirror disagrees with the live sample count.
#[derive(Debug, Clone, Serialize)]
pub struct SampleCountMismatch {
    pub opportunity_number: String,
    /// Number of ids recorded in the denormalized mirror.
    pub recorded: usize,
    /// Live sample count from the repository.
    pub actual: usize,
    pub description: Option<String>,
}

/// An opportunity folder is missing or sits in the wrong area.
#[derive(Debug, Clone, Serialize)]
pub struct PlacementIssue {
    pub opportunity_number: String,
    /// The folder as found remotely, when one exists.
    pub folder: Option<RemoteFolderItem>,
    pub sample_count: usize,
    pub description: Option<String>,
}

/// A remote folder with no matching opportunity record, or whose name
/// encodes no opportunity number at all.
#[derive(Debug, Clone, Serialize)]
pub struct UnknownFolder {
    pub folder: RemoteFolderItem,
    pub area: FolderArea,
    /// The number parsed out of the folder name, if any.
    pub extracted_number: Option<String>,
}

/// Full output of one consistency check run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueReport {
    pub sample_count_mismatch: Vec<SampleCountMismatch>,
    pub main_should_archive: Vec<PlacementIssue>,
    pub archive_should_restore: Vec<PlacementIssue>,
    pub missing_from_remote: Vec<PlacementIssue>,
    pub unknown_folders: Vec<UnknownFolder>,
}

impl IssueReport {
    /// Total number of recorded issues across all classes.
    pub fn total_issues(&self) -> usize {
        self.sample_count_mismatch.len()
            + self.main_should_archive.len()
            + self.archive_should_restore.len()
            + self.missing_from_remote.len()
            + self.unknown_folders.len()
    }

    /// True when the check found nothing to fix.
    pub fn is_clean(&self) -> bool {
        self.total_issues() == 0
    }
}
