//! Consistency checker - diagnostic comparison of database vs. remote state

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use labtrack_domain::{FolderArea, Opportunity, RemoteFolderItem, Result};
use tracing::debug;

use super::report::{IssueReport, PlacementIssue, SampleCountMismatch, UnknownFolder};
use crate::naming::extract_opportunity_number;
use crate::reconcile::ports::OpportunityRepository;

/// Compares repository state against the remote folder tree.
///
/// Purely diagnostic: it performs no mutation. Sample counts are always
/// queried fresh from the repository rather than trusted from the cached
/// `sample_ids` mirror, since that mirror is exactly what drifts.
pub struct ConsistencyChecker {
    repository: Arc<dyn OpportunityRepository>,
    /// Name of the archive subtree; its own folder node under the main
    /// root is infrastructure, not an opportunity folder.
    archive_folder_name: String,
}

impl ConsistencyChecker {
    /// Create a checker over the given repository.
    pub fn new(repository: Arc<dyn OpportunityRepository>, archive_folder_name: impl Into<String>) -> Self {
        Self { repository, archive_folder_name: archive_folder_name.into() }
    }

    /// Classify every opportunity and every remote folder into the issue
    /// report. `main_folders` and `archive_folders` are the already-listed
    /// children of the two root areas.
    pub async fn check(
        &self,
        opportunities: &[Opportunity],
        main_folders: &[RemoteFolderItem],
        archive_folders: &[RemoteFolderItem],
    ) -> Result<IssueReport> {
        let main_index = self.index_folders(main_folders, FolderArea::Main);
        let archive_index = self.index_folders(archive_folders, FolderArea::Archive);

        let known_numbers: HashSet<&str> =
            opportunities.iter().map(|o| o.opportunity_number.as_str()).collect();

        let mut report = IssueReport::default();

        for opportunity in opportunities {
            let number = opportunity.opportunity_number.as_str();
            let actual = self.repository.count_samples(number).await?;
            let has_samples = actual > 0;
            let in_main = main_index.contains_key(number);
            let in_archive = archive_index.contains_key(number);

            debug!(number, actual, in_main, in_archive, "classified opportunity");

            let issue = |folder: Option<&RemoteFolderItem>| PlacementIssue {
                opportunity_number: number.to_string(),
                folder: folder.cloned(),
                sample_count: actual,
                description: opportunity.description.clone(),
            };

            if has_samples && in_archive && !in_main {
                report.archive_should_restore.push(issue(archive_index.get(number).copied()));
            } else if !has_samples && in_main && !in_archive {
                report.main_should_archive.push(issue(main_index.get(number).copied()));
            } else if !in_main && !in_archive {
                report.missing_from_remote.push(issue(None));
            }

            // Orthogonal to placement: the denormalized mirror can be stale
            // even when the folder sits exactly where it should.
            let recorded = opportunity.sample_ids.len();
            if recorded != actual {
                report.sample_count_mismatch.push(SampleCountMismatch {
                    opportunity_number: number.to_string(),
                    recorded,
                    actual,
                    description: opportunity.description.clone(),
                });
            }
        }

        for (folders, area) in
            [(main_folders, FolderArea::Main), (archive_folders, FolderArea::Archive)]
        {
            for folder in folders {
                if !folder.is_folder || self.is_archive_root(folder, area) {
                    continue;
                }
                let extracted = extract_opportunity_number(&folder.name);
                let known = extracted
                    .as_deref()
                    .map(|n| known_numbers.contains(n))
                    .unwrap_or(false);
                if !known {
                    report.unknown_folders.push(UnknownFolder {
                        folder: folder.clone(),
                        area,
                        extracted_number: extracted,
                    });
                }
            }
        }

        Ok(report)
    }

    fn is_archive_root(&self, folder: &RemoteFolderItem, area: FolderArea) -> bool {
        area == FolderArea::Main && folder.name == self.archive_folder_name
    }

    fn index_folders<'a>(
        &self,
        folders: &'a [RemoteFolderItem],
        area: FolderArea,
    ) -> HashMap<String, &'a RemoteFolderItem> {
        let mut index: HashMap<String, &RemoteFolderItem> = HashMap::new();
        for folder in folders {
            if !folder.is_folder || self.is_archive_root(folder, area) {
                continue;
            }
            // Folders whose name encodes no number are not indexed; they
            // are reported separately as unknown.
            if let Some(number) = extract_opportunity_number(&folder.name) {
                index.entry(number).or_insert(folder);
            }
        }
        index
    }
}
