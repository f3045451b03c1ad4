//! Legacy archive-name migration
//!
//! The oldest naming convention stored archive folders under the bare
//! opportunity number ("7894"). This driver renames them to the current
//! description-based form via the reconciler's shared canonical-rename
//! path, so "already migrated" and "already correct" are the same check.

use std::sync::Arc;

use labtrack_domain::FolderArea;
use tracing::{error, info};

use super::batch::{ActionKind, BatchSummary};
use super::service::{Reconciler, RenameOutcome};

/// Special-cased reconciliation pass for "number-only" archive folders.
pub struct MigrationDriver {
    reconciler: Arc<Reconciler>,
}

impl MigrationDriver {
    pub fn new(reconciler: Arc<Reconciler>) -> Self {
        Self { reconciler }
    }

    /// Rename digit-only archive folders to their canonical names.
    ///
    /// Folders without a matching opportunity record are recorded as errors
    /// and left untouched: without opportunity data there is no canonical
    /// name to derive, and guessing is worse than reporting.
    pub async fn migrate_legacy_archive_names(
        &self,
        dry_run: bool,
        filter: Option<&str>,
    ) -> BatchSummary {
        let mut summary = BatchSummary::new(dry_run);

        let folders = match self.reconciler.list_area(FolderArea::Archive).await {
            Ok(folders) => folders,
            Err(err) => {
                error!(error = %err, "failed to list archive folders for migration");
                summary.record_error("*", ActionKind::MigrateLegacyName, err.to_string());
                return summary;
            }
        };

        let legacy = folders.into_iter().filter(|f| {
            f.is_folder
                && !f.name.is_empty()
                && f.name.chars().all(|c| c.is_ascii_digit())
                && filter.map_or(true, |n| f.name == n)
        });

        for folder in legacy {
            let number = folder.name.clone();

            let opportunity = match self.reconciler.repository().get_opportunity(&number).await {
                Ok(Some(opportunity)) => opportunity,
                Ok(None) => {
                    summary.record_error(
                        &number,
                        ActionKind::MigrateLegacyName,
                        "no opportunity record; cannot derive canonical name",
                    );
                    continue;
                }
                Err(err) => {
                    summary.record_error(&number, ActionKind::MigrateLegacyName, err.to_string());
                    continue;
                }
            };

            match self
                .reconciler
                .rename_folder_to_canonical(&opportunity, &folder, dry_run)
                .await
            {
                Ok(RenameOutcome::AlreadyCorrect) => {
                    // A digit-only name can itself be canonical when the
                    // opportunity has no description.
                    summary.record_skip(&number, ActionKind::MigrateLegacyName, "already migrated");
                }
                Ok(RenameOutcome::Renamed { from, to }) => {
                    summary.record_success(
                        &number,
                        ActionKind::MigrateLegacyName,
                        format!("{from} -> {to}"),
                    );
                }
                Err(err) => {
                    summary.record_error(&number, ActionKind::MigrateLegacyName, err.to_string());
                }
            }
        }

        info!(
            success = summary.success,
            skipped = summary.skipped,
            errors = summary.errors,
            dry_run,
            "legacy archive-name migration finished"
        );
        summary
    }
}
