//! Reconciler - corrective actions against the remote store
//!
//! Four corrective modes, each independently invokable and dry-run aware:
//! re-syncing the `sample_ids` mirror, archiving, restoring, and renaming a
//! folder to its canonical name. Batch wrappers iterate items with per-item
//! fault isolation and accumulate a [`BatchSummary`].

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;

use labtrack_domain::constants::{FIELD_CUSTOMER, FIELD_DESCRIPTION, FIELD_RSM};
use labtrack_domain::{FolderArea, FolderRef, LabTrackError, Opportunity, RemoteFolderItem, Result};
use tracing::{debug, error, info, warn};

use super::batch::{ActionKind, BatchSummary};
use super::ports::{list_all_children, DocumentationSync, OpportunityRepository, RemoteFileStore};
use crate::consistency::IssueReport;
use crate::naming::{extract_opportunity_number, resolve_folder_name};

/// Result of a canonical-name rename attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The remote folder already carries the canonical name.
    AlreadyCorrect,
    /// The folder was renamed (or would be, in dry-run mode).
    Renamed { from: String, to: String },
}

/// Performs corrective actions through the remote store and repository.
pub struct Reconciler {
    store: Arc<dyn RemoteFileStore>,
    repository: Arc<dyn OpportunityRepository>,
    documentation: Arc<dyn DocumentationSync>,
    drive_id: String,
    archive_folder: String,
}

impl Reconciler {
    pub fn new(
        store: Arc<dyn RemoteFileStore>,
        repository: Arc<dyn OpportunityRepository>,
        documentation: Arc<dyn DocumentationSync>,
        drive_id: impl Into<String>,
        archive_folder: impl Into<String>,
    ) -> Self {
        Self {
            store,
            repository,
            documentation,
            drive_id: drive_id.into(),
            archive_folder: archive_folder.into(),
        }
    }

    fn archive_path(&self) -> String {
        format!("/{}", self.archive_folder)
    }

    fn area_ref(&self, area: FolderArea) -> FolderRef {
        match area {
            FolderArea::Main => FolderRef::Root,
            FolderArea::Archive => FolderRef::Path(self.archive_path()),
        }
    }

    /// List the opportunity folders in one area.
    pub async fn list_area(&self, area: FolderArea) -> Result<Vec<RemoteFolderItem>> {
        list_all_children(self.store.as_ref(), &self.drive_id, &self.area_ref(area)).await
    }

    /// Find the folder for an opportunity number within one area.
    pub async fn find_folder(
        &self,
        opportunity_number: &str,
        area: FolderArea,
    ) -> Result<Option<RemoteFolderItem>> {
        let folders = self.list_area(area).await?;
        Ok(folders.into_iter().filter(|f| f.is_folder).find(|f| {
            extract_opportunity_number(&f.name).as_deref() == Some(opportunity_number)
        }))
    }

    /// Recompute the `sample_ids` mirror from the live sample set and
    /// persist it if it changed. Idempotent: a second call right after a
    /// successful one makes no further mutation.
    ///
    /// Returns `true` when a write happened (or would have, in dry-run).
    pub async fn sync_sample_ids(&self, opportunity: &Opportunity, dry_run: bool) -> Result<bool> {
        let live = self.repository.list_sample_ids(&opportunity.opportunity_number).await?;
        if opportunity.sample_ids.same_set(&live) {
            debug!(
                number = %opportunity.opportunity_number,
                "sample_ids mirror already in sync"
            );
            return Ok(false);
        }

        info!(
            number = %opportunity.opportunity_number,
            recorded = opportunity.sample_ids.len(),
            actual = live.len(),
            dry_run,
            "re-syncing sample_ids mirror"
        );
        if dry_run {
            return Ok(true);
        }

        let mut updated = opportunity.clone();
        updated.sample_ids = live.into();
        self.repository.save_opportunity(&updated).await?;
        Ok(true)
    }

    /// Archive an opportunity: documentation sync, then move the folder
    /// from the main library into the archive subtree, then clear the
    /// `needs_update` flag. The three steps run as an ordered saga; a step
    /// failure fails the whole chain for this item, with completed steps
    /// left in place (no rollback; re-running is safe).
    pub async fn archive(&self, opportunity_number: &str, dry_run: bool) -> Result<()> {
        self.archive_item(opportunity_number, dry_run, false).await
    }

    /// `mirror_synced` marks a number whose `sample_ids` mirror was already
    /// re-synced (or recorded for re-sync, in dry-run) earlier in the same
    /// batch; the mirror then equals the live set, so the gate collapses to
    /// the live count alone and dry-run reaches the same verdict as a live
    /// run would after the sync.
    async fn archive_item(
        &self,
        opportunity_number: &str,
        dry_run: bool,
        mirror_synced: bool,
    ) -> Result<()> {
        let opportunity = self.load_opportunity(opportunity_number).await?;

        // Eligibility gate is deliberately stricter than the checker's
        // classification: both the recorded mirror and the live count must
        // be empty before a folder leaves the main library.
        let live = self.repository.count_samples(opportunity_number).await?;
        let recorded = if mirror_synced { live } else { opportunity.sample_ids.len() };
        if live > 0 || recorded > 0 {
            return Err(LabTrackError::InvalidInput(format!(
                "opportunity {opportunity_number} still has samples (live {live}, recorded {recorded})"
            )));
        }

        let folder = self
            .find_folder(opportunity_number, FolderArea::Main)
            .await?
            .ok_or_else(|| {
                LabTrackError::NotFound(format!(
                    "no main-library folder for opportunity {opportunity_number}"
                ))
            })?;

        if dry_run {
            info!(
                number = opportunity_number,
                folder = %folder.name,
                "dry-run: would sync documentation, move folder to archive, clear update flag"
            );
            return Ok(());
        }

        saga_step("sync_documentation", self.documentation.sync_documentation(opportunity_number))
            .await?;
        saga_step(
            "move_to_archive",
            self.store.move_item(&self.drive_id, &folder.id, &self.archive_path()),
        )
        .await?;
        saga_step("clear_update_flag", async {
            let mut updated = opportunity.clone();
            updated.needs_update = false;
            self.repository.save_opportunity(&updated).await
        })
        .await?;

        info!(number = opportunity_number, folder = %folder.name, "archived opportunity folder");
        Ok(())
    }

    /// Restore an opportunity folder from the archive back into the main
    /// library, then resync documentation. Fails with `NotFound` when no
    /// archived folder exists for the number.
    pub async fn restore(&self, opportunity_number: &str, dry_run: bool) -> Result<()> {
        let folder = self
            .find_folder(opportunity_number, FolderArea::Archive)
            .await?
            .ok_or_else(|| {
                LabTrackError::NotFound(format!(
                    "opportunity {opportunity_number} not found in archive"
                ))
            })?;

        if dry_run {
            info!(
                number = opportunity_number,
                folder = %folder.name,
                "dry-run: would move folder back to main library and resync documentation"
            );
            return Ok(());
        }

        saga_step("move_to_main", self.store.move_item(&self.drive_id, &folder.id, "/")).await?;
        saga_step("sync_documentation", self.documentation.sync_documentation(opportunity_number))
            .await?;

        info!(number = opportunity_number, folder = %folder.name, "restored opportunity folder");
        Ok(())
    }

    /// Rename the opportunity's folder to its canonical name, searching the
    /// main library first and the archive second.
    pub async fn rename_to_canonical(
        &self,
        opportunity: &Opportunity,
        dry_run: bool,
    ) -> Result<RenameOutcome> {
        let number = opportunity.opportunity_number.as_str();
        let folder = match self.find_folder(number, FolderArea::Main).await? {
            Some(folder) => folder,
            None => self.find_folder(number, FolderArea::Archive).await?.ok_or_else(|| {
                LabTrackError::NotFound(format!("no remote folder for opportunity {number}"))
            })?,
        };
        self.rename_folder_to_canonical(opportunity, &folder, dry_run).await
    }

    /// Rename an already-located folder to the opportunity's canonical
    /// name. This is the single idempotence check shared by the rename
    /// pass and the legacy-name migration.
    ///
    /// The remote rename and the local persistence of the new name are not
    /// transactional: if the rename lands but the save fails, the stale
    /// cache shows up on the next consistency run and heals there.
    pub async fn rename_folder_to_canonical(
        &self,
        opportunity: &Opportunity,
        folder: &RemoteFolderItem,
        dry_run: bool,
    ) -> Result<RenameOutcome> {
        let canonical = resolve_folder_name(opportunity);
        if folder.name == canonical {
            debug!(
                number = %opportunity.opportunity_number,
                name = %canonical,
                "folder already carries canonical name"
            );
            return Ok(RenameOutcome::AlreadyCorrect);
        }

        let outcome =
            RenameOutcome::Renamed { from: folder.name.clone(), to: canonical.clone() };
        if dry_run {
            info!(
                number = %opportunity.opportunity_number,
                from = %folder.name,
                to = %canonical,
                "dry-run: would rename folder"
            );
            return Ok(outcome);
        }

        self.store.rename(&self.drive_id, &folder.id, &canonical).await?;

        let mut updated = opportunity.clone();
        updated.sharepoint_folder_name = Some(canonical.clone());
        self.repository.save_opportunity(&updated).await?;

        // Non-critical: a failed metadata patch leaves the rename in place.
        if let Err(err) =
            self.store.patch_metadata(&self.drive_id, &folder.id, &metadata_fields(opportunity)).await
        {
            warn!(
                number = %opportunity.opportunity_number,
                error = %err,
                "metadata patch failed after rename"
            );
        }

        info!(
            number = %opportunity.opportunity_number,
            from = %folder.name,
            to = %canonical,
            "renamed folder to canonical name"
        );
        Ok(outcome)
    }

    /// Apply corrective actions for everything a consistency report found.
    /// Items are processed independently; failures are recorded and the
    /// batch continues.
    pub async fn fix_report(&self, report: &IssueReport, dry_run: bool) -> BatchSummary {
        let mut summary = BatchSummary::new(dry_run);
        let mut synced = HashSet::new();

        for issue in &report.sample_count_mismatch {
            let number = issue.opportunity_number.as_str();
            match self.load_opportunity(number).await {
                Ok(opportunity) => match self.sync_sample_ids(&opportunity, dry_run).await {
                    Ok(true) => {
                        synced.insert(number.to_string());
                        summary.record_success(
                            number,
                            ActionKind::SyncSampleIds,
                            format!("mirror updated ({} -> {})", issue.recorded, issue.actual),
                        );
                    }
                    Ok(false) => {
                        synced.insert(number.to_string());
                        summary.record_skip(number, ActionKind::SyncSampleIds, "already in sync");
                    }
                    Err(err) => {
                        summary.record_error(number, ActionKind::SyncSampleIds, err.to_string());
                    }
                },
                Err(err) => {
                    summary.record_error(number, ActionKind::SyncSampleIds, err.to_string());
                }
            }
        }

        for issue in &report.main_should_archive {
            let number = issue.opportunity_number.as_str();
            match self.archive_item(number, dry_run, synced.contains(number)).await {
                Ok(()) => {
                    summary.record_success(number, ActionKind::Archive, "moved to archive");
                }
                Err(err) => summary.record_error(number, ActionKind::Archive, err.to_string()),
            }
        }

        for issue in &report.archive_should_restore {
            let number = issue.opportunity_number.as_str();
            match self.restore(number, dry_run).await {
                Ok(()) => {
                    summary.record_success(number, ActionKind::Restore, "moved to main library");
                }
                Err(err) => summary.record_error(number, ActionKind::Restore, err.to_string()),
            }
        }

        // Missing and unknown folders need an operator decision; the fix
        // pass only surfaces them.
        for issue in &report.missing_from_remote {
            summary.record_skip(
                issue.opportunity_number.as_str(),
                ActionKind::Archive,
                "no remote folder exists; create it manually or via intake",
            );
        }
        for unknown in &report.unknown_folders {
            summary.record_skip(
                unknown.folder.name.as_str(),
                ActionKind::Rename,
                format!("unknown folder in {} area; needs operator review", unknown.area),
            );
        }

        summary
    }

    /// Rename every opportunity folder to its canonical name, optionally
    /// filtered to one opportunity number.
    pub async fn rename_all(&self, dry_run: bool, filter: Option<&str>) -> BatchSummary {
        let mut summary = BatchSummary::new(dry_run);

        let opportunities = match self.repository.list_opportunities().await {
            Ok(opportunities) => opportunities,
            Err(err) => {
                error!(error = %err, "failed to list opportunities for rename pass");
                summary.record_error("*", ActionKind::Rename, err.to_string());
                return summary;
            }
        };

        for opportunity in opportunities
            .iter()
            .filter(|o| filter.map_or(true, |n| o.opportunity_number == n))
        {
            let number = opportunity.opportunity_number.as_str();
            match self.rename_to_canonical(opportunity, dry_run).await {
                Ok(RenameOutcome::AlreadyCorrect) => {
                    summary.record_skip(number, ActionKind::Rename, "already correct");
                }
                Ok(RenameOutcome::Renamed { from, to }) => {
                    summary.record_success(number, ActionKind::Rename, format!("{from} -> {to}"));
                }
                Err(err) => summary.record_error(number, ActionKind::Rename, err.to_string()),
            }
        }

        summary
    }

    pub(crate) fn repository(&self) -> &Arc<dyn OpportunityRepository> {
        &self.repository
    }

    async fn load_opportunity(&self, number: &str) -> Result<Opportunity> {
        self.repository.get_opportunity(number).await?.ok_or_else(|| {
            LabTrackError::NotFound(format!("no opportunity record for {number}"))
        })
    }
}

/// Metadata columns mirrored onto the remote listItem after a rename.
pub(crate) fn metadata_fields(opportunity: &Opportunity) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    if let Some(customer) = &opportunity.customer {
        fields.insert(FIELD_CUSTOMER.to_string(), customer.clone());
    }
    if let Some(rsm) = &opportunity.rsm {
        fields.insert(FIELD_RSM.to_string(), rsm.clone());
    }
    if let Some(description) = &opportunity.description {
        fields.insert(FIELD_DESCRIPTION.to_string(), description.clone());
    }
    fields
}

/// Run one named saga step, logging the step boundary so a failed chain
/// reports exactly where it stopped.
async fn saga_step<F, T>(step: &'static str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    debug!(step, "running saga step");
    fut.await.map_err(|err| {
        error!(step, error = %err, "saga step failed; chain aborted");
        err
    })
}
