//! Batch outcome accumulation
//!
//! Every corrective batch (fix, rename, migrate) iterates its items
//! independently: one item failing must never abort the rest. The summary
//! collects per-item outcomes plus the success/skip/error tri-count that
//! every run reports at the end.

use std::fmt;

use serde::Serialize;

/// What a batch item was trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SyncSampleIds,
    Archive,
    Restore,
    Rename,
    MigrateLegacyName,
}

/// Outcome of a single batch item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemStatus {
    /// The mutation happened, or would have in dry-run mode.
    Done { detail: String },
    /// Nothing to do; the target already matched the canonical state.
    Skipped { reason: String },
    /// The item failed; the batch continued past it.
    Failed { error: String },
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SyncSampleIds => "sync-sample-ids",
            Self::Archive => "archive",
            Self::Restore => "restore",
            Self::Rename => "rename",
            Self::MigrateLegacyName => "migrate-legacy-name",
        };
        f.write_str(name)
    }
}

/// One line of the per-item detail list.
#[derive(Debug, Clone, Serialize)]
pub struct ItemOutcome {
    /// Opportunity number or folder name the item acted on.
    pub target: String,
    pub action: ActionKind,
    #[serde(flatten)]
    pub status: ItemStatus,
}

impl fmt::Display for ItemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            ItemStatus::Done { detail } => {
                write!(f, "[{}] {}: {}", self.action, self.target, detail)
            }
            ItemStatus::Skipped { reason } => {
                write!(f, "[{}] {}: skipped ({})", self.action, self.target, reason)
            }
            ItemStatus::Failed { error } => {
                write!(f, "[{}] {}: FAILED ({})", self.action, self.target, error)
            }
        }
    }
}

/// Append-only accumulation of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub dry_run: bool,
    pub success: usize,
    pub skipped: usize,
    pub errors: usize,
    pub items: Vec<ItemOutcome>,
}

impl BatchSummary {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run, success: 0, skipped: 0, errors: 0, items: Vec::new() }
    }

    pub fn record_success(
        &mut self,
        target: impl Into<String>,
        action: ActionKind,
        detail: impl Into<String>,
    ) {
        self.success += 1;
        self.items.push(ItemOutcome {
            target: target.into(),
            action,
            status: ItemStatus::Done { detail: detail.into() },
        });
    }

    pub fn record_skip(
        &mut self,
        target: impl Into<String>,
        action: ActionKind,
        reason: impl Into<String>,
    ) {
        self.skipped += 1;
        self.items.push(ItemOutcome {
            target: target.into(),
            action,
            status: ItemStatus::Skipped { reason: reason.into() },
        });
    }

    pub fn record_error(
        &mut self,
        target: impl Into<String>,
        action: ActionKind,
        error: impl Into<String>,
    ) {
        self.errors += 1;
        self.items.push(ItemOutcome {
            target: target.into(),
            action,
            status: ItemStatus::Failed { error: error.into() },
        });
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Fold another summary into this one. Useful when independent
    /// per-opportunity passes run concurrently and are merged afterwards.
    pub fn merge(&mut self, other: Self) {
        self.success += other.success;
        self.skipped += other.skipped;
        self.errors += other.errors;
        self.items.extend(other.items);
    }
}
