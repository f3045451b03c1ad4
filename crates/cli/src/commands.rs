//! Command implementations for the reconciliation CLI.
//!
//! Commands print human-facing output with `println!`; structured logging
//! underneath still goes through `tracing`.

use labtrack_core::reconcile::BatchSummary;
use labtrack_core::{IssueReport, MigrationDriver};
use labtrack_domain::{FolderArea, Result};
use tracing::info;

use crate::context::AppContext;

/// Run the consistency check and print the report. Returns the (possibly
/// filtered) report so the caller can derive the exit code.
pub async fn check(ctx: &AppContext, filter: Option<&str>) -> Result<IssueReport> {
    let opportunities = ctx.repository.list_opportunities().await?;
    let main_folders = ctx.reconciler.list_area(FolderArea::Main).await?;
    let archive_folders = ctx.reconciler.list_area(FolderArea::Archive).await?;

    info!(
        opportunities = opportunities.len(),
        main_folders = main_folders.len(),
        archive_folders = archive_folders.len(),
        "running consistency check"
    );

    let mut report = ctx.checker.check(&opportunities, &main_folders, &archive_folders).await?;
    if let Some(number) = filter {
        retain_opportunity(&mut report, number);
    }

    print_report(&report);
    Ok(report)
}

/// Check, then apply corrective actions for everything found.
pub async fn fix(
    ctx: &AppContext,
    dry_run: bool,
    filter: Option<&str>,
) -> Result<(IssueReport, BatchSummary)> {
    let report = check(ctx, filter).await?;
    if report.is_clean() {
        println!("Nothing to fix.");
        return Ok((report, BatchSummary::new(dry_run)));
    }

    let summary = ctx.reconciler.fix_report(&report, dry_run).await;
    print_summary("fix", &summary);
    Ok((report, summary))
}

/// Rename every opportunity folder to its canonical name.
pub async fn rename(ctx: &AppContext, dry_run: bool, filter: Option<&str>) -> BatchSummary {
    let summary = ctx.reconciler.rename_all(dry_run, filter).await;
    print_summary("rename", &summary);
    summary
}

/// Migrate digit-only legacy archive folder names to canonical names.
pub async fn migrate(ctx: &AppContext, dry_run: bool, filter: Option<&str>) -> BatchSummary {
    let driver = MigrationDriver::new(ctx.reconciler.clone());
    let summary = driver.migrate_legacy_archive_names(dry_run, filter).await;
    print_summary("migrate", &summary);
    summary
}

/// Drop everything from the report that concerns other opportunities.
fn retain_opportunity(report: &mut IssueReport, number: &str) {
    report.sample_count_mismatch.retain(|i| i.opportunity_number == number);
    report.main_should_archive.retain(|i| i.opportunity_number == number);
    report.archive_should_restore.retain(|i| i.opportunity_number == number);
    report.missing_from_remote.retain(|i| i.opportunity_number == number);
    report
        .unknown_folders
        .retain(|u| u.extracted_number.as_deref() == Some(number));
}

fn print_report(report: &IssueReport) {
    if report.is_clean() {
        println!("Consistency check passed: no issues found.");
        return;
    }

    println!("Consistency check found {} issue(s):", report.total_issues());

    for issue in &report.sample_count_mismatch {
        println!(
            "  [mismatch]  {}: mirror records {} sample(s), live count is {}",
            issue.opportunity_number, issue.recorded, issue.actual
        );
    }
    for issue in &report.main_should_archive {
        println!(
            "  [archive]   {}: no samples left; folder still in the main library",
            issue.opportunity_number
        );
    }
    for issue in &report.archive_should_restore {
        println!(
            "  [restore]   {}: has {} sample(s); folder sits in the archive",
            issue.opportunity_number, issue.sample_count
        );
    }
    for issue in &report.missing_from_remote {
        println!(
            "  [missing]   {}: no folder in either library",
            issue.opportunity_number
        );
    }
    for unknown in &report.unknown_folders {
        match &unknown.extracted_number {
            Some(number) => println!(
                "  [unknown]   \"{}\" ({} area): number {} has no opportunity record",
                unknown.folder.name, unknown.area, number
            ),
            None => println!(
                "  [unknown]   \"{}\" ({} area): name yields no opportunity number",
                unknown.folder.name, unknown.area
            ),
        }
    }
}

fn print_summary(command: &str, summary: &BatchSummary) {
    if summary.dry_run {
        println!("[dry-run] no changes were made");
    }
    for item in &summary.items {
        println!("  {item}");
    }
    println!(
        "{command}: {} succeeded, {} skipped, {} failed",
        summary.success, summary.skipped, summary.errors
    );
}
