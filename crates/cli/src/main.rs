//! LabTrack reconciliation CLI.
//!
//! Run with: `labtrack <check|fix|rename|migrate> [--dry-run] [--opportunity N]`
//!
//! This is an operator-facing tool, so `println!` and `eprintln!` are
//! intentionally used for user-facing output; structured logging still goes
//! through `tracing` (control it with `RUST_LOG`).

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod commands;
mod context;

use std::env;
use std::process::ExitCode;

use labtrack_domain::Result;
use tracing_subscriber::EnvFilter;

use crate::context::AppContext;

struct CliArgs {
    command: String,
    dry_run: bool,
    opportunity: Option<String>,
}

impl CliArgs {
    fn parse(mut args: env::Args) -> std::result::Result<Self, String> {
        args.next(); // program name

        let command = match args.next() {
            Some(c) => c,
            None => return Err("missing command".to_string()),
        };

        let mut dry_run = false;
        let mut opportunity = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--dry-run" => dry_run = true,
                "--opportunity" => {
                    opportunity = Some(
                        args.next()
                            .ok_or_else(|| "--opportunity requires a value".to_string())?,
                    );
                }
                unknown => return Err(format!("unknown argument: {unknown}")),
            }
        }

        Ok(Self { command, dry_run, opportunity })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = match CliArgs::parse(env::args()) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            eprintln!();
            print_help();
            return ExitCode::FAILURE;
        }
    };

    if args.command == "help" {
        print_help();
        return ExitCode::SUCCESS;
    }

    let config = match labtrack_infra::config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let ctx = match AppContext::new(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Failed to initialise: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.dry_run {
        println!("=== DRY RUN: no remote or database changes will be made ===");
    }

    match run(&ctx, &args).await {
        Ok(clean) => {
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Dispatch one command. Returns `Ok(true)` when the run left (or found)
/// nothing to fix, which maps to exit code 0.
async fn run(ctx: &AppContext, args: &CliArgs) -> Result<bool> {
    let filter = args.opportunity.as_deref();

    match args.command.as_str() {
        "check" => {
            let report = commands::check(ctx, filter).await?;
            Ok(report.is_clean())
        }
        "fix" => {
            let (report, summary) = commands::fix(ctx, args.dry_run, filter).await?;
            Ok(fix_left_nothing_to_do(&report, &summary, args.dry_run))
        }
        "rename" => {
            let summary = commands::rename(ctx, args.dry_run, filter).await;
            Ok(!summary.has_errors())
        }
        "migrate" => {
            let summary = commands::migrate(ctx, args.dry_run, filter).await;
            Ok(!summary.has_errors())
        }
        unknown => {
            eprintln!("Unknown command: {unknown}");
            eprintln!();
            print_help();
            Ok(false)
        }
    }
}

/// Exit policy for the fix command. A dry run changes nothing, so it is
/// only "clean" when the check found no issues at all; a live run is clean
/// when every action succeeded. Missing and unknown folders are only
/// surfaced, never fixed, and keep the exit code non-zero either way so
/// operators notice.
fn fix_left_nothing_to_do(
    report: &labtrack_core::IssueReport,
    summary: &labtrack_core::BatchSummary,
    dry_run: bool,
) -> bool {
    if dry_run {
        return report.is_clean();
    }
    !summary.has_errors()
        && report.missing_from_remote.is_empty()
        && report.unknown_folders.is_empty()
}

fn print_help() {
    println!("LabTrack folder reconciliation");
    println!();
    println!("USAGE:");
    println!("    labtrack <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    check      Compare the database against the remote folder tree");
    println!("    fix        Run check, then apply corrective actions");
    println!("    rename     Rename opportunity folders to their canonical names");
    println!("    migrate    Rename digit-only legacy archive folders");
    println!("    help       Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --dry-run            Report what would change without changing it");
    println!("    --opportunity <N>    Restrict the command to one opportunity number");
    println!();
    println!("Exit code 0 means no issues were found (or everything was fixed).");
}
