// WHY: Concurrent catalog audit with per-file stats, optional in-place fixes
// Per-file failures are recorded unless fail_fast asks for an immediate abort

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::catalog::{audit_catalog, CatalogKind, CatalogReport, Violation};
use crate::discovery::{discover_catalogs, DiscoveryConfig};
use crate::formatter::{self, TitleCaseFormatter};

/// Configuration for an audit run
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Directory to scan for catalogs
    pub root_dir: PathBuf,
    /// Rewrite non-canonical catalogs in place
    pub write: bool,
    /// Abort on the first unreadable or malformed catalog
    pub fail_fast: bool,
    /// Show a progress bar on stderr
    pub show_progress: bool,
    /// Maximum number of catalogs processed at once
    pub concurrency: usize,
    /// Where to write the JSON summary, if anywhere
    pub stats_out: Option<PathBuf>,
    pub discovery: DiscoveryConfig,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            write: false,
            fail_fast: false,
            show_progress: false,
            concurrency: num_cpus::get().max(1),
            stats_out: None,
            discovery: DiscoveryConfig::default(),
        }
    }
}

/// Outcome for a single catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Clean,
    Violations,
    Fixed,
    Failed,
}

/// Per-file audit statistics
#[derive(Debug, Clone, Serialize)]
pub struct FileStats {
    /// File path relative to the root directory
    pub path: String,
    pub kind: Option<CatalogKind>,
    pub strings_checked: u64,
    pub violations: Vec<Violation>,
    pub status: FileStatus,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Error message if processing failed
    pub error: Option<String>,
}

/// Totals plus per-file stats for a whole run
#[derive(Debug, Clone, Serialize)]
pub struct AuditSummary {
    pub root_dir: String,
    pub files_scanned: u64,
    pub files_failed: u64,
    pub files_rewritten: u64,
    pub strings_checked: u64,
    pub violations_found: u64,
    pub run_time_ms: u64,
    pub files: Vec<FileStats>,
}

impl AuditSummary {
    /// Violations still present on disk after the run
    pub fn outstanding_violations(&self) -> u64 {
        self.files
            .iter()
            .filter(|f| f.status == FileStatus::Violations)
            .map(|f| f.violations.len() as u64)
            .sum()
    }

    /// Write the summary as pretty JSON
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write stats file {}", path.display()))?;
        Ok(())
    }
}

/// Discover, audit and optionally fix every catalog under `config.root_dir`
pub async fn run_audit(config: &AuditConfig) -> Result<AuditSummary> {
    let run_start = Instant::now();
    let mut catalogs = discover_catalogs(&config.root_dir, &config.discovery).await?;
    if let Some(stats_out) = &config.stats_out {
        catalogs = exclude_stats_file(catalogs, stats_out).await;
    }
    info!("Auditing {} catalogs under {}", catalogs.len(), config.root_dir.display());

    let progress = if config.show_progress {
        let bar = ProgressBar::new(catalogs.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")?.progress_chars("=> "),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let formatter = formatter::shared();
    let mut results = stream::iter(catalogs)
        .map(|path| audit_one(path, config, formatter))
        .buffer_unordered(config.concurrency.max(1));

    let mut files = Vec::new();
    while let Some(stats) = results.next().await {
        progress.inc(1);
        if stats.status == FileStatus::Failed && config.fail_fast {
            progress.abandon();
            anyhow::bail!(
                "Aborting audit: {}",
                stats.error.as_deref().unwrap_or("catalog failed")
            );
        }
        files.push(stats);
    }
    progress.finish_and_clear();

    files.sort_by(|a, b| a.path.cmp(&b.path));
    let summary = AuditSummary {
        root_dir: config.root_dir.display().to_string(),
        files_scanned: files.len() as u64,
        files_failed: count_status(&files, FileStatus::Failed),
        files_rewritten: count_status(&files, FileStatus::Fixed),
        strings_checked: files.iter().map(|f| f.strings_checked).sum(),
        violations_found: files.iter().map(|f| f.violations.len() as u64).sum(),
        run_time_ms: run_start.elapsed().as_millis() as u64,
        files,
    };

    info!(
        "Audit complete: {} files, {} strings, {} violations, {} rewritten, {} failed",
        summary.files_scanned,
        summary.strings_checked,
        summary.violations_found,
        summary.files_rewritten,
        summary.files_failed
    );

    if let Some(stats_out) = &config.stats_out {
        summary.save(stats_out).await?;
        info!("Wrote audit stats to {}", stats_out.display());
    }
    Ok(summary)
}

async fn audit_one(path: PathBuf, config: &AuditConfig, formatter: &TitleCaseFormatter) -> FileStats {
    let start = Instant::now();
    let relative = path
        .strip_prefix(&config.root_dir)
        .unwrap_or(path.as_path())
        .display()
        .to_string();

    let outcome = match audit_catalog(&path, formatter).await {
        Ok(report) => apply_fixes(report, config.write).await,
        Err(e) => Err(e),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    match outcome {
        Ok((report, status)) => FileStats {
            path: relative,
            kind: Some(report.kind),
            strings_checked: report.strings_checked,
            violations: report.violations,
            status,
            processing_time_ms: elapsed,
            error: None,
        },
        Err(e) => {
            warn!("Failed to audit {}: {:#}", path.display(), e);
            FileStats {
                path: relative,
                kind: None,
                strings_checked: 0,
                violations: Vec::new(),
                status: FileStatus::Failed,
                processing_time_ms: elapsed,
                error: Some(format!("{e:#}")),
            }
        }
    }
}

async fn apply_fixes(report: CatalogReport, write: bool) -> Result<(CatalogReport, FileStatus)> {
    if report.rewritten.is_none() {
        return Ok((report, FileStatus::Clean));
    }
    if !write {
        return Ok((report, FileStatus::Violations));
    }

    if let Some(rewritten) = &report.rewritten {
        fs::write(&report.path, rewritten)
            .await
            .with_context(|| format!("Failed to rewrite catalog {}", report.path.display()))?;
    }
    info!("Rewrote {} ({} strings fixed)", report.path.display(), report.violations.len());
    Ok((report, FileStatus::Fixed))
}

/// Drop the stats report from the catalog list when it lives under the root
async fn exclude_stats_file(catalogs: Vec<PathBuf>, stats_out: &Path) -> Vec<PathBuf> {
    let Some(target) = resolve_path(stats_out).await else {
        return catalogs;
    };

    let mut kept = Vec::with_capacity(catalogs.len());
    for path in catalogs {
        if resolve_path(&path).await.as_ref() == Some(&target) {
            debug!("Skipping stats file {}", path.display());
        } else {
            kept.push(path);
        }
    }
    kept
}

/// Canonical form of `path`; a file that does not exist yet resolves through its parent
async fn resolve_path(path: &Path) -> Option<PathBuf> {
    if let Ok(full) = fs::canonicalize(path).await {
        return Some(full);
    }
    let name = path.file_name()?;
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::canonicalize(parent).await.ok().map(|dir| dir.join(name))
}

fn count_status(files: &[FileStats], status: FileStatus) -> u64 {
    files.iter().filter(|f| f.status == status).count() as u64
}
