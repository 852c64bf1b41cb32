use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use poker_typography::{run_audit, AuditConfig, DiscoveryConfig, FileStatus, FormatOptions};

#[derive(Parser, Debug)]
#[command(name = "typography")]
#[command(about = "Enforce canonical capitalization of poker terminology in UI strings")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Format text given as arguments, or each line of stdin
    Format {
        /// Strings to format; reads stdin when empty
        text: Vec<String>,

        /// Echo input unchanged
        #[arg(long)]
        raw: bool,
    },
    /// Check every string catalog (*.txt, *.json) under a directory
    Audit {
        /// Root directory to scan
        root_dir: PathBuf,

        /// Rewrite non-canonical catalogs in place
        #[arg(long)]
        write: bool,

        /// Abort on first unreadable or malformed catalog
        #[arg(long)]
        fail_fast: bool,

        /// Suppress console progress bar
        #[arg(long)]
        no_progress: bool,

        /// Do not honour .gitignore / .ignore files
        #[arg(long)]
        no_ignore: bool,

        /// Catalog file extensions to scan
        #[arg(long = "ext", value_delimiter = ',', default_value = "txt,json")]
        extensions: Vec<String>,

        /// Stats output file path
        #[arg(long, default_value = "run_stats.json")]
        stats_out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // WHY: logs go to stderr so formatted output on stdout stays pipeable
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    match args.command {
        Command::Format { text, raw } => run_format(text, FormatOptions { raw }),
        Command::Audit {
            root_dir,
            write,
            fail_fast,
            no_progress,
            no_ignore,
            extensions,
            stats_out,
        } => {
            let config = AuditConfig {
                root_dir,
                write,
                fail_fast,
                show_progress: !no_progress,
                stats_out: Some(stats_out),
                discovery: DiscoveryConfig {
                    fail_fast,
                    respect_ignore: !no_ignore,
                    extensions,
                },
                ..Default::default()
            };
            run_audit_command(config).await
        }
    }
}

fn run_format(text: Vec<String>, options: FormatOptions) -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut buffer = String::new();

    if text.is_empty() {
        for line in io::stdin().lock().lines() {
            poker_typography::format_into(&line?, options, &mut buffer);
            writeln!(out, "{buffer}")?;
        }
    } else {
        for item in &text {
            poker_typography::format_into(item, options, &mut buffer);
            writeln!(out, "{buffer}")?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_audit_command(config: AuditConfig) -> Result<ExitCode> {
    let summary = run_audit(&config).await?;

    for file in &summary.files {
        if let Some(error) = &file.error {
            println!("{}: error: {}", file.path, error);
            continue;
        }
        let verb = if file.status == FileStatus::Fixed { "fixed" } else { "->" };
        for violation in &file.violations {
            println!(
                "{}:{}: {:?} {} {:?}",
                file.path, violation.location, violation.original, verb, violation.canonical
            );
        }
    }

    println!("typography v{} - audit complete", env!("CARGO_PKG_VERSION"));
    println!("  Catalogs scanned: {}", summary.files_scanned);
    println!("  Strings checked: {}", summary.strings_checked);
    println!("  Violations found: {}", summary.violations_found);
    if summary.files_rewritten > 0 {
        println!("  Catalogs rewritten: {}", summary.files_rewritten);
    }
    if summary.files_failed > 0 {
        println!("  Catalogs failed: {}", summary.files_failed);
    }

    if summary.outstanding_violations() > 0 || summary.files_failed > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
