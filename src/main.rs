//! dirscope - Directory size scanner and report generator.
//!
//! Usage:
//!   dirscope scan [PATH]         Scan and show the size tree
//!   dirscope top [PATH]          List the largest files
//!   dirscope extensions [PATH]   Show bytes per file extension
//!   dirscope find [PATH]         Filter the tree by name and depth
//!   dirscope export [PATH]       Write a CSV, JSON, text or HTML report
//!   dirscope --help              Show help

use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use dirscope_analyze::NodeFilter;
use dirscope_core::{
    DEFAULT_TOP_FILES, MAX_TOP_FILES, Node, ScanConfig, ScanReport, human_size, percent_of,
};
use dirscope_report::{
    ExportOptions, ReportFormat, bundle_path, bundle_zip, default_report_stem, export,
    extension_rows,
};
use dirscope_scan::{ProgressSnapshot, ScanController, ScanPhase};

#[derive(Parser)]
#[command(
    name = "dirscope",
    version,
    about = "Directory size scanner with CSV, JSON, text and HTML reports",
    long_about = "dirscope walks a directory tree, sums sizes bottom-up and shows where \
                  the space goes: per directory, per extension and per file. \
                  Symbolic links are never followed: a link counts as a file \
                  holding its own length.\n\n\
                  Reports can be exported as CSV, JSON, plain text or a single \
                  interactive HTML page."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every command that scans.
#[derive(clap::Args)]
struct ScanArgs {
    /// Path to scan. Symlinks are listed with their own size and never followed
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Threads for the entry-count pass (0 = auto)
    #[arg(long, default_value = "0")]
    threads: usize,

    /// Skip the entry-count pass (progress then shows entries only)
    #[arg(long)]
    no_count: bool,

    /// Hide the progress line
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Scan and show the size tree
    Scan {
        #[command(flatten)]
        scan: ScanArgs,

        /// Maximum depth to display
        #[arg(short, long, default_value = "3")]
        depth: u32,

        /// Show all levels (no depth limit on display)
        #[arg(short, long)]
        all: bool,

        /// Number of largest entries to show per directory
        #[arg(short = 'n', long, default_value = "10")]
        top: usize,
    },

    /// List the largest files
    Top {
        #[command(flatten)]
        scan: ScanArgs,

        /// Number of files to list (at most 100)
        #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_FILES)]
        count: usize,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show bytes per file extension
    Extensions {
        #[command(flatten)]
        scan: ScanArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the nodes matching a name and depth filter, with their ancestors
    Find {
        #[command(flatten)]
        scan: ScanArgs,

        /// Case-insensitive substring of the name
        #[arg(long)]
        name: Option<String>,

        /// Deepest level a match may sit at
        #[arg(long)]
        max_depth: Option<u32>,
    },

    /// Export a report
    Export {
        #[command(flatten)]
        scan: ScanArgs,

        /// Base output path (defaults to dirscope_<timestamp>_<root>.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format: csv, json, txt or html (defaults to the output suffix)
        #[arg(short, long, value_parser = parse_report_format)]
        format: Option<ReportFormat>,

        /// Leave out tree nodes deeper than this level
        #[arg(long)]
        max_depth: Option<u32>,

        /// Also bundle the written files into a zip archive
        #[arg(long)]
        zip: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Scan {
            scan,
            depth,
            all,
            top,
        } => {
            let report = run_scan(&scan, DEFAULT_TOP_FILES)?;
            print_summary(&report);
            print_node(report.root(), 0, if all { u32::MAX } else { depth }, top, report.root().size);
            if report.tree.has_warnings() {
                println!();
                println!("{} path(s) could not be read", report.tree.warnings.len());
            }
        }
        Command::Top {
            scan,
            count,
            format,
        } => {
            let report = run_scan(&scan, count.clamp(1, MAX_TOP_FILES))?;
            match format {
                OutputFormat::Text => {
                    for (i, file) in report.top_files.iter().enumerate() {
                        println!(
                            "{:>4}. {:>10} {:>6.2}%  {}",
                            i + 1,
                            file.size_human,
                            file.percent_total,
                            file.path
                        );
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&report.top_files)?);
                }
            }
        }
        Command::Extensions { scan, format } => {
            let report = run_scan(&scan, DEFAULT_TOP_FILES)?;
            let rows = extension_rows(report.extensions());
            match format {
                OutputFormat::Text => {
                    for row in &rows {
                        println!(
                            "{:<20} {:>10} {:>6.2}% {}",
                            row.extension,
                            row.size_human,
                            row.percent_total,
                            make_bar(row.percent_total / 100.0, 20)
                        );
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                }
            }
        }
        Command::Find {
            scan,
            name,
            max_depth,
        } => {
            let report = run_scan(&scan, DEFAULT_TOP_FILES)?;
            let filter = NodeFilter {
                name_contains: name,
                max_depth,
            };
            let visible = filter.visible_nodes(report.root());
            if visible.is_empty() {
                println!("No matching entries.");
            }
            for node in visible {
                let marker = if filter.matches(node) { "*" } else { " " };
                println!(
                    "{marker} {}{} ({})",
                    "  ".repeat(node.level as usize),
                    node.name,
                    human_size(node.size)
                );
            }
        }
        Command::Export {
            scan,
            output,
            format,
            max_depth,
            zip,
        } => {
            let report = run_scan(&scan, DEFAULT_TOP_FILES)?;
            run_export(&report, output, format, max_depth, zip)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Scan in the background while drawing a progress line on stderr.
fn run_scan(args: &ScanArgs, top_files: usize) -> Result<ScanReport> {
    let config = ScanConfig::builder()
        .root(args.path.clone())
        .threads(args.threads)
        .count_entries(!args.no_count)
        .top_files(top_files)
        .build()
        .context("Invalid scan configuration")?;

    let mut controller = ScanController::new();
    controller
        .start(&config)
        .with_context(|| format!("Cannot scan {}", args.path.display()))?;

    let quiet = args.quiet;
    let report = controller.wait(config.poll_interval(), |snapshot| {
        if !quiet {
            draw_progress(snapshot);
        }
    });
    if !quiet {
        eprint!("\r{}\r", " ".repeat(60));
    }
    let report = report.context("Scan failed")?;

    if !quiet {
        eprintln!(
            "Scanned {} ({} files, {} directories) in {:.2}s",
            report.tree.root_path.display(),
            report.tree.stats.total_files,
            report.tree.stats.total_dirs,
            report.tree.scan_duration.as_secs_f64()
        );
    }
    Ok(report)
}

fn draw_progress(snapshot: &ProgressSnapshot) {
    let line = match snapshot.phase {
        ScanPhase::Counting => "Counting entries...".to_string(),
        _ => format!(
            "{} {:>5.1}% ({} / {})",
            make_bar(snapshot.percent / 100.0, 20),
            snapshot.percent,
            snapshot.current,
            snapshot.total
        ),
    };
    eprint!("\r{line:<60}");
    let _ = std::io::stderr().flush();
}

fn run_export(
    report: &ScanReport,
    output: Option<PathBuf>,
    format: Option<ReportFormat>,
    max_depth: Option<u32>,
    zip: bool,
) -> Result<()> {
    let now = Local::now();
    let base = output.unwrap_or_else(|| {
        let stem = default_report_stem(&report.root().name, &now);
        let ext = format.unwrap_or(ReportFormat::Csv).extension();
        PathBuf::from(format!("{stem}.{ext}"))
    });

    debug!(base = %base.display(), "Resolved export path");

    let options = ExportOptions {
        max_depth,
        generated_at: now,
    };
    let written = export(report, &base, format, &options)
        .with_context(|| format!("Export to {} failed", base.display()))?;

    println!("Report written:");
    for path in &written {
        println!("- {}", path.display());
    }

    if zip {
        let archive = bundle_path(&base);
        bundle_zip(&written, &archive).context("Cannot create zip bundle")?;
        println!("Bundle: {}", archive.display());
    }
    Ok(())
}

fn print_summary(report: &ScanReport) {
    let tree = &report.tree;
    println!();
    println!("{}", "─".repeat(60));
    println!(" {} - {}", tree.root_path.display(), human_size(tree.total_size()));
    println!(
        " {} files, {} directories",
        tree.stats.total_files, tree.stats.total_dirs
    );
    if tree.stats.denied_dirs > 0 {
        println!(" {} directories could not be listed", tree.stats.denied_dirs);
    }
    println!("{}", "─".repeat(60));
    println!();
}

/// Print a node and its largest children.
fn print_node(node: &Node, depth: u32, max_depth: u32, top_n: usize, root_size: u64) {
    let indent = "  ".repeat(depth as usize);
    let ratio = percent_of(node.size, root_size);
    let name = if depth == 0 {
        node.path.display().to_string()
    } else {
        node.name.to_string()
    };
    let suffix = match (node.is_dir(), node.access_denied) {
        (true, true) => "/ (access denied)",
        (true, false) => "/",
        _ => "",
    };

    println!(
        "{}{}{:<40} {:>10} {:>5.1}% {}",
        indent,
        if node.is_dir() { "▼ " } else { "  " },
        truncate(&format!("{name}{suffix}"), 40),
        human_size(node.size),
        ratio,
        make_bar(ratio / 100.0, 10)
    );

    if node.is_dir() && depth < max_depth {
        let children = node.children_by_size();
        let remaining = children.len().saturating_sub(top_n);

        for child in children.into_iter().take(top_n) {
            print_node(child, depth + 1, max_depth, top_n, root_size);
        }

        if remaining > 0 {
            let indent = "  ".repeat((depth + 1) as usize);
            println!("{}  ... and {} more", indent, remaining);
        }
    }
}

/// Create a simple ASCII bar.
fn make_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0)) * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Truncate a string to at most `max_len` characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 1).collect();
        format!("{head}…")
    }
}

fn parse_report_format(s: &str) -> std::result::Result<ReportFormat, String> {
    s.parse()
        .map_err(|_| format!("unknown format '{s}' (expected csv, json, txt or html)"))
}
