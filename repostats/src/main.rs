//! # repostats
//!
//! A CLI tool that reports line and size statistics per file type for a
//! directory tree.
//!
//! ## Overview
//!
//! repostats is built on top of repostatslib. It scans a directory, skipping
//! hidden entries, symbolic links, `.gitignore`d paths and binary files, and
//! prints how many files and lines each extension accounts for.
//!
//! ## Usage
//!
//! ```bash
//! # Scan the current directory
//! repostats
//!
//! # One-line summary
//! repostats ~/src/project --output status
//!
//! # Markdown table, excluding vendored code
//! repostats . --output markdown --exclude "vendor/**"
//!
//! # Count on 8 worker threads and log skipped files
//! repostats . --jobs 8 -vvv
//! ```

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use repostatslib::{scan, BinaryExtensions, FilterConfig, Report, ScanOptions, DEFAULT_IGNORE_FILE};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod render;

use render::{OutputFormat, OutputMode, FAILED_STATUS, IDLE_STATUS, OUTPUT_FORMATS};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("repostats")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Per-file-type line and size statistics for a directory tree")
        .arg(
            Arg::new("path")
                .help("Directory to scan (defaults to the current directory)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(OUTPUT_FORMATS)
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .action(ArgAction::Append)
                .help("Only count files matching glob pattern"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern"),
        )
        .arg(
            Arg::new("binary-ext")
                .short('b')
                .long("binary-ext")
                .action(ArgAction::Append)
                .help("Treat files with this extension as binary (can be specified multiple times)"),
        )
        .arg(
            Arg::new("ignore-file")
                .long("ignore-file")
                .default_value(DEFAULT_IGNORE_FILE)
                .help("Name of the ignore-rules file read from the root"),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .value_parser(value_parser!(usize))
                .help("Count files on N worker threads"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log progress to stderr (-v info, -vv debug, -vvv trace)"),
        )
}

/// Install the stderr logger. `RUST_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> Result<FilterConfig, anyhow::Error> {
    let mut filter = FilterConfig::new();

    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    Ok(filter)
}

/// Build scan options from matches
fn build_options(matches: &ArgMatches) -> Result<ScanOptions, anyhow::Error> {
    let binary_extensions = matches
        .get_many::<String>("binary-ext")
        .map(|exts| exts.fold(BinaryExtensions::default(), |set, ext| set.with(ext)))
        .unwrap_or_default();

    let mut options = ScanOptions::new()
        .filter(build_filter(matches)?)
        .binary_extensions(binary_extensions);

    if let Some(name) = matches.get_one::<String>("ignore-file") {
        options = options.ignore_file(name.as_str());
    }
    if let Some(jobs) = matches.get_one::<usize>("jobs") {
        options = options.jobs(*jobs);
    }

    debug!(
        extension_gate = !options.binary_extensions.is_empty(),
        binary_extensions = options.binary_extensions.len(),
        binary = ?options.binary_extensions.iter().collect::<Vec<_>>(),
        filtered = !options.filter.is_empty(),
        "scan options"
    );

    Ok(options)
}

/// The explicit path, else the current directory, else nothing.
fn resolve_root(matches: &ArgMatches) -> Option<PathBuf> {
    matches
        .get_one::<String>("path")
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
}

fn print_report(report: &Report, format: OutputFormat, ignore_file: &str) -> ExitCode {
    match render::render(report, format, ignore_file, OutputMode::Auto) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    let format = matches
        .get_one::<String>("output")
        .and_then(|name| OutputFormat::from_name(name))
        .unwrap_or(OutputFormat::Table);

    let options = match build_options(&matches) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let root = resolve_root(&matches);
    debug!(root = ?root, "resolved scan root");

    match scan(root.as_deref(), &options) {
        Ok(report) => {
            info!(
                files = report.total_files,
                lines = report.total_lines,
                bytes = report.total_size_bytes(),
                empty = report.is_empty(),
                "report ready"
            );
            print_report(&report, format, &options.ignore_file)
        }
        Err(e) if e.is_no_root() => {
            println!("{}", IDLE_STATUS);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", FAILED_STATUS);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
