//! Command-line interface for aicat.
//!
//! Concatenates the text files of a directory tree into `<directory>/ai-context.txt`.

use aicat::{AicatBuilder, AicatOptions, AicatReport, BinaryDetection, aicat_with, split_list};
use clap::Parser;
use std::path::PathBuf;
use std::process::exit;

/// aicat — concatenate text files from a directory tree, filtering by extension and
/// excluding subdirectories
#[derive(Parser)]
#[command(name = "aicat", version, about, long_about = None)]
struct Cli {
    /// Root directory to search
    directory: PathBuf,

    /// Comma-separated list of file extensions to include (e.g. cpp,h,txt)
    #[arg(short = 't', long)]
    types: Option<String>,

    /// Comma-separated list of subdirectories (relative to root) to exclude
    #[arg(short = 's', long)]
    exclude: Option<String>,

    /// Glob patterns, relative to root, of files to skip (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Binary detection strategy
    #[arg(long, default_value = "simple", value_parser = parse_binary_detection)]
    binary_detection: BinaryDetection,

    /// Follow symlinked directories
    #[arg(long)]
    follow_links: bool,

    /// Print a JSON report of the run after completion
    #[arg(long)]
    report: bool,

    /// Log pipeline decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

/// Empty values behave as if the flag was not given.
fn list_arg(value: Option<String>) -> Vec<String> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| split_list(&v))
        .unwrap_or_default()
}

impl Cli {
    fn into_options(self) -> (AicatOptions, bool) {
        let options = AicatBuilder::new(self.directory)
            .types(list_arg(self.types))
            .exclude(list_arg(self.exclude))
            .ignore_patterns(self.ignore_patterns)
            .binary_detection(self.binary_detection)
            .follow_links(self.follow_links)
            .build();
        (options, self.report)
    }
}

#[cfg(feature = "logging")]
fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(not(feature = "logging"))]
fn init_logging(_verbose: bool) {}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let (options, print_report) = cli.into_options();

    match aicat_with(options, |diagnostic| println!("{}", diagnostic)) {
        Ok(report) => finish(&report, print_report),
        Err(e) => {
            println!("Error: {}", e);
            exit(1);
        }
    }
}

fn finish(report: &AicatReport, print_report: bool) {
    println!(
        "Concatenation completed. Output saved to {}",
        report.output.display()
    );

    if print_report {
        let json = serde_json::to_string_pretty(report).unwrap_or_else(|e| {
            eprintln!("JSON serialization error: {}", e);
            exit(1);
        });
        println!("{}", json);
    }
}
