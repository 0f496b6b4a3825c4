//! Command-line interface for dirsnap.
//!
//! Scans a directory, writes the snapshot as JSON and prints a short summary.

use clap::{Parser, ValueEnum};
use dirsnap::{
    BinaryDetection, DEFAULT_IGNORE_PATTERNS, DEFAULT_OUTPUT_NAME, EntryFilter, Snapshot,
    SnapshotBuilder, SnapshotError, SnapshotOptions, output, render_structure, snapshot,
};
use std::path::{Path, PathBuf};
use std::process::exit;
use std::time::Instant;

/// Generate a directory snapshot for LLM analysis.
#[derive(Parser)]
#[command(name = "dirsnap", version, about, long_about = None)]
struct Cli {
    /// Input directory
    #[arg(short, long, default_value = ".")]
    input: PathBuf,

    /// Output JSON file name
    #[arg(short, long, default_value = DEFAULT_OUTPUT_NAME)]
    output: PathBuf,

    /// Patterns of files/folders to ignore (supports wildcards); replaces the defaults,
    /// and a repeated flag replaces the earlier one
    #[arg(
        long = "ignore",
        num_args = 1..,
        default_values = DEFAULT_IGNORE_PATTERNS,
        overrides_with = "ignore_patterns"
    )]
    ignore_patterns: Vec<String>,

    /// Maximum number of content bytes read per file
    #[arg(long, default_value_t = dirsnap::DEFAULT_MAX_SIZE)]
    max_size: u64,

    /// Exclude file contents from the snapshot
    #[arg(long)]
    no_content: bool,

    /// Display only the file structure and exit
    #[arg(long)]
    structure_only: bool,

    /// Exclude file structure from the snapshot
    #[arg(long)]
    no_structure: bool,

    /// Binary detection strategy
    #[arg(long, value_enum, default_value_t = Detection::Simple)]
    binary_detection: Detection,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Detection {
    Simple,
    Accurate,
    None,
}

impl From<Detection> for BinaryDetection {
    fn from(d: Detection) -> Self {
        match d {
            Detection::Simple => BinaryDetection::Simple,
            Detection::Accurate => BinaryDetection::Accurate,
            Detection::None => BinaryDetection::None,
        }
    }
}

impl Cli {
    fn to_options(&self) -> SnapshotOptions {
        let mut builder = SnapshotBuilder::new(&self.input)
            .ignore_patterns(self.ignore_patterns.clone())
            .include_content(!self.no_content)
            .max_size(self.max_size)
            .include_structure(!self.no_structure)
            .binary_detection(self.binary_detection.into())
            .exclude_name(DEFAULT_OUTPUT_NAME);
        if let Some(name) = file_name(&self.output) {
            builder = builder.exclude_name(name);
        }
        for name in program_names() {
            builder = builder.exclude_name(name);
        }
        builder.build()
    }
}

/// Basenames under which the running program may appear in the scanned tree.
fn program_names() -> Vec<String> {
    let mut names = Vec::new();
    if let Some(name) = std::env::args_os().next().and_then(|a| file_name(Path::new(&a))) {
        names.push(name);
    }
    if let Some(name) = std::env::current_exe().ok().and_then(|p| file_name(&p)) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

#[cfg(feature = "logging")]
fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn main() {
    #[cfg(feature = "logging")]
    init_logging();

    let cli = Cli::parse();
    let options = cli.to_options();

    let result = if cli.structure_only {
        run_structure_only(&options)
    } else {
        run_normal(options, &cli.output)
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

fn run_structure_only(options: &SnapshotOptions) -> Result<(), SnapshotError> {
    let filter = EntryFilter::new(&options.ignore_patterns, options.excluded_names.iter().cloned())?;
    println!("{}", render_structure(&options.root, &filter)?);
    Ok(())
}

fn run_normal(options: SnapshotOptions, output_path: &Path) -> Result<(), SnapshotError> {
    let start = Instant::now();
    let result = snapshot(options)?;
    output::write_snapshot(&result, output_path)?;
    print_summary(&result, start.elapsed().as_secs_f64(), output_path);
    Ok(())
}

fn print_summary(result: &Snapshot, elapsed: f64, output_path: &Path) {
    println!("Snapshot generated in {:.2} seconds.", elapsed);
    println!("Total files processed: {}", result.files.len());
    if !result.errors.is_empty() {
        println!("Errors encountered: {}", result.errors.len());
    }
    println!("Output written to: {}", output_path.display());
    if let Some(structure) = &result.file_structure {
        println!("\nFile Structure:");
        println!("{}", structure);
    }
}
