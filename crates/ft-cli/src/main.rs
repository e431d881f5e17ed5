//! CLI entry point for the filetree walker.
//!
//! This binary walks a directory tree on the local file system and prints
//! what it found.
//!
//! # Usage
//!
//! ```bash
//! ftwalk [OPTIONS] <COMMAND>
//!
//! # Indented listing, two levels deep
//! ftwalk tree -L 2 ./src
//!
//! # Count entries, skipping unreadable ones
//! ftwalk count --keep-going /var/log
//!
//! # List files as JSON
//! ftwalk files --json .
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod tree;

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use ft_core::{Config, FailurePolicy, OutputFormat, WalkConfig};
use ft_walker::{
    AttributeReader, CountingVisitor, DirectoryEnumerator, FileCollector, LocalFs, TreeWalker,
    WalkStats,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::tree::{TreePrinter, render_text};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Walk a directory tree depth-first and report on it.
#[derive(Parser)]
#[command(name = "ftwalk", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file. Flags override its values.
    #[arg(short, long, global = true, env = "FTWALK_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Maximum depth to descend. Entries at this depth are not expanded.
    #[arg(short = 'L', long, global = true)]
    max_depth: Option<usize>,

    /// Follow symbolic links.
    #[arg(long, global = true)]
    follow_links: bool,

    /// Yield directory children in file system order instead of by name.
    #[arg(long, global = true)]
    unsorted: bool,

    /// Log unreadable entries and keep walking instead of failing.
    #[arg(short, long, global = true)]
    keep_going: bool,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print an indented listing of the tree.
    Tree {
        /// Directory to walk.
        #[arg(default_value = ".")]
        path: Utf8PathBuf,
    },

    /// Count directories, files and bytes.
    Count {
        /// Directory to walk.
        #[arg(default_value = ".")]
        path: Utf8PathBuf,
    },

    /// List every file below the path.
    Files {
        /// Directory to walk.
        #[arg(default_value = ".")]
        path: Utf8PathBuf,
    },
}

impl Commands {
    fn path(&self) -> &Utf8Path {
        match self {
            Self::Tree { path } | Self::Count { path } | Self::Files { path } => path,
        }
    }
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `warn` level by default so that
/// skipped entries are reported. Logs go to stderr.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(level)
    });

    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a [`Config`] from the configuration file and CLI flags.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be loaded.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if cli.max_depth.is_some() {
        config.walk.max_depth = cli.max_depth;
    }
    if cli.follow_links {
        config.walk.follow_links = true;
    }
    if cli.unsorted {
        config.walk.sort_entries = false;
    }
    if cli.keep_going {
        config.walk.on_failure = FailurePolicy::Skip;
    }
    if cli.json {
        config.output.format = OutputFormat::Json;
    }

    Ok(config)
}

/// Checks that the start path exists.
fn validate_root(path: &Utf8Path) -> color_eyre::Result<()> {
    if !path.exists() {
        return Err(color_eyre::eyre::eyre!("Path does not exist: {path}"));
    }
    Ok(())
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Walks `root` and renders the tree listing.
///
/// # Errors
///
/// Returns an error if an entry cannot be read under the propagate policy.
fn run_tree<S>(
    source: S,
    walk: &WalkConfig,
    format: OutputFormat,
    root: &Utf8Path,
) -> color_eyre::Result<String>
where
    S: AttributeReader + DirectoryEnumerator,
{
    let mut printer = TreePrinter::new(walk.on_failure);
    TreeWalker::from_config(source, walk).walk(root, &mut printer)?;

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(printer.entries())?),
        _ => Ok(render_text(printer.entries())),
    }
}

/// Walks `root` and renders entry totals.
///
/// # Errors
///
/// Returns an error if an entry cannot be read under the propagate policy.
fn run_count<S>(
    source: S,
    walk: &WalkConfig,
    format: OutputFormat,
    root: &Utf8Path,
) -> color_eyre::Result<String>
where
    S: AttributeReader + DirectoryEnumerator,
{
    let mut counter = CountingVisitor::new().with_policy(walk.on_failure);
    TreeWalker::from_config(source, walk).walk(root, &mut counter)?;
    let stats = counter.stats();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&stats)?),
        _ => Ok(format_stats(&stats)),
    }
}

/// Walks `root` and renders the list of files.
///
/// # Errors
///
/// Returns an error if an entry cannot be read under the propagate policy.
fn run_files<S>(
    source: S,
    walk: &WalkConfig,
    format: OutputFormat,
    root: &Utf8Path,
) -> color_eyre::Result<String>
where
    S: AttributeReader + DirectoryEnumerator,
{
    let mut collector = FileCollector::new().with_policy(walk.on_failure);
    TreeWalker::from_config(source, walk).walk(root, &mut collector)?;

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(collector.files())?),
        _ => {
            let mut output = String::new();
            for file in collector.files() {
                output.push_str(file.as_str());
                output.push('\n');
            }
            Ok(output)
        }
    }
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Formats walk totals as a short summary.
fn format_stats(stats: &WalkStats) -> String {
    format!(
        "directories: {}\nfiles:       {}\nbytes:       {}\nfailures:    {}\n",
        stats.directories, stats.files, stats.bytes, stats.failures
    )
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Merge configuration file and flags
    let config = build_config(&cli)?;
    let root = cli.command.path();
    validate_root(root)?;

    let source = LocalFs::from_config(&config.walk);
    let format = config.output.format;
    info!(root = %root, max_depth = ?config.walk.max_depth, "walking");

    // 5. Route to appropriate command
    let output = match &cli.command {
        Commands::Tree { .. } => run_tree(source, &config.walk, format, root)?,
        Commands::Count { .. } => run_count(source, &config.walk, format, root)?,
        Commands::Files { .. } => run_files(source, &config.walk, format, root)?,
    };

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write!(handle, "{output}")?;
    if format == OutputFormat::Json {
        writeln!(handle)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_walker::MemoryFs;

    fn sample() -> MemoryFs {
        MemoryFs::new()
            .with_file("r/a.txt", 3)
            .with_file("r/sub/b.txt", 4)
            .with_file("r/sub/deep/c.txt", 5)
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ftwalk").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_flags_override_defaults() {
        let cli = parse(&["-L", "2", "--unsorted", "--keep-going", "--json", "count", "/tmp"]);
        let config = build_config(&cli).unwrap();

        assert_eq!(config.walk.max_depth, Some(2));
        assert!(!config.walk.sort_entries);
        assert!(!config.walk.follow_links);
        assert_eq!(config.walk.on_failure, FailurePolicy::Skip);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(cli.command.path().as_str(), "/tmp");
    }

    #[test]
    fn test_cli_default_path() {
        let cli = parse(&["files"]);
        assert_eq!(cli.command.path().as_str(), ".");
        assert_eq!(build_config(&cli).unwrap(), Config::default());
    }

    #[test]
    fn test_missing_config_file() {
        let cli = parse(&["--config", "/nonexistent/ftwalk.json", "tree"]);
        assert!(build_config(&cli).is_err());
    }

    #[test]
    fn test_run_count_text() {
        let fs = sample();
        let output = run_count(
            &fs,
            &WalkConfig::default(),
            OutputFormat::Text,
            Utf8Path::new("r"),
        )
        .unwrap();

        insta::assert_snapshot!(output, @r"
        directories: 3
        files:       3
        bytes:       12
        failures:    0
        ");
    }

    #[test]
    fn test_run_files_respects_depth() {
        let fs = sample();
        let walk = WalkConfig {
            max_depth: Some(2),
            ..WalkConfig::default()
        };
        let output = run_files(&fs, &walk, OutputFormat::Text, Utf8Path::new("r")).unwrap();
        assert_eq!(output, "r/a.txt\nr/sub/b.txt\n");
    }

    #[test]
    fn test_run_files_json() {
        let fs = sample();
        let output = run_files(
            &fs,
            &WalkConfig::default(),
            OutputFormat::Json,
            Utf8Path::new("r/sub/deep"),
        )
        .unwrap();
        let files: Vec<String> = serde_json::from_str(&output).unwrap();
        assert_eq!(files, ["r/sub/deep/c.txt"]);
    }

    #[test]
    fn test_run_tree_propagates_failure() {
        let fs = sample().fail_open("r/sub");
        let result = run_tree(
            &fs,
            &WalkConfig::default(),
            OutputFormat::Text,
            Utf8Path::new("r"),
        );
        assert!(result.is_err());
        assert_eq!(fs.open_streams(), 0);
    }

    #[test]
    fn test_run_tree_keep_going() {
        let fs = sample().fail_open("r/sub");
        let walk = WalkConfig {
            on_failure: FailurePolicy::Skip,
            ..WalkConfig::default()
        };
        let output = run_tree(&fs, &walk, OutputFormat::Text, Utf8Path::new("r")).unwrap();
        assert!(output.starts_with("r/\n  a.txt\n  sub ["));
    }
}
