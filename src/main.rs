//! CLI entry point for dirwalk

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::builder::TypedValueParser as _;
use clap::{Parser, ValueEnum};
use regex::Regex;

use dirwalk::{
    CollectorConfig, ErrorPolicy, SummaryCollector, WalkConfig, Walker, print_human, print_json,
    print_plain,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Check if stdout is a TTY
            std::io::stdout().is_terminal()
        }
    }
}

/// What to do when a filesystem operation fails mid-walk
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ErrorMode {
    /// Tally the failure, warn on stderr, and keep walking
    #[default]
    Skip,
    /// Stop immediately and exit nonzero
    Abort,
}

impl From<ErrorMode> for ErrorPolicy {
    fn from(mode: ErrorMode) -> Self {
        match mode {
            ErrorMode::Skip => ErrorPolicy::Skip,
            ErrorMode::Abort => ErrorPolicy::Abort,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dirwalk")]
#[command(about = "Walk a directory tree, counting entries and summing regular-file sizes")]
#[command(version)]
struct Args {
    /// Root to walk (a directory, or any single entry)
    // The stock PathBuf parser rejects empty values at the clap layer;
    // an empty root must instead reach the walker and fail as EmptyRoot.
    #[arg(value_parser = clap::builder::OsStringValueParser::new().map(PathBuf::from))]
    path: PathBuf,

    /// Print every visited path before the totals
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Count entries only, without resolving file sizes
    #[arg(long = "no-size")]
    no_size: bool,

    /// Skip entries whose root-relative path matches REGEX (can be used multiple times)
    #[arg(short = 'e', long = "exclude", value_name = "REGEX")]
    exclude: Vec<String>,

    /// Behavior when a directory cannot be listed
    #[arg(long = "on-list-error", value_name = "POLICY", default_value = "skip")]
    on_list_error: ErrorMode,

    /// Behavior when an entry cannot be stat'd
    #[arg(long = "on-stat-error", value_name = "POLICY", default_value = "skip")]
    on_stat_error: ErrorMode,

    /// Output in JSON format
    #[arg(long = "json", conflicts_with = "human")]
    json: bool,

    /// Output as a human-readable summary block
    #[arg(long = "human", conflicts_with = "json")]
    human: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn main() {
    let args = Args::parse();

    let mut exclude = Vec::with_capacity(args.exclude.len());
    for pattern in &args.exclude {
        match Regex::new(pattern) {
            Ok(re) => exclude.push(re),
            Err(e) => {
                eprintln!("dirwalk: invalid --exclude pattern '{}': {}", pattern, e);
                process::exit(1);
            }
        }
    }

    let walker = Walker::new(WalkConfig {
        on_list_error: args.on_list_error.into(),
        exclude,
    });
    let mut collector = SummaryCollector::new(CollectorConfig {
        track_sizes: !args.no_size,
        on_stat_error: args.on_stat_error.into(),
    });

    let started = Instant::now();
    if let Err(e) = walker.walk(&args.path, &mut collector) {
        // The plain report opens with the root line; keep that much of it
        // when the walk dies, so pipelines still see which root was tried.
        if !args.json && !args.human {
            println!("{}", args.path.display());
        }
        eprintln!("dirwalk: {}", e);
        process::exit(1);
    }
    let elapsed = started.elapsed();

    let summary = collector.finalize(args.path);

    let result = if args.json {
        print_json(&summary, args.list)
    } else if args.human {
        print_human(&summary, elapsed, should_use_color(args.color))
    } else {
        print_plain(&summary, args.list)
    };

    if let Err(e) = result {
        eprintln!("dirwalk: error writing output: {}", e);
        process::exit(1);
    }

    // The warning must trail the report.
    if !summary.skipped.is_empty() {
        eprintln!("dirwalk: warning: skipped {}", summary.skipped.describe());
    }
}
