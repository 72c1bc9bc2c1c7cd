//! CLI entry point for inodiff

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use inodiff::{
    InodeIndex, Report, Side, SortMode, TreeWalker, print_index_stats, print_json, print_report,
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

#[derive(Parser, Debug)]
#[command(name = "inodiff")]
#[command(about = "Compare two directory snapshots by inode identity")]
#[command(version)]
struct Args {
    /// Directory holding the old snapshot
    old_dir: PathBuf,

    /// Directory holding the new snapshot
    new_dir: PathBuf,

    /// Sort report entries by size instead of by name
    #[arg(short = 's', long = "size-sort")]
    size_sort: bool,

    /// Output the report in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Print index occupancy statistics to stderr after walking
    #[arg(long = "stats")]
    stats: bool,

    /// Ignore entries matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::DisplayHelp || e.kind() == ErrorKind::DisplayVersion => {
            e.exit()
        }
        Err(_) => {
            // Usage goes to stdout and the process exits 2, before any
            // walking happens.
            let _ = Args::command().print_help();
            process::exit(2);
        }
    };

    let mut index = InodeIndex::new();
    let walker = TreeWalker::with_ignore_patterns(&args.ignore);
    walker.walk(&args.old_dir, Side::Old, &mut index);
    walker.walk(&args.new_dir, Side::New, &mut index);

    if args.stats {
        print_index_stats(&index.stats());
    }

    let sort = if args.size_sort {
        SortMode::BySize
    } else {
        SortMode::ByName
    };
    let report = Report::build(
        &index,
        &args.old_dir.to_string_lossy(),
        &args.new_dir.to_string_lossy(),
        sort,
    );

    let result = if args.json {
        print_json(&report)
    } else {
        print_report(&report, should_use_color(args.color))
    };

    if let Err(e) = result {
        eprintln!("inodiff: error writing output: {}", e);
        process::exit(1);
    }
}
