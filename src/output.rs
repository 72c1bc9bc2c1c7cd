//! Report rendering: stable text format and JSON

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::bytes::humanize;
use crate::index::{Entry, IndexStats};
use crate::report::Report;

const SEPARATOR: &str = "-----------------------------------------------------------";

/// Print the stable text report to stdout.
///
/// Layout: removed block, separator, added block, separator, two summary
/// lines. Entry lines are tinted (removed red, added green, summary bold)
/// when color is enabled; color never changes the uncolored byte stream.
pub fn print_report(report: &Report<'_>, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);

    let mut removed_color = ColorSpec::new();
    removed_color.set_fg(Some(Color::Red));
    for entry in &report.old_only {
        stdout.set_color(&removed_color)?;
        writeln!(
            stdout,
            "    Removed: {:>11}  {}",
            humanize(entry.size),
            entry.path.display()
        )?;
    }
    stdout.reset()?;

    writeln!(stdout, "\n{}\n", SEPARATOR)?;

    let mut added_color = ColorSpec::new();
    added_color.set_fg(Some(Color::Green));
    for entry in &report.new_only {
        stdout.set_color(&added_color)?;
        writeln!(
            stdout,
            "    New: {:>15}  {}",
            humanize(entry.size),
            entry.path.display()
        )?;
    }
    stdout.reset()?;

    writeln!(stdout, "\n{}", SEPARATOR)?;

    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    stdout.set_color(&bold)?;
    writeln!(
        stdout,
        "Removed {:>5} files from {}, {}",
        report.removed_count(),
        report.old_label,
        humanize(report.removed_bytes)
    )?;
    writeln!(
        stdout,
        "Added   {:>5} files to   {}, {}",
        report.added_count(),
        report.new_label,
        humanize(report.added_bytes)
    )?;
    stdout.reset()?;

    Ok(())
}

/// One report entry in JSON form.
#[derive(Serialize)]
struct JsonEntry<'a> {
    path: &'a Path,
    size: u64,
    size_human: String,
}

/// The whole report in JSON form.
#[derive(Serialize)]
struct JsonReport<'a> {
    old_dir: &'a str,
    new_dir: &'a str,
    removed: Vec<JsonEntry<'a>>,
    added: Vec<JsonEntry<'a>>,
    removed_count: usize,
    removed_bytes: u64,
    removed_human: String,
    added_count: usize,
    added_bytes: u64,
    added_human: String,
}

fn to_json<'a>(entries: &[&'a Entry]) -> Vec<JsonEntry<'a>> {
    entries
        .iter()
        .map(|e| JsonEntry {
            path: e.path.as_path(),
            size: e.size,
            size_human: humanize(e.size),
        })
        .collect()
}

impl<'a> JsonReport<'a> {
    fn from_report(report: &'a Report<'_>) -> JsonReport<'a> {
        JsonReport {
            old_dir: &report.old_label,
            new_dir: &report.new_label,
            removed: to_json(&report.old_only),
            added: to_json(&report.new_only),
            removed_count: report.removed_count(),
            removed_bytes: report.removed_bytes,
            removed_human: humanize(report.removed_bytes),
            added_count: report.added_count(),
            added_bytes: report.added_bytes,
            added_human: humanize(report.added_bytes),
        }
    }
}

/// Print the report as pretty-printed JSON to stdout.
pub fn print_json(report: &Report<'_>) -> io::Result<()> {
    let json = serde_json::to_string_pretty(&JsonReport::from_report(report))
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}

/// Print index occupancy statistics to stderr (the `--stats` flag).
pub fn print_index_stats(stats: &IndexStats) {
    let percent = if stats.buckets == 0 {
        0.0
    } else {
        100.0 * stats.used as f64 / stats.buckets as f64
    };
    eprintln!(
        "index: {} buckets, {} used ({:.1}%), chain depth mean {:.1}, max {}",
        stats.buckets, stats.used, percent, stats.mean_depth, stats.max_depth
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{Entry, InodeIndex, Side};
    use crate::report::SortMode;
    use std::path::PathBuf;

    fn sample_index() -> InodeIndex {
        let mut index = InodeIndex::new();
        index.insert_or_merge(Entry {
            inode: 1,
            path: PathBuf::from("old/b.txt"),
            size: 2048,
            sides: Side::Old.mask(),
        });
        index.insert_or_merge(Entry {
            inode: 2,
            path: PathBuf::from("new/c.txt"),
            size: 500,
            sides: Side::New.mask(),
        });
        index
    }

    #[test]
    fn test_json_report_shape() {
        let index = sample_index();
        let report = Report::build(&index, "old", "new", SortMode::ByName);
        let json = serde_json::to_value(JsonReport::from_report(&report)).unwrap();

        assert_eq!(json["old_dir"], "old");
        assert_eq!(json["new_dir"], "new");
        assert_eq!(json["removed"].as_array().unwrap().len(), 1);
        assert_eq!(json["removed"][0]["path"], "old/b.txt");
        assert_eq!(json["removed"][0]["size"], 2048);
        assert_eq!(json["removed"][0]["size_human"], "2.00 KiB");
        assert_eq!(json["added"][0]["path"], "new/c.txt");
        assert_eq!(json["added"][0]["size_human"], "500 Bytes");
        assert_eq!(json["removed_count"], 1);
        assert_eq!(json["removed_bytes"], 2048);
        assert_eq!(json["added_count"], 1);
        assert_eq!(json["added_bytes"], 500);
    }

    #[test]
    fn test_json_report_empty() {
        let index = InodeIndex::new();
        let report = Report::build(&index, "a", "b", SortMode::ByName);
        let json = serde_json::to_value(JsonReport::from_report(&report)).unwrap();

        assert_eq!(json["removed"].as_array().unwrap().len(), 0);
        assert_eq!(json["added"].as_array().unwrap().len(), 0);
        assert_eq!(json["removed_human"], "0 Bytes");
        assert_eq!(json["added_human"], "0 Bytes");
    }
}
