//! Recursive directory walking that feeds the inode index

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use glob::Pattern;

use crate::index::{Entry, InodeIndex, Side};

/// Recursive walker that records every non-directory entry under a root
/// into an [`InodeIndex`], tagged with one side.
///
/// Failures are contained: an unreadable directory is reported to stderr
/// and contributes no entries, while traversal of sibling and ancestor
/// directories continues. Nothing the walker encounters changes the
/// process exit status.
pub struct TreeWalker {
    ignore_patterns: Vec<Pattern>,
}

impl TreeWalker {
    pub fn new() -> Self {
        Self {
            ignore_patterns: Vec::new(),
        }
    }

    /// Skip entries whose file name matches any of the given glob patterns.
    ///
    /// A matching directory is skipped with its whole subtree. Invalid
    /// patterns are reported and dropped.
    pub fn with_ignore_patterns(patterns: &[String]) -> Self {
        let ignore_patterns = patterns
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    eprintln!("inodiff: skipping invalid ignore pattern '{}': {}", p, e);
                    None
                }
            })
            .collect();
        Self { ignore_patterns }
    }

    /// Walk the tree rooted at `root`, tagging every recorded entry with
    /// `side`. Called once per side before the report is built.
    pub fn walk(&self, root: &Path, side: Side, index: &mut InodeIndex) {
        self.walk_dir(root, side, index);
    }

    fn walk_dir(&self, dir: &Path, side: Side, index: &mut InodeIndex) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!(
                    "inodiff: cannot open directory '{}': {}",
                    dir.display(),
                    describe_io_error(&e)
                );
                return;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // The stream is in an unknown state after a read error;
                    // stop enumerating this directory only.
                    eprintln!(
                        "inodiff: error reading directory '{}': {}",
                        dir.display(),
                        describe_io_error(&e)
                    );
                    break;
                }
            };

            if self.is_ignored(&entry.file_name()) {
                continue;
            }

            let path = entry.path();

            // file_type and metadata on a DirEntry do not traverse symlinks,
            // so a symlink to a directory is recorded as a leaf entry and
            // never followed.
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(e) => {
                    eprintln!(
                        "inodiff: cannot stat '{}': {}",
                        path.display(),
                        describe_io_error(&e)
                    );
                    continue;
                }
            };

            if file_type.is_dir() {
                self.walk_dir(&path, side, index);
                continue;
            }

            match entry.metadata() {
                Ok(meta) => index.insert_or_merge(Entry {
                    inode: meta.ino(),
                    path,
                    size: meta.size(),
                    sides: side.mask(),
                }),
                Err(e) => eprintln!(
                    "inodiff: cannot stat '{}': {}",
                    path.display(),
                    describe_io_error(&e)
                ),
            }
        }
    }

    fn is_ignored(&self, name: &OsStr) -> bool {
        if self.ignore_patterns.is_empty() {
            return false;
        }
        let name = name.to_string_lossy();
        self.ignore_patterns.iter().any(|p| p.matches(&name))
    }
}

impl Default for TreeWalker {
    fn default() -> Self {
        Self::new()
    }
}

/// Map an I/O failure to the short reason used in walk diagnostics.
fn describe_io_error(e: &io::Error) -> String {
    match e.kind() {
        io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        io::ErrorKind::NotFound => "no such directory".to_string(),
        io::ErrorKind::NotADirectory => "not a directory".to_string(),
        io::ErrorKind::OutOfMemory => "out of memory".to_string(),
        _ => match e.raw_os_error() {
            Some(code) => format!("os error {}", code),
            None => e.to_string(),
        },
    }
}
