//! Report assembly: sorting, partitioning, and totals

use crate::index::{Entry, InodeIndex, SideMask};

/// Key used to order report entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Lexicographic on the full path (default).
    #[default]
    ByName,
    /// Ascending byte size.
    BySize,
}

/// The computed comparison: one borrowed view per partition plus totals.
///
/// Holds shared references into the index's entries — the sort view never
/// clones or takes ownership. Entries seen on both sides belong to neither
/// partition: they were neither removed nor added.
pub struct Report<'a> {
    pub old_label: String,
    pub new_label: String,
    /// Entries with exactly the OLD bit set, in sort order.
    pub old_only: Vec<&'a Entry>,
    /// Entries with exactly the NEW bit set, in sort order.
    pub new_only: Vec<&'a Entry>,
    /// Total bytes across `old_only`.
    pub removed_bytes: u64,
    /// Total bytes across `new_only`.
    pub added_bytes: u64,
}

impl<'a> Report<'a> {
    /// Sort all entries by the requested key, then partition into old-only
    /// and new-only subsets, preserving the sort order within each.
    ///
    /// The sort is stable, so equal keys keep the index's enumeration
    /// order.
    pub fn build(
        index: &'a InodeIndex,
        old_label: &str,
        new_label: &str,
        sort: SortMode,
    ) -> Report<'a> {
        let mut entries: Vec<&Entry> = index.iter().collect();
        match sort {
            SortMode::ByName => entries.sort_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str())),
            SortMode::BySize => entries.sort_by_key(|e| e.size),
        }

        let mut old_only = Vec::new();
        let mut new_only = Vec::new();
        let mut removed_bytes = 0u64;
        let mut added_bytes = 0u64;
        for entry in entries {
            if entry.sides == SideMask::OLD {
                removed_bytes += entry.size;
                old_only.push(entry);
            } else if entry.sides == SideMask::NEW {
                added_bytes += entry.size;
                new_only.push(entry);
            }
        }

        Report {
            old_label: old_label.to_string(),
            new_label: new_label.to_string(),
            old_only,
            new_only,
            removed_bytes,
            added_bytes,
        }
    }

    /// Number of old-only entries.
    pub fn removed_count(&self) -> usize {
        self.old_only.len()
    }

    /// Number of new-only entries.
    pub fn added_count(&self) -> usize {
        self.new_only.len()
    }
}
