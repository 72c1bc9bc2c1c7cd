//! inodiff - Compare two directory snapshots by inode identity

pub mod bytes;
pub mod index;
pub mod output;
pub mod report;
pub mod walk;

pub use bytes::humanize;
pub use index::{Entry, IndexStats, InodeIndex, Side, SideMask};
pub use output::{print_index_stats, print_json, print_report};
pub use report::{Report, SortMode};
pub use walk::TreeWalker;
