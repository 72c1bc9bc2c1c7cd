//! Performance benchmarks for inodiff

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use inodiff::{Entry, InodeIndex, Side, TreeWalker};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn entry(inode: u64, side: Side) -> Entry {
    Entry {
        inode,
        path: PathBuf::from(format!("/snapshot/file_{}", inode)),
        size: 4096,
        sides: side.mask(),
    }
}

fn create_snapshot_with_files(file_count: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    for i in 0..file_count {
        let file_path = dir.path().join(format!("file_{}.dat", i));
        fs::write(&file_path, format!("contents of file {}", i)).unwrap();
    }
    dir
}

fn bench_index_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_insert");

    // Sequential inodes at the default table size: no resize pressure.
    group.bench_function("insert_10k_distinct", |b| {
        b.iter(|| {
            let mut index = InodeIndex::new();
            for i in 0..10_000u64 {
                index.insert_or_merge(black_box(entry(i, Side::Old)));
            }
            index
        })
    });

    // A tiny initial table forces the full resize cascade.
    group.bench_function("insert_10k_with_resizes", |b| {
        b.iter(|| {
            let mut index = InodeIndex::with_initial_bits(1);
            for i in 0..10_000u64 {
                index.insert_or_merge(black_box(entry(i, Side::Old)));
            }
            index
        })
    });

    // Second pass over the same inodes: pure merge traffic, no growth.
    group.bench_function("merge_10k_existing", |b| {
        b.iter(|| {
            let mut index = InodeIndex::new();
            for i in 0..10_000u64 {
                index.insert_or_merge(entry(i, Side::Old));
            }
            for i in 0..10_000u64 {
                index.insert_or_merge(black_box(entry(i, Side::New)));
            }
            index
        })
    });

    group.finish();
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_walk");

    let small = create_snapshot_with_files(100);
    group.bench_function("walk_100_files", |b| {
        b.iter(|| {
            let mut index = InodeIndex::new();
            TreeWalker::new().walk(black_box(small.path()), Side::Old, &mut index);
            index
        })
    });

    let large = create_snapshot_with_files(1000);
    group.bench_function("walk_1000_files", |b| {
        b.iter(|| {
            let mut index = InodeIndex::new();
            TreeWalker::new().walk(black_box(large.path()), Side::Old, &mut index);
            index
        })
    });

    group.finish();
}

criterion_group!(benches, bench_index_insert, bench_walk);
criterion_main!(benches);
