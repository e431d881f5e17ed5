//! Traversal benchmarks over synthetic in-memory trees.

#![allow(missing_docs)]

use std::hint::black_box;

use camino::Utf8Path;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ft_walker::{CountingVisitor, FileCollector, MemoryFs, walk, walk_file_tree};

/// Builds a tree `levels` deep where every directory holds `fanout`
/// subdirectories and `fanout` files.
fn synthetic_tree(levels: usize, fanout: usize) -> MemoryFs {
    let mut fs = MemoryFs::new().with_dir("root");
    let mut frontier = vec!["root".to_owned()];

    for _ in 0..levels {
        let mut next = Vec::with_capacity(frontier.len() * fanout);
        for dir in &frontier {
            for i in 0..fanout {
                fs.add_file(format!("{dir}/file{i}.txt"), 64);
                let sub = format!("{dir}/dir{i}");
                fs.add_dir(sub.as_str());
                next.push(sub);
            }
        }
        frontier = next;
    }
    fs
}

fn bench_full_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_walk");
    for (levels, fanout) in [(3, 4), (4, 6)] {
        let fs = synthetic_tree(levels, fanout);
        group.bench_with_input(
            BenchmarkId::new("counting", format!("{levels}x{fanout}")),
            &fs,
            |b, fs| {
                b.iter(|| {
                    let mut counter = CountingVisitor::new();
                    walk_file_tree(fs, black_box(Utf8Path::new("root")), &mut counter)
                        .map(|_| counter.stats())
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("collect", format!("{levels}x{fanout}")),
            &fs,
            |b, fs| {
                b.iter(|| {
                    let mut collector = FileCollector::new();
                    walk_file_tree(fs, black_box(Utf8Path::new("root")), &mut collector)
                        .map(|_| collector.into_files())
                });
            },
        );
    }
    group.finish();
}

fn bench_depth_limited(c: &mut Criterion) {
    let fs = synthetic_tree(4, 6);
    c.bench_function("depth_limited_2", |b| {
        b.iter(|| {
            let mut counter = CountingVisitor::new();
            walk(&fs, black_box(Utf8Path::new("root")), &mut counter, 2).map(|_| counter.stats())
        });
    });
}

criterion_group!(benches, bench_full_walk, bench_depth_limited);
criterion_main!(benches);
