//! Benchmarks for navigation tree building and rendering.

use std::fs;
use std::path::{Path, PathBuf};

use asmd_site::{TreeBuilder, render_navbar};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

/// Create a content tree with specified depth and breadth.
///
/// Returns the path of a page at the deepest level of the first branch.
fn create_content_tree(root: &Path, depth: usize, breadth: usize) -> PathBuf {
    fn create_level(dir: &Path, current_depth: usize, max_depth: usize, breadth: usize) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("view.md"), format!("# Level {current_depth}")).unwrap();
        for i in 0..breadth {
            fs::write(dir.join(format!("page-{i}.md")), "content").unwrap();
        }
        if current_depth == max_depth {
            return;
        }
        for i in 0..breadth {
            create_level(
                &dir.join(format!("section-{i}")),
                current_depth + 1,
                max_depth,
                breadth,
            );
        }
    }

    create_level(root, 0, depth, breadth);

    (0..depth)
        .fold(root.to_path_buf(), |dir, _| dir.join("section-0"))
        .join("page-0.md")
}

fn bench_build_tree(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    let builder = TreeBuilder::default();

    let mut group = c.benchmark_group("build_tree");

    for (depth, breadth) in [(2, 5), (3, 4), (4, 3)] {
        let root = temp_dir.path().join(format!("pub_{depth}_{breadth}"));
        let goal = create_content_tree(&root, depth, breadth);

        group.bench_with_input(
            BenchmarkId::new("depth_breadth", format!("{depth}x{breadth}")),
            &(root, goal),
            |b, (root, goal)| b.iter(|| builder.build(root, goal)),
        );
    }

    group.finish();
}

fn bench_render_navbar(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path().join("pub");
    let goal = create_content_tree(&root, 4, 4);
    let tree = TreeBuilder::default().build(&root, &goal);

    c.bench_function("render_navbar", |b| b.iter(|| render_navbar(&tree)));
}

criterion_group!(benches, bench_build_tree, bench_render_navbar);
criterion_main!(benches);
