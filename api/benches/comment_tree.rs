use std::collections::{HashMap, HashSet};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::RngExt;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("comment_tree");
    for p in [(10, 2), (100, 5), (1000, 20), (10000, 50), (100000, 200)].iter() {
        let (nodes, roots) = generate_forest(p.0, p.1);
        group.bench_function(BenchmarkId::new("count", p.0), |b| {
            b.iter(|| count(&nodes, &roots))
        });
        group.bench_function(BenchmarkId::new("most_recent", p.0), |b| {
            b.iter(|| most_recent(&nodes, &roots))
        });
    }
    group.finish();
}

#[derive(Clone)]
struct Comment {
    id: i32,
    commented_date: chrono::NaiveDateTime,
    reply_ids: Vec<i32>,
}

// Random forest: every node except the first few roots replies to some
// earlier node, giving realistic branchy trees with long chains mixed in.
fn generate_forest(n: usize, root_count: usize) -> (HashMap<i32, Comment>, Vec<i32>) {
    let mut nodes = HashMap::with_capacity(n);
    let mut roots = vec![];

    for i in 0..n {
        let id = i as i32;
        let comment = Comment {
            id,
            commented_date: chrono::offset::Local::now().naive_local(),
            reply_ids: vec![],
        };
        nodes.insert(id, comment);

        if i < root_count {
            roots.push(id);
        } else {
            let parent = rand::rng().random_range(0..i) as i32;
            nodes
                .get_mut(&parent)
                .expect("parent was inserted earlier")
                .reply_ids
                .push(id);
        }
    }

    (nodes, roots)
}

fn walk<'a>(
    nodes: &'a HashMap<i32, Comment>,
    roots: &[i32],
    mut visit: impl FnMut(&'a Comment),
) {
    let mut stack = roots.to_vec();
    let mut visited = HashSet::new();

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(node) = nodes.get(&id) else {
            continue;
        };
        stack.extend(node.reply_ids.iter().rev());
        visit(node);
    }
}

fn count(nodes: &HashMap<i32, Comment>, roots: &[i32]) -> usize {
    let mut n = 0;
    walk(nodes, roots, |_| n += 1);
    n
}

fn most_recent<'a>(nodes: &'a HashMap<i32, Comment>, roots: &[i32]) -> Option<&'a Comment> {
    let mut best: Option<&Comment> = None;
    walk(nodes, roots, |node| match best {
        Some(b)
            if node.commented_date > b.commented_date
                || (node.commented_date == b.commented_date && node.id < b.id) =>
        {
            best = Some(node)
        }
        None => best = Some(node),
        _ => {}
    });
    best
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
