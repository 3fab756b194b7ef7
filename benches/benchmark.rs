use criterion::{Criterion, criterion_group, criterion_main};
use roguewick::newick::parse_trees;
use roguewick::rogue::{Forest, RogueConfig, RogueSearch};
use std::hint::black_box;

/// (name, number of taxa, number of trees)
const SYNTHETIC_FORESTS: &[(&str, usize, usize)] = &[
    ("n16-t100", 16, 100),
    ("n32-t100", 32, 100),
    ("n32-t500", 32, 500),
];

/// Balanced tree over `T0..Tn` with the wandering taxon `W` attached
/// next to a taxon that changes from tree to tree.
fn synthetic_newick(num_taxa: usize, num_trees: usize) -> String {
    fn balanced(taxa: &[String]) -> String {
        match taxa {
            [only] => only.clone(),
            _ => {
                let (left, right) = taxa.split_at(taxa.len() / 2);
                format!("({}:1,{}:1)", balanced(left), balanced(right))
            }
        }
    }

    let mut lines = String::new();
    for i in 0..num_trees {
        let taxa: Vec<String> = (0..num_taxa - 1)
            .map(|t| {
                if t == (i * 7) % (num_taxa - 1) {
                    format!("(T{t}:1,W:1)")
                } else {
                    format!("T{t}")
                }
            })
            .collect();
        lines.push_str(&balanced(&taxa));
        lines.push_str(";\n");
    }
    lines
}

fn synthetic_forest(num_taxa: usize, num_trees: usize) -> Forest {
    let (trees, labels) = parse_trees(&synthetic_newick(num_taxa, num_trees)).unwrap();
    Forest::new(trees, labels).unwrap()
}

fn rogue_iteration(c: &mut Criterion) {
    for &(name, num_taxa, num_trees) in SYNTHETIC_FORESTS {
        let forest = synthetic_forest(num_taxa, num_trees);
        for (suffix, config) in [
            ("seq", RogueConfig::default().with_threads(1)),
            ("par", RogueConfig::default()),
        ] {
            c.bench_function(&format!("{name}-{suffix}"), |b| {
                b.iter(|| {
                    let search = RogueSearch::new(forest.clone(), config.clone()).unwrap();
                    black_box(search.run().unwrap())
                });
            });
        }
    }
}

fn newick_parsing(c: &mut Criterion) {
    let newick = synthetic_newick(64, 1000);
    c.bench_function("parse-n64-t1k", |b| {
        b.iter(|| parse_trees(black_box(&newick)).unwrap());
    });
}

criterion_group!(regression, newick_parsing);
criterion_group! {
    name = search;
    config = Criterion::default().sample_size(10);
    targets = rogue_iteration
}
criterion_main!(regression, search);
